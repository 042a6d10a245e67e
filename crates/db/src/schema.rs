use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            email VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create profiles table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL UNIQUE REFERENCES users(id),
            name VARCHAR(100) NOT NULL,
            role VARCHAR(10) NOT NULL CHECK (role IN ('mentor', 'mentee')),
            industries TEXT[] NOT NULL DEFAULT '{}',
            about VARCHAR(1000) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create mentorship_requests table. The unique pair constraint is what
    // keeps a mentee from holding more than one request to the same mentor,
    // whatever its status.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS mentorship_requests (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            mentee_id UUID NOT NULL REFERENCES profiles(id),
            mentor_id UUID NOT NULL REFERENCES profiles(id),
            proposal VARCHAR(2000) NOT NULL,
            preferred_time TIMESTAMP WITH TIME ZONE NOT NULL,
            status VARCHAR(10) NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'accepted', 'declined')),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT uq_request_pair UNIQUE (mentee_id, mentor_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create sessions table. The unique request_id enforces at most one
    // session per mentorship request.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            request_id UUID NOT NULL UNIQUE REFERENCES mentorship_requests(id) ON DELETE CASCADE,
            meeting_link VARCHAR(2000) NOT NULL,
            scheduled_time TIMESTAMP WITH TIME ZONE NOT NULL,
            status VARCHAR(10) NOT NULL DEFAULT 'scheduled'
                CHECK (status IN ('scheduled', 'completed', 'cancelled')),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_profiles_role ON profiles(role);
        CREATE INDEX IF NOT EXISTS idx_requests_mentee_id ON mentorship_requests(mentee_id);
        CREATE INDEX IF NOT EXISTS idx_requests_mentor_id ON mentorship_requests(mentor_id);
        CREATE INDEX IF NOT EXISTS idx_requests_status ON mentorship_requests(status);
        CREATE INDEX IF NOT EXISTS idx_requests_created_at ON mentorship_requests(created_at DESC);
        CREATE INDEX IF NOT EXISTS idx_sessions_status ON sessions(status);
        CREATE INDEX IF NOT EXISTS idx_sessions_scheduled_time ON sessions(scheduled_time);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
