use crate::models::DbProfile;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Inserts a profile for a user. Returns `None` when the user already has
/// one; the unique index on `user_id` enforces the 1:1 relationship.
pub async fn create_profile(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    name: &str,
    role: &str,
    industries: &[String],
    about: Option<&str>,
) -> Result<Option<DbProfile>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating profile: id={}, user_id={}, role={}", id, user_id, role);

    let profile = sqlx::query_as::<_, DbProfile>(
        r#"
        INSERT INTO profiles (id, user_id, name, role, industries, about, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
        ON CONFLICT (user_id) DO NOTHING
        RETURNING id, user_id, name, role, industries, about, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(name)
    .bind(role)
    .bind(industries)
    .bind(about)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

pub async fn get_profile_by_user_id(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Option<DbProfile>> {
    tracing::debug!("Getting profile by user id: {}", user_id);

    let profile = sqlx::query_as::<_, DbProfile>(
        r#"
        SELECT id, user_id, name, role, industries, about, created_at, updated_at
        FROM profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

pub async fn get_profile_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbProfile>> {
    tracing::debug!("Getting profile by id: {}", id);

    let profile = sqlx::query_as::<_, DbProfile>(
        r#"
        SELECT id, user_id, name, role, industries, about, created_at, updated_at
        FROM profiles
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

/// Loads a profile only if it carries the expected role. Used to confirm a
/// request target really is a mentor.
pub async fn get_profile_by_id_and_role(
    pool: &Pool<Postgres>,
    id: Uuid,
    role: &str,
) -> Result<Option<DbProfile>> {
    tracing::debug!("Getting profile by id and role: id={}, role={}", id, role);

    let profile = sqlx::query_as::<_, DbProfile>(
        r#"
        SELECT id, user_id, name, role, industries, about, created_at, updated_at
        FROM profiles
        WHERE id = $1 AND role = $2
        "#,
    )
    .bind(id)
    .bind(role)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

pub async fn update_profile(
    pool: &Pool<Postgres>,
    id: Uuid,
    name: &str,
    role: &str,
    industries: &[String],
    about: Option<&str>,
) -> Result<Option<DbProfile>> {
    tracing::debug!("Updating profile: id={}", id);

    let profile = sqlx::query_as::<_, DbProfile>(
        r#"
        UPDATE profiles
        SET name = $2, role = $3, industries = $4, about = $5, updated_at = $6
        WHERE id = $1
        RETURNING id, user_id, name, role, industries, about, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(role)
    .bind(industries)
    .bind(about)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

pub async fn get_profiles_by_role(pool: &Pool<Postgres>, role: &str) -> Result<Vec<DbProfile>> {
    tracing::debug!("Listing profiles by role: {}", role);

    let profiles = sqlx::query_as::<_, DbProfile>(
        r#"
        SELECT id, user_id, name, role, industries, about, created_at, updated_at
        FROM profiles
        WHERE role = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(role)
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}
