use crate::models::DbSession;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Inserts a session in `scheduled` state. Returns `None` when the request
/// already carries a session; the unique index on `request_id` arbitrates
/// concurrent creates.
pub async fn create_session(
    pool: &Pool<Postgres>,
    request_id: Uuid,
    meeting_link: &str,
    scheduled_time: DateTime<Utc>,
) -> Result<Option<DbSession>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating session: id={}, request_id={}", id, request_id);

    let session = sqlx::query_as::<_, DbSession>(
        r#"
        INSERT INTO sessions
            (id, request_id, meeting_link, scheduled_time, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, 'scheduled', $5, $5)
        ON CONFLICT (request_id) DO NOTHING
        RETURNING id, request_id, meeting_link, scheduled_time, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(request_id)
    .bind(meeting_link)
    .bind(scheduled_time)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

pub async fn get_session_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSession>> {
    tracing::debug!("Getting session by id: {}", id);

    let session = sqlx::query_as::<_, DbSession>(
        r#"
        SELECT id, request_id, meeting_link, scheduled_time, status, created_at, updated_at
        FROM sessions
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

pub async fn get_sessions_by_mentee(
    pool: &Pool<Postgres>,
    mentee_id: Uuid,
) -> Result<Vec<DbSession>> {
    tracing::debug!("Listing sessions for mentee: {}", mentee_id);

    let sessions = sqlx::query_as::<_, DbSession>(
        r#"
        SELECT s.id, s.request_id, s.meeting_link, s.scheduled_time, s.status,
               s.created_at, s.updated_at
        FROM sessions s
        JOIN mentorship_requests r ON s.request_id = r.id
        WHERE r.mentee_id = $1
        ORDER BY s.scheduled_time DESC
        "#,
    )
    .bind(mentee_id)
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}

pub async fn get_sessions_by_mentor(
    pool: &Pool<Postgres>,
    mentor_id: Uuid,
) -> Result<Vec<DbSession>> {
    tracing::debug!("Listing sessions for mentor: {}", mentor_id);

    let sessions = sqlx::query_as::<_, DbSession>(
        r#"
        SELECT s.id, s.request_id, s.meeting_link, s.scheduled_time, s.status,
               s.created_at, s.updated_at
        FROM sessions s
        JOIN mentorship_requests r ON s.request_id = r.id
        WHERE r.mentor_id = $1
        ORDER BY s.scheduled_time DESC
        "#,
    )
    .bind(mentor_id)
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}

pub async fn update_session(
    pool: &Pool<Postgres>,
    id: Uuid,
    meeting_link: &str,
    scheduled_time: DateTime<Utc>,
) -> Result<Option<DbSession>> {
    tracing::debug!("Updating session: id={}", id);

    let session = sqlx::query_as::<_, DbSession>(
        r#"
        UPDATE sessions
        SET meeting_link = $2, scheduled_time = $3, updated_at = $4
        WHERE id = $1
        RETURNING id, request_id, meeting_link, scheduled_time, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(meeting_link)
    .bind(scheduled_time)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

pub async fn update_session_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: &str,
) -> Result<Option<DbSession>> {
    tracing::debug!("Updating session status: id={}, status={}", id, status);

    let session = sqlx::query_as::<_, DbSession>(
        r#"
        UPDATE sessions
        SET status = $2, updated_at = $3
        WHERE id = $1
        RETURNING id, request_id, meeting_link, scheduled_time, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(status)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

pub async fn delete_session(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    tracing::debug!("Deleting session: {}", id);

    let result = sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
