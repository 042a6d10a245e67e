use crate::models::DbMentorshipRequest;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Inserts a new request in `pending` state. Returns `None` when a request
/// for the `(mentee_id, mentor_id)` pair already exists, whatever its
/// status -- the unique pair constraint decides, so two concurrent creates
/// cannot both succeed.
pub async fn create_request(
    pool: &Pool<Postgres>,
    mentee_id: Uuid,
    mentor_id: Uuid,
    proposal: &str,
    preferred_time: DateTime<Utc>,
) -> Result<Option<DbMentorshipRequest>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating mentorship request: id={}, mentee_id={}, mentor_id={}",
        id, mentee_id, mentor_id
    );

    let request = sqlx::query_as::<_, DbMentorshipRequest>(
        r#"
        INSERT INTO mentorship_requests
            (id, mentee_id, mentor_id, proposal, preferred_time, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, 'pending', $6, $6)
        ON CONFLICT (mentee_id, mentor_id) DO NOTHING
        RETURNING id, mentee_id, mentor_id, proposal, preferred_time, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(mentee_id)
    .bind(mentor_id)
    .bind(proposal)
    .bind(preferred_time)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(request)
}

pub async fn get_request_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbMentorshipRequest>> {
    tracing::debug!("Getting mentorship request by id: {}", id);

    let request = sqlx::query_as::<_, DbMentorshipRequest>(
        r#"
        SELECT id, mentee_id, mentor_id, proposal, preferred_time, status, created_at, updated_at
        FROM mentorship_requests
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(request)
}

pub async fn get_requests_by_mentee(
    pool: &Pool<Postgres>,
    mentee_id: Uuid,
) -> Result<Vec<DbMentorshipRequest>> {
    tracing::debug!("Listing mentorship requests for mentee: {}", mentee_id);

    let requests = sqlx::query_as::<_, DbMentorshipRequest>(
        r#"
        SELECT id, mentee_id, mentor_id, proposal, preferred_time, status, created_at, updated_at
        FROM mentorship_requests
        WHERE mentee_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(mentee_id)
    .fetch_all(pool)
    .await?;

    Ok(requests)
}

pub async fn get_requests_by_mentor(
    pool: &Pool<Postgres>,
    mentor_id: Uuid,
) -> Result<Vec<DbMentorshipRequest>> {
    tracing::debug!("Listing mentorship requests for mentor: {}", mentor_id);

    let requests = sqlx::query_as::<_, DbMentorshipRequest>(
        r#"
        SELECT id, mentee_id, mentor_id, proposal, preferred_time, status, created_at, updated_at
        FROM mentorship_requests
        WHERE mentor_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(mentor_id)
    .fetch_all(pool)
    .await?;

    Ok(requests)
}

/// Moves a request out of `pending` into `accepted` or `declined` as a
/// single conditional write. Returns `None` when the row is absent or no
/// longer pending; of two racing transitions exactly one gets the row back.
pub async fn update_request_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: &str,
) -> Result<Option<DbMentorshipRequest>> {
    tracing::debug!("Updating mentorship request status: id={}, status={}", id, status);

    let request = sqlx::query_as::<_, DbMentorshipRequest>(
        r#"
        UPDATE mentorship_requests
        SET status = $2, updated_at = $3
        WHERE id = $1 AND status = 'pending'
        RETURNING id, mentee_id, mentor_id, proposal, preferred_time, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(status)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(request)
}

/// Deletes a request only while it is still pending. Returns whether a row
/// was removed.
pub async fn delete_request_if_pending(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    tracing::debug!("Deleting pending mentorship request: {}", id);

    let result = sqlx::query(
        r#"
        DELETE FROM mentorship_requests
        WHERE id = $1 AND status = 'pending'
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// True when any non-declined request references the profile on either
/// side. The profile role-change guard keys off this.
pub async fn has_active_requests(pool: &Pool<Postgres>, profile_id: Uuid) -> Result<bool> {
    tracing::debug!("Checking active mentorship requests for profile: {}", profile_id);

    let active = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM mentorship_requests
            WHERE (mentee_id = $1 OR mentor_id = $1) AND status <> 'declined'
        )
        "#,
    )
    .bind(profile_id)
    .fetch_one(pool)
    .await?;

    Ok(active)
}
