use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mentorhub_core::{
    errors::{MentorError, MentorResult},
    models::session::{
        CreateSessionRequest, SessionRequest, SessionRequestRef, SessionResponse, SessionStatus,
        UpdateSessionRequest, UpdateSessionStatusRequest,
    },
};
use mentorhub_db::models::{DbMentorshipRequest, DbSession};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    handlers::mentorship::fetch_party,
    middleware::{auth, error_handling::AppError, validation},
    ApiState,
};

fn parse_session_status(status: &str) -> MentorResult<SessionStatus> {
    status
        .parse()
        .map_err(|_| MentorError::Database(eyre::eyre!("invalid session status in database: {}", status)))
}

/// Loads the parent request of a session. The foreign key guarantees it
/// exists, so absence is a data fault, not a 404.
async fn load_parent_request(
    pool: &PgPool,
    request_id: Uuid,
) -> MentorResult<DbMentorshipRequest> {
    mentorhub_db::repositories::mentorship::get_request_by_id(pool, request_id)
        .await
        .map_err(MentorError::Database)?
        .ok_or_else(|| {
            MentorError::Database(eyre::eyre!("dangling request reference: {}", request_id))
        })
}

/// Builds a session response with the parent request and both participants
/// expanded.
async fn expand_session(
    pool: &PgPool,
    session: DbSession,
    request: &DbMentorshipRequest,
    with_mentor_industries: bool,
) -> MentorResult<SessionResponse> {
    let mentee = fetch_party(pool, request.mentee_id, false).await?;
    let mentor = fetch_party(pool, request.mentor_id, with_mentor_industries).await?;
    let status = parse_session_status(&session.status)?;

    Ok(SessionResponse {
        id: session.id,
        request_id: SessionRequest::Expanded(SessionRequestRef {
            id: request.id,
            mentee_id: mentee,
            mentor_id: mentor,
        }),
        meeting_link: session.meeting_link,
        scheduled_time: session.scheduled_time,
        status,
        created_at: session.created_at,
        updated_at: session.updated_at,
    })
}

#[axum::debug_handler]
pub async fn create_session(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let profile = auth::require_profile(&state.db_pool, auth_user.user.id).await?;
    auth::require_mentor(&profile)?;

    let meeting_link = validation::validate_meeting_link(&payload.meeting_link)?;

    let request = mentorhub_db::repositories::mentorship::get_request_by_id(
        &state.db_pool,
        payload.request_id,
    )
    .await
    .map_err(MentorError::Database)?
    .ok_or_else(|| MentorError::NotFound("Mentorship request not found".to_string()))?;

    // A session may only hang off an accepted request
    if request.status != "accepted" {
        return Err(AppError(MentorError::Conflict(
            "Mentorship request must be accepted before creating a session".to_string(),
        )));
    }

    if request.mentor_id != profile.id {
        return Err(AppError(MentorError::Authorization(
            "Not authorized to create session for this request".to_string(),
        )));
    }

    // The unique index on request_id arbitrates duplicate creates
    let session = mentorhub_db::repositories::session::create_session(
        &state.db_pool,
        request.id,
        &meeting_link,
        payload.scheduled_time,
    )
    .await
    .map_err(MentorError::Database)?
    .ok_or_else(|| {
        MentorError::Conflict("Session already exists for this request".to_string())
    })?;

    tracing::info!(
        "Session created: id={}, request_id={}",
        session.id, session.request_id
    );

    let response = expand_session(&state.db_pool, session, &request, false).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn get_my_sessions(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
) -> Result<Json<Vec<SessionResponse>>, AppError> {
    let profile = auth::require_profile(&state.db_pool, auth_user.user.id).await?;

    // The repository joins sessions to their parent requests on the role
    // column, so only sessions the caller participates in come back.
    let (sessions, with_industries) = if profile.role == "mentee" {
        let sessions = mentorhub_db::repositories::session::get_sessions_by_mentee(
            &state.db_pool,
            profile.id,
        )
        .await
        .map_err(MentorError::Database)?;
        (sessions, true)
    } else {
        let sessions = mentorhub_db::repositories::session::get_sessions_by_mentor(
            &state.db_pool,
            profile.id,
        )
        .await
        .map_err(MentorError::Database)?;
        (sessions, false)
    };

    let mut response = Vec::new();
    for session in sessions {
        let request = load_parent_request(&state.db_pool, session.request_id).await?;
        response.push(expand_session(&state.db_pool, session, &request, with_industries).await?);
    }

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let profile = auth::require_profile(&state.db_pool, auth_user.user.id).await?;

    let session = mentorhub_db::repositories::session::get_session_by_id(&state.db_pool, id)
        .await
        .map_err(MentorError::Database)?
        .ok_or_else(|| MentorError::NotFound("Session not found".to_string()))?;

    let request = load_parent_request(&state.db_pool, session.request_id).await?;

    // Only the two participants of the parent request may view a session
    if request.mentee_id != profile.id && request.mentor_id != profile.id {
        return Err(AppError(MentorError::Authorization(
            "Not authorized to view this session".to_string(),
        )));
    }

    let response = expand_session(&state.db_pool, session, &request, true).await?;

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn update_session(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let profile = auth::require_profile(&state.db_pool, auth_user.user.id).await?;
    auth::require_mentor(&profile)?;

    let meeting_link = validation::validate_meeting_link(&payload.meeting_link)?;

    let session = mentorhub_db::repositories::session::get_session_by_id(&state.db_pool, id)
        .await
        .map_err(MentorError::Database)?
        .ok_or_else(|| MentorError::NotFound("Session not found".to_string()))?;

    let request = load_parent_request(&state.db_pool, session.request_id).await?;

    // Only the mentor of the parent request may reschedule
    if request.mentor_id != profile.id {
        return Err(AppError(MentorError::Authorization(
            "Not authorized to update this session".to_string(),
        )));
    }

    let updated = mentorhub_db::repositories::session::update_session(
        &state.db_pool,
        id,
        &meeting_link,
        payload.scheduled_time,
    )
    .await
    .map_err(MentorError::Database)?
    .ok_or_else(|| MentorError::NotFound("Session not found".to_string()))?;

    tracing::info!("Session updated: id={}", updated.id);

    let response = expand_session(&state.db_pool, updated, &request, false).await?;

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn update_session_status(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSessionStatusRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let profile = auth::require_profile(&state.db_pool, auth_user.user.id).await?;

    // The status set is flat: any of the three values may be written at any
    // time by either participant. Only membership is validated.
    let status: SessionStatus = payload.status.parse()?;

    let session = mentorhub_db::repositories::session::get_session_by_id(&state.db_pool, id)
        .await
        .map_err(MentorError::Database)?
        .ok_or_else(|| MentorError::NotFound("Session not found".to_string()))?;

    let request = load_parent_request(&state.db_pool, session.request_id).await?;

    if request.mentee_id != profile.id && request.mentor_id != profile.id {
        return Err(AppError(MentorError::Authorization(
            "Not authorized to update this session".to_string(),
        )));
    }

    let updated = mentorhub_db::repositories::session::update_session_status(
        &state.db_pool,
        id,
        status.as_str(),
    )
    .await
    .map_err(MentorError::Database)?
    .ok_or_else(|| MentorError::NotFound("Session not found".to_string()))?;

    tracing::info!("Session status updated: id={}, status={}", updated.id, updated.status);

    let status = parse_session_status(&updated.status)?;
    let response = SessionResponse {
        id: updated.id,
        request_id: SessionRequest::Id(updated.request_id),
        meeting_link: updated.meeting_link,
        scheduled_time: updated.scheduled_time,
        status,
        created_at: updated.created_at,
        updated_at: updated.updated_at,
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn delete_session(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let profile = auth::require_profile(&state.db_pool, auth_user.user.id).await?;
    auth::require_mentor(&profile)?;

    let session = mentorhub_db::repositories::session::get_session_by_id(&state.db_pool, id)
        .await
        .map_err(MentorError::Database)?
        .ok_or_else(|| MentorError::NotFound("Session not found".to_string()))?;

    let request = load_parent_request(&state.db_pool, session.request_id).await?;

    // Only the mentor of the parent request may delete
    if request.mentor_id != profile.id {
        return Err(AppError(MentorError::Authorization(
            "Not authorized to delete this session".to_string(),
        )));
    }

    mentorhub_db::repositories::session::delete_session(&state.db_pool, id)
        .await
        .map_err(MentorError::Database)?;

    tracing::info!("Session deleted: id={}", id);

    Ok(Json(json!({})))
}
