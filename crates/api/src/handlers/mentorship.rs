use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mentorhub_core::{
    errors::{MentorError, MentorResult},
    models::mentorship::{
        CreateMentorshipRequest, MentorshipRequestResponse, Party, PartyRef, RequestStatus,
    },
};
use mentorhub_db::models::DbMentorshipRequest;
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{auth, error_handling::AppError, validation},
    ApiState,
};

pub(crate) fn parse_request_status(status: &str) -> MentorResult<RequestStatus> {
    status
        .parse()
        .map_err(|_| MentorError::Database(eyre::eyre!("invalid request status in database: {}", status)))
}

/// Loads a profile reference for response expansion. Expansion happens here
/// at the boundary; the repositories only ever hand back raw foreign keys.
pub(crate) async fn fetch_party(
    pool: &PgPool,
    profile_id: Uuid,
    with_industries: bool,
) -> MentorResult<PartyRef> {
    let profile = mentorhub_db::repositories::profile::get_profile_by_id(pool, profile_id)
        .await
        .map_err(MentorError::Database)?
        .ok_or_else(|| {
            MentorError::Database(eyre::eyre!("dangling profile reference: {}", profile_id))
        })?;

    Ok(PartyRef {
        id: profile.id,
        name: profile.name,
        industries: with_industries.then_some(profile.industries),
    })
}

fn raw_response(request: DbMentorshipRequest) -> MentorResult<MentorshipRequestResponse> {
    let status = parse_request_status(&request.status)?;

    Ok(MentorshipRequestResponse {
        id: request.id,
        mentee_id: Party::Id(request.mentee_id),
        mentor_id: Party::Id(request.mentor_id),
        proposal: request.proposal,
        preferred_time: request.preferred_time,
        status,
        created_at: request.created_at,
        updated_at: request.updated_at,
    })
}

#[axum::debug_handler]
pub async fn create_request(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
    Json(payload): Json<CreateMentorshipRequest>,
) -> Result<(StatusCode, Json<MentorshipRequestResponse>), AppError> {
    let profile = auth::require_profile(&state.db_pool, auth_user.user.id).await?;
    auth::require_mentee(&profile)?;

    let proposal = validation::validate_proposal(&payload.proposal)?;

    // Check that the target exists and really is a mentor
    let mentor = mentorhub_db::repositories::profile::get_profile_by_id_and_role(
        &state.db_pool,
        payload.mentor_id,
        "mentor",
    )
    .await
    .map_err(MentorError::Database)?
    .ok_or_else(|| MentorError::NotFound("Mentor not found".to_string()))?;

    // The unique (mentee_id, mentor_id) constraint arbitrates duplicates
    let request = mentorhub_db::repositories::mentorship::create_request(
        &state.db_pool,
        profile.id,
        mentor.id,
        &proposal,
        payload.preferred_time,
    )
    .await
    .map_err(MentorError::Database)?
    .ok_or_else(|| {
        MentorError::Conflict("Mentorship request already exists for this mentor".to_string())
    })?;

    tracing::info!(
        "Mentorship request created: id={}, mentee_id={}, mentor_id={}",
        request.id, request.mentee_id, request.mentor_id
    );

    let status = parse_request_status(&request.status)?;
    let response = MentorshipRequestResponse {
        id: request.id,
        mentee_id: Party::Id(request.mentee_id),
        mentor_id: Party::Expanded(PartyRef {
            id: mentor.id,
            name: mentor.name,
            industries: None,
        }),
        proposal: request.proposal,
        preferred_time: request.preferred_time,
        status,
        created_at: request.created_at,
        updated_at: request.updated_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn get_my_requests(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
) -> Result<Json<Vec<MentorshipRequestResponse>>, AppError> {
    let profile = auth::require_profile(&state.db_pool, auth_user.user.id).await?;

    let mut response = Vec::new();

    if profile.role == "mentee" {
        // Requests sent by the mentee, with the mentor side expanded
        let requests = mentorhub_db::repositories::mentorship::get_requests_by_mentee(
            &state.db_pool,
            profile.id,
        )
        .await
        .map_err(MentorError::Database)?;

        for request in requests {
            let mentor = fetch_party(&state.db_pool, request.mentor_id, true).await?;
            let status = parse_request_status(&request.status)?;
            response.push(MentorshipRequestResponse {
                id: request.id,
                mentee_id: Party::Id(request.mentee_id),
                mentor_id: Party::Expanded(mentor),
                proposal: request.proposal,
                preferred_time: request.preferred_time,
                status,
                created_at: request.created_at,
                updated_at: request.updated_at,
            });
        }
    } else {
        // Requests received by the mentor, with the mentee side expanded
        let requests = mentorhub_db::repositories::mentorship::get_requests_by_mentor(
            &state.db_pool,
            profile.id,
        )
        .await
        .map_err(MentorError::Database)?;

        for request in requests {
            let mentee = fetch_party(&state.db_pool, request.mentee_id, false).await?;
            let status = parse_request_status(&request.status)?;
            response.push(MentorshipRequestResponse {
                id: request.id,
                mentee_id: Party::Expanded(mentee),
                mentor_id: Party::Id(request.mentor_id),
                proposal: request.proposal,
                preferred_time: request.preferred_time,
                status,
                created_at: request.created_at,
                updated_at: request.updated_at,
            });
        }
    }

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn get_request(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MentorshipRequestResponse>, AppError> {
    let profile = auth::require_profile(&state.db_pool, auth_user.user.id).await?;

    let request = mentorhub_db::repositories::mentorship::get_request_by_id(&state.db_pool, id)
        .await
        .map_err(MentorError::Database)?
        .ok_or_else(|| MentorError::NotFound("Mentorship request not found".to_string()))?;

    // Only the two participants may view a request
    if request.mentee_id != profile.id && request.mentor_id != profile.id {
        return Err(AppError(MentorError::Authorization(
            "Not authorized to view this request".to_string(),
        )));
    }

    let mentee = fetch_party(&state.db_pool, request.mentee_id, false).await?;
    let mentor = fetch_party(&state.db_pool, request.mentor_id, true).await?;
    let status = parse_request_status(&request.status)?;

    let response = MentorshipRequestResponse {
        id: request.id,
        mentee_id: Party::Expanded(mentee),
        mentor_id: Party::Expanded(mentor),
        proposal: request.proposal,
        preferred_time: request.preferred_time,
        status,
        created_at: request.created_at,
        updated_at: request.updated_at,
    };

    Ok(Json(response))
}

async fn transition_request(
    state: &ApiState,
    auth_user: auth::AuthUser,
    id: Uuid,
    status: RequestStatus,
) -> Result<Json<MentorshipRequestResponse>, AppError> {
    let profile = auth::require_profile(&state.db_pool, auth_user.user.id).await?;
    auth::require_mentor(&profile)?;

    let request = mentorhub_db::repositories::mentorship::get_request_by_id(&state.db_pool, id)
        .await
        .map_err(MentorError::Database)?
        .ok_or_else(|| MentorError::NotFound("Mentorship request not found".to_string()))?;

    // Only the addressed mentor may resolve the request
    if request.mentor_id != profile.id {
        return Err(AppError(MentorError::Authorization(format!(
            "Not authorized to {} this request",
            if status == RequestStatus::Accepted { "accept" } else { "decline" }
        ))));
    }

    if request.status != "pending" {
        return Err(AppError(MentorError::Conflict(
            "Request is not pending".to_string(),
        )));
    }

    // Conditional write: the row is only updated while still pending, so a
    // concurrent transition that got there first leaves us empty-handed.
    let updated = mentorhub_db::repositories::mentorship::update_request_status(
        &state.db_pool,
        id,
        status.as_str(),
    )
    .await
    .map_err(MentorError::Database)?
    .ok_or_else(|| MentorError::Conflict("Request is not pending".to_string()))?;

    tracing::info!("Mentorship request {}: id={}", status, updated.id);

    Ok(Json(raw_response(updated)?))
}

#[axum::debug_handler]
pub async fn accept_request(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MentorshipRequestResponse>, AppError> {
    transition_request(&state, auth_user, id, RequestStatus::Accepted).await
}

#[axum::debug_handler]
pub async fn decline_request(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MentorshipRequestResponse>, AppError> {
    transition_request(&state, auth_user, id, RequestStatus::Declined).await
}

#[axum::debug_handler]
pub async fn cancel_request(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let profile = auth::require_profile(&state.db_pool, auth_user.user.id).await?;
    auth::require_mentee(&profile)?;

    let request = mentorhub_db::repositories::mentorship::get_request_by_id(&state.db_pool, id)
        .await
        .map_err(MentorError::Database)?
        .ok_or_else(|| MentorError::NotFound("Mentorship request not found".to_string()))?;

    // Only the requesting mentee may cancel
    if request.mentee_id != profile.id {
        return Err(AppError(MentorError::Authorization(
            "Not authorized to cancel this request".to_string(),
        )));
    }

    if request.status != "pending" {
        return Err(AppError(MentorError::Conflict(
            "Cannot cancel non-pending request".to_string(),
        )));
    }

    // Conditional delete: a request that a mentor resolved in the meantime
    // stays put and the caller sees the conflict.
    let deleted =
        mentorhub_db::repositories::mentorship::delete_request_if_pending(&state.db_pool, id)
            .await
            .map_err(MentorError::Database)?;

    if !deleted {
        return Err(AppError(MentorError::Conflict(
            "Cannot cancel non-pending request".to_string(),
        )));
    }

    tracing::info!("Mentorship request cancelled: id={}", id);

    Ok(Json(json!({})))
}
