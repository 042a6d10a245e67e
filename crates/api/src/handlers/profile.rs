use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mentorhub_core::{
    errors::{MentorError, MentorResult},
    models::profile::{CreateProfileRequest, ProfileResponse, UpdateProfileRequest},
};
use mentorhub_db::models::DbProfile;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{auth, error_handling::AppError, validation},
    ApiState,
};

/// Converts a profile row into its API shape. The role column is
/// CHECK-constrained, so a parse failure means corrupt data and surfaces as
/// a server error rather than a 400.
pub(crate) fn to_profile_response(profile: DbProfile) -> MentorResult<ProfileResponse> {
    let role = profile
        .role
        .parse()
        .map_err(|_| MentorError::Database(eyre::eyre!("invalid role in database: {}", profile.role)))?;

    Ok(ProfileResponse {
        id: profile.id,
        user_id: profile.user_id,
        name: profile.name,
        role,
        industries: profile.industries,
        about: profile.about,
        created_at: profile.created_at,
        updated_at: profile.updated_at,
    })
}

#[axum::debug_handler]
pub async fn create_profile(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
    Json(payload): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let name = validation::validate_name(&payload.name)?;
    let role = payload.role.as_str();
    let industries = validation::validate_industries(role, &payload.industries)?;
    let about = validation::validate_about(payload.about.as_deref())?;

    // The unique index on user_id enforces one profile per user
    let profile = mentorhub_db::repositories::profile::create_profile(
        &state.db_pool,
        auth_user.user.id,
        &name,
        role,
        &industries,
        about.as_deref(),
    )
    .await
    .map_err(MentorError::Database)?
    .ok_or_else(|| MentorError::Conflict("Profile already exists".to_string()))?;

    tracing::info!(
        "Profile created: id={}, user_id={}, role={}",
        profile.id, profile.user_id, profile.role
    );

    Ok((StatusCode::CREATED, Json(to_profile_response(profile)?)))
}

#[axum::debug_handler]
pub async fn get_my_profile(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = auth::require_profile(&state.db_pool, auth_user.user.id).await?;

    Ok(Json(to_profile_response(profile)?))
}

#[axum::debug_handler]
pub async fn update_my_profile(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = auth::require_profile(&state.db_pool, auth_user.user.id).await?;

    let name = validation::validate_name(&payload.name)?;
    let role = payload.role.as_str();
    let industries = validation::validate_industries(role, &payload.industries)?;
    let about = validation::validate_about(payload.about.as_deref())?;

    // A role switch would orphan requests and sessions keyed to the old
    // role, so it is refused while any non-declined request references
    // this profile on either side.
    if role != profile.role {
        let active = mentorhub_db::repositories::mentorship::has_active_requests(
            &state.db_pool,
            profile.id,
        )
        .await
        .map_err(MentorError::Database)?;

        if active {
            return Err(AppError(MentorError::Conflict(
                "Cannot change role while mentorship requests are active".to_string(),
            )));
        }
    }

    let updated = mentorhub_db::repositories::profile::update_profile(
        &state.db_pool,
        profile.id,
        &name,
        role,
        &industries,
        about.as_deref(),
    )
    .await
    .map_err(MentorError::Database)?
    .ok_or_else(|| MentorError::NotFound("Profile not found".to_string()))?;

    tracing::info!("Profile updated: id={}", updated.id);

    Ok(Json(to_profile_response(updated)?))
}

#[axum::debug_handler]
pub async fn list_mentors(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ProfileResponse>>, AppError> {
    let mentors = mentorhub_db::repositories::profile::get_profiles_by_role(&state.db_pool, "mentor")
        .await
        .map_err(MentorError::Database)?;

    let response = mentors
        .into_iter()
        .map(to_profile_response)
        .collect::<MentorResult<Vec<_>>>()?;

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn get_mentor(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let mentor = mentorhub_db::repositories::profile::get_profile_by_id_and_role(
        &state.db_pool,
        id,
        "mentor",
    )
    .await
    .map_err(MentorError::Database)?
    .ok_or_else(|| MentorError::NotFound("Mentor not found".to_string()))?;

    Ok(Json(to_profile_response(mentor)?))
}

#[axum::debug_handler]
pub async fn list_mentees(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
) -> Result<Json<Vec<ProfileResponse>>, AppError> {
    let profile = auth::require_profile(&state.db_pool, auth_user.user.id).await?;
    auth::require_mentor(&profile)?;

    let mentees = mentorhub_db::repositories::profile::get_profiles_by_role(&state.db_pool, "mentee")
        .await
        .map_err(MentorError::Database)?;

    let response = mentees
        .into_iter()
        .map(to_profile_response)
        .collect::<MentorResult<Vec<_>>>()?;

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = mentorhub_db::repositories::profile::get_profile_by_id(&state.db_pool, id)
        .await
        .map_err(MentorError::Database)?
        .ok_or_else(|| MentorError::NotFound("Profile not found".to_string()))?;

    Ok(Json(to_profile_response(profile)?))
}
