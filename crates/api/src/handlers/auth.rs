use axum::{extract::State, http::StatusCode, Json};
use mentorhub_core::{
    errors::MentorError,
    models::auth::{AuthResponse, LoginRequest, MeResponse, RegisterRequest, UserResponse},
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    handlers::profile::to_profile_response,
    middleware::{auth, error_handling::AppError, validation},
    ApiState,
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let email = validation::validate_email(&payload.email)?;
    validation::validate_password(&payload.password)?;

    let password_hash = auth::hash_password(&payload.password)?;

    // The unique index on email decides whether the address is taken
    let user = mentorhub_db::repositories::user::create_user(&state.db_pool, &email, &password_hash)
        .await
        .map_err(MentorError::Database)?
        .ok_or_else(|| {
            MentorError::Conflict("User already exists with this email".to_string())
        })?;

    let token = auth::generate_token(user.id, &state.jwt_secret)?;

    tracing::info!("User registered: id={}, email={}", user.id, user.email);

    let response = AuthResponse {
        user: UserResponse {
            id: user.id,
            email: user.email,
        },
        profile: None,
        token,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = validation::validate_email(&payload.email)?;

    let user = mentorhub_db::repositories::user::get_user_by_email(&state.db_pool, &email)
        .await
        .map_err(MentorError::Database)?
        .ok_or_else(|| MentorError::Authentication("Invalid credentials".to_string()))?;

    let is_valid = auth::verify_password(&payload.password, &user.password_hash)?;
    if !is_valid {
        return Err(AppError(MentorError::Authentication(
            "Invalid credentials".to_string(),
        )));
    }

    let token = auth::generate_token(user.id, &state.jwt_secret)?;

    // Include the profile when one exists so the client can skip onboarding
    let profile =
        mentorhub_db::repositories::profile::get_profile_by_user_id(&state.db_pool, user.id)
            .await
            .map_err(MentorError::Database)?
            .map(to_profile_response)
            .transpose()?;

    tracing::info!("User logged in: id={}", user.id);

    let response = AuthResponse {
        user: UserResponse {
            id: user.id,
            email: user.email,
        },
        profile,
        token,
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn me(
    State(state): State<Arc<ApiState>>,
    auth_user: auth::AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let profile = mentorhub_db::repositories::profile::get_profile_by_user_id(
        &state.db_pool,
        auth_user.user.id,
    )
    .await
    .map_err(MentorError::Database)?
    .map(to_profile_response)
    .transpose()?;

    let response = MeResponse {
        user: UserResponse {
            id: auth_user.user.id,
            email: auth_user.user.email,
        },
        profile,
    };

    Ok(Json(response))
}

/// Token invalidation happens client-side; the endpoint exists so clients
/// have a uniform logout call.
pub async fn logout(
    State(_state): State<Arc<ApiState>>,
    _auth_user: auth::AuthUser,
) -> Json<Value> {
    Json(json!({}))
}
