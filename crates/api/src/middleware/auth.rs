//! # Authentication Module
//!
//! The identity and authorization gate for the MentorHub API: password
//! hashing with Argon2, HS256 bearer-token issuance and validation, the
//! [`AuthUser`] extractor that resolves a token to a stored user, and the
//! profile/role checks every protected handler runs before touching a store.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::Utc;
use eyre::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use mentorhub_core::errors::{MentorError, MentorResult};
use mentorhub_db::models::{DbProfile, DbUser};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Bearer-token lifetime. The original service issues 30-day tokens.
const TOKEN_EXPIRY_DAYS: i64 = 30;

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: Uuid,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Hashes a password using the Argon2 algorithm
///
/// A fresh random salt is generated per password; the result is a PHC
/// string carrying algorithm, parameters, salt, and hash.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a password against a stored Argon2 hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| eyre::eyre!("Invalid password hash: {}", e))?;

    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    Ok(is_valid)
}

/// Signs an HS256 access token for the given user id
pub fn generate_token(user_id: Uuid, secret: &str) -> Result<String> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        exp: now + TOKEN_EXPIRY_DAYS * 24 * 60 * 60,
        iat: now,
    };

    let token = encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| eyre::eyre!("Error signing token: {}", e))?;

    Ok(token)
}

/// Validates and decodes an access token, returning the embedded [`Claims`]
///
/// Signature and expiration are checked; any failure surfaces as an error.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )
    .map_err(|e| eyre::eyre!("Token validation failed: {}", e))?;

    Ok(token_data.claims)
}

/// Authenticated user extracted from a `Bearer` token in the
/// `Authorization` header.
///
/// The token is validated against the configured secret and resolved to a
/// stored user row; a missing, malformed, or expired token -- or one whose
/// subject no longer exists -- rejects with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: DbUser,
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError(MentorError::Authentication(
                    "Not authorized, no token".to_string(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError(MentorError::Authentication(
                "Invalid Authorization format. Expected: Bearer <token>".to_string(),
            ))
        })?;

        let claims = validate_token(token, &state.jwt_secret).map_err(|_| {
            AppError(MentorError::Authentication(
                "Not authorized, token failed".to_string(),
            ))
        })?;

        let user = mentorhub_db::repositories::user::get_user_by_id(&state.db_pool, claims.sub)
            .await
            .map_err(MentorError::Database)?
            .ok_or_else(|| {
                AppError(MentorError::Authentication("User not found".to_string()))
            })?;

        Ok(AuthUser { user })
    }
}

/// Resolves the caller's profile, failing when none exists yet
///
/// Authenticated users without a profile may only hit the auth and
/// profile-creation endpoints; everything else requires one.
pub async fn require_profile(
    pool: &sqlx::PgPool,
    user_id: Uuid,
) -> MentorResult<DbProfile> {
    let profile = mentorhub_db::repositories::profile::get_profile_by_user_id(pool, user_id)
        .await
        .map_err(MentorError::Database)?
        .ok_or_else(|| {
            MentorError::Authorization(
                "Profile required. Please complete your profile first.".to_string(),
            )
        })?;

    Ok(profile)
}

/// Role check: the caller must be a mentor
pub fn require_mentor(profile: &DbProfile) -> MentorResult<()> {
    if profile.role != "mentor" {
        return Err(MentorError::Authorization(
            "Access denied. Mentor role required.".to_string(),
        ));
    }
    Ok(())
}

/// Role check: the caller must be a mentee
pub fn require_mentee(profile: &DbProfile) -> MentorResult<()> {
    if profile.role != "mentee" {
        return Err(MentorError::Authorization(
            "Access denied. Mentee role required.".to_string(),
        ));
    }
    Ok(())
}
