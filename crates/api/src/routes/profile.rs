use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/profiles", post(handlers::profile::create_profile))
        .route("/api/profiles/me", get(handlers::profile::get_my_profile))
        .route("/api/profiles/me", put(handlers::profile::update_my_profile))
        .route("/api/profiles/mentors", get(handlers::profile::list_mentors))
        .route("/api/profiles/mentors/:id", get(handlers::profile::get_mentor))
        .route("/api/profiles/mentees", get(handlers::profile::list_mentees))
        .route("/api/profiles/:id", get(handlers::profile::get_profile))
}
