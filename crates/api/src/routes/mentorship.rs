use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/mentorship/requests",
            post(handlers::mentorship::create_request),
        )
        .route(
            "/api/mentorship/requests/me",
            get(handlers::mentorship::get_my_requests),
        )
        .route(
            "/api/mentorship/requests/:id",
            get(handlers::mentorship::get_request),
        )
        .route(
            "/api/mentorship/requests/:id/accept",
            put(handlers::mentorship::accept_request),
        )
        .route(
            "/api/mentorship/requests/:id/decline",
            put(handlers::mentorship::decline_request),
        )
        .route(
            "/api/mentorship/requests/:id",
            delete(handlers::mentorship::cancel_request),
        )
}
