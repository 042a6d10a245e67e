use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/sessions", post(handlers::session::create_session))
        .route("/api/sessions/me", get(handlers::session::get_my_sessions))
        .route("/api/sessions/:id", get(handlers::session::get_session))
        .route("/api/sessions/:id", put(handlers::session::update_session))
        .route(
            "/api/sessions/:id/status",
            put(handlers::session::update_session_status),
        )
        .route("/api/sessions/:id", delete(handlers::session::delete_session))
}
