/// Authentication endpoints
pub mod auth;
/// Health check endpoints
pub mod health;
/// Mentorship request endpoints
pub mod mentorship;
/// Profile endpoints
pub mod profile;
/// Session endpoints
pub mod session;
