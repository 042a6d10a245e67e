/// User registration, login, and identity endpoints
pub mod auth;
/// Mentorship request lifecycle endpoints
pub mod mentorship;
/// Profile creation, update, and browse endpoints
pub mod profile;
/// Session scheduling endpoints
pub mod session;
