/// Bearer-token authentication, profile resolution, and role checks
pub mod auth;
/// Error-to-HTTP-response mapping
pub mod error_handling;
/// Request body validation rules
pub mod validation;
