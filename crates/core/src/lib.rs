//! # MentorHub Core
//!
//! Domain types shared by the MentorHub mentorship service: profiles and
//! their roles, mentorship requests and their lifecycle, scheduled sessions,
//! and the error taxonomy every layer speaks.

pub mod errors;
pub mod models;
