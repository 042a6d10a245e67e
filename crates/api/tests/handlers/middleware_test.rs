use axum::http::StatusCode;
use axum::response::IntoResponse;
use mentorhub_api::middleware::{error_handling::AppError, validation};
use mentorhub_core::errors::MentorError;
use rstest::rstest;

#[test]
fn test_error_status_mapping() {
    let cases = vec![
        (
            MentorError::NotFound("missing".to_string()),
            StatusCode::NOT_FOUND,
        ),
        (
            MentorError::Validation("bad input".to_string()),
            StatusCode::BAD_REQUEST,
        ),
        (
            MentorError::Conflict("duplicate".to_string()),
            StatusCode::BAD_REQUEST,
        ),
        (
            MentorError::Authentication("no token".to_string()),
            StatusCode::UNAUTHORIZED,
        ),
        (
            MentorError::Authorization("wrong role".to_string()),
            StatusCode::FORBIDDEN,
        ),
        (
            MentorError::Database(eyre::eyre!("connection refused")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, expected) in cases {
        let response = AppError(err).into_response();
        assert_eq!(response.status(), expected);
    }
}

#[rstest]
#[case("ada@example.com", true)]
#[case("ADA@Example.COM", true)]
#[case("ada", false)]
#[case("ada@", false)]
#[case("@example.com", false)]
#[case("ada@nodot", false)]
fn test_validate_email(#[case] email: &str, #[case] ok: bool) {
    assert_eq!(validation::validate_email(email).is_ok(), ok);
}

#[test]
fn test_validate_email_normalizes_case() {
    assert_eq!(
        validation::validate_email("Ada@Example.COM").unwrap(),
        "ada@example.com"
    );
}

#[rstest]
#[case("secret", true)]
#[case("12345", false)]
#[case("", false)]
fn test_validate_password(#[case] password: &str, #[case] ok: bool) {
    assert_eq!(validation::validate_password(password).is_ok(), ok);
}

#[rstest]
#[case("Al", true)]
#[case("A", false)]
fn test_validate_name_bounds(#[case] name: &str, #[case] ok: bool) {
    assert_eq!(validation::validate_name(name).is_ok(), ok);
}

#[test]
fn test_validate_name_too_long() {
    let name = "x".repeat(101);
    assert!(validation::validate_name(&name).is_err());
    let name = "x".repeat(100);
    assert!(validation::validate_name(&name).is_ok());
}

#[test]
fn test_validate_proposal_bounds() {
    // 10 and 2000 characters are inclusive bounds
    assert!(validation::validate_proposal(&"x".repeat(9)).is_err());
    assert!(validation::validate_proposal(&"x".repeat(10)).is_ok());
    assert!(validation::validate_proposal(&"x".repeat(2000)).is_ok());
    assert!(validation::validate_proposal(&"x".repeat(2001)).is_err());
}

#[test]
fn test_validate_proposal_trims_before_measuring() {
    // Padding does not help a too-short proposal over the bound
    assert!(validation::validate_proposal("   short    ").is_err());
    assert_eq!(
        validation::validate_proposal("  help me plan  ").unwrap(),
        "help me plan"
    );
}

#[rstest]
#[case("https://zoom.us/j/123", true)]
#[case("http://meet.example.com/room", true)]
#[case("https://", false)]
#[case("ftp://example.com", false)]
#[case("zoom.us/j/123", false)]
#[case("not a url", false)]
fn test_validate_meeting_link(#[case] link: &str, #[case] ok: bool) {
    assert_eq!(validation::validate_meeting_link(link).is_ok(), ok);
}

#[test]
fn test_validate_industries_mentee_must_be_empty() {
    let industries = vec!["fintech".to_string()];
    assert!(validation::validate_industries("mentee", &industries).is_err());
    assert!(validation::validate_industries("mentee", &[]).is_ok());
}

#[test]
fn test_validate_industries_normalizes_mentor_entries() {
    let industries = vec![
        " fintech ".to_string(),
        "fintech".to_string(),
        "healthcare".to_string(),
    ];

    let normalized = validation::validate_industries("mentor", &industries).unwrap();
    assert_eq!(normalized, vec!["fintech".to_string(), "healthcare".to_string()]);
}

#[test]
fn test_validate_industries_rejects_blank_entries() {
    let industries = vec!["   ".to_string()];
    assert!(validation::validate_industries("mentor", &industries).is_err());
}

#[test]
fn test_validate_about_bounds() {
    assert!(validation::validate_about(Some(&"x".repeat(1001))).is_err());
    assert!(validation::validate_about(Some(&"x".repeat(1000))).is_ok());
    assert_eq!(validation::validate_about(Some("   ")).unwrap(), None);
    assert_eq!(validation::validate_about(None).unwrap(), None);
}
