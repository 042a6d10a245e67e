use chrono::{DateTime, Duration, Utc};
use mentorhub_api::middleware::{auth, error_handling::AppError, validation};
use mentorhub_core::errors::MentorError;
use mentorhub_db::models::{DbMentorshipRequest, DbProfile};
use uuid::Uuid;

use crate::test_utils::{mentee_profile, mentor_profile, pending_request, request_with_status, TestContext};

// Wrappers that run the handler orchestration against mock repositories:
// the same gate predicates, validation rules, and repository call order the
// real handlers use, with the pool-bound repository swapped for a mock.

async fn create_request_wrapper(
    ctx: &mut TestContext,
    caller: &DbProfile,
    mentor_id: Uuid,
    proposal: &str,
    preferred_time: DateTime<Utc>,
) -> Result<DbMentorshipRequest, AppError> {
    auth::require_mentee(caller)?;
    let proposal = validation::validate_proposal(proposal)?;

    let mentor = ctx
        .profile_repo
        .get_profile_by_id_and_role(mentor_id, "mentor".to_string())
        .await?
        .ok_or_else(|| MentorError::NotFound("Mentor not found".to_string()))?;

    let request = ctx
        .mentorship_repo
        .create_request(caller.id, mentor.id, proposal, preferred_time)
        .await?
        .ok_or_else(|| {
            MentorError::Conflict("Mentorship request already exists for this mentor".to_string())
        })?;

    Ok(request)
}

async fn get_request_wrapper(
    ctx: &mut TestContext,
    caller: &DbProfile,
    id: Uuid,
) -> Result<DbMentorshipRequest, AppError> {
    let request = ctx
        .mentorship_repo
        .get_request_by_id(id)
        .await?
        .ok_or_else(|| MentorError::NotFound("Mentorship request not found".to_string()))?;

    if request.mentee_id != caller.id && request.mentor_id != caller.id {
        return Err(AppError(MentorError::Authorization(
            "Not authorized to view this request".to_string(),
        )));
    }

    Ok(request)
}

async fn transition_request_wrapper(
    ctx: &mut TestContext,
    caller: &DbProfile,
    id: Uuid,
    status: &str,
) -> Result<DbMentorshipRequest, AppError> {
    auth::require_mentor(caller)?;

    let request = ctx
        .mentorship_repo
        .get_request_by_id(id)
        .await?
        .ok_or_else(|| MentorError::NotFound("Mentorship request not found".to_string()))?;

    if request.mentor_id != caller.id {
        return Err(AppError(MentorError::Authorization(
            "Not authorized to resolve this request".to_string(),
        )));
    }

    if request.status != "pending" {
        return Err(AppError(MentorError::Conflict(
            "Request is not pending".to_string(),
        )));
    }

    let updated = ctx
        .mentorship_repo
        .update_request_status(id, status.to_string())
        .await?
        .ok_or_else(|| MentorError::Conflict("Request is not pending".to_string()))?;

    Ok(updated)
}

async fn cancel_request_wrapper(
    ctx: &mut TestContext,
    caller: &DbProfile,
    id: Uuid,
) -> Result<(), AppError> {
    auth::require_mentee(caller)?;

    let request = ctx
        .mentorship_repo
        .get_request_by_id(id)
        .await?
        .ok_or_else(|| MentorError::NotFound("Mentorship request not found".to_string()))?;

    if request.mentee_id != caller.id {
        return Err(AppError(MentorError::Authorization(
            "Not authorized to cancel this request".to_string(),
        )));
    }

    if request.status != "pending" {
        return Err(AppError(MentorError::Conflict(
            "Cannot cancel non-pending request".to_string(),
        )));
    }

    let deleted = ctx.mentorship_repo.delete_request_if_pending(id).await?;
    if !deleted {
        return Err(AppError(MentorError::Conflict(
            "Cannot cancel non-pending request".to_string(),
        )));
    }

    Ok(())
}

#[tokio::test]
async fn test_create_request_success() {
    let mut ctx = TestContext::new();
    let mentee = mentee_profile("Ada");
    let mentor = mentor_profile("Grace");
    let request = pending_request(&mentee, &mentor);

    let mentor_clone = mentor.clone();
    ctx.profile_repo
        .expect_get_profile_by_id_and_role()
        .returning(move |_, _| Ok(Some(mentor_clone.clone())));

    let request_clone = request.clone();
    ctx.mentorship_repo
        .expect_create_request()
        .returning(move |_, _, _, _| Ok(Some(request_clone.clone())));

    let created = create_request_wrapper(
        &mut ctx,
        &mentee,
        mentor.id,
        "I would like guidance on growing into a staff role",
        Utc::now() + Duration::days(7),
    )
    .await
    .expect("create should succeed");

    assert_eq!(created.status, "pending");
    assert_eq!(created.mentee_id, mentee.id);
    assert_eq!(created.mentor_id, mentor.id);
}

#[tokio::test]
async fn test_create_request_duplicate_pair_conflicts() {
    let mut ctx = TestContext::new();
    let mentee = mentee_profile("Ada");
    let mentor = mentor_profile("Grace");

    let mentor_clone = mentor.clone();
    ctx.profile_repo
        .expect_get_profile_by_id_and_role()
        .returning(move |_, _| Ok(Some(mentor_clone.clone())));

    // The unique pair index swallows the insert; the repo reports None
    ctx.mentorship_repo
        .expect_create_request()
        .returning(|_, _, _, _| Ok(None));

    let err = create_request_wrapper(
        &mut ctx,
        &mentee,
        mentor.id,
        "I would like guidance on growing into a staff role",
        Utc::now() + Duration::days(7),
    )
    .await
    .expect_err("duplicate create should conflict");

    assert!(matches!(err.0, MentorError::Conflict(_)));
}

#[tokio::test]
async fn test_create_request_requires_mentee_role() {
    let mut ctx = TestContext::new();
    let caller = mentor_profile("Grace");

    // The role gate fires before any repository is touched
    let err = create_request_wrapper(
        &mut ctx,
        &caller,
        Uuid::new_v4(),
        "I would like guidance on growing into a staff role",
        Utc::now() + Duration::days(7),
    )
    .await
    .expect_err("mentor caller should be rejected");

    assert!(matches!(err.0, MentorError::Authorization(_)));
}

#[tokio::test]
async fn test_create_request_unknown_mentor_not_found() {
    let mut ctx = TestContext::new();
    let mentee = mentee_profile("Ada");

    ctx.profile_repo
        .expect_get_profile_by_id_and_role()
        .returning(|_, _| Ok(None));

    let err = create_request_wrapper(
        &mut ctx,
        &mentee,
        Uuid::new_v4(),
        "I would like guidance on growing into a staff role",
        Utc::now() + Duration::days(7),
    )
    .await
    .expect_err("unknown mentor should be not found");

    assert!(matches!(err.0, MentorError::NotFound(_)));
}

#[tokio::test]
async fn test_create_request_short_proposal_rejected() {
    let mut ctx = TestContext::new();
    let mentee = mentee_profile("Ada");

    let err = create_request_wrapper(
        &mut ctx,
        &mentee,
        Uuid::new_v4(),
        "too short",
        Utc::now() + Duration::days(7),
    )
    .await
    .expect_err("nine-character proposal should be rejected");

    assert!(matches!(err.0, MentorError::Validation(_)));
}

#[tokio::test]
async fn test_accept_request_success() {
    let mut ctx = TestContext::new();
    let mentee = mentee_profile("Ada");
    let mentor = mentor_profile("Grace");
    let request = pending_request(&mentee, &mentor);

    let request_clone = request.clone();
    ctx.mentorship_repo
        .expect_get_request_by_id()
        .returning(move |_| Ok(Some(request_clone.clone())));

    let mut accepted = request.clone();
    accepted.status = "accepted".to_string();
    ctx.mentorship_repo
        .expect_update_request_status()
        .returning(move |_, _| Ok(Some(accepted.clone())));

    let updated = transition_request_wrapper(&mut ctx, &mentor, request.id, "accepted")
        .await
        .expect("accept should succeed");

    assert_eq!(updated.status, "accepted");
}

#[tokio::test]
async fn test_accept_request_wrong_mentor_forbidden() {
    let mut ctx = TestContext::new();
    let mentee = mentee_profile("Ada");
    let mentor = mentor_profile("Grace");
    let other_mentor = mentor_profile("Margaret");
    let request = pending_request(&mentee, &mentor);

    let request_clone = request.clone();
    ctx.mentorship_repo
        .expect_get_request_by_id()
        .returning(move |_| Ok(Some(request_clone.clone())));

    let err = transition_request_wrapper(&mut ctx, &other_mentor, request.id, "accepted")
        .await
        .expect_err("a different mentor must not accept");

    assert!(matches!(err.0, MentorError::Authorization(_)));
}

#[tokio::test]
async fn test_accept_request_requires_mentor_role() {
    let mut ctx = TestContext::new();
    let mentee = mentee_profile("Ada");

    let err = transition_request_wrapper(&mut ctx, &mentee, Uuid::new_v4(), "accepted")
        .await
        .expect_err("mentee caller should be rejected");

    assert!(matches!(err.0, MentorError::Authorization(_)));
}

#[tokio::test]
async fn test_accept_request_already_declined_conflicts() {
    let mut ctx = TestContext::new();
    let mentee = mentee_profile("Ada");
    let mentor = mentor_profile("Grace");
    let request = request_with_status(&mentee, &mentor, "declined");

    let request_clone = request.clone();
    ctx.mentorship_repo
        .expect_get_request_by_id()
        .returning(move |_| Ok(Some(request_clone.clone())));

    let err = transition_request_wrapper(&mut ctx, &mentor, request.id, "accepted")
        .await
        .expect_err("terminal request must not transition again");

    assert!(matches!(err.0, MentorError::Conflict(_)));
}

#[tokio::test]
async fn test_accept_request_missing_not_found() {
    let mut ctx = TestContext::new();
    let mentor = mentor_profile("Grace");

    ctx.mentorship_repo
        .expect_get_request_by_id()
        .returning(|_| Ok(None));

    let err = transition_request_wrapper(&mut ctx, &mentor, Uuid::new_v4(), "accepted")
        .await
        .expect_err("missing request should be not found");

    assert!(matches!(err.0, MentorError::NotFound(_)));
}

#[tokio::test]
async fn test_accept_request_lost_race_conflicts() {
    let mut ctx = TestContext::new();
    let mentee = mentee_profile("Ada");
    let mentor = mentor_profile("Grace");
    let request = pending_request(&mentee, &mentor);

    // The read sees pending, but the conditional write comes back empty
    // because a concurrent transition won.
    let request_clone = request.clone();
    ctx.mentorship_repo
        .expect_get_request_by_id()
        .returning(move |_| Ok(Some(request_clone.clone())));
    ctx.mentorship_repo
        .expect_update_request_status()
        .returning(|_, _| Ok(None));

    let err = transition_request_wrapper(&mut ctx, &mentor, request.id, "declined")
        .await
        .expect_err("losing a transition race should conflict");

    assert!(matches!(err.0, MentorError::Conflict(_)));
}

#[tokio::test]
async fn test_get_request_third_party_forbidden() {
    let mut ctx = TestContext::new();
    let mentee = mentee_profile("Ada");
    let mentor = mentor_profile("Grace");
    let outsider = mentee_profile("Eve");
    let request = pending_request(&mentee, &mentor);

    let request_clone = request.clone();
    ctx.mentorship_repo
        .expect_get_request_by_id()
        .returning(move |_| Ok(Some(request_clone.clone())));

    let err = get_request_wrapper(&mut ctx, &outsider, request.id)
        .await
        .expect_err("a third profile must not view the request");

    assert!(matches!(err.0, MentorError::Authorization(_)));
}

#[tokio::test]
async fn test_get_request_both_participants_allowed() {
    let mut ctx = TestContext::new();
    let mentee = mentee_profile("Ada");
    let mentor = mentor_profile("Grace");
    let request = pending_request(&mentee, &mentor);

    let request_clone = request.clone();
    ctx.mentorship_repo
        .expect_get_request_by_id()
        .times(2)
        .returning(move |_| Ok(Some(request_clone.clone())));

    assert!(get_request_wrapper(&mut ctx, &mentee, request.id).await.is_ok());
    assert!(get_request_wrapper(&mut ctx, &mentor, request.id).await.is_ok());
}

#[tokio::test]
async fn test_cancel_declined_request_conflicts() {
    let mut ctx = TestContext::new();
    let mentee = mentee_profile("Ada");
    let mentor = mentor_profile("Grace");
    let request = request_with_status(&mentee, &mentor, "declined");

    let request_clone = request.clone();
    ctx.mentorship_repo
        .expect_get_request_by_id()
        .returning(move |_| Ok(Some(request_clone.clone())));

    let err = cancel_request_wrapper(&mut ctx, &mentee, request.id)
        .await
        .expect_err("declined request must not be cancelled");

    assert!(matches!(err.0, MentorError::Conflict(_)));
}

#[tokio::test]
async fn test_cancel_request_by_other_mentee_forbidden() {
    let mut ctx = TestContext::new();
    let mentee = mentee_profile("Ada");
    let mentor = mentor_profile("Grace");
    let other_mentee = mentee_profile("Eve");
    let request = pending_request(&mentee, &mentor);

    let request_clone = request.clone();
    ctx.mentorship_repo
        .expect_get_request_by_id()
        .returning(move |_| Ok(Some(request_clone.clone())));

    let err = cancel_request_wrapper(&mut ctx, &other_mentee, request.id)
        .await
        .expect_err("only the requesting mentee may cancel");

    assert!(matches!(err.0, MentorError::Authorization(_)));
}

#[tokio::test]
async fn test_cancel_pending_request_success() {
    let mut ctx = TestContext::new();
    let mentee = mentee_profile("Ada");
    let mentor = mentor_profile("Grace");
    let request = pending_request(&mentee, &mentor);

    let request_clone = request.clone();
    ctx.mentorship_repo
        .expect_get_request_by_id()
        .returning(move |_| Ok(Some(request_clone.clone())));
    ctx.mentorship_repo
        .expect_delete_request_if_pending()
        .returning(|_| Ok(true));

    cancel_request_wrapper(&mut ctx, &mentee, request.id)
        .await
        .expect("cancel of a pending request should succeed");
}
