//! # Validation Module
//!
//! Body-shape validation rules shared by the handlers. Each function either
//! returns the normalized value or a `MentorError::Validation` that maps to
//! a 400 response.

use mentorhub_core::errors::{MentorError, MentorResult};

/// Minimal email shape check: one `@` with a dot somewhere after it.
pub fn validate_email(email: &str) -> MentorResult<String> {
    let email = email.trim().to_lowercase();

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(MentorError::Validation(
            "Please enter a valid email".to_string(),
        ));
    }

    Ok(email)
}

pub fn validate_password(password: &str) -> MentorResult<()> {
    if password.len() < 6 {
        return Err(MentorError::Validation(
            "Password must be at least 6 characters long".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> MentorResult<String> {
    let name = name.trim();
    if name.len() < 2 || name.len() > 100 {
        return Err(MentorError::Validation(
            "Name must be between 2 and 100 characters".to_string(),
        ));
    }
    Ok(name.to_string())
}

/// Normalizes the industries list: mentors get trimmed, deduplicated,
/// non-empty entries; mentees must not carry any.
pub fn validate_industries(role: &str, industries: &[String]) -> MentorResult<Vec<String>> {
    if role == "mentee" {
        if !industries.is_empty() {
            return Err(MentorError::Validation(
                "Industries are only for mentors".to_string(),
            ));
        }
        return Ok(vec![]);
    }

    let mut normalized: Vec<String> = Vec::new();
    for industry in industries {
        let trimmed = industry.trim();
        if trimmed.is_empty() {
            return Err(MentorError::Validation(
                "Industries must be non-empty strings".to_string(),
            ));
        }
        if !normalized.iter().any(|i| i == trimmed) {
            normalized.push(trimmed.to_string());
        }
    }

    Ok(normalized)
}

pub fn validate_about(about: Option<&str>) -> MentorResult<Option<String>> {
    match about {
        Some(text) => {
            let trimmed = text.trim();
            if trimmed.len() > 1000 {
                return Err(MentorError::Validation(
                    "About section cannot exceed 1000 characters".to_string(),
                ));
            }
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        None => Ok(None),
    }
}

pub fn validate_proposal(proposal: &str) -> MentorResult<String> {
    let proposal = proposal.trim();
    if proposal.len() < 10 || proposal.len() > 2000 {
        return Err(MentorError::Validation(
            "Proposal must be between 10 and 2000 characters".to_string(),
        ));
    }
    Ok(proposal.to_string())
}

/// A meeting link must be an absolute http(s) URL with a non-empty host.
pub fn validate_meeting_link(link: &str) -> MentorResult<String> {
    let link = link.trim();

    let rest = link
        .strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"));

    let valid = match rest {
        Some(rest) => {
            let host = rest.split('/').next().unwrap_or("");
            !host.is_empty()
        }
        None => false,
    };

    if !valid {
        return Err(MentorError::Validation(
            "Meeting link must be a valid URL".to_string(),
        ));
    }

    Ok(link.to_string())
}
