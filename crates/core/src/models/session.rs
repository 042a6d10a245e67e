use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::MentorError;
use crate::models::mentorship::PartyRef;

/// Session status. Unlike the request lifecycle there is no transition
/// graph: any participant may set any of the three values at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = MentorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(SessionStatus::Scheduled),
            "completed" => Ok(SessionStatus::Completed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            other => Err(MentorError::Validation(format!(
                "Invalid status. Must be scheduled, completed, or cancelled, got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub request_id: Uuid,
    pub meeting_link: String,
    pub scheduled_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSessionRequest {
    pub meeting_link: String,
    pub scheduled_time: DateTime<Utc>,
}

/// Status is carried as a plain string so that an unknown value reaches the
/// handler and produces a validation error instead of a deserialization
/// rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSessionStatusRequest {
    pub status: String,
}

/// The parent request as embedded in session responses, with both
/// participants expanded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequestRef {
    pub id: Uuid,
    pub mentee_id: PartyRef,
    pub mentor_id: PartyRef,
}

/// Either a raw request id or the expanded parent request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionRequest {
    Id(Uuid),
    Expanded(SessionRequestRef),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub request_id: SessionRequest,
    pub meeting_link: String,
    pub scheduled_time: DateTime<Utc>,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
