use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::MentorError;

/// Lifecycle of a mentorship request. `Pending` is the only state that
/// permits a transition; `Accepted` and `Declined` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Declined,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = MentorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "accepted" => Ok(RequestStatus::Accepted),
            "declined" => Ok(RequestStatus::Declined),
            other => Err(MentorError::Validation(format!(
                "Status must be pending, accepted, or declined, got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMentorshipRequest {
    pub mentor_id: Uuid,
    pub proposal: String,
    pub preferred_time: DateTime<Utc>,
}

/// A profile reference as it appears in API responses. List and detail
/// endpoints expand the side the caller is interested in; `industries` is
/// only present where the original endpoint includes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyRef {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industries: Option<Vec<String>>,
}

/// Either a raw profile id or an expanded reference, depending on how much
/// the endpoint joins in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Party {
    Id(Uuid),
    Expanded(PartyRef),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorshipRequestResponse {
    pub id: Uuid,
    pub mentee_id: Party,
    pub mentor_id: Party,
    pub proposal: String,
    pub preferred_time: DateTime<Utc>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
