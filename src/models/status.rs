//! Approval state types shared by time-off requests and time entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::AssociateId;

/// The approval state of a time-off request or time entry.
///
/// `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved, either explicitly or automatically at submission.
    Approved,
    /// Rejected by an authorized approver.
    Rejected,
}

impl ApprovalStatus {
    /// Returns true once no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApprovalStatus::Pending)
    }

    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "Pending",
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Pending" => Ok(ApprovalStatus::Pending),
            "Approved" => Ok(ApprovalStatus::Approved),
            "Rejected" => Ok(ApprovalStatus::Rejected),
            other => Err(EngineError::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// A decision an approver can take on a pending item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Move to `Approved`.
    Approve,
    /// Move to `Rejected`.
    Reject,
}

impl Decision {
    /// Returns the terminal status this decision produces.
    pub fn status(&self) -> ApprovalStatus {
        match self {
            Decision::Approve => ApprovalStatus::Approved,
            Decision::Reject => ApprovalStatus::Rejected,
        }
    }
}

impl FromStr for Decision {
    type Err = EngineError;

    /// Parses a requested status. Only the two terminal values are accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::Decision;
    ///
    /// assert_eq!("Approved".parse::<Decision>().unwrap(), Decision::Approve);
    /// assert!("Pending".parse::<Decision>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<ApprovalStatus>()? {
            ApprovalStatus::Approved => Ok(Decision::Approve),
            ApprovalStatus::Rejected => Ok(Decision::Reject),
            ApprovalStatus::Pending => Err(EngineError::InvalidStatus {
                status: s.trim().to_string(),
            }),
        }
    }
}

/// Who must approve a time-off request.
///
/// Serialized as a nullable associate id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<AssociateId>", into = "Option<AssociateId>")]
pub enum Approver {
    /// No one is assigned.
    #[default]
    Unassigned,
    /// The given associate must decide.
    Assigned(AssociateId),
}

impl Approver {
    /// Returns the assigned approver's id, if any.
    pub fn id(&self) -> Option<AssociateId> {
        match self {
            Approver::Unassigned => None,
            Approver::Assigned(id) => Some(*id),
        }
    }
}

impl From<Option<AssociateId>> for Approver {
    fn from(id: Option<AssociateId>) -> Self {
        id.map_or(Approver::Unassigned, Approver::Assigned)
    }
}

impl From<Approver> for Option<AssociateId> {
    fn from(approver: Approver) -> Self {
        approver.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization_uses_capitalized_names() {
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::Approved).unwrap(),
            "\"Approved\""
        );
        let status: ApprovalStatus = serde_json::from_str("\"Rejected\"").unwrap();
        assert_eq!(status, ApprovalStatus::Rejected);
    }

    #[test]
    fn test_only_pending_is_non_terminal() {
        assert!(!ApprovalStatus::Pending.is_terminal());
        assert!(ApprovalStatus::Approved.is_terminal());
        assert!(ApprovalStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_decision_rejects_pending_and_unknown_values() {
        match "Pending".parse::<Decision>() {
            Err(EngineError::InvalidStatus { status }) => assert_eq!(status, "Pending"),
            other => panic!("Expected InvalidStatus, got {:?}", other),
        }
        match "approved".parse::<Decision>() {
            Err(EngineError::InvalidStatus { status }) => assert_eq!(status, "approved"),
            other => panic!("Expected InvalidStatus, got {:?}", other),
        }
        assert_eq!(
            "Rejected".parse::<Decision>().unwrap().status(),
            ApprovalStatus::Rejected
        );
    }

    #[test]
    fn test_approver_serializes_as_nullable_id() {
        assert_eq!(serde_json::to_string(&Approver::Unassigned).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&Approver::Assigned(AssociateId(7))).unwrap(),
            "7"
        );

        let approver: Approver = serde_json::from_str("12").unwrap();
        assert_eq!(approver, Approver::Assigned(AssociateId(12)));
        let approver: Approver = serde_json::from_str("null").unwrap();
        assert_eq!(approver, Approver::Unassigned);
    }
}
