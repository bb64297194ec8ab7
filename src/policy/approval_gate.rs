//! Authorization for approving or rejecting leave and time entries.

use serde::{Deserialize, Serialize};

use crate::config::PolicyConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Associate, TimeEntry, TimeOffRequest};

use super::roles::{Permission, grants};

/// The record a decision is being made on.
#[derive(Debug, Clone, Copy)]
pub enum ApprovalTarget<'a> {
    /// A leave request.
    TimeOff(&'a TimeOffRequest),
    /// A daily time entry.
    TimeEntry(&'a TimeEntry),
}

impl ApprovalTarget<'_> {
    fn id(&self) -> i64 {
        match self {
            ApprovalTarget::TimeOff(request) => request.id,
            ApprovalTarget::TimeEntry(entry) => entry.id,
        }
    }

    fn has_overtime(&self) -> bool {
        match self {
            ApprovalTarget::TimeOff(_) => false,
            ApprovalTarget::TimeEntry(entry) => entry.has_overtime(),
        }
    }
}

/// Why an actor was allowed to decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalGrant {
    /// The actor manages the record's owner.
    Manager,
    /// The actor is the CEO or Head of People.
    Administrator,
    /// The actor is the configured second approver for overtime.
    SecondApprover,
}

/// Checks that `actor` may approve or reject `target`, owned by `owner`.
///
/// Grants are checked in order: direct manager, administrative override,
/// then the configured second approver for time entries with overtime.
pub fn authorize_decision(
    actor: &Associate,
    owner: &Associate,
    target: ApprovalTarget<'_>,
    config: &PolicyConfig,
) -> EngineResult<ApprovalGrant> {
    if owner.manager_id == Some(actor.id) {
        return Ok(ApprovalGrant::Manager);
    }

    if grants(actor, Permission::Administer, config) {
        return Ok(ApprovalGrant::Administrator);
    }

    if target.has_overtime() && config.second_approver == Some(actor.id) {
        return Ok(ApprovalGrant::SecondApprover);
    }

    Err(EngineError::Unauthorized {
        actor_id: Some(actor.id),
        message: format!(
            "associate {} may not decide record {} owned by associate {}",
            actor.id,
            target.id(),
            owner.id
        ),
    })
}
