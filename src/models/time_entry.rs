//! Time entry model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{ApprovalStatus, AssociateId};

/// A daily hours report as submitted, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTimeEntry {
    /// The associate reporting hours.
    pub associate_id: AssociateId,
    /// The day worked.
    pub date: NaiveDate,
    /// Reported work hours for the day.
    pub hours: Decimal,
    /// Free-text comments.
    #[serde(default)]
    pub comments: String,
}

impl NewTimeEntry {
    /// Rejects negative hour counts.
    pub fn validate(&self) -> EngineResult<()> {
        if self.hours < Decimal::ZERO {
            return Err(EngineError::InvalidHours { hours: self.hours });
        }
        Ok(())
    }
}

/// A stored time entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Ledger identifier.
    pub id: i64,
    /// The reporting associate.
    pub associate_id: AssociateId,
    /// The day worked.
    pub date: NaiveDate,
    /// Reported work hours.
    pub hours: Decimal,
    /// Hours beyond the daily threshold, fixed at creation.
    pub overtime_hours: Decimal,
    /// Free-text comments.
    pub comments: String,
    /// Current approval state.
    pub status: ApprovalStatus,
    /// When the entry was submitted.
    pub created_at: DateTime<Utc>,
}

impl TimeEntry {
    /// Returns true if the entry recorded any overtime.
    pub fn has_overtime(&self) -> bool {
        self.overtime_hours > Decimal::ZERO
    }
}
