//! Error types for the leave and time accounting engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions the policy engine surfaces. Missing or
//! unparseable settings are not errors: they resolve to defaults.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{ApprovalStatus, AssociateId, RestrictedField};

/// The main error type for the engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
/// use leave_engine::models::AssociateId;
///
/// let error = EngineError::AssociateNotFound { id: AssociateId(42) };
/// assert_eq!(error.to_string(), "Associate not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Seed configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Seed configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A leave request ends before it starts.
    #[error("Invalid date range: end date {end_date} is before start date {start_date}")]
    InvalidDateRange {
        /// The requested first day.
        start_date: NaiveDate,
        /// The requested last day.
        end_date: NaiveDate,
    },

    /// A status value that is unknown or not allowed for the operation.
    #[error("Invalid status '{status}': expected Approved or Rejected")]
    InvalidStatus {
        /// The rejected value.
        status: String,
    },

    /// Reported hours are negative.
    #[error("Invalid hours {hours}: hours cannot be negative")]
    InvalidHours {
        /// The rejected value.
        hours: Decimal,
    },

    /// The referenced associate does not exist.
    #[error("Associate not found: {id}")]
    AssociateNotFound {
        /// The missing associate id.
        id: AssociateId,
    },

    /// The referenced time-off request does not exist.
    #[error("Time-off request not found: {id}")]
    TimeOffRequestNotFound {
        /// The missing request id.
        id: i64,
    },

    /// The referenced time entry does not exist.
    #[error("Time entry not found: {id}")]
    TimeEntryNotFound {
        /// The missing entry id.
        id: i64,
    },

    /// The actor may not perform the action.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// The acting associate, when one was identified.
        actor_id: Option<AssociateId>,
        /// Why the action was denied.
        message: String,
    },

    /// A self-edit touched fields the actor's role may not change.
    #[error(
        "You don't have permission to edit: {}. Contact People Team.",
        join_labels(.fields)
    )]
    RestrictedFieldsChanged {
        /// The restricted fields that differ from the stored record.
        fields: Vec<RestrictedField>,
    },

    /// A conditional status transition found the record already decided.
    #[error("Status conflict on record {id}: current status is {current}")]
    StatusConflict {
        /// The record id.
        id: i64,
        /// The status found in the ledger.
        current: ApprovalStatus,
    },
}

fn join_labels(fields: &[RestrictedField]) -> String {
    fields
        .iter()
        .map(RestrictedField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Broad classification of an [`EngineError`] for transport mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input (400).
    Validation,
    /// A referenced record does not exist (404).
    NotFound,
    /// An authorization gate denied the action (403).
    Unauthorized,
    /// The record changed state underneath the caller (409).
    Conflict,
    /// The service configuration is broken (500).
    Configuration,
}

impl EngineError {
    /// Returns the broad kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorKind::Configuration
            }
            EngineError::InvalidDateRange { .. }
            | EngineError::InvalidStatus { .. }
            | EngineError::InvalidHours { .. } => ErrorKind::Validation,
            EngineError::AssociateNotFound { .. }
            | EngineError::TimeOffRequestNotFound { .. }
            | EngineError::TimeEntryNotFound { .. } => ErrorKind::NotFound,
            EngineError::Unauthorized { .. } | EngineError::RestrictedFieldsChanged { .. } => {
                ErrorKind::Unauthorized
            }
            EngineError::StatusConflict { .. } => ErrorKind::Conflict,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
