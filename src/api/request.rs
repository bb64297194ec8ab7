//! Request types for the leave engine API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! endpoints and their conversion into engine inputs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::{TimeEntryQuery, TimeOffCorrection, TimeOffQuery};
use crate::error::EngineResult;
use crate::models::{ApprovalStatus, AssociateId, Decision, NewTimeEntry, NewTimeOffRequest};

/// Body of `POST /time-off`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOffSubmitRequest {
    /// The requesting associate.
    pub associate_id: AssociateId,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Optional free-text reason.
    #[serde(default)]
    pub reason: Option<String>,
}

impl From<TimeOffSubmitRequest> for NewTimeOffRequest {
    fn from(req: TimeOffSubmitRequest) -> Self {
        NewTimeOffRequest {
            associate_id: req.associate_id,
            start_date: req.start_date,
            end_date: req.end_date,
            reason: req.reason.unwrap_or_default(),
        }
    }
}

/// Body of `PUT /time-off/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOffCorrectionRequest {
    /// New first day of leave.
    pub start_date: NaiveDate,
    /// New last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// New reason.
    #[serde(default)]
    pub reason: Option<String>,
}

impl From<TimeOffCorrectionRequest> for TimeOffCorrection {
    fn from(req: TimeOffCorrectionRequest) -> Self {
        TimeOffCorrection {
            start_date: req.start_date,
            end_date: req.end_date,
            reason: req.reason.unwrap_or_default(),
        }
    }
}

/// Body of `POST /time-entry`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntrySubmitRequest {
    /// The reporting associate.
    pub associate_id: AssociateId,
    /// The day worked.
    pub date: NaiveDate,
    /// Hours worked, as a number or a decimal string.
    pub hours: Decimal,
    /// Optional comments.
    #[serde(default)]
    pub comments: Option<String>,
}

impl From<TimeEntrySubmitRequest> for NewTimeEntry {
    fn from(req: TimeEntrySubmitRequest) -> Self {
        NewTimeEntry {
            associate_id: req.associate_id,
            date: req.date,
            hours: req.hours,
            comments: req.comments.unwrap_or_default(),
        }
    }
}

/// Body of the status endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    /// `Approved` or `Rejected`.
    pub status: String,
}

impl StatusUpdateRequest {
    /// Parses the requested status into a decision.
    pub fn decision(&self) -> EngineResult<Decision> {
        self.status.parse()
    }
}

/// Body of `PUT /settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingUpdateRequest {
    /// The setting key.
    pub key: String,
    /// The new value.
    pub value: String,
}

/// Query string of `GET /time-off`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeOffListParams {
    /// Only requests submitted by this associate.
    pub associate_id: Option<i64>,
    /// Only requests assigned to this approver.
    pub approver_id: Option<i64>,
}

impl From<TimeOffListParams> for TimeOffQuery {
    fn from(params: TimeOffListParams) -> Self {
        TimeOffQuery {
            associate_id: params.associate_id.map(AssociateId),
            approver_id: params.approver_id.map(AssociateId),
        }
    }
}

/// Query string of `GET /time-entry`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeEntryListParams {
    /// Only entries reported by this associate.
    pub associate_id: Option<i64>,
    /// Only entries of this manager's direct reports.
    pub manager_id: Option<i64>,
    /// Only entries in this status.
    pub status: Option<String>,
}

impl TimeEntryListParams {
    /// Converts into an engine query, validating the status filter.
    pub fn into_query(self) -> EngineResult<TimeEntryQuery> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<ApprovalStatus>)
            .transpose()?;
        Ok(TimeEntryQuery {
            associate_id: self.associate_id.map(AssociateId),
            manager_id: self.manager_id.map(AssociateId),
            status,
        })
    }
}
