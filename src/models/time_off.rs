//! Time-off request model.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{ApprovalStatus, Approver, AssociateId};

/// Returns the number of days in an inclusive date range.
///
/// # Examples
///
/// ```
/// use leave_engine::models::inclusive_day_span;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
/// assert_eq!(inclusive_day_span(start, end), 5);
/// ```
pub fn inclusive_day_span(start_date: NaiveDate, end_date: NaiveDate) -> i64 {
    (end_date - start_date).num_days() + 1
}

/// A leave request as submitted by an associate, before routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTimeOffRequest {
    /// The associate requesting leave.
    pub associate_id: AssociateId,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

impl NewTimeOffRequest {
    /// Checks that the date range is well formed.
    pub fn validate(&self) -> EngineResult<()> {
        validate_range(self.start_date, self.end_date)
    }

    /// Number of days requested, counting both ends.
    pub fn requested_days(&self) -> Decimal {
        Decimal::from(inclusive_day_span(self.start_date, self.end_date))
    }
}

pub(crate) fn validate_range(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<()> {
    if end_date < start_date {
        return Err(EngineError::InvalidDateRange {
            start_date,
            end_date,
        });
    }
    Ok(())
}

/// A stored time-off request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOffRequest {
    /// Ledger identifier.
    pub id: i64,
    /// The requesting associate.
    pub associate_id: AssociateId,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Free-text reason.
    pub reason: String,
    /// Who must decide on the request.
    #[serde(rename = "approver_id")]
    pub approver: Approver,
    /// Current approval state.
    pub status: ApprovalStatus,
    /// Set when the request exceeded the PTO remaining at submission.
    pub exceeds_pto_balance: bool,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
    /// When the request was last changed.
    pub updated_at: DateTime<Utc>,
}

impl TimeOffRequest {
    /// Number of days covered by the request, counting both ends.
    pub fn day_span(&self) -> i64 {
        inclusive_day_span(self.start_date, self.end_date)
    }

    /// Returns true if the request counts against PTO for `year`.
    ///
    /// Requests spanning a year boundary count entirely toward their start year.
    pub fn counts_toward(&self, year: i32) -> bool {
        self.status == ApprovalStatus::Approved && self.start_date.year() == year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_test_request(start: &str, end: &str, status: ApprovalStatus) -> TimeOffRequest {
        TimeOffRequest {
            id: 1,
            associate_id: AssociateId(5),
            start_date: make_date(start),
            end_date: make_date(end),
            reason: "Holiday".to_string(),
            approver: Approver::Assigned(AssociateId(2)),
            status,
            exceeds_pto_balance: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_single_day_request_spans_one_day() {
        assert_eq!(
            inclusive_day_span(make_date("2026-03-02"), make_date("2026-03-02")),
            1
        );
    }

    #[test]
    fn test_validate_rejects_end_before_start() {
        let request = NewTimeOffRequest {
            associate_id: AssociateId(5),
            start_date: make_date("2026-03-10"),
            end_date: make_date("2026-03-09"),
            reason: String::new(),
        };

        match request.validate() {
            Err(EngineError::InvalidDateRange {
                start_date,
                end_date,
            }) => {
                assert_eq!(start_date, make_date("2026-03-10"));
                assert_eq!(end_date, make_date("2026-03-09"));
            }
            other => panic!("Expected InvalidDateRange, got {:?}", other),
        }
    }

    #[test]
    fn test_requested_days_is_inclusive() {
        let request = NewTimeOffRequest {
            associate_id: AssociateId(5),
            start_date: make_date("2026-01-01"),
            end_date: make_date("2026-01-05"),
            reason: String::new(),
        };
        assert!(request.validate().is_ok());
        assert_eq!(request.requested_days(), Decimal::new(5, 0));
    }

    #[test]
    fn test_counts_toward_uses_start_year_only() {
        let spanning = create_test_request("2025-12-30", "2026-01-02", ApprovalStatus::Approved);
        assert!(spanning.counts_toward(2025));
        assert!(!spanning.counts_toward(2026));
        assert_eq!(spanning.day_span(), 4);
    }

    #[test]
    fn test_pending_request_does_not_count() {
        let pending = create_test_request("2026-02-02", "2026-02-03", ApprovalStatus::Pending);
        assert!(!pending.counts_toward(2026));
    }

    #[test]
    fn test_serialize_uses_approver_id_field() {
        let request = create_test_request("2026-02-02", "2026-02-03", ApprovalStatus::Pending);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["approver_id"], serde_json::json!(2));
        assert_eq!(json["status"], serde_json::json!("Pending"));
    }
}
