//! Daily overtime classification.
//!
//! A reported day is split at a fixed threshold. Hours beyond it are
//! overtime, and overtime needs approval unless the associate's title is
//! exempt. Classification runs once, when the entry is created.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PolicyConfig;
use crate::models::{ApprovalStatus, Associate};

use super::roles::{Permission, grants};

/// Hours per day before overtime applies.
pub const DAILY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// The result of classifying a day's hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeClassification {
    /// Hours beyond the daily threshold (zero if none).
    pub overtime_hours: Decimal,
    /// Initial status of the entry.
    pub status: ApprovalStatus,
    /// True when overtime was recorded but the title bypasses approval.
    pub exempt: bool,
}

/// Returns the hours worked beyond [`DAILY_OVERTIME_THRESHOLD`].
pub fn overtime_hours(hours: Decimal) -> Decimal {
    (hours - DAILY_OVERTIME_THRESHOLD).max(Decimal::ZERO)
}

/// Classifies a day's hours for `associate`.
///
/// # Examples
///
/// ```
/// use leave_engine::policy::DAILY_OVERTIME_THRESHOLD;
/// use leave_engine::policy::overtime_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(overtime_hours(DAILY_OVERTIME_THRESHOLD), Decimal::ZERO);
/// assert_eq!(overtime_hours(Decimal::new(95, 1)), Decimal::new(15, 1));
/// ```
pub fn classify_overtime(
    hours: Decimal,
    associate: &Associate,
    config: &PolicyConfig,
) -> OvertimeClassification {
    let overtime_hours = overtime_hours(hours);
    if overtime_hours.is_zero() {
        return OvertimeClassification {
            overtime_hours,
            status: ApprovalStatus::Approved,
            exempt: false,
        };
    }

    if grants(associate, Permission::BypassOvertimeApproval, config) {
        OvertimeClassification {
            overtime_hours,
            status: ApprovalStatus::Approved,
            exempt: true,
        }
    } else {
        OvertimeClassification {
            overtime_hours,
            status: ApprovalStatus::Pending,
            exempt: false,
        }
    }
}
