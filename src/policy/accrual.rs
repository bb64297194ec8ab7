//! PTO accrual calculation.
//!
//! This module computes how many PTO days an associate has been allocated
//! in the current calendar year under the configured accrual method.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use tracing::debug;

use crate::config::{AccrualMethod, DEFAULT_PTO_DAYS_PER_YEAR, PtoPolicy};

/// Days per year used for proportional accrual.
pub const DAYS_IN_YEAR: Decimal = Decimal::from_parts(365, 0, 0, false, 0);

const SECONDS_PER_DAY: i64 = 86_400;

/// Returns January 1st of the calendar year containing `now`.
pub fn year_start(now: DateTime<Utc>) -> NaiveDate {
    let today = now.date_naive();
    today - Days::new(u64::from(today.ordinal0()))
}

/// Computes the PTO days allocated to an associate as of `now`.
///
/// - `Immediate`: the full annual entitlement if the associate was hired on
///   or before January 1st, or at any point during the current year. A hire
///   date in a later year allocates nothing.
/// - `Proportional`: `days_per_year / 365` per elapsed day from the later of
///   the hire date and January 1st, measured from midnight UTC. Negative
///   elapsed time allocates nothing. An entitlement too large to scale
///   falls back to the default of 15 days per year.
///
/// # Examples
///
/// ```
/// use leave_engine::config::{AccrualMethod, PtoPolicy};
/// use leave_engine::policy::calculate_pto_allocation;
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let policy = PtoPolicy {
///     days_per_year: Decimal::new(15, 0),
///     accrual_method: AccrualMethod::Proportional,
/// };
/// let now = Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap();
/// let hired = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(); // 73 days earlier
///
/// assert_eq!(calculate_pto_allocation(hired, now, &policy), Decimal::new(3, 0));
/// ```
pub fn calculate_pto_allocation(
    start_date: NaiveDate,
    now: DateTime<Utc>,
    policy: &PtoPolicy,
) -> Decimal {
    let year_start = year_start(now);

    match policy.accrual_method {
        AccrualMethod::Immediate => {
            if start_date <= year_start || start_date.year() == year_start.year() {
                policy.days_per_year
            } else {
                Decimal::ZERO
            }
        }
        AccrualMethod::Proportional => {
            let accrual_start = start_date.max(year_start).and_time(NaiveTime::MIN).and_utc();
            let elapsed_seconds = (now - accrual_start).num_seconds();
            if elapsed_seconds <= 0 {
                return Decimal::ZERO;
            }

            let elapsed_days = Decimal::from(elapsed_seconds) / Decimal::from(SECONDS_PER_DAY);
            prorate(policy.days_per_year, elapsed_days).unwrap_or_else(|| {
                debug!(
                    days_per_year = %policy.days_per_year,
                    "PTO entitlement overflows proportional accrual, using default"
                );
                DEFAULT_PTO_DAYS_PER_YEAR * elapsed_days / DAYS_IN_YEAR
            })
        }
    }
}

fn prorate(days_per_year: Decimal, elapsed_days: Decimal) -> Option<Decimal> {
    days_per_year
        .checked_mul(elapsed_days)?
        .checked_div(DAYS_IN_YEAR)
}
