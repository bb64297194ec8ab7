//! PTO usage aggregation and balance.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;

use crate::config::PtoPolicy;
use crate::models::{Associate, PtoBalance, TimeOffRequest};

use super::accrual::calculate_pto_allocation;

/// Sums the inclusive day spans of approved requests starting in `year`.
///
/// A request that crosses into the next year counts entirely toward the
/// year it starts in.
pub fn calculate_pto_used(requests: &[TimeOffRequest], year: i32) -> Decimal {
    let days: i64 = requests
        .iter()
        .filter(|r| r.counts_toward(year))
        .map(TimeOffRequest::day_span)
        .sum();
    Decimal::from(days)
}

/// Computes an associate's PTO balance as of `now`.
///
/// Pure over its inputs: calling it twice with the same data yields the
/// same balance.
pub fn calculate_pto_balance(
    associate: &Associate,
    requests: &[TimeOffRequest],
    now: DateTime<Utc>,
    policy: &PtoPolicy,
) -> PtoBalance {
    let allocated = calculate_pto_allocation(associate.start_date, now, policy);
    let used = calculate_pto_used(requests, now.year());
    PtoBalance::new(allocated, used, policy.accrual_method)
}
