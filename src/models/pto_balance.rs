//! PTO balance model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AccrualMethod;

/// An associate's paid-time-off position for the current calendar year.
///
/// `pto_remaining` is not clamped: a negative value means the balance is
/// over-drawn.
///
/// # Example
///
/// ```
/// use leave_engine::config::AccrualMethod;
/// use leave_engine::models::PtoBalance;
/// use rust_decimal::Decimal;
///
/// let balance = PtoBalance::new(Decimal::new(15, 0), Decimal::new(17, 0), AccrualMethod::Immediate);
/// assert_eq!(balance.pto_remaining, Decimal::new(-2, 0));
/// assert!(balance.is_overdrawn());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtoBalance {
    /// Days allocated so far this year.
    pub pto_allocated: Decimal,
    /// Approved days starting this year.
    pub pto_used: Decimal,
    /// Allocated minus used.
    pub pto_remaining: Decimal,
    /// The accrual method the allocation was computed under.
    pub accrual_method: AccrualMethod,
}

impl PtoBalance {
    /// Builds a balance from its allocated and used components.
    pub fn new(pto_allocated: Decimal, pto_used: Decimal, accrual_method: AccrualMethod) -> Self {
        Self {
            pto_allocated,
            pto_used,
            pto_remaining: pto_allocated - pto_used,
            accrual_method,
        }
    }

    /// Returns true if more days were used than allocated.
    pub fn is_overdrawn(&self) -> bool {
        self.pto_remaining < Decimal::ZERO
    }

    /// Returns true if `requested_days` would exceed what remains.
    pub fn would_exceed(&self, requested_days: Decimal) -> bool {
        requested_days > self.pto_remaining
    }
}
