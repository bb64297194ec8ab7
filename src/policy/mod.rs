//! Pure policy functions.
//!
//! Every function here takes its inputs and a resolved [`PolicyConfig`]
//! snapshot explicitly and performs no I/O. The engine reads the stores,
//! calls into this module, and writes the results back.
//!
//! [`PolicyConfig`]: crate::config::PolicyConfig

pub mod accrual;
pub mod approval_gate;
pub mod overtime;
pub mod profile_gate;
pub mod roles;
pub mod router;
pub mod usage;

pub use accrual::{DAYS_IN_YEAR, calculate_pto_allocation, year_start};
pub use approval_gate::{ApprovalGrant, ApprovalTarget, authorize_decision};
pub use overtime::{
    DAILY_OVERTIME_THRESHOLD, OvertimeClassification, classify_overtime, overtime_hours,
};
pub use profile_gate::{authorize_profile_edit, changed_restricted_fields};
pub use roles::{CEO_TITLE, HEAD_OF_PEOPLE_TITLE, Permission, Role, grants};
pub use router::{RoutingDecision, RoutingRule, route_time_off_request};
pub use usage::{calculate_pto_balance, calculate_pto_used};
