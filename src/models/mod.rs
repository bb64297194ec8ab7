//! Core data models for the leave and time accounting engine.
//!
//! This module contains the directory, ledger, and balance types used
//! throughout the engine.

mod associate;
mod pto_balance;
mod status;
mod time_entry;
mod time_off;

pub use associate::{Associate, AssociateId, AssociateUpdate, RestrictedField};
pub use pto_balance::PtoBalance;
pub use status::{ApprovalStatus, Approver, Decision};
pub use time_entry::{NewTimeEntry, TimeEntry};
pub use time_off::{NewTimeOffRequest, TimeOffRequest, inclusive_day_span};

pub(crate) use time_off::validate_range;
