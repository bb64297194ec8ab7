//! Collaborator interfaces consumed by the engine.
//!
//! The engine reads associates from an [`AssociateDirectory`], settings from
//! a [`SettingsStore`], and persists requests and entries through the
//! [`TimeOffLedger`] and [`TimeEntryLedger`]. Status changes go through
//! conditional transitions so that two concurrent decisions on the same
//! record cannot both land.
//!
//! [`InMemoryStore`] implements all four traits behind a single lock.

mod memory;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::EngineResult;
use crate::models::{ApprovalStatus, Associate, AssociateId, TimeEntry, TimeOffRequest};

pub use memory::InMemoryStore;

/// Directory of associates.
pub trait AssociateDirectory: Send + Sync {
    /// Returns the associate with `id`, or `AssociateNotFound`.
    fn get_associate(&self, id: AssociateId) -> EngineResult<Associate>;

    /// Returns every associate, ordered by id.
    fn list_associates(&self) -> Vec<Associate>;

    /// Inserts or replaces an associate record.
    fn upsert_associate(&self, associate: Associate);
}

/// Flat string key/value configuration store.
pub trait SettingsStore: Send + Sync {
    /// Returns the stored value for `key`, if any.
    fn get_setting(&self, key: &str) -> Option<String>;

    /// Inserts or replaces the value for `key`.
    fn set_setting(&self, key: &str, value: &str);
}

/// Durable storage of time-off requests.
pub trait TimeOffLedger: Send + Sync {
    /// Stores a request, assigning and returning its id.
    fn insert_time_off(&self, request: TimeOffRequest) -> i64;

    /// Returns the request with `id`, or `TimeOffRequestNotFound`.
    fn get_time_off(&self, id: i64) -> EngineResult<TimeOffRequest>;

    /// Returns every request, ordered by id.
    fn list_time_off(&self) -> Vec<TimeOffRequest>;

    /// Returns the requests submitted by `associate_id`.
    fn list_time_off_by_associate(&self, associate_id: AssociateId) -> Vec<TimeOffRequest>;

    /// Returns the requests assigned to `approver_id`.
    fn list_time_off_by_approver(&self, approver_id: AssociateId) -> Vec<TimeOffRequest>;

    /// Sets the status to `new` only if it is currently `expected`.
    ///
    /// Fails with `StatusConflict` when the current status differs.
    fn transition_time_off(
        &self,
        id: i64,
        expected: ApprovalStatus,
        new: ApprovalStatus,
        at: DateTime<Utc>,
    ) -> EngineResult<TimeOffRequest>;

    /// Rewrites the dates, reason and over-limit flag of a request that is
    /// still `Pending`.
    fn correct_time_off(
        &self,
        id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: String,
        exceeds_pto_balance: bool,
        at: DateTime<Utc>,
    ) -> EngineResult<TimeOffRequest>;
}

/// Durable storage of time entries.
pub trait TimeEntryLedger: Send + Sync {
    /// Stores an entry, assigning and returning its id.
    fn insert_time_entry(&self, entry: TimeEntry) -> i64;

    /// Returns the entry with `id`, or `TimeEntryNotFound`.
    fn get_time_entry(&self, id: i64) -> EngineResult<TimeEntry>;

    /// Returns every entry, ordered by id.
    fn list_time_entries(&self) -> Vec<TimeEntry>;

    /// Returns the entries reported by `associate_id`.
    fn list_time_entries_by_associate(&self, associate_id: AssociateId) -> Vec<TimeEntry>;

    /// Sets the status to `new` only if it is currently `expected`.
    fn transition_time_entry(
        &self,
        id: i64,
        expected: ApprovalStatus,
        new: ApprovalStatus,
    ) -> EngineResult<TimeEntry>;
}
