//! Thread-safe in-memory implementation of the collaborator traits.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::SeedConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{ApprovalStatus, Associate, AssociateId, TimeEntry, TimeOffRequest};

use super::{AssociateDirectory, SettingsStore, TimeEntryLedger, TimeOffLedger};

#[derive(Debug, Default)]
struct Tables {
    associates: BTreeMap<AssociateId, Associate>,
    settings: HashMap<String, String>,
    time_off: BTreeMap<i64, TimeOffRequest>,
    time_entries: BTreeMap<i64, TimeEntry>,
    next_time_off_id: i64,
    next_time_entry_id: i64,
}

/// All four stores behind one lock.
///
/// Conditional transitions check and write under the same write guard, so
/// they are atomic with respect to each other.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given seed data.
    pub fn from_seed(seed: SeedConfig) -> Self {
        let store = Self::new();
        {
            let mut tables = store.write();
            tables.settings = seed.settings;
            tables.associates = seed
                .associates
                .into_iter()
                .map(|associate| (associate.id, associate))
                .collect();
        }
        store
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AssociateDirectory for InMemoryStore {
    fn get_associate(&self, id: AssociateId) -> EngineResult<Associate> {
        self.read()
            .associates
            .get(&id)
            .cloned()
            .ok_or(EngineError::AssociateNotFound { id })
    }

    fn list_associates(&self) -> Vec<Associate> {
        self.read().associates.values().cloned().collect()
    }

    fn upsert_associate(&self, associate: Associate) {
        self.write().associates.insert(associate.id, associate);
    }
}

impl SettingsStore for InMemoryStore {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.read().settings.get(key).cloned()
    }

    fn set_setting(&self, key: &str, value: &str) {
        self.write()
            .settings
            .insert(key.to_string(), value.to_string());
    }
}

impl TimeOffLedger for InMemoryStore {
    fn insert_time_off(&self, mut request: TimeOffRequest) -> i64 {
        let mut tables = self.write();
        tables.next_time_off_id += 1;
        let id = tables.next_time_off_id;
        request.id = id;
        tables.time_off.insert(id, request);
        id
    }

    fn get_time_off(&self, id: i64) -> EngineResult<TimeOffRequest> {
        self.read()
            .time_off
            .get(&id)
            .cloned()
            .ok_or(EngineError::TimeOffRequestNotFound { id })
    }

    fn list_time_off(&self) -> Vec<TimeOffRequest> {
        self.read().time_off.values().cloned().collect()
    }

    fn list_time_off_by_associate(&self, associate_id: AssociateId) -> Vec<TimeOffRequest> {
        self.read()
            .time_off
            .values()
            .filter(|r| r.associate_id == associate_id)
            .cloned()
            .collect()
    }

    fn list_time_off_by_approver(&self, approver_id: AssociateId) -> Vec<TimeOffRequest> {
        self.read()
            .time_off
            .values()
            .filter(|r| r.approver.id() == Some(approver_id))
            .cloned()
            .collect()
    }

    fn transition_time_off(
        &self,
        id: i64,
        expected: ApprovalStatus,
        new: ApprovalStatus,
        at: DateTime<Utc>,
    ) -> EngineResult<TimeOffRequest> {
        let mut tables = self.write();
        let request = tables
            .time_off
            .get_mut(&id)
            .ok_or(EngineError::TimeOffRequestNotFound { id })?;

        if request.status != expected {
            return Err(EngineError::StatusConflict {
                id,
                current: request.status,
            });
        }

        request.status = new;
        request.updated_at = at;
        Ok(request.clone())
    }

    fn correct_time_off(
        &self,
        id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: String,
        exceeds_pto_balance: bool,
        at: DateTime<Utc>,
    ) -> EngineResult<TimeOffRequest> {
        let mut tables = self.write();
        let request = tables
            .time_off
            .get_mut(&id)
            .ok_or(EngineError::TimeOffRequestNotFound { id })?;

        if request.status != ApprovalStatus::Pending {
            return Err(EngineError::StatusConflict {
                id,
                current: request.status,
            });
        }

        request.start_date = start_date;
        request.end_date = end_date;
        request.reason = reason;
        request.exceeds_pto_balance = exceeds_pto_balance;
        request.updated_at = at;
        Ok(request.clone())
    }
}

impl TimeEntryLedger for InMemoryStore {
    fn insert_time_entry(&self, mut entry: TimeEntry) -> i64 {
        let mut tables = self.write();
        tables.next_time_entry_id += 1;
        let id = tables.next_time_entry_id;
        entry.id = id;
        tables.time_entries.insert(id, entry);
        id
    }

    fn get_time_entry(&self, id: i64) -> EngineResult<TimeEntry> {
        self.read()
            .time_entries
            .get(&id)
            .cloned()
            .ok_or(EngineError::TimeEntryNotFound { id })
    }

    fn list_time_entries(&self) -> Vec<TimeEntry> {
        self.read().time_entries.values().cloned().collect()
    }

    fn list_time_entries_by_associate(&self, associate_id: AssociateId) -> Vec<TimeEntry> {
        self.read()
            .time_entries
            .values()
            .filter(|e| e.associate_id == associate_id)
            .cloned()
            .collect()
    }

    fn transition_time_entry(
        &self,
        id: i64,
        expected: ApprovalStatus,
        new: ApprovalStatus,
    ) -> EngineResult<TimeEntry> {
        let mut tables = self.write();
        let entry = tables
            .time_entries
            .get_mut(&id)
            .ok_or(EngineError::TimeEntryNotFound { id })?;

        if entry.status != expected {
            return Err(EngineError::StatusConflict {
                id,
                current: entry.status,
            });
        }

        entry.status = new;
        Ok(entry.clone())
    }
}
