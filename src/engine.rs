//! Orchestration of the leave and time accounting flows.
//!
//! [`LeaveEngine`] reads the directory, settings and ledgers through the
//! collaborator traits, resolves a fresh [`PolicyConfig`] for every
//! operation, delegates each decision to the pure functions in
//! [`crate::policy`], and writes the outcome back. It holds no mutable state
//! of its own.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{PolicyConfig, SettingsGateway};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ApprovalStatus, Associate, AssociateId, AssociateUpdate, Decision, NewTimeEntry,
    NewTimeOffRequest, PtoBalance, TimeEntry, TimeOffRequest, inclusive_day_span, validate_range,
};
use crate::policy::{
    ApprovalTarget, Permission, RoutingRule, authorize_decision, authorize_profile_edit,
    calculate_pto_balance, classify_overtime, grants, route_time_off_request,
};
use crate::store::{AssociateDirectory, InMemoryStore, SettingsStore, TimeEntryLedger, TimeOffLedger};

/// The result of submitting a time-off request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOffSubmission {
    /// The stored request, with its id, approver and initial status.
    pub request: TimeOffRequest,
    /// The routing rule that chose the approver.
    pub rule: RoutingRule,
    /// Inclusive day count of the request.
    pub requested_days: Decimal,
    /// PTO remaining before this request, as computed at submission.
    pub pto_remaining: Decimal,
    /// True when the request asks for more days than remain.
    pub exceeds_pto_balance: bool,
}

/// Filter for time-off listings. `associate_id` takes precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeOffQuery {
    /// Only requests submitted by this associate.
    pub associate_id: Option<AssociateId>,
    /// Only requests assigned to this approver.
    pub approver_id: Option<AssociateId>,
}

/// Filter for time-entry listings. `associate_id` takes precedence over
/// `manager_id`; `status` applies to either.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeEntryQuery {
    /// Only entries reported by this associate.
    pub associate_id: Option<AssociateId>,
    /// Only entries reported by this manager's direct reports.
    pub manager_id: Option<AssociateId>,
    /// Only entries in this status.
    pub status: Option<ApprovalStatus>,
}

/// New dates and reason for a pending time-off request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOffCorrection {
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

/// The leave and time accounting engine.
#[derive(Clone)]
pub struct LeaveEngine {
    directory: Arc<dyn AssociateDirectory>,
    settings: Arc<dyn SettingsStore>,
    time_off: Arc<dyn TimeOffLedger>,
    time_entries: Arc<dyn TimeEntryLedger>,
}

impl LeaveEngine {
    /// Creates an engine over the given collaborators.
    pub fn new(
        directory: Arc<dyn AssociateDirectory>,
        settings: Arc<dyn SettingsStore>,
        time_off: Arc<dyn TimeOffLedger>,
        time_entries: Arc<dyn TimeEntryLedger>,
    ) -> Self {
        Self {
            directory,
            settings,
            time_off,
            time_entries,
        }
    }

    /// Creates an engine backed entirely by one in-memory store.
    pub fn from_store(store: Arc<InMemoryStore>) -> Self {
        Self::new(store.clone(), store.clone(), store.clone(), store)
    }

    /// Resolves the current settings into a policy snapshot.
    pub fn policy_config(&self) -> PolicyConfig {
        SettingsGateway::new(self.settings.as_ref()).resolve()
    }

    /// Returns the associate with `id`.
    pub fn associate(&self, id: AssociateId) -> EngineResult<Associate> {
        self.directory.get_associate(id)
    }

    /// Computes the PTO balance of an associate as of `now`.
    pub fn pto_balance(&self, associate_id: AssociateId, now: DateTime<Utc>) -> EngineResult<PtoBalance> {
        let associate = self.directory.get_associate(associate_id)?;
        let config = self.policy_config();
        Ok(self.balance_for(&associate, now, &config))
    }

    fn balance_for(
        &self,
        associate: &Associate,
        now: DateTime<Utc>,
        config: &PolicyConfig,
    ) -> PtoBalance {
        let requests = self.time_off.list_time_off_by_associate(associate.id);
        calculate_pto_balance(associate, &requests, now, &config.pto)
    }

    /// Validates, routes and stores a time-off request.
    ///
    /// Asking for more days than remain never blocks submission: the
    /// condition is recorded on the request for the approver to see.
    pub fn submit_time_off(
        &self,
        new_request: NewTimeOffRequest,
        now: DateTime<Utc>,
    ) -> EngineResult<TimeOffSubmission> {
        new_request.validate()?;
        let requester = self.directory.get_associate(new_request.associate_id)?;
        let config = self.policy_config();

        let balance = self.balance_for(&requester, now, &config);
        let requested_days = new_request.requested_days();
        let exceeds_pto_balance = balance.would_exceed(requested_days);

        let associates = self.directory.list_associates();
        let routing = route_time_off_request(&requester, &associates, &config);

        let mut request = TimeOffRequest {
            id: 0,
            associate_id: requester.id,
            start_date: new_request.start_date,
            end_date: new_request.end_date,
            reason: new_request.reason,
            approver: routing.approver,
            status: routing.status,
            exceeds_pto_balance,
            created_at: now,
            updated_at: now,
        };
        request.id = self.time_off.insert_time_off(request.clone());

        if exceeds_pto_balance {
            warn!(
                request_id = request.id,
                associate_id = %requester.id,
                requested_days = %requested_days,
                pto_remaining = %balance.pto_remaining,
                "Time-off request exceeds remaining PTO"
            );
        }
        info!(
            request_id = request.id,
            associate_id = %requester.id,
            status = %request.status,
            approver_id = ?request.approver.id(),
            rule = ?routing.rule,
            reasoning = %routing.reasoning,
            "Time-off request submitted"
        );

        Ok(TimeOffSubmission {
            request,
            rule: routing.rule,
            requested_days,
            pto_remaining: balance.pto_remaining,
            exceeds_pto_balance,
        })
    }

    /// Returns the time-off request with `id`.
    pub fn time_off_request(&self, id: i64) -> EngineResult<TimeOffRequest> {
        self.time_off.get_time_off(id)
    }

    /// Lists time-off requests matching `query`.
    pub fn list_time_off(&self, query: &TimeOffQuery) -> Vec<TimeOffRequest> {
        match (query.associate_id, query.approver_id) {
            (Some(associate_id), _) => self.time_off.list_time_off_by_associate(associate_id),
            (None, Some(approver_id)) => self.time_off.list_time_off_by_approver(approver_id),
            (None, None) => self.time_off.list_time_off(),
        }
    }

    /// Approves or rejects a pending time-off request on behalf of `actor_id`.
    pub fn decide_time_off(
        &self,
        actor_id: AssociateId,
        id: i64,
        decision: Decision,
        now: DateTime<Utc>,
    ) -> EngineResult<TimeOffRequest> {
        let request = self.time_off.get_time_off(id)?;
        let actor = self.actor(actor_id)?;
        let owner = self.directory.get_associate(request.associate_id)?;
        let config = self.policy_config();

        let grant = authorize_decision(&actor, &owner, ApprovalTarget::TimeOff(&request), &config)
            .inspect_err(|err| {
                warn!(request_id = id, actor_id = %actor_id, error = %err, "Time-off decision denied");
            })?;

        let updated = self.time_off.transition_time_off(
            id,
            ApprovalStatus::Pending,
            decision.status(),
            now,
        )?;
        info!(
            request_id = id,
            actor_id = %actor_id,
            grant = ?grant,
            status = %updated.status,
            "Time-off request decided"
        );
        Ok(updated)
    }

    /// Rewrites the dates and reason of a pending time-off request.
    ///
    /// Only the requester or an administrator may correct a request, and the
    /// status is left unchanged. The over-limit flag is recomputed for the
    /// new span against the requester's balance as of `now`.
    pub fn correct_time_off(
        &self,
        actor_id: AssociateId,
        id: i64,
        correction: TimeOffCorrection,
        now: DateTime<Utc>,
    ) -> EngineResult<TimeOffRequest> {
        validate_range(correction.start_date, correction.end_date)?;
        let request = self.time_off.get_time_off(id)?;
        let actor = self.actor(actor_id)?;
        let config = self.policy_config();

        if actor.id != request.associate_id && !grants(&actor, Permission::Administer, &config) {
            warn!(request_id = id, actor_id = %actor_id, "Time-off correction denied");
            return Err(EngineError::Unauthorized {
                actor_id: Some(actor_id),
                message: format!(
                    "only the requester or an administrator may correct request {}",
                    id
                ),
            });
        }

        let requester = self.directory.get_associate(request.associate_id)?;
        let balance = self.balance_for(&requester, now, &config);
        let requested_days =
            Decimal::from(inclusive_day_span(correction.start_date, correction.end_date));
        let exceeds_pto_balance = balance.would_exceed(requested_days);

        let updated = self.time_off.correct_time_off(
            id,
            correction.start_date,
            correction.end_date,
            correction.reason,
            exceeds_pto_balance,
            now,
        )?;
        if exceeds_pto_balance {
            warn!(
                request_id = id,
                associate_id = %requester.id,
                requested_days = %requested_days,
                pto_remaining = %balance.pto_remaining,
                "Corrected time-off request exceeds remaining PTO"
            );
        }
        info!(request_id = id, actor_id = %actor_id, "Time-off request corrected");
        Ok(updated)
    }

    /// Classifies and stores a daily time entry.
    pub fn submit_time_entry(
        &self,
        new_entry: NewTimeEntry,
        now: DateTime<Utc>,
    ) -> EngineResult<TimeEntry> {
        new_entry.validate()?;
        let associate = self.directory.get_associate(new_entry.associate_id)?;
        let config = self.policy_config();
        let classification = classify_overtime(new_entry.hours, &associate, &config);

        let mut entry = TimeEntry {
            id: 0,
            associate_id: associate.id,
            date: new_entry.date,
            hours: new_entry.hours,
            overtime_hours: classification.overtime_hours,
            comments: new_entry.comments,
            status: classification.status,
            created_at: now,
        };
        entry.id = self.time_entries.insert_time_entry(entry.clone());

        info!(
            entry_id = entry.id,
            associate_id = %associate.id,
            hours = %entry.hours,
            overtime_hours = %entry.overtime_hours,
            status = %entry.status,
            exempt = classification.exempt,
            "Time entry submitted"
        );
        Ok(entry)
    }

    /// Returns the time entry with `id`.
    pub fn time_entry(&self, id: i64) -> EngineResult<TimeEntry> {
        self.time_entries.get_time_entry(id)
    }

    /// Lists time entries matching `query`.
    pub fn list_time_entries(&self, query: &TimeEntryQuery) -> Vec<TimeEntry> {
        let entries = match (query.associate_id, query.manager_id) {
            (Some(associate_id), _) => self.time_entries.list_time_entries_by_associate(associate_id),
            (None, Some(manager_id)) => {
                let reports: HashSet<AssociateId> = self
                    .directory
                    .list_associates()
                    .into_iter()
                    .filter(|a| a.manager_id == Some(manager_id))
                    .map(|a| a.id)
                    .collect();
                self.time_entries
                    .list_time_entries()
                    .into_iter()
                    .filter(|e| reports.contains(&e.associate_id))
                    .collect()
            }
            (None, None) => self.time_entries.list_time_entries(),
        };

        match query.status {
            Some(status) => entries.into_iter().filter(|e| e.status == status).collect(),
            None => entries,
        }
    }

    /// Approves or rejects a pending time entry on behalf of `actor_id`.
    pub fn decide_time_entry(
        &self,
        actor_id: AssociateId,
        id: i64,
        decision: Decision,
    ) -> EngineResult<TimeEntry> {
        let entry = self.time_entries.get_time_entry(id)?;
        let actor = self.actor(actor_id)?;
        let owner = self.directory.get_associate(entry.associate_id)?;
        let config = self.policy_config();

        let grant = authorize_decision(&actor, &owner, ApprovalTarget::TimeEntry(&entry), &config)
            .inspect_err(|err| {
                warn!(entry_id = id, actor_id = %actor_id, error = %err, "Time entry decision denied");
            })?;

        let updated =
            self.time_entries
                .transition_time_entry(id, ApprovalStatus::Pending, decision.status())?;
        info!(
            entry_id = id,
            actor_id = %actor_id,
            grant = ?grant,
            status = %updated.status,
            "Time entry decided"
        );
        Ok(updated)
    }

    /// Applies a profile update to `target_id` on behalf of `actor_id`.
    ///
    /// With no actor the update is not gated. An actor id that is not in the
    /// directory is rejected as `Unauthorized` rather than treated as absent,
    /// so an unknown caller cannot bypass the self-edit check.
    pub fn update_profile(
        &self,
        actor_id: Option<AssociateId>,
        target_id: AssociateId,
        update: AssociateUpdate,
    ) -> EngineResult<Associate> {
        let mut target = self.directory.get_associate(target_id)?;
        let actor = actor_id.map(|id| self.actor(id)).transpose()?;
        let config = self.policy_config();

        authorize_profile_edit(actor.as_ref(), &target, &update, &config).inspect_err(|err| {
            warn!(target_id = %target_id, actor_id = ?actor_id, error = %err, "Profile edit denied");
        })?;

        target.apply(update);
        self.directory.upsert_associate(target.clone());
        info!(target_id = %target_id, actor_id = ?actor_id, "Profile updated");
        Ok(target)
    }

    /// Returns a setting's stored value, or its default for recognized keys.
    pub fn get_setting(&self, key: &str) -> Option<String> {
        SettingsGateway::new(self.settings.as_ref()).get_by_name(key)
    }

    /// Stores a setting value.
    pub fn put_setting(&self, key: &str, value: &str) {
        self.settings.set_setting(key, value);
        info!(key = %key, "Setting updated");
    }

    fn actor(&self, id: AssociateId) -> EngineResult<Associate> {
        self.directory.get_associate(id).map_err(|err| match err {
            EngineError::AssociateNotFound { .. } => EngineError::Unauthorized {
                actor_id: Some(id),
                message: format!("unknown actor {}", id),
            },
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedConfig;
    use crate::models::{Approver, RestrictedField};
    use chrono::TimeZone;
    use std::str::FromStr;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 9, 0, 0).unwrap()
    }

    fn associate(id: i64, title: &str, manager_id: Option<i64>, start: &str) -> Associate {
        Associate {
            id: AssociateId(id),
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            title: title.to_string(),
            department: String::new(),
            office: String::new(),
            status: "Active".to_string(),
            employment_status: "Full-time".to_string(),
            email: format!("a{}@example.com", id),
            phone_number: String::new(),
            gender: String::new(),
            private_email: String::new(),
            salary: Decimal::new(90_000, 0),
            date_of_birth: None,
            start_date: make_date(start),
            manager_id: manager_id.map(AssociateId),
        }
    }

    fn create_test_engine() -> LeaveEngine {
        let mut seed = SeedConfig::default();
        seed.settings
            .insert("second_approver_id".to_string(), "6".to_string());
        seed.associates = vec![
            associate(1, "CEO", None, "2015-01-05"),
            associate(2, "Head of People", Some(1), "2018-02-01"),
            associate(3, "Engineering Manager", None, "2019-06-01"),
            associate(4, "Engineer", Some(3), "2022-03-01"),
            associate(5, "Contractor", None, "2024-08-19"),
            associate(6, "Payroll Officer", Some(2), "2021-01-11"),
            associate(7, "Engineer", Some(3), "2023-09-01"),
        ];
        LeaveEngine::from_store(Arc::new(InMemoryStore::from_seed(seed)))
    }

    fn leave(associate_id: i64, start: &str, end: &str) -> NewTimeOffRequest {
        NewTimeOffRequest {
            associate_id: AssociateId(associate_id),
            start_date: make_date(start),
            end_date: make_date(end),
            reason: "Holiday".to_string(),
        }
    }

    fn hours(associate_id: i64, value: &str) -> NewTimeEntry {
        NewTimeEntry {
            associate_id: AssociateId(associate_id),
            date: make_date("2026-05-04"),
            hours: Decimal::from_str(value).unwrap(),
            comments: String::new(),
        }
    }

    #[test]
    fn test_submit_routes_to_manager() {
        let engine = create_test_engine();
        let result = engine
            .submit_time_off(leave(4, "2026-06-01", "2026-06-05"), now())
            .unwrap();

        assert_eq!(result.request.id, 1);
        assert_eq!(result.request.status, ApprovalStatus::Pending);
        assert_eq!(result.request.approver, Approver::Assigned(AssociateId(3)));
        assert_eq!(result.rule, RoutingRule::DirectManager);
        assert_eq!(result.requested_days, Decimal::new(5, 0));
        assert_eq!(result.pto_remaining, Decimal::new(15, 0));
        assert!(!result.exceeds_pto_balance);
        assert_eq!(engine.time_off_request(1).unwrap(), result.request);
    }

    #[test]
    fn test_submit_ceo_is_auto_approved_and_counts_toward_balance() {
        let engine = create_test_engine();
        let result = engine
            .submit_time_off(leave(1, "2026-05-11", "2026-05-13"), now())
            .unwrap();
        assert_eq!(result.request.status, ApprovalStatus::Approved);
        assert_eq!(result.request.approver, Approver::Unassigned);

        let balance = engine.pto_balance(AssociateId(1), now()).unwrap();
        assert_eq!(balance.pto_used, Decimal::new(3, 0));
        assert_eq!(balance.pto_remaining, Decimal::new(12, 0));
    }

    #[test]
    fn test_over_limit_request_is_accepted_and_flagged() {
        let engine = create_test_engine();
        let result = engine
            .submit_time_off(leave(4, "2026-07-01", "2026-07-20"), now())
            .unwrap();

        assert_eq!(result.request.status, ApprovalStatus::Pending);
        assert!(result.exceeds_pto_balance);
        assert!(engine.time_off_request(result.request.id).unwrap().exceeds_pto_balance);
    }

    #[test]
    fn test_submit_rejects_inverted_range_and_unknown_associate() {
        let engine = create_test_engine();
        assert!(matches!(
            engine.submit_time_off(leave(4, "2026-06-05", "2026-06-01"), now()),
            Err(EngineError::InvalidDateRange { .. })
        ));
        assert!(matches!(
            engine.submit_time_off(leave(99, "2026-06-01", "2026-06-01"), now()),
            Err(EngineError::AssociateNotFound { .. })
        ));
        assert!(engine.list_time_off(&TimeOffQuery::default()).is_empty());
    }

    #[test]
    fn test_unmanaged_manager_escalates_and_loner_is_unassigned() {
        let engine = create_test_engine();
        let manager = engine
            .submit_time_off(leave(3, "2026-06-01", "2026-06-01"), now())
            .unwrap();
        assert_eq!(manager.request.approver, Approver::Assigned(AssociateId(1)));
        assert_eq!(manager.request.status, ApprovalStatus::Pending);

        let loner = engine
            .submit_time_off(leave(5, "2026-06-01", "2026-06-01"), now())
            .unwrap();
        assert_eq!(loner.request.approver, Approver::Unassigned);
        assert_eq!(loner.request.status, ApprovalStatus::Pending);
    }

    #[test]
    fn test_decide_time_off_by_manager_then_conflict() {
        let engine = create_test_engine();
        let id = engine
            .submit_time_off(leave(4, "2026-06-01", "2026-06-02"), now())
            .unwrap()
            .request
            .id;

        let approved = engine
            .decide_time_off(AssociateId(3), id, Decision::Approve, now())
            .unwrap();
        assert_eq!(approved.status, ApprovalStatus::Approved);

        assert!(matches!(
            engine.decide_time_off(AssociateId(1), id, Decision::Reject, now()),
            Err(EngineError::StatusConflict { current: ApprovalStatus::Approved, .. })
        ));
    }

    #[test]
    fn test_decide_time_off_by_peer_is_unauthorized() {
        let engine = create_test_engine();
        let id = engine
            .submit_time_off(leave(4, "2026-06-01", "2026-06-02"), now())
            .unwrap()
            .request
            .id;

        assert!(matches!(
            engine.decide_time_off(AssociateId(7), id, Decision::Approve, now()),
            Err(EngineError::Unauthorized { .. })
        ));
        assert!(matches!(
            engine.decide_time_off(AssociateId(42), id, Decision::Approve, now()),
            Err(EngineError::Unauthorized { actor_id: Some(AssociateId(42)), .. })
        ));
        assert_eq!(
            engine.time_off_request(id).unwrap().status,
            ApprovalStatus::Pending
        );
    }

    #[test]
    fn test_correct_time_off() {
        let engine = create_test_engine();
        let id = engine
            .submit_time_off(leave(4, "2026-06-01", "2026-06-02"), now())
            .unwrap()
            .request
            .id;
        let correction = TimeOffCorrection {
            start_date: make_date("2026-06-08"),
            end_date: make_date("2026-06-10"),
            reason: "Moved".to_string(),
        };

        assert!(matches!(
            engine.correct_time_off(AssociateId(7), id, correction.clone(), now()),
            Err(EngineError::Unauthorized { .. })
        ));

        let corrected = engine
            .correct_time_off(AssociateId(4), id, correction.clone(), now())
            .unwrap();
        assert_eq!(corrected.start_date, make_date("2026-06-08"));
        assert_eq!(corrected.status, ApprovalStatus::Pending);

        engine
            .decide_time_off(AssociateId(3), id, Decision::Reject, now())
            .unwrap();
        assert!(matches!(
            engine.correct_time_off(AssociateId(2), id, correction, now()),
            Err(EngineError::StatusConflict { .. })
        ));
    }

    #[test]
    fn test_correct_time_off_recomputes_over_limit_flag() {
        let engine = create_test_engine();
        let submitted = engine
            .submit_time_off(leave(4, "2026-06-01", "2026-06-01"), now())
            .unwrap();
        assert!(!submitted.exceeds_pto_balance);

        let widened = TimeOffCorrection {
            start_date: make_date("2026-06-01"),
            end_date: make_date("2026-07-31"),
            reason: "Sabbatical".to_string(),
        };
        let corrected = engine
            .correct_time_off(AssociateId(4), submitted.request.id, widened, now())
            .unwrap();
        assert_eq!(corrected.day_span(), 61);
        assert!(corrected.exceeds_pto_balance);

        let narrowed = TimeOffCorrection {
            start_date: make_date("2026-06-01"),
            end_date: make_date("2026-06-03"),
            reason: "Holiday".to_string(),
        };
        let corrected = engine
            .correct_time_off(AssociateId(4), submitted.request.id, narrowed, now())
            .unwrap();
        assert!(!corrected.exceeds_pto_balance);
        assert_eq!(
            engine.time_off_request(submitted.request.id).unwrap(),
            corrected
        );
    }

    #[test]
    fn test_list_time_off_filters() {
        let engine = create_test_engine();
        engine
            .submit_time_off(leave(4, "2026-06-01", "2026-06-01"), now())
            .unwrap();
        engine
            .submit_time_off(leave(7, "2026-06-01", "2026-06-01"), now())
            .unwrap();
        engine
            .submit_time_off(leave(6, "2026-06-01", "2026-06-01"), now())
            .unwrap();

        let by_associate = TimeOffQuery {
            associate_id: Some(AssociateId(4)),
            ..Default::default()
        };
        let by_approver = TimeOffQuery {
            approver_id: Some(AssociateId(3)),
            ..Default::default()
        };
        assert_eq!(engine.list_time_off(&by_associate).len(), 1);
        assert_eq!(engine.list_time_off(&by_approver).len(), 2);
        assert_eq!(engine.list_time_off(&TimeOffQuery::default()).len(), 3);
    }

    #[test]
    fn test_time_entry_classification() {
        let engine = create_test_engine();

        let regular = engine.submit_time_entry(hours(4, "8"), now()).unwrap();
        assert_eq!(regular.status, ApprovalStatus::Approved);
        assert_eq!(regular.overtime_hours, Decimal::ZERO);

        let overtime = engine.submit_time_entry(hours(4, "9.5"), now()).unwrap();
        assert_eq!(overtime.status, ApprovalStatus::Pending);
        assert_eq!(overtime.overtime_hours, Decimal::from_str("1.5").unwrap());

        let ceo = engine.submit_time_entry(hours(1, "12"), now()).unwrap();
        assert_eq!(ceo.status, ApprovalStatus::Approved);
        assert_eq!(ceo.overtime_hours, Decimal::new(4, 0));

        assert!(matches!(
            engine.submit_time_entry(hours(4, "-1"), now()),
            Err(EngineError::InvalidHours { .. })
        ));
        assert!(matches!(
            engine.submit_time_entry(hours(99, "8"), now()),
            Err(EngineError::AssociateNotFound { .. })
        ));
    }

    #[test]
    fn test_second_approver_decides_overtime_only() {
        let engine = create_test_engine();
        let overtime = engine.submit_time_entry(hours(4, "10"), now()).unwrap();
        let approved = engine
            .decide_time_entry(AssociateId(6), overtime.id, Decision::Approve)
            .unwrap();
        assert_eq!(approved.status, ApprovalStatus::Approved);

        let regular = engine.submit_time_entry(hours(4, "6"), now()).unwrap();
        assert!(matches!(
            engine.decide_time_entry(AssociateId(6), regular.id, Decision::Reject),
            Err(EngineError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_list_time_entries_by_manager_and_status() {
        let engine = create_test_engine();
        engine.submit_time_entry(hours(4, "9"), now()).unwrap();
        engine.submit_time_entry(hours(7, "7"), now()).unwrap();
        engine.submit_time_entry(hours(6, "10"), now()).unwrap();

        let team = TimeEntryQuery {
            manager_id: Some(AssociateId(3)),
            ..Default::default()
        };
        assert_eq!(engine.list_time_entries(&team).len(), 2);

        let team_pending = TimeEntryQuery {
            status: Some(ApprovalStatus::Pending),
            ..team
        };
        let pending = engine.list_time_entries(&team_pending);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].associate_id, AssociateId(4));

        assert_eq!(engine.list_time_entries(&TimeEntryQuery::default()).len(), 3);
    }

    #[test]
    fn test_update_profile_gate() {
        let engine = create_test_engine();

        let denied = engine.update_profile(
            Some(AssociateId(4)),
            AssociateId(4),
            AssociateUpdate {
                title: Some("CTO".to_string()),
                phone_number: Some("555-0199".to_string()),
                ..Default::default()
            },
        );
        match denied {
            Err(EngineError::RestrictedFieldsChanged { fields }) => {
                assert_eq!(fields, vec![RestrictedField::Title])
            }
            other => panic!("Expected RestrictedFieldsChanged, got {:?}", other),
        }
        assert_eq!(engine.associate(AssociateId(4)).unwrap().title, "Engineer");

        let updated = engine
            .update_profile(
                Some(AssociateId(4)),
                AssociateId(4),
                AssociateUpdate {
                    phone_number: Some("555-0199".to_string()),
                    title: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.phone_number, "555-0199");
        assert_eq!(updated.title, "Engineer");

        let promoted = engine
            .update_profile(
                Some(AssociateId(2)),
                AssociateId(4),
                AssociateUpdate {
                    title: Some("Senior Engineer".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(promoted.title, "Senior Engineer");
    }

    #[test]
    fn test_update_profile_unknown_actor_is_unauthorized() {
        let engine = create_test_engine();
        let result = engine.update_profile(
            Some(AssociateId(42)),
            AssociateId(4),
            AssociateUpdate {
                title: Some("CTO".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(
            result,
            Err(EngineError::Unauthorized { actor_id: Some(AssociateId(42)), .. })
        ));
        assert_eq!(engine.associate(AssociateId(4)).unwrap().title, "Engineer");

        let unattributed = engine
            .update_profile(
                None,
                AssociateId(4),
                AssociateUpdate {
                    title: Some("Senior Engineer".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(unattributed.title, "Senior Engineer");
    }

    #[test]
    fn test_oversized_proportional_entitlement_does_not_panic() {
        let engine = create_test_engine();
        engine.put_setting("pto_accrual_method", "proportional");
        engine.put_setting("pto_days_per_year", "79228162514264337593543950335");

        let balance = engine.pto_balance(AssociateId(4), now()).unwrap();
        assert!(balance.pto_allocated > Decimal::ZERO);
        assert!(balance.pto_allocated < Decimal::new(15, 0));
        assert!(
            engine
                .submit_time_off(leave(4, "2026-06-01", "2026-06-01"), now())
                .is_ok()
        );
    }

    #[test]
    fn test_settings_are_read_per_operation() {
        let engine = create_test_engine();
        assert_eq!(engine.get_setting("pto_days_per_year").as_deref(), Some("15.0"));
        assert_eq!(engine.get_setting("unknown_key"), None);

        engine.put_setting("time_off_exempt_titles", "Contractor");
        let result = engine
            .submit_time_off(leave(5, "2026-06-01", "2026-06-01"), now())
            .unwrap();
        assert_eq!(result.request.status, ApprovalStatus::Approved);

        engine.put_setting("pto_days_per_year", "20");
        let balance = engine.pto_balance(AssociateId(4), now()).unwrap();
        assert_eq!(balance.pto_allocated, Decimal::new(20, 0));
    }
}
