//! Leave approval routing.
//!
//! This module decides, at submission, who must approve a leave request and
//! what status it starts in. Rules are evaluated in order and the first
//! match wins:
//!
//! 1. Exempt requester (CEO, Head of People, or a configured exempt title):
//!    approved immediately with no approver.
//! 2. Requester has a manager: the manager approves.
//! 3. Requester has no manager but manages others: the first CEO or Head of
//!    People in the directory approves, if one exists.
//! 4. Otherwise the request stays pending with no approver assigned.

use serde::{Deserialize, Serialize};

use crate::config::PolicyConfig;
use crate::models::{ApprovalStatus, Approver, Associate};

use super::roles::{Permission, grants};

/// The routing rule that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingRule {
    /// Requester's title is exempt from approval.
    ExemptTitle,
    /// Routed to the requester's manager.
    DirectManager,
    /// Requester is an unmanaged manager; routed to an administrator.
    ManagerEscalation,
    /// No approver could be determined.
    Unassigned,
}

/// The outcome of routing a leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Who must approve.
    pub approver: Approver,
    /// Initial status of the request.
    pub status: ApprovalStatus,
    /// Which rule matched.
    pub rule: RoutingRule,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Routes a leave request submitted by `requester`.
///
/// `associates` is the full directory listing, in directory order; it is
/// only consulted when the requester has no manager.
///
/// # Examples
///
/// ```
/// use leave_engine::config::PolicyConfig;
/// use leave_engine::models::{ApprovalStatus, Approver, Associate, AssociateId};
/// use leave_engine::policy::{RoutingRule, route_time_off_request};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let engineer = Associate {
///     id: AssociateId(4),
///     first_name: "Jordan".to_string(),
///     last_name: "Lee".to_string(),
///     title: "Engineer".to_string(),
///     department: String::new(),
///     office: String::new(),
///     status: String::new(),
///     employment_status: String::new(),
///     email: String::new(),
///     phone_number: String::new(),
///     gender: String::new(),
///     private_email: String::new(),
///     salary: Decimal::ZERO,
///     date_of_birth: None,
///     start_date: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
///     manager_id: Some(AssociateId(7)),
/// };
///
/// let decision = route_time_off_request(&engineer, &[], &PolicyConfig::default());
/// assert_eq!(decision.rule, RoutingRule::DirectManager);
/// assert_eq!(decision.approver, Approver::Assigned(AssociateId(7)));
/// assert_eq!(decision.status, ApprovalStatus::Pending);
/// ```
pub fn route_time_off_request(
    requester: &Associate,
    associates: &[Associate],
    config: &PolicyConfig,
) -> RoutingDecision {
    if grants(requester, Permission::AutoApproveTimeOff, config) {
        return RoutingDecision {
            approver: Approver::Unassigned,
            status: ApprovalStatus::Approved,
            rule: RoutingRule::ExemptTitle,
            reasoning: format!(
                "Title '{}' is exempt from leave approval; request auto-approved",
                requester.title
            ),
        };
    }

    if let Some(manager_id) = requester.manager_id {
        return RoutingDecision {
            approver: Approver::Assigned(manager_id),
            status: ApprovalStatus::Pending,
            rule: RoutingRule::DirectManager,
            reasoning: format!("Routed to direct manager {}", manager_id),
        };
    }

    let is_manager = associates
        .iter()
        .any(|other| other.id != requester.id && requester.manages(other));

    if is_manager {
        let approver = associates
            .iter()
            .find(|a| a.role().is_administrator())
            .map(|a| a.id);

        let reasoning = match approver {
            Some(id) => format!(
                "Requester manages others but has no manager; routed to administrator {}",
                id
            ),
            None => "Requester manages others but has no manager and no administrator exists"
                .to_string(),
        };

        return RoutingDecision {
            approver: approver.into(),
            status: ApprovalStatus::Pending,
            rule: RoutingRule::ManagerEscalation,
            reasoning,
        };
    }

    RoutingDecision {
        approver: Approver::Unassigned,
        status: ApprovalStatus::Pending,
        rule: RoutingRule::Unassigned,
        reasoning: "Requester has no manager and no reports; awaiting administrator assignment"
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TitleSet;
    use crate::models::AssociateId;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn create_test_associate(id: i64, title: &str, manager_id: Option<i64>) -> Associate {
        Associate {
            id: AssociateId(id),
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            title: title.to_string(),
            department: String::new(),
            office: String::new(),
            status: String::new(),
            employment_status: String::new(),
            email: String::new(),
            phone_number: String::new(),
            gender: String::new(),
            private_email: String::new(),
            salary: Decimal::ZERO,
            date_of_birth: None,
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            manager_id: manager_id.map(AssociateId),
        }
    }

    fn directory() -> Vec<Associate> {
        vec![
            create_test_associate(1, "CEO", None),
            create_test_associate(2, "Head of People", Some(1)),
            create_test_associate(3, "Engineering Manager", None),
            create_test_associate(4, "Engineer", Some(3)),
            create_test_associate(5, "Contractor", None),
        ]
    }

    #[test]
    fn test_ceo_is_auto_approved() {
        let associates = directory();
        let decision = route_time_off_request(&associates[0], &associates, &PolicyConfig::default());

        assert_eq!(decision.status, ApprovalStatus::Approved);
        assert_eq!(decision.approver, Approver::Unassigned);
        assert_eq!(decision.rule, RoutingRule::ExemptTitle);
    }

    #[test]
    fn test_head_of_people_with_manager_is_still_auto_approved() {
        let associates = directory();
        let decision = route_time_off_request(&associates[1], &associates, &PolicyConfig::default());

        assert_eq!(decision.status, ApprovalStatus::Approved);
        assert_eq!(decision.approver, Approver::Unassigned);
    }

    #[test]
    fn test_configured_exempt_title_is_auto_approved() {
        let associates = directory();
        let config = PolicyConfig {
            time_off_exempt_titles: TitleSet::parse("Contractor"),
            ..Default::default()
        };
        let decision = route_time_off_request(&associates[4], &associates, &config);

        assert_eq!(decision.status, ApprovalStatus::Approved);
        assert_eq!(decision.rule, RoutingRule::ExemptTitle);
    }

    #[test]
    fn test_engineer_routes_to_manager() {
        let associates = directory();
        let decision = route_time_off_request(&associates[3], &associates, &PolicyConfig::default());

        assert_eq!(decision.status, ApprovalStatus::Pending);
        assert_eq!(decision.approver, Approver::Assigned(AssociateId(3)));
        assert_eq!(decision.rule, RoutingRule::DirectManager);
    }

    #[test]
    fn test_unmanaged_manager_escalates_to_first_administrator() {
        let associates = directory();
        let decision = route_time_off_request(&associates[2], &associates, &PolicyConfig::default());

        assert_eq!(decision.status, ApprovalStatus::Pending);
        assert_eq!(decision.approver, Approver::Assigned(AssociateId(1)));
        assert_eq!(decision.rule, RoutingRule::ManagerEscalation);
    }

    #[test]
    fn test_escalation_uses_directory_order() {
        let mut associates = directory();
        associates.swap(0, 1);
        let manager = associates[2].clone();
        let decision = route_time_off_request(&manager, &associates, &PolicyConfig::default());

        assert_eq!(decision.approver, Approver::Assigned(AssociateId(2)));
    }

    #[test]
    fn test_unmanaged_manager_without_administrator_is_unassigned_pending() {
        let associates = vec![
            create_test_associate(3, "Engineering Manager", None),
            create_test_associate(4, "Engineer", Some(3)),
        ];
        let decision = route_time_off_request(&associates[0], &associates, &PolicyConfig::default());

        assert_eq!(decision.status, ApprovalStatus::Pending);
        assert_eq!(decision.approver, Approver::Unassigned);
        assert_eq!(decision.rule, RoutingRule::ManagerEscalation);
    }

    #[test]
    fn test_no_manager_and_no_reports_is_unassigned_pending() {
        let associates = directory();
        let decision = route_time_off_request(&associates[4], &associates, &PolicyConfig::default());

        assert_eq!(decision.status, ApprovalStatus::Pending);
        assert_eq!(decision.approver, Approver::Unassigned);
        assert_eq!(decision.rule, RoutingRule::Unassigned);
    }

    #[test]
    fn test_self_managed_associate_is_not_a_manager() {
        let associates = vec![
            create_test_associate(1, "CEO", None),
            create_test_associate(6, "Analyst", None),
        ];
        let mut odd = associates[1].clone();
        odd.manager_id = None;
        let mut listing = associates.clone();
        listing[1].manager_id = Some(AssociateId(6));

        let decision = route_time_off_request(&odd, &listing, &PolicyConfig::default());
        assert_eq!(decision.rule, RoutingRule::Unassigned);
    }
}
