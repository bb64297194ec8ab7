//! Configuration types for policy evaluation.
//!
//! This module contains the recognized setting keys with their documented
//! defaults, and the strongly-typed [`PolicyConfig`] snapshot that the
//! policy functions receive as an explicit parameter.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Associate, AssociateId};

/// Default annual PTO entitlement in days.
pub const DEFAULT_PTO_DAYS_PER_YEAR: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// Default roles allowed to edit restricted fields on their own profile.
pub const DEFAULT_PROFILE_EDIT_ROLES: &str = "CEO,Head of People";

/// A setting key consumed by the policy engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// Annual PTO entitlement.
    PtoDaysPerYear,
    /// `immediate` or `proportional`.
    PtoAccrualMethod,
    /// Titles auto-approved for leave.
    TimeOffExemptTitles,
    /// Titles exempt from overtime approval.
    OvertimeExemptTitles,
    /// Associate allowed to approve any overtime entry.
    SecondApproverId,
    /// Titles allowed to edit restricted fields on their own profile.
    ProfileEditRoles,
}

impl SettingKey {
    /// All recognized keys.
    pub const ALL: [SettingKey; 6] = [
        SettingKey::PtoDaysPerYear,
        SettingKey::PtoAccrualMethod,
        SettingKey::TimeOffExemptTitles,
        SettingKey::OvertimeExemptTitles,
        SettingKey::SecondApproverId,
        SettingKey::ProfileEditRoles,
    ];

    /// Returns the key as stored in the settings store.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::PtoDaysPerYear => "pto_days_per_year",
            SettingKey::PtoAccrualMethod => "pto_accrual_method",
            SettingKey::TimeOffExemptTitles => "time_off_exempt_titles",
            SettingKey::OvertimeExemptTitles => "overtime_exempt_titles",
            SettingKey::SecondApproverId => "second_approver_id",
            SettingKey::ProfileEditRoles => "profile_edit_roles",
        }
    }

    /// Returns the documented default, if the key has one.
    pub fn default_value(&self) -> Option<&'static str> {
        match self {
            SettingKey::PtoDaysPerYear => Some("15.0"),
            SettingKey::PtoAccrualMethod => Some("immediate"),
            SettingKey::ProfileEditRoles => Some(DEFAULT_PROFILE_EDIT_ROLES),
            SettingKey::TimeOffExemptTitles
            | SettingKey::OvertimeExemptTitles
            | SettingKey::SecondApproverId => None,
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or(())
    }
}

/// Policy for how PTO entitlement grows over the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualMethod {
    /// The full annual entitlement is granted upfront.
    #[default]
    Immediate,
    /// Entitlement accrues linearly through the year.
    Proportional,
}

impl AccrualMethod {
    /// Parses a stored setting value, case-insensitively.
    ///
    /// `accrual` is accepted as an alias of `proportional`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "immediate" => Some(AccrualMethod::Immediate),
            "proportional" | "accrual" => Some(AccrualMethod::Proportional),
            _ => None,
        }
    }
}

/// A comma-separated list of titles, matched trimmed and case-insensitively.
///
/// # Example
///
/// ```
/// use leave_engine::config::TitleSet;
///
/// let titles = TitleSet::parse("CTO, Head of Sales");
/// assert!(titles.contains("cto"));
/// assert!(titles.contains("Head of Sales"));
/// assert!(!titles.contains("Engineer"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleSet {
    titles: Vec<String>,
}

impl TitleSet {
    /// Parses a comma-separated list. Blank items are dropped.
    pub fn parse(value: &str) -> Self {
        let titles = value
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self { titles }
    }

    /// Returns true if `title` is in the set.
    pub fn contains(&self, title: &str) -> bool {
        let title = title.trim().to_lowercase();
        self.titles.iter().any(|t| *t == title)
    }

    /// Returns true if the set has no titles.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// PTO entitlement settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PtoPolicy {
    /// Annual entitlement in days.
    pub days_per_year: Decimal,
    /// How the entitlement accrues.
    pub accrual_method: AccrualMethod,
}

impl Default for PtoPolicy {
    fn default() -> Self {
        Self {
            days_per_year: DEFAULT_PTO_DAYS_PER_YEAR,
            accrual_method: AccrualMethod::Immediate,
        }
    }
}

/// A resolved, immutable snapshot of every setting the policy engine reads.
///
/// Built once per operation from the settings store and passed explicitly
/// into the policy functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    /// PTO entitlement settings.
    pub pto: PtoPolicy,
    /// Titles auto-approved for leave, in addition to CEO and Head of People.
    pub time_off_exempt_titles: TitleSet,
    /// Titles exempt from overtime approval, in addition to CEO.
    pub overtime_exempt_titles: TitleSet,
    /// Associate allowed to approve any overtime entry.
    pub second_approver: Option<AssociateId>,
    /// Titles allowed to edit restricted fields on their own profile.
    pub profile_edit_roles: TitleSet,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            pto: PtoPolicy::default(),
            time_off_exempt_titles: TitleSet::default(),
            overtime_exempt_titles: TitleSet::default(),
            second_approver: None,
            profile_edit_roles: TitleSet::parse(DEFAULT_PROFILE_EDIT_ROLES),
        }
    }
}

/// Seed data loaded from a configuration directory.
#[derive(Debug, Clone, Default)]
pub struct SeedConfig {
    /// Initial settings store contents.
    pub settings: HashMap<String, String>,
    /// Initial directory contents.
    pub associates: Vec<Associate>,
}

/// `settings.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SettingsFile {
    /// Map of setting key to value.
    #[serde(default)]
    pub settings: HashMap<String, serde_yaml::Value>,
}

/// `associates.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AssociatesFile {
    /// Directory records.
    #[serde(default)]
    pub associates: Vec<Associate>,
}
