//! Settings resolution and seed loading.
//!
//! This module provides the [`SettingsGateway`], a typed accessor over any
//! [`SettingsStore`], and the [`ConfigLoader`] that reads seed data for the
//! directory and settings store from YAML files.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::AssociateId;
use crate::store::SettingsStore;

use super::types::{
    AccrualMethod, AssociatesFile, PolicyConfig, PtoPolicy, SeedConfig, SettingKey, SettingsFile,
    TitleSet, DEFAULT_PTO_DAYS_PER_YEAR,
};

/// Typed accessor over a settings store.
///
/// Absence is a normal configuration state: every lookup yields either the
/// stored value or the documented default, never an error.
///
/// # Example
///
/// ```
/// use leave_engine::config::{SettingKey, SettingsGateway};
/// use leave_engine::store::{InMemoryStore, SettingsStore};
///
/// let store = InMemoryStore::new();
/// let gateway = SettingsGateway::new(&store);
/// assert_eq!(gateway.get(SettingKey::PtoAccrualMethod).as_deref(), Some("immediate"));
///
/// store.set_setting("pto_accrual_method", "proportional");
/// assert_eq!(gateway.get(SettingKey::PtoAccrualMethod).as_deref(), Some("proportional"));
/// ```
pub struct SettingsGateway<'a> {
    store: &'a dyn SettingsStore,
}

impl<'a> SettingsGateway<'a> {
    /// Creates a gateway reading from `store`.
    pub fn new(store: &'a dyn SettingsStore) -> Self {
        Self { store }
    }

    /// Returns the stored value if present and non-empty, otherwise the
    /// documented default for the key.
    pub fn get(&self, key: SettingKey) -> Option<String> {
        self.stored(key.as_str())
            .or_else(|| key.default_value().map(str::to_string))
    }

    /// Looks up any key by name, applying defaults for recognized keys.
    pub fn get_by_name(&self, key: &str) -> Option<String> {
        match SettingKey::from_str(key) {
            Ok(known) => self.get(known),
            Err(()) => self.stored(key),
        }
    }

    fn stored(&self, key: &str) -> Option<String> {
        self.store
            .get_setting(key)
            .filter(|value| !value.trim().is_empty())
    }

    /// Resolves every policy setting into a single snapshot.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn resolve(&self) -> PolicyConfig {
        PolicyConfig {
            pto: PtoPolicy {
                days_per_year: self.pto_days_per_year(),
                accrual_method: self.accrual_method(),
            },
            time_off_exempt_titles: self.titles(SettingKey::TimeOffExemptTitles),
            overtime_exempt_titles: self.titles(SettingKey::OvertimeExemptTitles),
            second_approver: self.second_approver(),
            profile_edit_roles: self.titles(SettingKey::ProfileEditRoles),
        }
    }

    fn pto_days_per_year(&self) -> Decimal {
        let Some(raw) = self.get(SettingKey::PtoDaysPerYear) else {
            return DEFAULT_PTO_DAYS_PER_YEAR;
        };
        match Decimal::from_str(raw.trim()) {
            Ok(days) if days >= Decimal::ZERO => days,
            _ => {
                debug!(value = %raw, "Unparseable pto_days_per_year, using default");
                DEFAULT_PTO_DAYS_PER_YEAR
            }
        }
    }

    fn accrual_method(&self) -> AccrualMethod {
        let raw = self.get(SettingKey::PtoAccrualMethod).unwrap_or_default();
        AccrualMethod::parse(&raw).unwrap_or_else(|| {
            debug!(value = %raw, "Unknown pto_accrual_method, using default");
            AccrualMethod::default()
        })
    }

    fn second_approver(&self) -> Option<AssociateId> {
        let raw = self.get(SettingKey::SecondApproverId)?;
        match raw.parse::<AssociateId>() {
            Ok(id) => Some(id),
            Err(_) => {
                debug!(value = %raw, "Unparseable second_approver_id, ignoring");
                None
            }
        }
    }

    fn titles(&self, key: SettingKey) -> TitleSet {
        self.get(key)
            .map(|raw| TitleSet::parse(&raw))
            .unwrap_or_default()
    }
}

/// Loads seed data for the directory and settings store.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── settings.yaml    # settings: { key: value, ... }
/// └── associates.yaml  # associates: [ ... ]
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let seed = ConfigLoader::load("./config/default")?;
/// println!("Loaded {} associates", seed.associates.len());
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads seed data from the specified directory.
    ///
    /// Returns an error if either file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<SeedConfig> {
        let path = path.as_ref();

        let settings_file = Self::load_yaml::<SettingsFile>(&path.join("settings.yaml"))?;
        let associates_file = Self::load_yaml::<AssociatesFile>(&path.join("associates.yaml"))?;

        let settings = settings_file
            .settings
            .into_iter()
            .filter_map(|(key, value)| match scalar_to_string(&value) {
                Some(value) => Some((key, value)),
                None => {
                    warn!(key = %key, "Ignoring non-scalar setting value");
                    None
                }
            })
            .collect();

        Ok(SeedConfig {
            settings,
            associates: associates_file.associates,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Null => Some(String::new()),
        _ => None,
    }
}
