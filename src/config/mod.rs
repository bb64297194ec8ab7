//! Configuration for the leave and time accounting engine.
//!
//! Policy settings live in the settings store and are resolved per operation
//! into a [`PolicyConfig`] snapshot by the [`SettingsGateway`]. Seed data for
//! the in-memory store is loaded from YAML files by the [`ConfigLoader`].
//!
//! # Example
//!
//! ```
//! use leave_engine::config::SettingsGateway;
//! use leave_engine::store::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! let config = SettingsGateway::new(&store).resolve();
//! assert!(config.profile_edit_roles.contains("CEO"));
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, SettingsGateway};
pub use types::{
    AccrualMethod, DEFAULT_PROFILE_EDIT_ROLES, DEFAULT_PTO_DAYS_PER_YEAR, PolicyConfig, PtoPolicy,
    SeedConfig, SettingKey, TitleSet,
};
