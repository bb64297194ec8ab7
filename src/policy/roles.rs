//! Title-based roles and permissions.
//!
//! Titles are free text in the directory. Every authorization decision in
//! the engine goes through [`Role`] and [`grants`] instead of comparing
//! title strings at the call site.

use crate::config::PolicyConfig;
use crate::models::Associate;

/// Title of the chief executive.
pub const CEO_TITLE: &str = "CEO";

/// Title of the head of the people team.
pub const HEAD_OF_PEOPLE_TITLE: &str = "Head of People";

/// A role derived from an associate's title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Chief executive.
    Ceo,
    /// Head of the people team.
    HeadOfPeople,
    /// Any other title.
    Other,
}

impl Role {
    /// Derives the role from a title, trimmed and case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::policy::Role;
    ///
    /// assert_eq!(Role::from_title("CEO"), Role::Ceo);
    /// assert_eq!(Role::from_title(" head of people "), Role::HeadOfPeople);
    /// assert_eq!(Role::from_title("Engineer"), Role::Other);
    /// ```
    pub fn from_title(title: &str) -> Self {
        let title = title.trim();
        if title.eq_ignore_ascii_case(CEO_TITLE) {
            Role::Ceo
        } else if title.eq_ignore_ascii_case(HEAD_OF_PEOPLE_TITLE) {
            Role::HeadOfPeople
        } else {
            Role::Other
        }
    }

    /// CEO and Head of People hold administrative override.
    pub fn is_administrator(&self) -> bool {
        matches!(self, Role::Ceo | Role::HeadOfPeople)
    }
}

/// Something an associate may be allowed to do by virtue of their title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Leave requests are approved at submission.
    AutoApproveTimeOff,
    /// Overtime entries are approved at submission.
    BypassOvertimeApproval,
    /// May approve or reject anyone's leave and time entries.
    Administer,
    /// May change restricted fields on their own profile.
    EditOwnRestrictedFields,
}

/// Returns true if `associate` holds `permission` under `config`.
pub fn grants(associate: &Associate, permission: Permission, config: &PolicyConfig) -> bool {
    let role = associate.role();
    match permission {
        Permission::AutoApproveTimeOff => {
            role.is_administrator() || config.time_off_exempt_titles.contains(&associate.title)
        }
        Permission::BypassOvertimeApproval => {
            role == Role::Ceo || config.overtime_exempt_titles.contains(&associate.title)
        }
        Permission::Administer => role.is_administrator(),
        Permission::EditOwnRestrictedFields => config.profile_edit_roles.contains(&associate.title),
    }
}
