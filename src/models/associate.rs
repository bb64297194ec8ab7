//! Associate model and related types.
//!
//! This module defines the directory record for an associate, the partial
//! update payload used for profile edits, and the set of restricted profile
//! fields that only privileged roles may change on their own record.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::policy::Role;

/// Identifier of an associate in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssociateId(pub i64);

impl fmt::Display for AssociateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AssociateId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(AssociateId)
    }
}

impl From<i64> for AssociateId {
    fn from(id: i64) -> Self {
        AssociateId(id)
    }
}

/// Represents an associate as held by the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Associate {
    /// Unique identifier for the associate.
    pub id: AssociateId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Free-text role label (e.g., "CEO", "Head of People", "Engineer").
    pub title: String,
    /// Department name.
    #[serde(default)]
    pub department: String,
    /// Office name.
    #[serde(default)]
    pub office: String,
    /// Directory status (e.g., "Active").
    #[serde(default)]
    pub status: String,
    /// Employment status (e.g., "Full-time", "Contractor").
    #[serde(default)]
    pub employment_status: String,
    /// Work email address.
    #[serde(default)]
    pub email: String,
    /// Phone number.
    #[serde(default)]
    pub phone_number: String,
    /// Gender.
    #[serde(default)]
    pub gender: String,
    /// Private email address.
    #[serde(default)]
    pub private_email: String,
    /// Annual salary.
    #[serde(default)]
    pub salary: Decimal,
    /// Date of birth, if recorded.
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// Date of hire. Drives PTO accrual.
    pub start_date: NaiveDate,
    /// The associate's manager, if one is assigned.
    #[serde(default)]
    pub manager_id: Option<AssociateId>,
}

impl Associate {
    /// Returns the associate's display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the role derived from the associate's title.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::{Associate, AssociateId};
    /// use leave_engine::policy::Role;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let ceo = Associate {
    ///     id: AssociateId(1),
    ///     first_name: "Ada".to_string(),
    ///     last_name: "Lovelace".to_string(),
    ///     title: "CEO".to_string(),
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
    ///     start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
    ///     manager_id: None,
    /// };
    /// assert_eq!(ceo.role(), Role::Ceo);
    /// ```
    pub fn role(&self) -> Role {
        Role::from_title(&self.title)
    }

    /// Returns true if `other` names this associate as their manager.
    pub fn manages(&self, other: &Associate) -> bool {
        other.manager_id == Some(self.id)
    }

    /// Applies the provided fields of a profile update.
    ///
    /// Blank strings and a zero salary are treated as "not provided",
    /// matching how profile forms submit untouched inputs.
    pub fn apply(&mut self, update: AssociateUpdate) {
        fn set(target: &mut String, value: Option<String>) {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                *target = value;
            }
        }

        let salary = update.provided_salary();
        set(&mut self.first_name, update.first_name);
        set(&mut self.last_name, update.last_name);
        set(&mut self.title, update.title);
        set(&mut self.department, update.department);
        set(&mut self.office, update.office);
        set(&mut self.status, update.status);
        set(&mut self.employment_status, update.employment_status);
        set(&mut self.email, update.email);
        set(&mut self.phone_number, update.phone_number);
        set(&mut self.gender, update.gender);
        set(&mut self.private_email, update.private_email);

        if let Some(salary) = salary {
            self.salary = salary;
        }
        if let Some(dob) = update.date_of_birth {
            self.date_of_birth = Some(dob);
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
    }
}

/// A partial profile update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssociateUpdate {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New title.
    pub title: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// New office.
    pub office: Option<String>,
    /// New directory status.
    pub status: Option<String>,
    /// New employment status.
    pub employment_status: Option<String>,
    /// New work email.
    pub email: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New gender.
    pub gender: Option<String>,
    /// New private email.
    pub private_email: Option<String>,
    /// New annual salary.
    pub salary: Option<Decimal>,
    /// New date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// New hire date.
    pub start_date: Option<NaiveDate>,
}

impl AssociateUpdate {
    /// The new salary, unless absent or zero.
    pub fn provided_salary(&self) -> Option<Decimal> {
        self.salary.filter(|salary| !salary.is_zero())
    }
}

/// Profile attributes that non-privileged self-edits cannot change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum RestrictedField {
    FirstName,
    LastName,
    Title,
    Department,
    Office,
    EmploymentStatus,
    WorkEmail,
    Salary,
    DateOfBirth,
    StartDate,
}

impl RestrictedField {
    /// Human-readable label used in permission errors.
    pub fn label(&self) -> &'static str {
        match self {
            RestrictedField::FirstName => "First Name",
            RestrictedField::LastName => "Last Name",
            RestrictedField::Title => "Title",
            RestrictedField::Department => "Department",
            RestrictedField::Office => "Office",
            RestrictedField::EmploymentStatus => "Employment Status",
            RestrictedField::WorkEmail => "Work Email",
            RestrictedField::Salary => "Salary",
            RestrictedField::DateOfBirth => "Date of Birth",
            RestrictedField::StartDate => "Start Date",
        }
    }
}

impl fmt::Display for RestrictedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
