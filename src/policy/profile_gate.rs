//! Authorization for profile edits.
//!
//! Only self-edits are gated. An associate whose title is not listed in
//! `profile_edit_roles` may still change unrestricted fields (phone number,
//! gender, private email) on their own record.

use crate::config::PolicyConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Associate, AssociateUpdate, RestrictedField};

use super::roles::{Permission, grants};

/// Lists the restricted fields `update` would change on `existing`.
///
/// Blank strings and a zero salary count as not provided, so they never
/// register as a change.
pub fn changed_restricted_fields(
    existing: &Associate,
    update: &AssociateUpdate,
) -> Vec<RestrictedField> {
    fn text_changed(current: &str, incoming: &Option<String>) -> bool {
        incoming
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty() && value != current)
    }

    let checks = [
        (
            RestrictedField::FirstName,
            text_changed(&existing.first_name, &update.first_name),
        ),
        (
            RestrictedField::LastName,
            text_changed(&existing.last_name, &update.last_name),
        ),
        (
            RestrictedField::Title,
            text_changed(&existing.title, &update.title),
        ),
        (
            RestrictedField::Department,
            text_changed(&existing.department, &update.department),
        ),
        (
            RestrictedField::Office,
            text_changed(&existing.office, &update.office),
        ),
        (
            RestrictedField::EmploymentStatus,
            text_changed(&existing.employment_status, &update.employment_status),
        ),
        (
            RestrictedField::WorkEmail,
            text_changed(&existing.email, &update.email),
        ),
        (
            RestrictedField::Salary,
            update.provided_salary().is_some_and(|s| s != existing.salary),
        ),
        (
            RestrictedField::DateOfBirth,
            update
                .date_of_birth
                .is_some_and(|d| Some(d) != existing.date_of_birth),
        ),
        (
            RestrictedField::StartDate,
            update.start_date.is_some_and(|d| d != existing.start_date),
        ),
    ];

    checks
        .into_iter()
        .filter_map(|(field, changed)| changed.then_some(field))
        .collect()
}

/// Checks that `actor` may apply `update` to `target`.
///
/// Edits by another associate, or with no identified actor, are not gated.
pub fn authorize_profile_edit(
    actor: Option<&Associate>,
    target: &Associate,
    update: &AssociateUpdate,
    config: &PolicyConfig,
) -> EngineResult<()> {
    let Some(actor) = actor else {
        return Ok(());
    };
    if actor.id != target.id || grants(actor, Permission::EditOwnRestrictedFields, config) {
        return Ok(());
    }

    let fields = changed_restricted_fields(target, update);
    if fields.is_empty() {
        Ok(())
    } else {
        Err(EngineError::RestrictedFieldsChanged { fields })
    }
}
