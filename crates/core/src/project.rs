//! Project field validation and the display-order invariant contract.
//!
//! The ordering invariant itself lives in two places: the advisory
//! pre-check in `folio-db::ProjectRepo::find_order_conflict` (which yields
//! the friendly [`CoreError::DuplicateOrder`]) and a partial unique index
//! on `projects.display_order` that serializes the read-then-write race at
//! the storage level.

use crate::error::CoreError;

/// The text fields every project row must carry non-empty.
///
/// Used by both create and update paths so the two cannot drift.
#[derive(Debug, Clone, Copy)]
pub struct RequiredFields<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub languages: &'a str,
}

/// Validate the required project text fields.
///
/// Whitespace-only values count as empty. Returns the first failure so the
/// caller can re-prompt for one field at a time, matching the form flow.
pub fn validate_required_fields(fields: RequiredFields<'_>) -> Result<(), CoreError> {
    if fields.name.trim().is_empty() {
        return Err(CoreError::Validation("Project name is required".into()));
    }
    if fields.description.trim().is_empty() {
        return Err(CoreError::Validation("Description is required".into()));
    }
    if fields.languages.trim().is_empty() {
        return Err(CoreError::Validation("Languages are required".into()));
    }
    Ok(())
}
