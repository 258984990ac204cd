//! Contact-form submission validation.

use crate::error::CoreError;

/// Validate a contact submission. All four fields are required; the first
/// missing one is reported so the form can re-prompt.
pub fn validate_submission(
    fname: &str,
    lname: &str,
    email: &str,
    message: &str,
) -> Result<(), CoreError> {
    if fname.trim().is_empty() {
        return Err(CoreError::Validation("First name is required".into()));
    }
    if lname.trim().is_empty() {
        return Err(CoreError::Validation("Last name is required".into()));
    }
    if email.trim().is_empty() {
        return Err(CoreError::Validation("Email is required".into()));
    }
    if message.trim().is_empty() {
        return Err(CoreError::Validation("Message is required".into()));
    }
    Ok(())
}
