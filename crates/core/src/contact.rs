//! Contact-form submission validation.

use crate::auth::validate_email;
use crate::error::CoreError;

/// Validate a contact-form submission before it is appended to the log.
pub fn validate_contact(name: &str, email: &str, message: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() || message.trim().is_empty() {
        return Err(CoreError::Validation(
            "Name and message are required".to_string(),
        ));
    }
    validate_email(email)
}
