//! Interface language preference.

use crate::error::CoreError;

/// Language the interface starts in.
pub const DEFAULT_LANGUAGE: &str = "ar";

/// Two-letter codes the interface ships translations for.
pub const SUPPORTED_LANGUAGES: &[&str] = &["ar", "en"];

/// Validate a stored language code.
pub fn validate_language_code(code: &str) -> Result<(), CoreError> {
    if SUPPORTED_LANGUAGES.contains(&code) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported language '{code}'. Must be one of: {}",
            SUPPORTED_LANGUAGES.join(", ")
        )))
    }
}
