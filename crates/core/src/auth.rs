//! Registration and credential validation.
//!
//! Credentials are compared in plaintext by the user directory; this module
//! only guards the shape of what gets stored at registration time.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    })
}

/// Validate that a username is present.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.trim().is_empty() {
        return Err(CoreError::Validation("Username must not be empty".to_string()));
    }
    Ok(())
}

/// Validate the shape of an email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Invalid email address '{email}'")))
    }
}

/// Validate that a password meets the minimum length.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Parse an engineer's years of experience from its raw form value.
///
/// Required for engineer registrations; must be a non-negative integer.
pub fn parse_experience(raw: &str) -> Result<i64, CoreError> {
    let years: i64 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("Invalid years of experience '{raw}'")))?;
    if years < 0 {
        return Err(CoreError::Validation(
            "Years of experience must not be negative".to_string(),
        ));
    }
    Ok(years)
}
