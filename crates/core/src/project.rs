//! Project form validation and numeric field coercion.

use crate::error::CoreError;

/// Default for numeric spec fields that fail to parse.
pub const DEFAULT_SPEC_VALUE: i64 = 0;

/// Floors default to one storey rather than zero.
pub const DEFAULT_FLOORS_COUNT: i64 = 1;

/// Coerce a raw numeric form field to an integer, falling back to
/// `default` when the field is empty or does not parse.
pub fn coerce_spec(raw: &str, default: i64) -> i64 {
    raw.trim().parse().unwrap_or(default)
}

/// Validate the required text fields of a project submission.
///
/// Returns a single validation error naming every missing field.
pub fn validate_project_fields(project_name: &str, project_type: &str) -> Result<(), CoreError> {
    let mut missing = Vec::new();
    if project_name.trim().is_empty() {
        missing.push("projectName");
    }
    if project_type.trim().is_empty() {
        missing.push("projectType");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Missing required project fields: {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_parses_plain_integers() {
        assert_eq!(coerce_spec("2500", DEFAULT_SPEC_VALUE), 2500);
        assert_eq!(coerce_spec(" 350000 ", DEFAULT_SPEC_VALUE), 350_000);
    }

    #[test]
    fn coerce_falls_back_on_garbage() {
        assert_eq!(coerce_spec("", DEFAULT_SPEC_VALUE), 0);
        assert_eq!(coerce_spec("large", DEFAULT_SPEC_VALUE), 0);
        assert_eq!(coerce_spec("12.5", DEFAULT_SPEC_VALUE), 0);
    }

    #[test]
    fn floors_default_to_one() {
        assert_eq!(coerce_spec("", DEFAULT_FLOORS_COUNT), 1);
        assert_eq!(coerce_spec("3", DEFAULT_FLOORS_COUNT), 3);
    }

    #[test]
    fn required_fields_reported_together() {
        let err = validate_project_fields("", " ").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("projectName"));
        assert!(msg.contains("projectType"));
    }

    #[test]
    fn complete_fields_accepted() {
        assert!(validate_project_fields("Dream House", "residential").is_ok());
    }
}
