//! Work-item (step) field validation.

use crate::error::CoreError;

/// Fields that must be filled in before a step can be saved.
pub const REQUIRED_STEP_FIELDS: &[&str] = &["title", "description", "timeline", "cost"];

/// Collect the names of required step fields that are empty.
pub fn missing_step_fields(
    title: &str,
    description: &str,
    timeline: &str,
    cost: &str,
) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if title.trim().is_empty() {
        missing.push("title");
    }
    if description.trim().is_empty() {
        missing.push("description");
    }
    if timeline.trim().is_empty() {
        missing.push("timeline");
    }
    if cost.trim().is_empty() {
        missing.push("cost");
    }
    missing
}

/// Validate the required fields of a step, reporting the full missing set.
pub fn validate_step_fields(
    title: &str,
    description: &str,
    timeline: &str,
    cost: &str,
) -> Result<(), CoreError> {
    let missing = missing_step_fields(title, description, timeline, cost);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Missing required step fields: {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_step_accepted() {
        assert!(validate_step_fields("Foundation", "Pour the slab", "14", "$12,000").is_ok());
    }

    #[test]
    fn missing_fields_listed_in_order() {
        let missing = missing_step_fields("", "desc", " ", "");
        assert_eq!(missing, vec!["title", "timeline", "cost"]);
    }

    #[test]
    fn error_message_names_every_missing_field() {
        let err = validate_step_fields("", "", "7", "$100").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("title"));
        assert!(msg.contains("description"));
        assert!(!msg.contains("timeline"));
    }

    #[test]
    fn tools_field_is_optional() {
        // Only the four required fields are checked; tools is free-form.
        assert_eq!(REQUIRED_STEP_FIELDS.len(), 4);
    }
}
