use crate::error::CoreError;

/// All entity ids are millisecond Unix timestamps widened to i64.
pub type EntityId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse an entity id arriving as free text (form inputs, route params).
///
/// Ids cross the application boundary as strings and are normalized here
/// once; everything past this point compares ids with strict equality.
pub fn parse_entity_id(raw: &str) -> Result<EntityId, CoreError> {
    raw.trim()
        .parse::<EntityId>()
        .map_err(|_| CoreError::Validation(format!("Invalid entity id '{raw}'")))
}
