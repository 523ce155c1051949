//! Contact-form message model.

use buildmatch_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// One contact-form submission; the log under `contactMessages` is
/// append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitted_at: Timestamp,
}
