//! Work-item (step) model attached to an accepted request.

use buildmatch_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A single ordered work item on a request's plan.
///
/// Ordering is insertion order and is also the display order; there is no
/// reordering operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    /// Duration in days, kept as the raw numeric string from the form.
    pub timeline: String,
    /// Free-text currency string.
    pub cost: String,
    #[serde(default)]
    pub tools: String,
    /// Opaque image references (self-contained data URLs).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Transient editing flag; never persisted. The commit guard refuses
    /// to persist while any step still has this set.
    #[serde(skip)]
    pub is_editing: bool,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// DTO carrying the editable fields of a step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StepFields {
    pub title: String,
    pub description: String,
    pub timeline: String,
    pub cost: String,
    pub tools: String,
}
