//! Project entity model and DTOs.

use buildmatch_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::models::status::ProjectStatus;

/// A building project, embedded in the owning client's project list.
///
/// There is no independent project collection; the client record is the
/// single owner of its projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub project_name: String,
    pub project_type: String,
    /// Back-reference to the owning client; not an ownership edge.
    pub client_id: EntityId,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_engineer: Option<EntityId>,
    pub building_size: i64,
    pub lot_size: i64,
    pub floors_count: i64,
    pub bedrooms_count: i64,
    pub bathrooms_count: i64,
    pub parking_spaces: i64,
    pub budget: i64,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exterior_materials: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special_features: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accessibility_features: Vec<String>,
    pub created_at: Timestamp,
}

/// DTO for a project submission. Numeric specs arrive as raw form strings
/// and are coerced (with per-field defaults) during creation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProject {
    pub project_name: String,
    pub project_type: String,
    pub timeline: String,
    pub description: String,
    pub building_size: String,
    pub lot_size: String,
    pub floors_count: String,
    pub bedrooms_count: String,
    pub bathrooms_count: String,
    pub parking_spaces: String,
    pub budget: String,
    pub exterior_materials: Vec<String>,
    pub special_features: Vec<String>,
    pub accessibility_features: Vec<String>,
    /// Raw id of the engineer chosen in the form. A project cannot be
    /// submitted without one.
    pub selected_engineer: Option<String>,
}
