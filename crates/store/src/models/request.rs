//! Matching-request entity model.

use buildmatch_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::models::status::RequestStatus;
use crate::models::step::Step;

/// The record linking a project to a candidate engineer.
///
/// Lives in the document's single global `projectRequests` collection.
/// Project and party fields are a denormalized snapshot taken at creation
/// time; reassignment rewrites only the engineer fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub id: EntityId,
    pub project_id: EntityId,
    pub project_name: String,
    pub project_type: String,
    pub client_id: EntityId,
    pub client_name: String,
    pub client_email: String,
    pub engineer_id: EntityId,
    pub engineer_name: String,
    pub engineer_email: String,
    pub status: RequestStatus,
    pub message: String,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<Timestamp>,
    /// Name of the engineer who most recently rejected this request.
    /// Retained across reassignment for the admin audit view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_by: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub project_steps: Vec<Step>,
}
