//! User entity model and DTOs.
//!
//! The full record carries the plaintext password; nothing here must
//! ever cross a trust boundary.

use buildmatch_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::models::project::Project;
use crate::models::role::Role;

/// Reference to an uploaded CV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvRef {
    pub name: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub content_type: String,
    pub path: String,
}

/// A user record from either the bootstrap `users` collection or the
/// `registeredUsers` collection.
///
/// Role-specific fields are optional: engineers carry a profile, clients
/// carry their embedded project list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub created_at: Timestamp,

    // --- Engineer profile ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Free-text description of past projects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_projects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv: Option<CvRef>,

    // --- Client data ---
    /// Projects owned exclusively by this client.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
}

impl User {
    pub fn is_engineer(&self) -> bool {
        self.role == Role::Engineer
    }

    pub fn is_client(&self) -> bool {
        self.role == Role::Client
    }
}

/// DTO for a registration submission. Values arrive as raw form strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    /// Years of experience; required (non-negative integer) for engineers.
    pub experience: String,
    pub skills: String,
    pub bio: String,
    pub past_projects: String,
    pub photo: Option<String>,
    pub cv: Option<CvRef>,
}

/// DTO for a profile edit. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub email: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
    pub bio: Option<String>,
    pub past_projects: Option<String>,
    pub photo: Option<String>,
    pub cv: Option<CvRef>,
}
