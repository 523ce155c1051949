//! Uploaded-file catalog models.
//!
//! Two records are written per upload: a lightweight catalog entry under
//! the `savedFiles` key and a self-contained payload record (base64 data)
//! under `persistentFiles`. Each upload is appended independently.

use buildmatch_core::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Catalog entry for an accepted upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFile {
    /// Generated storage name, e.g. `profile_1700000000000.jpg`.
    pub name: String,
    pub original_name: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub content_type: String,
    /// Folder-qualified path, e.g. `Images/profile_1700000000000.jpg`.
    pub path: String,
    pub uploaded_at: Timestamp,
    pub download_url: String,
    pub folder: String,
}

/// Self-contained payload record for an accepted upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentFile {
    pub file_name: String,
    pub original_name: String,
    pub folder: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub size: i64,
    /// Base64-encoded file contents.
    pub data: String,
    pub uploaded_at: Timestamp,
}
