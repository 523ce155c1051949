//! Admin dashboard aggregate counts.

use serde::Serialize;

/// Headline counts for the admin overview panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub total_engineers: usize,
    pub total_clients: usize,
    pub total_registered_users: usize,
    pub accepted_projects: usize,
    pub pending_requests: usize,
    pub rejected_projects: usize,
}
