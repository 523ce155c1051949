//! Admin overview aggregates.

use crate::models::dashboard::AdminOverview;
use crate::models::role::Role;
use crate::models::status::RequestStatus;
use crate::store::Store;

/// Read-only counts for the admin dashboard.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Headline counts across users and requests.
    pub fn overview(store: &Store) -> AdminOverview {
        let doc = store.document();
        let count_role = |role: Role| {
            doc.registered_users
                .iter()
                .filter(|u| u.role == role)
                .count()
        };
        let count_status = |status: RequestStatus| {
            doc.project_requests
                .iter()
                .filter(|r| r.status == status)
                .count()
        };

        AdminOverview {
            total_engineers: count_role(Role::Engineer),
            total_clients: count_role(Role::Client),
            total_registered_users: doc.registered_users.len(),
            accepted_projects: count_status(RequestStatus::Accepted),
            pending_requests: count_status(RequestStatus::Pending),
            rejected_projects: count_status(RequestStatus::Rejected),
        }
    }
}
