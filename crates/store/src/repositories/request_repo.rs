//! Request matching engine: create, accept, reject, reassign, and the
//! query helpers over the global request collection.
//!
//! State machine: `pending -> accepted | rejected`; a rejected request
//! returns to `pending` through reassignment. `accepted` is terminal
//! here -- further activity happens in the steps subsystem.

use buildmatch_core::error::CoreError;
use buildmatch_core::types::EntityId;
use chrono::Utc;

use crate::models::project::Project;
use crate::models::request::ProjectRequest;
use crate::models::role::Role;
use crate::models::status::RequestStatus;
use crate::models::user::User;
use crate::repositories::project_repo::ProjectRepo;
use crate::store::Store;

/// Operations over the global `projectRequests` collection.
pub struct RequestRepo;

impl RequestRepo {
    /// Create a request offering `project` to the engineer with
    /// `engineer_id`.
    ///
    /// The engineer and the owning client are resolved first; a failed
    /// lookup aborts before anything is mutated. Without an explicit
    /// `message` a default one naming the project is generated.
    pub fn create(
        store: &mut Store,
        project: &Project,
        engineer_id: EntityId,
        message: Option<&str>,
    ) -> Result<ProjectRequest, CoreError> {
        let engineer = find_engineer(store, engineer_id)?;
        let client = find_client(store, project.client_id)?;

        let request = ProjectRequest {
            id: store.next_id(),
            project_id: project.id,
            project_name: project.project_name.clone(),
            project_type: project.project_type.clone(),
            client_id: client.id,
            client_name: client.username,
            client_email: client.email,
            engineer_id: engineer.id,
            engineer_name: engineer.username,
            engineer_email: engineer.email,
            status: RequestStatus::Pending,
            message: message.map(str::to_string).unwrap_or_else(|| {
                format!("New project request: {}", project.project_name)
            }),
            created_at: Utc::now(),
            accepted_at: None,
            rejected_at: None,
            rejected_by: None,
            project_steps: Vec::new(),
        };

        store.document_mut().project_requests.push(request.clone());
        store.persist()?;
        tracing::debug!(
            request_id = request.id,
            project_id = request.project_id,
            engineer_id,
            "project request created"
        );
        Ok(request)
    }

    /// Create a request for one of the client's existing projects,
    /// looked up by id.
    pub fn create_for_project(
        store: &mut Store,
        client_id: EntityId,
        project_id: EntityId,
        engineer_id: EntityId,
        message: Option<&str>,
    ) -> Result<ProjectRequest, CoreError> {
        let project = ProjectRepo::find_for_client(store, client_id, project_id).ok_or(
            CoreError::NotFound {
                entity: "project",
                id: project_id,
            },
        )?;
        Self::create(store, &project, engineer_id, message)
    }

    /// Accept a pending request.
    ///
    /// Accepting an already accepted request is an idempotent no-op that
    /// keeps the original `acceptedAt`. Accepting a rejected request, or
    /// a request whose project already has another accepted request, is
    /// a conflict.
    pub fn accept(store: &mut Store, request_id: EntityId) -> Result<ProjectRequest, CoreError> {
        let position = position_of(store, request_id)?;
        let (status, project_id) = {
            let request = &store.document().project_requests[position];
            (request.status, request.project_id)
        };

        match status {
            RequestStatus::Accepted => {
                Ok(store.document().project_requests[position].clone())
            }
            RequestStatus::Rejected => Err(CoreError::Conflict(
                "Cannot accept a rejected request; it must be reassigned first".to_string(),
            )),
            RequestStatus::Pending => {
                let already_accepted = store.document().project_requests.iter().any(|other| {
                    other.id != request_id
                        && other.project_id == project_id
                        && other.status == RequestStatus::Accepted
                });
                if already_accepted {
                    return Err(CoreError::Conflict(
                        "Project already has an accepted request".to_string(),
                    ));
                }

                let request = &mut store.document_mut().project_requests[position];
                request.status = RequestStatus::Accepted;
                request.accepted_at = Some(Utc::now());
                let accepted = request.clone();
                store.persist()?;
                tracing::debug!(request_id, "project request accepted");
                Ok(accepted)
            }
        }
    }

    /// Reject a pending request.
    ///
    /// Rejecting an already rejected request is an idempotent no-op;
    /// rejecting an accepted request is a conflict.
    pub fn reject(store: &mut Store, request_id: EntityId) -> Result<ProjectRequest, CoreError> {
        let position = position_of(store, request_id)?;
        let status = store.document().project_requests[position].status;

        match status {
            RequestStatus::Rejected => {
                Ok(store.document().project_requests[position].clone())
            }
            RequestStatus::Accepted => Err(CoreError::Conflict(
                "Cannot reject an accepted request".to_string(),
            )),
            RequestStatus::Pending => {
                let request = &mut store.document_mut().project_requests[position];
                request.status = RequestStatus::Rejected;
                request.rejected_at = Some(Utc::now());
                let rejected = request.clone();
                store.persist()?;
                tracing::debug!(request_id, "project request rejected");
                Ok(rejected)
            }
        }
    }

    /// Reassign a rejected request to a different engineer.
    ///
    /// Rewrites the engineer fields, records the rejecting engineer's
    /// name in `rejectedBy`, and resets the request to pending. The
    /// project/client snapshot fields are untouched.
    pub fn reassign(
        store: &mut Store,
        request_id: EntityId,
        new_engineer_id: EntityId,
    ) -> Result<ProjectRequest, CoreError> {
        let position = position_of(store, request_id)?;
        let (status, current_engineer_id) = {
            let request = &store.document().project_requests[position];
            (request.status, request.engineer_id)
        };

        if status != RequestStatus::Rejected {
            return Err(CoreError::Conflict(
                "Only rejected requests can be reassigned".to_string(),
            ));
        }
        if new_engineer_id == current_engineer_id {
            return Err(CoreError::Validation(
                "Reassignment requires a different engineer".to_string(),
            ));
        }

        let engineer = find_engineer(store, new_engineer_id)?;

        let request = &mut store.document_mut().project_requests[position];
        request.rejected_by = Some(std::mem::take(&mut request.engineer_name));
        request.engineer_id = engineer.id;
        request.engineer_name = engineer.username;
        request.engineer_email = engineer.email;
        request.status = RequestStatus::Pending;
        request.rejected_at = None;
        let reassigned = request.clone();

        store.persist()?;
        tracing::debug!(request_id, new_engineer_id, "project request reassigned");
        Ok(reassigned)
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    /// Find a request by id.
    pub fn find(store: &Store, request_id: EntityId) -> Option<ProjectRequest> {
        store
            .document()
            .project_requests
            .iter()
            .find(|r| r.id == request_id)
            .cloned()
    }

    /// All requests addressed to the given engineer.
    pub fn for_engineer(store: &Store, engineer_id: EntityId) -> Vec<ProjectRequest> {
        store
            .document()
            .project_requests
            .iter()
            .filter(|r| r.engineer_id == engineer_id)
            .cloned()
            .collect()
    }

    /// All requests created by the given client.
    pub fn for_client(store: &Store, client_id: EntityId) -> Vec<ProjectRequest> {
        store
            .document()
            .project_requests
            .iter()
            .filter(|r| r.client_id == client_id)
            .cloned()
            .collect()
    }

    /// All rejected requests (the admin reassignment queue).
    pub fn list_rejected(store: &Store) -> Vec<ProjectRequest> {
        store
            .document()
            .project_requests
            .iter()
            .filter(|r| r.status == RequestStatus::Rejected)
            .cloned()
            .collect()
    }

    /// Whether the client's project has an accepted request.
    pub fn has_accepted(store: &Store, project_id: EntityId, client_id: EntityId) -> bool {
        Self::accepted_request_id(store, project_id, client_id).is_some()
    }

    /// Id of the accepted request for the client's project, if any.
    pub fn accepted_request_id(
        store: &Store,
        project_id: EntityId,
        client_id: EntityId,
    ) -> Option<EntityId> {
        store
            .document()
            .project_requests
            .iter()
            .find(|r| {
                r.project_id == project_id
                    && r.client_id == client_id
                    && r.status == RequestStatus::Accepted
            })
            .map(|r| r.id)
    }

    /// Number of pending requests awaiting the engineer (badge count).
    pub fn pending_count_for_engineer(store: &Store, engineer_id: EntityId) -> usize {
        store
            .document()
            .project_requests
            .iter()
            .filter(|r| r.engineer_id == engineer_id && r.status == RequestStatus::Pending)
            .count()
    }
}

fn position_of(store: &Store, request_id: EntityId) -> Result<usize, CoreError> {
    store
        .document()
        .project_requests
        .iter()
        .position(|r| r.id == request_id)
        .ok_or(CoreError::NotFound {
            entity: "request",
            id: request_id,
        })
}

fn find_engineer(store: &Store, engineer_id: EntityId) -> Result<User, CoreError> {
    store
        .document()
        .registered_users
        .iter()
        .find(|u| u.id == engineer_id && u.role == Role::Engineer)
        .cloned()
        .ok_or(CoreError::NotFound {
            entity: "engineer",
            id: engineer_id,
        })
}

fn find_client(store: &Store, client_id: EntityId) -> Result<User, CoreError> {
    store
        .document()
        .registered_users
        .iter()
        .find(|u| u.id == client_id && u.role == Role::Client)
        .cloned()
        .ok_or(CoreError::NotFound {
            entity: "client",
            id: client_id,
        })
}
