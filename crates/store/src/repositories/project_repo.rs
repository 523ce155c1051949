//! Project entity manager: creation and listing of client projects.

use buildmatch_core::error::CoreError;
use buildmatch_core::project::{coerce_spec, validate_project_fields, DEFAULT_FLOORS_COUNT, DEFAULT_SPEC_VALUE};
use buildmatch_core::types::{parse_entity_id, EntityId};
use chrono::Utc;

use crate::models::project::{CreateProject, Project};
use crate::models::request::ProjectRequest;
use crate::models::role::Role;
use crate::models::status::ProjectStatus;
use crate::repositories::request_repo::RequestRepo;
use crate::store::Store;

/// Operations over a client's embedded project list.
///
/// Project editing is not available yet; there is deliberately no update
/// operation here.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Submit a new project for `client_id` and send the companion
    /// request to the engineer selected in the form.
    ///
    /// An engineer must have been selected -- a request cannot be created
    /// without one. Numeric spec fields are coerced with per-field
    /// defaults. The project lands in the owning client's list with
    /// status `pending` and the chosen engineer pre-assigned.
    pub fn create(
        store: &mut Store,
        client_id: EntityId,
        input: &CreateProject,
    ) -> Result<(Project, ProjectRequest), CoreError> {
        let selected = input
            .selected_engineer
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| {
                CoreError::Validation(
                    "An engineer must be selected before submitting a project".to_string(),
                )
            })?;
        let engineer_id = parse_entity_id(selected)?;

        validate_project_fields(&input.project_name, &input.project_type)?;

        // Resolve both parties before mutating anything; a failed lookup
        // must leave the document untouched.
        let client_exists = store
            .document()
            .registered_users
            .iter()
            .any(|u| u.id == client_id && u.role == Role::Client);
        if !client_exists {
            return Err(CoreError::NotFound {
                entity: "client",
                id: client_id,
            });
        }

        let engineer_exists = store
            .document()
            .registered_users
            .iter()
            .any(|u| u.id == engineer_id && u.role == Role::Engineer);
        if !engineer_exists {
            return Err(CoreError::NotFound {
                entity: "engineer",
                id: engineer_id,
            });
        }

        let project = Project {
            id: store.next_id(),
            project_name: input.project_name.clone(),
            project_type: input.project_type.clone(),
            client_id,
            status: ProjectStatus::Pending,
            assigned_engineer: Some(engineer_id),
            building_size: coerce_spec(&input.building_size, DEFAULT_SPEC_VALUE),
            lot_size: coerce_spec(&input.lot_size, DEFAULT_SPEC_VALUE),
            floors_count: coerce_spec(&input.floors_count, DEFAULT_FLOORS_COUNT),
            bedrooms_count: coerce_spec(&input.bedrooms_count, DEFAULT_SPEC_VALUE),
            bathrooms_count: coerce_spec(&input.bathrooms_count, DEFAULT_SPEC_VALUE),
            parking_spaces: coerce_spec(&input.parking_spaces, DEFAULT_SPEC_VALUE),
            budget: coerce_spec(&input.budget, DEFAULT_SPEC_VALUE),
            timeline: input.timeline.clone(),
            description: input.description.clone(),
            exterior_materials: input.exterior_materials.clone(),
            special_features: input.special_features.clone(),
            accessibility_features: input.accessibility_features.clone(),
            created_at: Utc::now(),
        };

        {
            let doc = store.document_mut();
            let owner = doc
                .registered_users
                .iter_mut()
                .find(|u| u.id == client_id)
                .ok_or(CoreError::NotFound {
                    entity: "client",
                    id: client_id,
                })?;
            owner.projects.push(project.clone());
        }

        // The companion request persists the whole document, covering the
        // project append above as well.
        let request = RequestRepo::create(store, &project, engineer_id, None)?;
        tracing::debug!(project_id = project.id, client_id, "project created");
        Ok((project, request))
    }

    /// The client's own project list.
    ///
    /// An empty list is a valid outcome, distinct from an unknown client.
    pub fn list_for_client(store: &Store, client_id: EntityId) -> Result<Vec<Project>, CoreError> {
        store
            .document()
            .registered_users
            .iter()
            .find(|u| u.id == client_id && u.role == Role::Client)
            .map(|u| u.projects.clone())
            .ok_or(CoreError::NotFound {
                entity: "client",
                id: client_id,
            })
    }

    /// Find one of the client's projects by id.
    pub fn find_for_client(
        store: &Store,
        client_id: EntityId,
        project_id: EntityId,
    ) -> Option<Project> {
        store
            .document()
            .registered_users
            .iter()
            .find(|u| u.id == client_id)
            .and_then(|u| u.projects.iter().find(|p| p.id == project_id))
            .cloned()
    }
}
