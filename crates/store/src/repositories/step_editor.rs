//! Step editing session over one accepted request.
//!
//! The editor exclusively borrows the store, so only one request's steps
//! can ever be under edit at a time. Nothing reaches disk until
//! [`StepEditor::commit`], which refuses while any step is still in
//! editing mode: a partially-edited step is never persisted.

use buildmatch_core::error::CoreError;
use buildmatch_core::step::validate_step_fields;
use buildmatch_core::types::EntityId;
use chrono::Utc;

use crate::models::request::ProjectRequest;
use crate::models::status::RequestStatus;
use crate::models::step::{Step, StepFields};
use crate::store::Store;

/// Editing session for the step list of a single accepted request.
#[derive(Debug)]
pub struct StepEditor<'a> {
    store: &'a mut Store,
    position: usize,
}

impl<'a> StepEditor<'a> {
    /// Open the editor on the request with `request_id`.
    ///
    /// Steps are only managed once a request has been accepted.
    pub fn open(store: &'a mut Store, request_id: EntityId) -> Result<Self, CoreError> {
        let position = store
            .document()
            .project_requests
            .iter()
            .position(|r| r.id == request_id)
            .ok_or(CoreError::NotFound {
                entity: "request",
                id: request_id,
            })?;

        if store.document().project_requests[position].status != RequestStatus::Accepted {
            return Err(CoreError::Conflict(
                "Steps can only be managed on an accepted request".to_string(),
            ));
        }

        Ok(Self { store, position })
    }

    /// The request under edit.
    pub fn request(&self) -> &ProjectRequest {
        &self.store.document().project_requests[self.position]
    }

    /// The current step list, in display order.
    pub fn steps(&self) -> &[Step] {
        &self.request().project_steps
    }

    fn request_mut(&mut self) -> &mut ProjectRequest {
        &mut self.store.document_mut().project_requests[self.position]
    }

    fn step_mut(&mut self, step_id: EntityId) -> Result<&mut Step, CoreError> {
        self.request_mut()
            .project_steps
            .iter_mut()
            .find(|s| s.id == step_id)
            .ok_or(CoreError::NotFound {
                entity: "step",
                id: step_id,
            })
    }

    /// Append a new draft step (editing mode, empty fields) and return
    /// its id.
    pub fn add_step(&mut self) -> EntityId {
        let id = self.store.next_id();
        let draft = Step {
            id,
            title: String::new(),
            description: String::new(),
            timeline: String::new(),
            cost: String::new(),
            tools: String::new(),
            images: Vec::new(),
            is_editing: true,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.request_mut().project_steps.push(draft);
        id
    }

    /// Put an existing step into editing mode.
    pub fn begin_edit(&mut self, step_id: EntityId) -> Result<(), CoreError> {
        self.step_mut(step_id)?.is_editing = true;
        Ok(())
    }

    /// Leave editing mode without saving.
    ///
    /// A draft that was never saved (it has no title) is removed from the
    /// list entirely instead of being kept empty.
    pub fn cancel_edit(&mut self, step_id: EntityId) -> Result<(), CoreError> {
        let never_saved = self.step_mut(step_id)?.title.is_empty();
        if never_saved {
            self.request_mut().project_steps.retain(|s| s.id != step_id);
        } else {
            self.step_mut(step_id)?.is_editing = false;
        }
        Ok(())
    }

    /// Save the supplied fields into a step, leaving editing mode.
    ///
    /// Title, description, timeline, and cost are required; the error
    /// lists every missing field.
    pub fn save_step(&mut self, step_id: EntityId, fields: &StepFields) -> Result<(), CoreError> {
        validate_step_fields(
            &fields.title,
            &fields.description,
            &fields.timeline,
            &fields.cost,
        )?;

        let step = self.step_mut(step_id)?;
        step.title = fields.title.trim().to_string();
        step.description = fields.description.trim().to_string();
        step.timeline = fields.timeline.trim().to_string();
        step.cost = fields.cost.trim().to_string();
        step.tools = fields.tools.trim().to_string();
        step.is_editing = false;
        step.updated_at = Some(Utc::now());
        Ok(())
    }

    /// Delete a step by id.
    ///
    /// `confirmed` is the answer from the caller's confirmation prompt;
    /// without it the step is left alone and `false` is returned.
    pub fn delete_step(&mut self, step_id: EntityId, confirmed: bool) -> Result<bool, CoreError> {
        // Unknown ids are reported even when unconfirmed.
        self.step_mut(step_id)?;
        if !confirmed {
            return Ok(false);
        }
        self.request_mut().project_steps.retain(|s| s.id != step_id);
        Ok(true)
    }

    /// Append an opaque image reference to a step.
    ///
    /// Uploads resolve independently; attaching in any completion order
    /// keeps every image. No count or size limit applies at this layer.
    pub fn attach_image(&mut self, step_id: EntityId, image_ref: String) -> Result<(), CoreError> {
        self.step_mut(step_id)?.images.push(image_ref);
        Ok(())
    }

    /// Remove an image reference from a step. Removing a reference that
    /// is not present is a no-op.
    pub fn remove_image(&mut self, step_id: EntityId, image_ref: &str) -> Result<(), CoreError> {
        self.step_mut(step_id)?.images.retain(|i| i != image_ref);
        Ok(())
    }

    /// Commit the step list: persist the document.
    ///
    /// Refuses while any step is still in editing mode -- every draft
    /// must be saved or cancelled first.
    pub fn commit(&self) -> Result<(), CoreError> {
        let editing = self
            .request()
            .project_steps
            .iter()
            .filter(|s| s.is_editing)
            .count();
        if editing > 0 {
            return Err(CoreError::Validation(format!(
                "Save or cancel all editing steps before saving the project ({editing} still open)"
            )));
        }
        self.store.persist()?;
        tracing::debug!(request_id = self.request().id, "project steps saved");
        Ok(())
    }
}
