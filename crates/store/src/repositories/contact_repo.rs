//! Append-only contact-form log.

use buildmatch_core::contact::validate_contact;
use buildmatch_core::error::CoreError;
use chrono::Utc;

use crate::models::contact::ContactMessage;
use crate::store::{keys, Store};

/// Operations over the `contactMessages` side key.
pub struct ContactRepo;

impl ContactRepo {
    /// Validate and append a contact-form submission.
    pub fn submit(
        store: &mut Store,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<ContactMessage, CoreError> {
        validate_contact(name, email, message)?;

        let entry = ContactMessage {
            id: store.next_id(),
            name: name.trim().to_string(),
            email: email.to_string(),
            message: message.trim().to_string(),
            submitted_at: Utc::now(),
        };

        let mut log: Vec<ContactMessage> =
            store.read_key(keys::CONTACT_MESSAGES).unwrap_or_default();
        log.push(entry.clone());
        store.write_key(keys::CONTACT_MESSAGES, &log)?;
        tracing::debug!(message_id = entry.id, "contact message recorded");
        Ok(entry)
    }

    /// Every submission, oldest first.
    pub fn list(store: &Store) -> Vec<ContactMessage> {
        store.read_key(keys::CONTACT_MESSAGES).unwrap_or_default()
    }
}
