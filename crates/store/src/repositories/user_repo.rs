//! User directory: lookup, authentication, registration, profile edits.

use buildmatch_core::auth;
use buildmatch_core::error::CoreError;
use buildmatch_core::types::EntityId;
use chrono::Utc;

use crate::document::BOOTSTRAP_ADMIN_ID;
use crate::models::role::Role;
use crate::models::user::{RegisterUser, UpdateProfile, User};
use crate::store::{keys, Store};

/// Operations over the document's user collections.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by id across the bootstrap and registered collections.
    pub fn find_by_id(store: &Store, id: EntityId) -> Option<User> {
        let doc = store.document();
        doc.users
            .iter()
            .chain(doc.registered_users.iter())
            .find(|u| u.id == id)
            .cloned()
    }

    /// Find a user by email (exact, case-sensitive) across both
    /// collections.
    pub fn find_by_email(store: &Store, email: &str) -> Option<User> {
        let doc = store.document();
        doc.users
            .iter()
            .chain(doc.registered_users.iter())
            .find(|u| u.email == email)
            .cloned()
    }

    /// List registered users with the given role.
    pub fn list_by_role(store: &Store, role: Role) -> Vec<User> {
        store
            .document()
            .registered_users
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect()
    }

    /// Every user the admin table shows: bootstrap users first, then
    /// registered users in registration order.
    pub fn all_users(store: &Store) -> Vec<User> {
        let doc = store.document();
        doc.users
            .iter()
            .chain(doc.registered_users.iter())
            .cloned()
            .collect()
    }

    /// Plaintext credential check: the bootstrap collection is scanned
    /// first, then registered users; the first match wins.
    pub fn authenticate(store: &Store, email: &str, password: &str) -> Result<User, CoreError> {
        let doc = store.document();
        doc.users
            .iter()
            .chain(doc.registered_users.iter())
            .find(|u| u.email == email && u.password == password)
            .cloned()
            .ok_or_else(|| CoreError::Unauthorized("Invalid email or password".to_string()))
    }

    /// Register a new user.
    ///
    /// Validates the submission, rejects an email already present among
    /// registered users, assigns a fresh id, appends, and persists.
    pub fn register(store: &mut Store, input: &RegisterUser) -> Result<User, CoreError> {
        auth::validate_username(&input.username)?;
        auth::validate_email(&input.email)?;
        auth::validate_password(&input.password)?;
        let role = Role::from_name(&input.role)?;

        // Uniqueness is enforced against registered users only, and only
        // at registration time.
        if store
            .document()
            .registered_users
            .iter()
            .any(|u| u.email == input.email)
        {
            tracing::warn!(email = %input.email, "registration rejected: email already in use");
            return Err(CoreError::Conflict(format!(
                "Email '{}' is already in use",
                input.email
            )));
        }

        let experience = match role {
            Role::Engineer => Some(auth::parse_experience(&input.experience)?),
            _ => None,
        };

        let user = User {
            id: store.next_id(),
            username: input.username.clone(),
            email: input.email.clone(),
            password: input.password.clone(),
            role,
            created_at: Utc::now(),
            experience,
            skills: engineer_field(role, &input.skills),
            bio: engineer_field(role, &input.bio),
            past_projects: engineer_field(role, &input.past_projects),
            photo: if role == Role::Engineer {
                input.photo.clone()
            } else {
                None
            },
            cv: if role == Role::Engineer {
                input.cv.clone()
            } else {
                None
            },
            projects: Vec::new(),
        };

        store.document_mut().registered_users.push(user.clone());
        store.persist()?;
        tracing::debug!(user_id = user.id, role = %user.role, "user registered");
        Ok(user)
    }

    /// Apply a profile edit to the registered user with the given id,
    /// replacing only the supplied fields. Keeps the logged-in-user
    /// snapshot in sync when it refers to the same user.
    pub fn update_profile(
        store: &mut Store,
        id: EntityId,
        input: &UpdateProfile,
    ) -> Result<User, CoreError> {
        if let Some(username) = &input.username {
            auth::validate_username(username)?;
        }
        if let Some(email) = &input.email {
            auth::validate_email(email)?;
        }
        let experience = match &input.experience {
            Some(raw) => Some(auth::parse_experience(raw)?),
            None => None,
        };

        let user = {
            let doc = store.document_mut();
            let user = doc
                .registered_users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or(CoreError::NotFound { entity: "user", id })?;

            if let Some(username) = &input.username {
                user.username = username.clone();
            }
            if let Some(email) = &input.email {
                user.email = email.clone();
            }
            if let Some(years) = experience {
                user.experience = Some(years);
            }
            if let Some(skills) = &input.skills {
                user.skills = Some(skills.clone());
            }
            if let Some(bio) = &input.bio {
                user.bio = Some(bio.clone());
            }
            if let Some(past) = &input.past_projects {
                user.past_projects = Some(past.clone());
            }
            if let Some(photo) = &input.photo {
                user.photo = Some(photo.clone());
            }
            if let Some(cv) = &input.cv {
                user.cv = Some(cv.clone());
            }
            user.clone()
        };

        store.persist()?;

        // Keep the session snapshot aligned with the edited record.
        if let Some(current) = store.read_key::<User>(keys::CURRENT_USER) {
            if current.id == id {
                store.write_key(keys::CURRENT_USER, &user)?;
            }
        }

        tracing::debug!(user_id = id, "profile updated");
        Ok(user)
    }

    /// Delete a registered user. The bootstrap admin can never be
    /// deleted.
    pub fn delete(store: &mut Store, id: EntityId) -> Result<(), CoreError> {
        let doc = store.document();
        if id == BOOTSTRAP_ADMIN_ID && doc.bootstrap_admin().is_some() {
            return Err(CoreError::Forbidden(
                "Cannot delete the main admin user".to_string(),
            ));
        }

        let position = doc
            .registered_users
            .iter()
            .position(|u| u.id == id)
            .ok_or(CoreError::NotFound { entity: "user", id })?;

        store.document_mut().registered_users.remove(position);
        store.persist()?;
        tracing::debug!(user_id = id, "user deleted");
        Ok(())
    }
}

fn engineer_field(role: Role, raw: &str) -> Option<String> {
    if role == Role::Engineer && !raw.trim().is_empty() {
        Some(raw.to_string())
    } else {
        None
    }
}
