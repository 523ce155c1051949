//! Logged-in-user session snapshot.

use buildmatch_core::error::CoreError;

use crate::models::user::User;
use crate::repositories::user_repo::UserRepo;
use crate::store::{keys, Store};

/// Operations over the `currentUser` side key.
pub struct SessionRepo;

impl SessionRepo {
    /// Authenticate and record the user as logged in.
    pub fn login(store: &Store, email: &str, password: &str) -> Result<User, CoreError> {
        let user = UserRepo::authenticate(store, email, password)?;
        store.write_key(keys::CURRENT_USER, &user)?;
        tracing::debug!(user_id = user.id, "user logged in");
        Ok(user)
    }

    /// The logged-in user, if any. A corrupt stored snapshot reads as
    /// logged out.
    pub fn current(store: &Store) -> Option<User> {
        store.read_key(keys::CURRENT_USER)
    }

    /// Clear the logged-in user.
    pub fn logout(store: &Store) -> Result<(), CoreError> {
        store.remove_key(keys::CURRENT_USER)
    }
}
