//! The document store: load, persist, and refresh the application state.

use std::path::PathBuf;

use buildmatch_core::error::CoreError;
use buildmatch_core::ids::IdGenerator;
use buildmatch_core::locale;
use buildmatch_core::types::{EntityId, Timestamp};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::document::AppDocument;
use crate::error::StoreError;
use crate::kv::KvStore;
use crate::models::user::User;

/// Keys of the persisted state layout.
pub mod keys {
    /// The full application document.
    pub const APP_DATA: &str = "appData";
    /// Snapshot of the logged-in user.
    pub const CURRENT_USER: &str = "currentUser";
    /// Versioned registered-users recovery snapshot.
    pub const REGISTERED_USERS_SNAPSHOT: &str = "registeredUsersSnapshot";
    /// Catalog of accepted uploads.
    pub const SAVED_FILES: &str = "savedFiles";
    /// Self-contained upload payloads.
    pub const PERSISTENT_FILES: &str = "persistentFiles";
    /// Append-only contact-form log.
    pub const CONTACT_MESSAGES: &str = "contactMessages";
    /// Two-letter interface language code.
    pub const APP_LANGUAGE: &str = "appLanguage";
}

/// Current schema version of the registered-users snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Versioned recovery snapshot of the registered-users collection.
///
/// Written on every persist and consulted during `open` only when the
/// main document blob was absent or unreadable. The document itself is
/// the single source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersSnapshot {
    pub version: u32,
    pub saved_at: Timestamp,
    pub users: Vec<User>,
}

/// Store configuration loaded from environment variables.
///
/// All fields have defaults suitable for local use.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the key-value files (default: `data/store`).
    pub data_dir: PathBuf,
    /// Optional seed document (same shape as the persisted blob), used
    /// once when no persisted document exists yet.
    pub seed_path: Option<PathBuf>,
}

impl StoreConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default       |
    /// |-----------------------|---------------|
    /// | `BUILDMATCH_DATA_DIR` | `data/store`  |
    /// | `BUILDMATCH_SEED`     | (unset)       |
    pub fn from_env() -> Self {
        let data_dir = std::env::var("BUILDMATCH_DATA_DIR")
            .unwrap_or_else(|_| "data/store".into())
            .into();
        let seed_path = std::env::var("BUILDMATCH_SEED").ok().map(PathBuf::from);
        Self {
            data_dir,
            seed_path,
        }
    }

    /// Configuration rooted at `data_dir` with no seed document.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            seed_path: None,
        }
    }

    /// Use a seed document file for first-time population.
    pub fn with_seed(mut self, seed_path: impl Into<PathBuf>) -> Self {
        self.seed_path = Some(seed_path.into());
        self
    }
}

/// Handle over the persisted application state: the in-memory working
/// document, the key-value backing files, and the id allocator.
#[derive(Debug)]
pub struct Store {
    kv: KvStore,
    doc: AppDocument,
    ids: IdGenerator,
}

impl Store {
    /// Open the store, adopting the first readable data source:
    /// the persisted blob, then the seed document, then the embedded
    /// default. The adopted document is persisted straight back so later
    /// sessions hit the first source.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let kv = KvStore::open(&config.data_dir)?;
        let doc = Self::load_document(&kv, config);
        let ids = IdGenerator::starting_after(doc.max_entity_id());
        let store = Self { kv, doc, ids };
        store.persist_blob()?;
        Ok(store)
    }

    fn load_document(kv: &KvStore, config: &StoreConfig) -> AppDocument {
        if let Some(raw) = kv.get(keys::APP_DATA) {
            match serde_json::from_str::<AppDocument>(&raw) {
                Ok(doc) => {
                    tracing::debug!("document loaded from persisted blob");
                    return doc;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "persisted document unreadable, falling back");
                }
            }
        }

        let mut doc = Self::load_seed_file(config).unwrap_or_else(|| {
            tracing::debug!("using embedded default document");
            AppDocument::seed()
        });

        // The blob was absent or unreadable; recover previously registered
        // users from the snapshot key if one survives.
        if let Some(snapshot) = Self::read_snapshot(kv) {
            let recovered = merge_registered_users(&mut doc, snapshot.users);
            if recovered > 0 {
                tracing::debug!(recovered, "registered users recovered from snapshot");
            }
        }
        doc
    }

    fn load_seed_file(config: &StoreConfig) -> Option<AppDocument> {
        let path = config.seed_path.as_ref()?;
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "seed document unreadable, falling back");
                return None;
            }
        };
        match serde_json::from_str::<AppDocument>(&raw) {
            Ok(doc) => {
                tracing::debug!(path = %path.display(), "document seeded from file");
                Some(doc)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "seed document malformed, falling back");
                None
            }
        }
    }

    fn read_snapshot(kv: &KvStore) -> Option<UsersSnapshot> {
        let raw = kv.get(keys::REGISTERED_USERS_SNAPSHOT)?;
        match serde_json::from_str::<UsersSnapshot>(&raw) {
            Ok(snapshot) if snapshot.version == SNAPSHOT_VERSION => Some(snapshot),
            Ok(snapshot) => {
                tracing::warn!(version = snapshot.version, "ignoring snapshot with unknown version");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "registered-users snapshot unreadable");
                None
            }
        }
    }

    /// The in-memory document.
    pub fn document(&self) -> &AppDocument {
        &self.doc
    }

    /// Mutable access to the in-memory document. Every mutation must be
    /// followed by [`Store::persist`]; there is no dirty tracking.
    pub fn document_mut(&mut self) -> &mut AppDocument {
        &mut self.doc
    }

    /// Allocate the next entity id.
    pub fn next_id(&mut self) -> EntityId {
        self.ids.next()
    }

    /// Serialize the whole in-memory document and overwrite the persisted
    /// blob unconditionally (last writer wins), then refresh the
    /// registered-users snapshot.
    pub fn persist(&self) -> Result<(), CoreError> {
        self.persist_blob()?;
        Ok(())
    }

    fn persist_blob(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.doc)?;
        self.kv.set(keys::APP_DATA, &raw)?;

        let snapshot = UsersSnapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            users: self.doc.registered_users.clone(),
        };
        let raw_snapshot = serde_json::to_string(&snapshot)?;
        self.kv.set(keys::REGISTERED_USERS_SNAPSHOT, &raw_snapshot)?;
        Ok(())
    }

    /// Re-read the persisted blob, discarding unsaved in-memory state.
    ///
    /// Used before read-heavy listings to pick up writes from other
    /// sessions; the race window with a concurrent writer remains.
    pub fn refresh(&mut self) {
        let Some(raw) = self.kv.get(keys::APP_DATA) else {
            return;
        };
        match serde_json::from_str::<AppDocument>(&raw) {
            Ok(doc) => {
                self.ids.observe(doc.max_entity_id());
                self.doc = doc;
            }
            Err(err) => {
                tracing::warn!(error = %err, "refresh skipped: persisted document unreadable");
            }
        }
    }

    // -----------------------------------------------------------------
    // Side keys
    // -----------------------------------------------------------------

    /// Read and deserialize a side key. Corrupt values are logged and
    /// treated as absent.
    pub(crate) fn read_key<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.kv.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "stored value unreadable, treating as absent");
                None
            }
        }
    }

    /// Serialize and overwrite a side key.
    pub(crate) fn write_key<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CoreError> {
        let raw = serde_json::to_string(value).map_err(StoreError::from)?;
        self.kv.set(key, &raw)?;
        Ok(())
    }

    /// Remove a side key.
    pub(crate) fn remove_key(&self, key: &str) -> Result<(), CoreError> {
        self.kv.remove(key)?;
        Ok(())
    }

    /// Stored interface language, defaulting when unset or unreadable.
    pub fn language(&self) -> String {
        self.read_key::<String>(keys::APP_LANGUAGE)
            .unwrap_or_else(|| locale::DEFAULT_LANGUAGE.to_string())
    }

    /// Persist the interface language preference.
    pub fn set_language(&self, code: &str) -> Result<(), CoreError> {
        locale::validate_language_code(code)?;
        self.write_key(keys::APP_LANGUAGE, &code.to_string())
    }
}

/// Additively merge snapshot users into the document's registered-users
/// collection, skipping ids already present. Returns how many were added.
fn merge_registered_users(doc: &mut AppDocument, users: Vec<User>) -> usize {
    let mut added = 0;
    for user in users {
        if doc.registered_users.iter().any(|u| u.id == user.id) {
            continue;
        }
        doc.registered_users.push(user);
        added += 1;
    }
    added
}
