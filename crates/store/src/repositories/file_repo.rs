//! Upload intake: size/type gating and the two file catalogs.

use buildmatch_core::error::CoreError;
use buildmatch_core::files::{self, UploadKind};
use chrono::Utc;

use crate::models::file::{PersistentFile, SavedFile};
use crate::store::{keys, Store};

/// Operations over the `savedFiles` and `persistentFiles` side keys.
pub struct FileRepo;

impl FileRepo {
    /// Accept an upload: validate it against its kind's limits, generate
    /// the storage name, and append one record to each catalog.
    ///
    /// Each upload is read-modify-written independently, so several
    /// uploads completing in any order all end up recorded.
    pub fn store_upload(
        store: &mut Store,
        kind: UploadKind,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<SavedFile, CoreError> {
        files::validate_upload(kind, content_type, bytes.len())?;

        let stamp = store.next_id();
        let name = files::upload_file_name(kind, original_name, stamp);
        let folder = kind.folder();
        let path = format!("{folder}/{name}");
        let uploaded_at = Utc::now();

        let saved = SavedFile {
            name: name.clone(),
            original_name: original_name.to_string(),
            size: bytes.len() as i64,
            content_type: content_type.to_string(),
            path: path.clone(),
            uploaded_at,
            download_url: format!("local://{path}"),
            folder: folder.to_string(),
        };
        let mut catalog: Vec<SavedFile> = store.read_key(keys::SAVED_FILES).unwrap_or_default();
        catalog.push(saved.clone());
        store.write_key(keys::SAVED_FILES, &catalog)?;

        let persistent = PersistentFile {
            file_name: name,
            original_name: original_name.to_string(),
            folder: folder.to_string(),
            content_type: content_type.to_string(),
            size: bytes.len() as i64,
            data: files::encode_base64(bytes),
            uploaded_at,
        };
        let mut payloads: Vec<PersistentFile> =
            store.read_key(keys::PERSISTENT_FILES).unwrap_or_default();
        payloads.push(persistent);
        store.write_key(keys::PERSISTENT_FILES, &payloads)?;

        tracing::debug!(path = %saved.path, size = saved.size, "upload stored");
        Ok(saved)
    }

    /// The upload catalog.
    pub fn saved_files(store: &Store) -> Vec<SavedFile> {
        store.read_key(keys::SAVED_FILES).unwrap_or_default()
    }

    /// The self-contained payload records.
    pub fn persistent_files(store: &Store) -> Vec<PersistentFile> {
        store.read_key(keys::PERSISTENT_FILES).unwrap_or_default()
    }

    /// Find a payload record by its generated storage name.
    pub fn find_persistent(store: &Store, file_name: &str) -> Option<PersistentFile> {
        Self::persistent_files(store)
            .into_iter()
            .find(|f| f.file_name == file_name)
    }
}
