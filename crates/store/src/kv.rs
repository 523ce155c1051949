//! File-backed key-value store.
//!
//! One `<key>.json` file per key under a root directory. Values are raw
//! JSON strings; writes overwrite blindly (last writer wins), which is the
//! documented persistence discipline of the whole store.

use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// A directory of JSON blobs addressed by key.
#[derive(Debug)]
pub struct KvStore {
    root: PathBuf,
}

impl KvStore {
    /// Open (creating if necessary) a key-value store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Read the raw value stored under `key`.
    ///
    /// An unreadable file is treated the same as an absent one; callers
    /// fall back to their next data source.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(raw) => Some(raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to read key, treating as absent");
                None
            }
        }
    }

    /// Overwrite the value stored under `key`.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    /// Remove the value stored under `key`. Removing an absent key is not
    /// an error.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Whether a value is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();
        kv.set("appData", r#"{"users":[]}"#).unwrap();
        assert_eq!(kv.get("appData").unwrap(), r#"{"users":[]}"#);
    }

    #[test]
    fn absent_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();
        assert!(kv.get("missing").is_none());
        assert!(!kv.contains("missing"));
    }

    #[test]
    fn set_overwrites_blindly() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();
        kv.set("k", "first").unwrap();
        kv.set("k", "second").unwrap();
        assert_eq!(kv.get("k").unwrap(), "second");
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();
        kv.set("k", "v").unwrap();
        kv.remove("k").unwrap();
        kv.remove("k").unwrap();
        assert!(kv.get("k").is_none());
    }

    #[test]
    fn open_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        let kv = KvStore::open(&nested).unwrap();
        kv.set("k", "v").unwrap();
        assert!(nested.join("k.json").exists());
    }
}
