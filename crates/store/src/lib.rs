//! Document-store persistence and the operations over it.
//!
//! All application state lives in a single JSON document (see
//! [`document::AppDocument`]) persisted as a blob in a file-backed
//! key-value store, plus a handful of independent side keys (session,
//! uploaded files, contact log, language preference). Repositories are
//! zero-sized structs whose methods take the [`Store`] handle as their
//! first argument and end every mutation with an explicit persist.

pub mod document;
pub mod error;
pub mod kv;
pub mod models;
pub mod repositories;
pub mod store;

pub use error::StoreError;
pub use store::{Store, StoreConfig};
