//! Pure domain logic for the buildmatch marketplace.
//!
//! This crate has no I/O and no internal dependencies: shared id/timestamp
//! types, the domain error enum, role constants, and the validation and
//! coercion helpers used by the store/repository layer.

pub mod auth;
pub mod contact;
pub mod error;
pub mod files;
pub mod ids;
pub mod locale;
pub mod project;
pub mod roles;
pub mod step;
pub mod types;
