//! Core types for crudkit: the domain error taxonomy and typed
//! identifier resolution.
//!
//! This crate is transport- and storage-agnostic. The data layer
//! (`crudkit-data` / `crudkit-data-sqlx`) and the HTTP layer
//! (`crudkit-http`) both speak in terms of [`CrudError`] and
//! [`EntityId`]; nothing else crosses their boundaries.

pub mod error;
pub mod id;

pub use error::CrudError;
pub use id::{resolve_id, EntityId, IdKind};
