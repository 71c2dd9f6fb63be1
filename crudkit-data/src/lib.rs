//! Data abstractions for crudkit.
//!
//! Defines the [`Entity`] trait (table metadata, value extraction,
//! relation metadata), the [`Repository`] trait implemented by storage
//! backends, and the [`CrudService`] pass-through layer that sits
//! between a repository and the HTTP controller.
//!
//! This crate contains no SQL and no driver code; backends such as
//! `crudkit-data-sqlx` implement [`Repository`] for a concrete database.

pub mod entity;
pub mod repository;
pub mod service;
pub mod value;

pub use entity::{is_empty, Entity, RelationDef, SqlRow};
pub use repository::Repository;
pub use service::CrudService;
pub use value::SqlValue;
