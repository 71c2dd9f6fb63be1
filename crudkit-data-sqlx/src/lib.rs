//! SQLx backend for crudkit's data layer.
//!
//! Provides [`SqliteRepository`], a generic implementation of
//! `crudkit_data::Repository` over an `sqlx::Pool<Sqlite>`, plus the
//! [`SqlxErrorExt`] bridge from `sqlx::Error` into the domain error
//! taxonomy.
//!
//! # Error bridging
//!
//! Due to Rust's orphan rules, `From<sqlx::Error> for CrudError` can't
//! be implemented here. Use [`SqlxErrorExt::into_crud_error`] instead:
//! `RowNotFound` becomes `NotFound`, a unique-constraint violation
//! becomes `DuplicateKey`, and anything else is passed through as
//! `Storage` with its original message intact.
//!
//! # Other databases
//!
//! The shipped repository is concretely typed to SQLite behind the
//! `sqlite` feature. Other drivers plug in by implementing
//! `crudkit_data::Repository` against their own pool; the trait is the
//! contract, not this type.

pub mod error;
#[cfg(feature = "sqlite")]
pub mod repository;

pub use error::{SqlxErrorExt, SqlxResult};
#[cfg(feature = "sqlite")]
pub use repository::SqliteRepository;
