//! crudkit — a generic CRUD stack for axum-served, sqlx-backed entities.
//!
//! This facade crate re-exports the crudkit sub-crates through a single
//! dependency with feature flags. Import everything you need with:
//!
//! ```ignore
//! use crudkit::prelude::*;
//! ```
//!
//! # Feature flags
//!
//! | Feature        | Default | Crate                |
//! |----------------|---------|----------------------|
//! | `http`         | **yes** | `crudkit-http`       |
//! | `data-sqlx`    | no      | `crudkit-data-sqlx`  |
//! | `sqlite`       | no      | `crudkit-data-sqlx` (SQLite driver) |
//! | `test-support` | no      | `crudkit-test`       |
//! | `full`         | no      | All of the above     |
//!
//! The core types (`CrudError`, `EntityId`, the `Entity` and `Repository`
//! traits, `CrudService`) are always available.

pub use crudkit_core;
pub use crudkit_data;

#[cfg(feature = "data-sqlx")]
pub use crudkit_data_sqlx;

#[cfg(feature = "http")]
pub use crudkit_http;

#[cfg(feature = "test-support")]
pub use crudkit_test;

/// Re-exports of the most commonly used types.
pub mod prelude {
    pub use crudkit_core::{resolve_id, CrudError, EntityId, IdKind};
    pub use crudkit_data::{is_empty, CrudService, Entity, RelationDef, Repository, SqlRow, SqlValue};

    #[cfg(feature = "data-sqlx")]
    pub use crudkit_data_sqlx::{SqliteRepository, SqlxErrorExt};

    #[cfg(feature = "http")]
    pub use crudkit_http::{crud_routes, CrudController, CrudControllerBuilder, ResolvedId};

    #[cfg(feature = "test-support")]
    pub use crudkit_test::TestApp;
}
