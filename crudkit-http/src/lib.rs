//! HTTP adapter for crudkit.
//!
//! Maps the generic CRUD service onto axum handlers: [`ResolvedId`]
//! resolves the `{id}` route parameter into a typed key at the transport
//! boundary, [`CrudController`] adapts requests to service calls, and
//! [`crud_routes`] mounts the five handlers on a router.
//!
//! Response bodies are fixed shapes: `{"all": [...]}` for lists,
//! `{"item": {...}}` for single entities, `{"message": "..."}` for
//! mutations, and `{"err": "..."}` for every failure. Each failure path
//! logs the error once, at Error severity, before responding.

pub mod controller;
pub mod extract;
pub mod response;

pub use controller::{crud_routes, CrudController, CrudControllerBuilder};
pub use extract::ResolvedId;
pub use response::error_response;
