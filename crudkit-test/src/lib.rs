//! Test utilities for crudkit.
//!
//! [`TestApp`] drives an assembled `axum::Router` in process, without
//! binding a TCP port, via `tower::ServiceExt::oneshot`.

mod app;

pub use app::{TestApp, TestRequest, TestResponse};
