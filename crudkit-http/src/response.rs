use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use crudkit_core::error::CrudError;
use serde::Serialize;

/// 200 with the `{"all": [...]}` list body.
pub fn all_response<T: Serialize>(items: &[T]) -> Response {
    (StatusCode::OK, Json(serde_json::json!({ "all": items }))).into_response()
}

/// 200 with the `{"item": {...}}` single-entity body.
pub fn item_response<T: Serialize>(item: &T) -> Response {
    (StatusCode::OK, Json(serde_json::json!({ "item": item }))).into_response()
}

/// 200 with the `{"message": "..."}` body.
pub fn message_response(message: &str) -> Response {
    (StatusCode::OK, Json(serde_json::json!({ "message": message }))).into_response()
}

/// Log the failure, then render the flat `{"err": "..."}` body.
///
/// One log line per failed request, at Error severity.
pub fn error_response(status: StatusCode, err: &CrudError) -> Response {
    tracing::error!("{err}");
    (status, Json(serde_json::json!({ "err": err.to_string() }))).into_response()
}

/// The status a lookup failure maps to: 404 for `NotFound`, 500 for
/// everything else (unclassified storage failures included).
pub(crate) fn lookup_status(err: &CrudError) -> StatusCode {
    match err {
        CrudError::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
