use crate::extract::ResolvedId;
use crate::response::{
    all_response, error_response, item_response, lookup_status, message_response,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use crudkit_core::error::CrudError;
use crudkit_core::id::EntityId;
use crudkit_data::entity::Entity;
use crudkit_data::repository::Repository;
use crudkit_data::service::CrudService;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

struct ControllerInner<T, R> {
    service: CrudService<T, R>,
    preload: Option<String>,
    permanent_delete: bool,
}

/// HTTP-facing adapter over a [`CrudService`].
///
/// Cheap to clone; handlers receive it as axum state. Use
/// [`CrudController::new`] for the defaults (no preload, permanent
/// deletion) or [`CrudController::builder`] to configure.
pub struct CrudController<T, R> {
    inner: Arc<ControllerInner<T, R>>,
}

impl<T, R> Clone for CrudController<T, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, R> CrudController<T, R>
where
    T: Entity,
    R: Repository<T>,
{
    pub fn new(repo: R) -> Self {
        Self::builder(repo).build()
    }

    pub fn builder(repo: R) -> CrudControllerBuilder<T, R> {
        CrudControllerBuilder {
            service: CrudService::new(repo),
            preload: None,
            permanent_delete: true,
        }
    }

    /// Create an entity directly, outside HTTP handling, for upstream
    /// composition. Model validation is the caller's responsibility.
    /// The error is logged here and returned unchanged.
    pub async fn create(&self, model: T) -> Result<T, CrudError> {
        self.inner.service.create(model).await.map_err(|err| {
            tracing::error!("{err}");
            err
        })
    }

    /// Update an entity directly, outside HTTP handling. Returns the
    /// status the failure maps to alongside the error.
    pub async fn update(&self, id: &EntityId, model: T) -> Result<(), (StatusCode, CrudError)> {
        self.inner
            .service
            .update(id, model)
            .await
            .map_err(|err| (lookup_status(&err), err))
    }
}

/// Builder for a [`CrudController`].
pub struct CrudControllerBuilder<T, R> {
    service: CrudService<T, R>,
    preload: Option<String>,
    permanent_delete: bool,
}

impl<T, R> CrudControllerBuilder<T, R>
where
    T: Entity,
    R: Repository<T>,
{
    /// Eagerly attach the named related collection on every single-entity
    /// fetch.
    pub fn preload(mut self, relation: impl Into<String>) -> Self {
        self.preload = Some(relation.into());
        self
    }

    /// Make the DELETE handler soft-delete instead of removing rows.
    pub fn soft_delete(mut self) -> Self {
        self.permanent_delete = false;
        self
    }

    pub fn build(self) -> CrudController<T, R> {
        CrudController {
            inner: Arc::new(ControllerInner {
                service: self.service,
                preload: self.preload,
                permanent_delete: self.permanent_delete,
            }),
        }
    }
}

async fn get_all<T, R>(State(ctrl): State<CrudController<T, R>>) -> Response
where
    T: Entity + Serialize,
    R: Repository<T>,
{
    match ctrl.inner.service.get_all().await {
        Ok(items) => all_response(&items),
        Err(err) => error_response(lookup_status(&err), &err),
    }
}

async fn get_one<T, R>(
    State(ctrl): State<CrudController<T, R>>,
    resolved: ResolvedId<T>,
) -> Response
where
    T: Entity + Serialize,
    R: Repository<T>,
{
    let preload = ctrl.inner.preload.as_deref();
    match ctrl.inner.service.get(&resolved.id, preload).await {
        Ok(item) => item_response(&item),
        Err(err) => error_response(lookup_status(&err), &err),
    }
}

async fn create<T, R>(State(ctrl): State<CrudController<T, R>>, Json(model): Json<T>) -> Response
where
    T: Entity + Serialize + DeserializeOwned,
    R: Repository<T>,
{
    // Model validation is the caller's concern; the body arrives
    // already deserialized.
    match ctrl.inner.service.create(model).await {
        Ok(created) => item_response(&created),
        Err(err) => error_response(lookup_status(&err), &err),
    }
}

async fn update<T, R>(
    State(ctrl): State<CrudController<T, R>>,
    resolved: ResolvedId<T>,
    Json(model): Json<T>,
) -> Response
where
    T: Entity + Serialize + DeserializeOwned,
    R: Repository<T>,
{
    match ctrl.inner.service.update(&resolved.id, model).await {
        Ok(()) => message_response("updated"),
        Err(err) => error_response(lookup_status(&err), &err),
    }
}

async fn remove<T, R>(State(ctrl): State<CrudController<T, R>>, resolved: ResolvedId<T>) -> Response
where
    T: Entity + Serialize,
    R: Repository<T>,
{
    let permanently = ctrl.inner.permanent_delete;
    match ctrl.inner.service.delete(&resolved.id, permanently).await {
        Ok(()) => message_response("deleted"),
        // Every domain error here, NotFound included, is a 500.
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &err),
    }
}

/// Mount the five CRUD handlers:
///
/// | Method & path | Handler | Success body |
/// |---------------|---------|--------------|
/// | `GET /`       | list    | `{"all": [...]}` |
/// | `POST /`      | create  | `{"item": {...}}` |
/// | `GET /{id}`   | fetch   | `{"item": {...}}` |
/// | `PUT /{id}`   | update  | `{"message": "updated"}` |
/// | `DELETE /{id}`| delete  | `{"message": "deleted"}` |
pub fn crud_routes<T, R>(controller: CrudController<T, R>) -> Router
where
    T: Entity + Serialize + DeserializeOwned,
    R: Repository<T> + 'static,
{
    Router::new()
        .route("/", get(get_all::<T, R>).post(create::<T, R>))
        .route(
            "/{id}",
            get(get_one::<T, R>).put(update::<T, R>).delete(remove::<T, R>),
        )
        .with_state(controller)
}
