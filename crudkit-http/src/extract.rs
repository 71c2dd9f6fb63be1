use crate::response::error_response;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::Response;
use crudkit_core::error::CrudError;
use crudkit_core::id::{resolve_id, EntityId};
use crudkit_data::entity::Entity;
use std::marker::PhantomData;

/// The `{id}` route parameter, resolved against the entity's key shape.
///
/// This is the identifier resolver at the transport boundary: the raw
/// parameter is inferred numeric or textual and checked against
/// `T::ID_KIND`. Rejections are logged 400 responses with the flat
/// `{"err": "..."}` body — `must provide valid id` when the parameter is
/// absent or empty, `id type mismatch` when the shapes disagree.
pub struct ResolvedId<T> {
    pub id: EntityId,
    _marker: PhantomData<T>,
}

impl<S, T> FromRequestParts<S> for ResolvedId<T>
where
    S: Send + Sync,
    T: Entity,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => raw,
            Err(_) => {
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    &CrudError::MustProvideValidId,
                ))
            }
        };

        match resolve_id(&raw, T::ID_KIND) {
            Ok(id) => Ok(ResolvedId {
                id,
                _marker: PhantomData,
            }),
            Err(err) => Err(error_response(StatusCode::BAD_REQUEST, &err)),
        }
    }
}
