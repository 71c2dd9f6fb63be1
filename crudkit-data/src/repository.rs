use crate::entity::Entity;
use crudkit_core::error::CrudError;
use crudkit_core::id::EntityId;
use std::future::Future;

/// Generic async repository for CRUD over one entity type.
///
/// Uses RPITIT (return-position `impl Trait` in traits) — no `async-trait`
/// needed. Every method maps storage failures into [`CrudError`] before
/// returning; implementations never let a driver error escape.
pub trait Repository<T>: Send + Sync
where
    T: Entity,
{
    /// Persist a new entity and return it as stored, including any
    /// storage-assigned identifier. A structurally empty model is
    /// rejected with [`CrudError::EmptyModel`] before storage is touched.
    fn create(&self, model: T) -> impl Future<Output = Result<T, CrudError>> + Send;

    /// Every non-deleted entity. An empty result set is
    /// [`CrudError::NotFound`], not an empty success.
    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, CrudError>> + Send;

    /// Fetch one entity by identifier, optionally preloading the named
    /// related collection.
    fn get(
        &self,
        id: &EntityId,
        preload: Option<&str>,
    ) -> impl Future<Output = Result<T, CrudError>> + Send;

    /// Fetch one entity by identifier ignoring the soft-delete filter.
    fn get_unscoped(&self, id: &EntityId) -> impl Future<Output = Result<T, CrudError>> + Send;

    /// Overwrite the non-zero fields of `amended` onto the existing row.
    /// The target row must exist (checked first); a vanishing row is
    /// [`CrudError::NotFound`] either way.
    fn update(
        &self,
        id: &EntityId,
        amended: T,
    ) -> impl Future<Output = Result<(), CrudError>> + Send;

    /// Remove an entity. `permanently` bypasses soft-delete semantics and
    /// drops the row; otherwise the row is flagged deleted and excluded
    /// from default queries.
    fn delete(
        &self,
        id: &EntityId,
        permanently: bool,
    ) -> impl Future<Output = Result<(), CrudError>> + Send;
}
