use crate::value::SqlValue;
use crudkit_core::id::{EntityId, IdKind};

/// Metadata for a related collection that [`Repository::get`] can
/// eagerly attach alongside the primary entity.
///
/// [`Repository::get`]: crate::repository::Repository::get
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationDef {
    /// Name used to request the preload (`Get(id, Some("notes"))`).
    pub name: &'static str,
    /// Table the related rows live in.
    pub table: &'static str,
    /// Column on the related table holding the parent identifier.
    pub foreign_key: &'static str,
    /// Columns fetched for each related row.
    pub columns: &'static [&'static str],
}

/// One fetched row of a related collection, handed to
/// [`Entity::attach_related`] for decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlRow {
    columns: &'static [&'static str],
    values: Vec<SqlValue>,
}

impl SqlRow {
    pub fn new(columns: &'static [&'static str], values: Vec<SqlValue>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Look up a value by column name.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .position(|c| *c == column)
            .map(|i| &self.values[i])
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }
}

/// Trait representing a persisted record with a single key field.
///
/// Implemented manually per entity type. The trait carries everything a
/// backend needs to build its SQL: table and column names, the key shape,
/// the current field values, and optional soft-delete and relation
/// metadata.
///
/// # Example
///
/// ```ignore
/// impl Entity for User {
///     const ID_KIND: IdKind = IdKind::Uint;
///     fn table() -> &'static str { "users" }
///     fn columns() -> &'static [&'static str] { &["id", "email", "name"] }
///     fn values(&self) -> Vec<SqlValue> {
///         vec![self.id.into(), self.email.as_str().into(), self.name.as_str().into()]
///     }
///     fn id(&self) -> EntityId { EntityId::Uint(self.id.into()) }
///     fn set_id(&mut self, id: EntityId) {
///         if let EntityId::Uint(n) = id { self.id = n as u32; }
///     }
///     fn soft_delete_column() -> Option<&'static str> { Some("deleted_at") }
/// }
/// ```
pub trait Entity: Default + PartialEq + Clone + Send + Sync + Unpin + 'static {
    /// The identifier shape of this entity type, fixed statically.
    const ID_KIND: IdKind;

    fn table() -> &'static str;

    fn id_column() -> &'static str {
        "id"
    }

    /// Data columns, the id column included, the soft-delete column
    /// excluded (it is owned by the backend, never decoded into the
    /// entity).
    fn columns() -> &'static [&'static str];

    /// Current field values, aligned index-for-index with [`columns`].
    ///
    /// [`columns`]: Entity::columns
    fn values(&self) -> Vec<SqlValue>;

    fn id(&self) -> EntityId;

    /// Adopt a storage-assigned identifier after insert.
    fn set_id(&mut self, id: EntityId);

    /// Column marking soft-deleted rows, `None` for entities that only
    /// hard-delete. Rows with a non-null value here are excluded from
    /// default queries.
    fn soft_delete_column() -> Option<&'static str> {
        None
    }

    /// Related collections available for preloading.
    fn relations() -> &'static [RelationDef] {
        &[]
    }

    /// Attach eagerly loaded rows for the named relation.
    fn attach_related(&mut self, relation: &str, rows: Vec<SqlRow>) {
        let _ = (relation, rows);
    }
}

/// Whether a model is structurally empty: every field at its default.
///
/// This is the compile-time replacement for a reflective emptiness
/// check — `Default` gives the zero model, `PartialEq` the comparison.
pub fn is_empty<T: Entity>(model: &T) -> bool {
    *model == T::default()
}
