use crate::error::SqlxErrorExt;
use crudkit_core::error::CrudError;
use crudkit_core::id::{EntityId, IdKind};
use crudkit_data::entity::{Entity, SqlRow};
use crudkit_data::repository::Repository;
use crudkit_data::value::SqlValue;
use crudkit_data::is_empty;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::{FromRow, Pool, Row, TypeInfo, ValueRef};
use std::marker::PhantomData;

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// A generic SQLite-backed repository for one entity type.
///
/// Wraps an `sqlx::Pool<Sqlite>` and derives all SQL from the entity's
/// [`Entity`] metadata. Every returned error is a [`CrudError`]; the
/// driver's error type never crosses this boundary.
///
/// # Example
///
/// ```ignore
/// let repo = SqliteRepository::<User>::new(pool.clone());
/// let user = repo.get(&EntityId::Uint(1), None).await?;
/// ```
pub struct SqliteRepository<T> {
    pool: Pool<Sqlite>,
    _marker: PhantomData<T>,
}

impl<T> SqliteRepository<T> {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// Get the underlying pool reference.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

impl<T> Clone for SqliteRepository<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _marker: PhantomData,
        }
    }
}

fn bind_value(query: SqliteQuery<'_>, value: SqlValue) -> SqliteQuery<'_> {
    match value {
        SqlValue::Null => query.bind(None::<i64>),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(n) => query.bind(n),
        SqlValue::Float(x) => query.bind(x),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Bytes(b) => query.bind(b),
    }
}

/// SELECT of the entity's columns, optionally keyed by id and optionally
/// ignoring the soft-delete filter.
fn select_sql<T: Entity>(by_id: bool, unscoped: bool) -> String {
    let mut sql = format!("SELECT {} FROM {}", T::columns().join(", "), T::table());
    let mut clauses = Vec::new();
    if by_id {
        clauses.push(format!("{} = ?", T::id_column()));
    }
    if !unscoped {
        if let Some(col) = T::soft_delete_column() {
            clauses.push(format!("{col} IS NULL"));
        }
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql
}

fn decode_related_row(
    columns: &'static [&'static str],
    row: &SqliteRow,
) -> Result<SqlRow, CrudError> {
    let mut values = Vec::with_capacity(columns.len());
    for index in 0..columns.len() {
        let raw = row.try_get_raw(index).map_err(|e| e.into_crud_error())?;
        let null = raw.is_null();
        let type_name = raw.type_info().name().to_owned();
        drop(raw);

        let value = if null {
            SqlValue::Null
        } else {
            match type_name.as_str() {
                "INTEGER" => SqlValue::Int(
                    row.try_get::<i64, _>(index)
                        .map_err(|e| e.into_crud_error())?,
                ),
                "REAL" => SqlValue::Float(
                    row.try_get::<f64, _>(index)
                        .map_err(|e| e.into_crud_error())?,
                ),
                "BLOB" => SqlValue::Bytes(
                    row.try_get::<Vec<u8>, _>(index)
                        .map_err(|e| e.into_crud_error())?,
                ),
                _ => SqlValue::Text(
                    row.try_get::<String, _>(index)
                        .map_err(|e| e.into_crud_error())?,
                ),
            }
        };
        values.push(value);
    }
    Ok(SqlRow::new(columns, values))
}

#[derive(Debug)]
struct UnknownRelation(String);

impl std::fmt::Display for UnknownRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown relation: {}", self.0)
    }
}

impl std::error::Error for UnknownRelation {}

impl<T> SqliteRepository<T>
where
    T: Entity + for<'r> FromRow<'r, SqliteRow>,
{
    async fn fetch_one(&self, id: &EntityId, unscoped: bool) -> Result<T, CrudError> {
        let sql = select_sql::<T>(true, unscoped);
        let query = sqlx::query_as::<_, T>(&sql);
        // Storage predicate selection: one branch per key shape.
        let query = match id {
            EntityId::Text(s) => query.bind(s.clone()),
            EntityId::Uint(n) => query.bind(*n as i64),
        };
        query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| e.into_crud_error())?
            .ok_or(CrudError::NotFound)
    }

    async fn load_relation(&self, model: &mut T, name: &str) -> Result<(), CrudError> {
        let Some(rel) = T::relations().iter().find(|r| r.name == name) else {
            return Err(CrudError::storage(UnknownRelation(name.to_owned())));
        };

        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            rel.columns.join(", "),
            rel.table,
            rel.foreign_key,
        );
        let query = sqlx::query(&sql);
        let query = match model.id() {
            EntityId::Text(s) => query.bind(s),
            EntityId::Uint(n) => query.bind(n as i64),
        };
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.into_crud_error())?;

        let mut related = Vec::with_capacity(rows.len());
        for row in &rows {
            related.push(decode_related_row(rel.columns, row)?);
        }
        model.attach_related(name, related);
        Ok(())
    }
}

impl<T> Repository<T> for SqliteRepository<T>
where
    T: Entity + for<'r> FromRow<'r, SqliteRow>,
{
    async fn create(&self, mut model: T) -> Result<T, CrudError> {
        if is_empty(&model) {
            return Err(CrudError::EmptyModel);
        }

        // A zero Uint key means the storage assigns the identifier.
        let auto_id = T::ID_KIND == IdKind::Uint && model.id() == EntityId::Uint(0);

        let mut columns = Vec::new();
        let mut binds = Vec::new();
        for (column, value) in T::columns().iter().zip(model.values()) {
            if auto_id && *column == T::id_column() {
                continue;
            }
            columns.push(*column);
            binds.push(value);
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::table(),
            columns.join(", "),
            vec!["?"; columns.len()].join(", "),
        );
        let mut query = sqlx::query(&sql);
        for value in binds {
            query = bind_value(query, value);
        }

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| e.into_crud_error())?;
        if result.rows_affected() == 0 {
            return Err(CrudError::NotFound);
        }
        if auto_id {
            model.set_id(EntityId::Uint(result.last_insert_rowid() as u64));
        }

        Ok(model)
    }

    async fn get_all(&self) -> Result<Vec<T>, CrudError> {
        let sql = select_sql::<T>(false, false);
        let items = sqlx::query_as::<_, T>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.into_crud_error())?;
        if items.is_empty() {
            return Err(CrudError::NotFound);
        }
        Ok(items)
    }

    async fn get(&self, id: &EntityId, preload: Option<&str>) -> Result<T, CrudError> {
        let mut model = self.fetch_one(id, false).await?;
        if let Some(name) = preload {
            self.load_relation(&mut model, name).await?;
        }
        Ok(model)
    }

    async fn get_unscoped(&self, id: &EntityId) -> Result<T, CrudError> {
        self.fetch_one(id, true).await
    }

    async fn update(&self, id: &EntityId, amended: T) -> Result<(), CrudError> {
        // Confirm the target row exists before writing anything.
        let mut sql = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            T::id_column(),
            T::table(),
            T::id_column(),
        );
        if let Some(col) = T::soft_delete_column() {
            sql.push_str(&format!(" AND {col} IS NULL"));
        }
        let query = sqlx::query(&sql);
        let query = match id {
            EntityId::Text(s) => query.bind(s.clone()),
            EntityId::Uint(n) => query.bind(*n as i64),
        };
        let existing = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| e.into_crud_error())?;
        if existing.is_none() {
            return Err(CrudError::NotFound);
        }

        let mut assignments = Vec::new();
        let mut binds = Vec::new();
        for (column, value) in T::columns().iter().zip(amended.values()) {
            if *column == T::id_column() || value.is_zero() {
                continue;
            }
            assignments.push(format!("{column} = ?"));
            binds.push(value);
        }
        if assignments.is_empty() {
            // Nothing non-zero to write: zero rows affected.
            return Err(CrudError::NotFound);
        }

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            T::table(),
            assignments.join(", "),
            T::id_column(),
        );
        let mut query = sqlx::query(&sql);
        for value in binds {
            query = bind_value(query, value);
        }
        let query = match id {
            EntityId::Text(s) => query.bind(s.clone()),
            EntityId::Uint(n) => query.bind(*n as i64),
        };

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| e.into_crud_error())?;
        if result.rows_affected() == 0 {
            return Err(CrudError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: &EntityId, permanently: bool) -> Result<(), CrudError> {
        let soft_column = if permanently {
            None
        } else {
            T::soft_delete_column()
        };
        let sql = match soft_column {
            Some(col) => format!(
                "UPDATE {} SET {col} = CURRENT_TIMESTAMP WHERE {} = ? AND {col} IS NULL",
                T::table(),
                T::id_column(),
            ),
            // Permanent delete operates unscoped: no soft-delete filter.
            None => format!("DELETE FROM {} WHERE {} = ?", T::table(), T::id_column()),
        };
        let query = sqlx::query(&sql);
        let query = match id {
            EntityId::Text(s) => query.bind(s.clone()),
            EntityId::Uint(n) => query.bind(*n as i64),
        };

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| e.into_crud_error())?;
        if result.rows_affected() == 0 {
            return Err(CrudError::NotFound);
        }
        Ok(())
    }
}
