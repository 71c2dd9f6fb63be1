use crudkit_core::error::CrudError;

/// Extension trait for converting `sqlx::Error` into [`CrudError`].
///
/// Due to Rust's orphan rules, we can't implement `From<sqlx::Error> for
/// CrudError` in this crate. Instead, use `.into_crud_error()` at every
/// point where a driver error would otherwise escape.
pub trait SqlxErrorExt {
    fn into_crud_error(self) -> CrudError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_crud_error(self) -> CrudError {
        match &self {
            sqlx::Error::RowNotFound => CrudError::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => CrudError::DuplicateKey,
            _ => CrudError::storage(self),
        }
    }
}

/// Convenience alias for data-layer results using [`CrudError`].
pub type SqlxResult<T> = Result<T, CrudError>;
