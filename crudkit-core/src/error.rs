/// Errors that can cross the repository and controller boundaries.
///
/// This is the only error vocabulary the CRUD layers emit. Storage-native
/// errors never leak: backends classify them into one of the fixed
/// variants, or wrap truly unexpected failures (connection loss and the
/// like) in [`CrudError::Storage`] so they stay visible unchanged.
#[derive(Debug)]
pub enum CrudError {
    /// No matching row, or an empty collection where one row was required.
    NotFound,
    /// A unique-constraint violation on insert or update.
    DuplicateKey,
    /// The supplied model had every field at its default value.
    EmptyModel,
    /// The route parameter carrying the identifier was absent or empty.
    MustProvideValidId,
    /// The raw identifier's inferred shape does not match the entity's key shape.
    IdTypeMismatch,
    /// Unclassified storage failure, passed through for operational visibility.
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

impl CrudError {
    /// Construct a `Storage` variant from any error type.
    ///
    /// Used by backend crates to wrap driver-specific errors that do not
    /// map onto the fixed taxonomy.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        CrudError::Storage(Box::new(err))
    }
}

impl std::fmt::Display for CrudError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrudError::NotFound => write!(f, "no rows found"),
            CrudError::DuplicateKey => write!(f, "duplicated key"),
            CrudError::EmptyModel => write!(f, "model cannot be empty"),
            CrudError::MustProvideValidId => write!(f, "must provide valid id"),
            CrudError::IdTypeMismatch => write!(f, "id type mismatch"),
            CrudError::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CrudError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CrudError::Storage(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
