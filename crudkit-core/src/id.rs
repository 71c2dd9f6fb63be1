use crate::error::CrudError;

/// The identifier shape of an entity type, fixed once per type.
///
/// Exactly one shape is ever used for a given entity kind — the resolver
/// enforces this against the raw route parameter at the transport
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// Textual key, compared with an equality filter on the id column.
    Text,
    /// Unsigned-integer key, looked up through the primary key.
    Uint,
}

/// A typed identifier value, carried explicitly through every layer.
///
/// Boundary code matches on it exhaustively: once at resolver output,
/// once when the storage backend selects its lookup predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityId {
    Text(String),
    Uint(u64),
}

impl EntityId {
    pub fn kind(&self) -> IdKind {
        match self {
            EntityId::Text(_) => IdKind::Text,
            EntityId::Uint(_) => IdKind::Uint,
        }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityId::Text(s) => write!(f, "{s}"),
            EntityId::Uint(n) => write!(f, "{n}"),
        }
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId::Text(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_owned())
    }
}

impl From<u64> for EntityId {
    fn from(n: u64) -> Self {
        EntityId::Uint(n)
    }
}

/// Resolve a raw route parameter into a typed identifier.
///
/// The raw value is always text at the transport boundary. A value that
/// parses as a base-10 unsigned integer is inferred numeric; anything
/// else — overflow of the integer width included — is inferred textual.
/// The inferred shape must match `expected`, or resolution fails with
/// [`CrudError::IdTypeMismatch`]. An empty parameter fails with the
/// distinct [`CrudError::MustProvideValidId`].
///
/// Pure function of its arguments; no side effects.
pub fn resolve_id(raw: &str, expected: IdKind) -> Result<EntityId, CrudError> {
    if raw.is_empty() {
        return Err(CrudError::MustProvideValidId);
    }

    match raw.parse::<u64>() {
        Ok(n) => match expected {
            IdKind::Uint => Ok(EntityId::Uint(n)),
            IdKind::Text => Err(CrudError::IdTypeMismatch),
        },
        Err(_) => match expected {
            IdKind::Text => Ok(EntityId::Text(raw.to_owned())),
            IdKind::Uint => Err(CrudError::IdTypeMismatch),
        },
    }
}
