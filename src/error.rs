/// Unified error type for the normal-form engine
/// Provides structured error handling with categories for different failure modes
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum NormalizerError {
    /// A referenced attribute name or ordinal does not exist in the relation.
    /// Raised eagerly at declaration time, never deferred.
    #[error("invalid attribute '{name}' in relation '{relation}'")]
    InvalidAttribute {
        name: String,
        relation: String,
    },

    /// A row's arity disagrees with the relation's attribute count.
    /// The offending row is rejected; the relation is unaffected.
    #[error("shape mismatch: expected {expected} values, got {got}")]
    ShapeMismatch {
        expected: usize,
        got: usize,
        context: Option<String>,
    },

    /// Decomposition produced an attribute subset with no candidate key under
    /// its carried dependencies. Fatal for that decomposition branch.
    #[error("no candidate key found for relation '{relation}'")]
    NoKeyFound {
        relation: String,
        context: Option<String>,
    },

    /// A dependency declaration's input shape is invalid (empty determinant,
    /// overlapping multivalued pair, or an attribute lost during a remap).
    #[error("malformed dependency: {message}")]
    MalformedDependency {
        message: String,
    },

    /// A primary-key value lookup matched zero rows or more than one row.
    #[error("row lookup failed: {message}")]
    RowLookup {
        message: String,
    },

    /// IO errors: reading delimited input files
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// A relation's arity exceeds the configured enumeration ceiling.
    /// Superkey search is exponential in arity, so the cap is enforced
    /// before enumeration starts.
    #[error("resource limit exceeded: {message} (limit {limit}, actual {actual})")]
    ResourceLimit {
        message: String,
        limit: usize,
        actual: usize,
    },
}

impl NormalizerError {
    pub fn invalid_attribute(name: impl Into<String>, relation: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            name: name.into(),
            relation: relation.into(),
        }
    }

    pub fn shape_mismatch(expected: usize, got: usize) -> Self {
        Self::ShapeMismatch {
            expected,
            got,
            context: None,
        }
    }

    pub fn no_key_found(relation: impl Into<String>) -> Self {
        Self::NoKeyFound {
            relation: relation.into(),
            context: None,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDependency {
            message: message.into(),
        }
    }

    pub fn row_lookup(message: impl Into<String>) -> Self {
        Self::RowLookup {
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
        }
    }

    pub fn io_with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn resource_limit(message: impl Into<String>, limit: usize, actual: usize) -> Self {
        Self::ResourceLimit {
            message: message.into(),
            limit,
            actual,
        }
    }

    /// Add context to an error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        match &mut self {
            Self::ShapeMismatch { context: ctx, .. } => *ctx = Some(context.into()),
            Self::NoKeyFound { context: ctx, .. } => *ctx = Some(context.into()),
            _ => {}
        }
        self
    }
}

impl From<std::io::Error> for NormalizerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            path: None,
        }
    }
}

impl From<csv::Error> for NormalizerError {
    fn from(err: csv::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            path: None,
        }
    }
}

/// Result type alias for engine operations
pub type NormalizerResult<T> = Result<T, NormalizerError>;
