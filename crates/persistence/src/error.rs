//! Error types for the persistence layer.
//!
//! The hierarchy separates client-input search errors, create-payload validation
//! errors, and failures that originate in the backing store.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Validation errors for write payloads
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Search operation errors
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StorageError {
    /// Returns true when the error was caused by the caller's input rather
    /// than by the store.
    pub fn is_client_error(&self) -> bool {
        match self {
            StorageError::Validation(_) => true,
            StorageError::Search(err) => err.is_client_error(),
            StorageError::Backend(_) => false,
        }
    }
}

/// Errors raised while turning request parameters into a query, and while
/// running that query.
///
/// Every variant except [`SearchError::Execution`] is detected before the store
/// is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The filter string does not match either filter shape.
    #[error("invalid filter '{filter}'")]
    InvalidFilterSyntax { filter: String },

    /// The filter names a field that is not in the field schema.
    #[error("invalid column name '{field}'")]
    UnknownField { field: String },

    /// A range filter was applied to a categorical field.
    #[error("cannot supply range filter for categorical column '{field}'")]
    FilterTypeMismatch { field: String },

    /// A pagination parameter is not a positive integer.
    #[error("invalid {parameter} query parameter '{value}'")]
    InvalidPagination { parameter: String, value: String },

    /// The store failed while executing a compiled query.
    #[error("search execution failed: {message}")]
    Execution { message: String },
}

impl SearchError {
    /// Returns true for errors caused by malformed request parameters.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SearchError::Execution { .. })
    }
}

/// Errors in a create payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The request body could not be decoded.
    #[error("invalid request body: {message}")]
    MalformedBody { message: String },

    /// The request body already carries an identifier.
    #[error("invalid request body: id '{id}' must not be supplied")]
    IdAlreadyAssigned { id: String },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Connection pool exhausted.
    #[error("connection pool exhausted for {backend_name}")]
    PoolExhausted { backend_name: String },

    /// Schema bootstrap error.
    #[error("schema initialization failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A stored row could not be decoded into a record.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(_err: r2d2::Error) -> Self {
        StorageError::Backend(BackendError::PoolExhausted {
            backend_name: "sqlite".to_string(),
        })
    }
}

#[cfg(feature = "postgres")]
impl From<tokio_postgres::Error> for StorageError {
    fn from(err: tokio_postgres::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "postgres".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "postgres")]
impl From<deadpool_postgres::PoolError> for StorageError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        StorageError::Backend(BackendError::ConnectionFailed {
            backend_name: "postgres".to_string(),
            message: err.to_string(),
        })
    }
}
