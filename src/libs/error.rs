//! Error types shared by the stores and the task manager.
//!
//! Two layers exist: [`StoreError`] describes what went wrong inside a
//! persistence provider, [`TaskError`] is what callers of the manager and
//! services see. Conversion between them keeps "not found" distinguishable
//! from every other store failure.

/// Failure reported by a persistence provider.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A response body did not match the expected record shape.
    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),

    /// The remote store answered with a non-success status.
    #[error("Remote store rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the store.
        message: String,
    },

    /// A single-record response carried no record.
    #[error("Remote store returned no data for {0}")]
    Empty(String),

    /// The addressed record does not exist.
    #[error("{0} not found")]
    NotFound(String),
}

/// Shorthand for store results.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failure reported to callers of the manager and the services.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// Caller input violates a precondition; nothing reached the store.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The store call failed.
    #[error("Persistence failed: {0}")]
    Persistence(#[source] StoreError),

    /// The addressed task or profile does not exist.
    #[error("{0} not found")]
    NotFound(String),
}

impl From<StoreError> for TaskError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => TaskError::NotFound(what),
            other => TaskError::Persistence(other),
        }
    }
}

impl TaskError {
    /// Returns `true` for [`TaskError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskError::NotFound(_))
    }
}

/// Shorthand for manager and service results.
pub type Result<T> = std::result::Result<T, TaskError>;
