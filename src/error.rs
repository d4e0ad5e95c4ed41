//! Error types for store operations and the application as a whole.

use crate::validation::FieldErrors;

/// A reference-integrity failure. The store is left unchanged whenever one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Project not found: {0}")]
    UnknownProject(String),

    #[error("User not found: {0}")]
    UnknownUser(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),
}

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid server address '{0}'")]
    InvalidAddress(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Error::Validation(errors)
    }
}

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, Error>;
