//! Error types shared by the Campus crates.

use thiserror::Error;

/// Top-level error type for roster and identity operations.
#[derive(Debug, Error)]
pub enum CampusError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("identity service error: {0}")]
    Identity(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("invalid custom claims: {0}")]
    Claims(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CampusError {
    /// True when the error means a file (or directory) does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CampusError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// A convenience Result alias that defaults to [`CampusError`].
pub type Result<T> = std::result::Result<T, CampusError>;
