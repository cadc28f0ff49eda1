//! Common error types for the baby log application

use thiserror::Error;

/// Common result type for baby log operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared across the storage, identity, and transfer layers
#[derive(Error, Debug)]
pub enum Error {
    /// Login attempted with a blank or whitespace-only passphrase
    #[error("Passphrase must not be empty")]
    EmptyCredential,

    /// Remote-backend operation attempted without a current session identity
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Import payload is not a JSON array, or could not be parsed
    #[error("Invalid import format: {0}")]
    InvalidFormat(String),

    /// Local database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Remote request transport error (wraps reqwest::Error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote store responded with a non-success status
    #[error("Remote store error: {0}")]
    Remote(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record serialization error (wraps serde_json::Error)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
