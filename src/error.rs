//! Error types for the crate
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Error Enum ==
/// Unified error type for the stores, wrappers and page cache.
#[derive(Error, Debug)]
pub enum Error {
    /// The key-value store could not be reached
    #[error("Store connection failed: {0}")]
    Connection(String),

    /// The key-value store rejected or failed a command
    #[error("Store operation failed: {0}")]
    Store(String),

    /// Command used against a key holding the wrong kind of value
    #[error("Wrong type for key: {0}")]
    WrongType(String),

    /// Increment of a value that is not a decimal integer
    #[error("Value is not an integer: {0}")]
    NotInteger(String),

    /// Stored bytes could not be decoded into the requested type
    #[error("Decode failed: {0}")]
    Decode(String),

    /// Operation name rejected at registration
    #[error("Invalid operation name: {0:?}")]
    InvalidName(String),

    /// Operation name already registered
    #[error("Duplicate operation name: {0}")]
    DuplicateName(String),

    /// Page fetch failed
    #[error("Page fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Document store call failed
    #[error("Document store error: {0}")]
    Document(#[from] mongodb::error::Error),
}

// == Redis Error Mapping ==
impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
            Error::Connection(err.to_string())
        } else if err.code() == Some("WRONGTYPE") {
            Error::WrongType(err.to_string())
        } else if err.to_string().contains("not an integer") {
            Error::NotInteger(err.to_string())
        } else {
            Error::Store(err.to_string())
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;
