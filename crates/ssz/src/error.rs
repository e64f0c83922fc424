//! Error types for the SSZ API.

use ssz_core::{DeserializationError, SchemaError, SerializationError, SszError};
use thiserror::Error;

/// Errors that can occur during encode, decode or hashing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The value cannot be represented under the sedes.
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// The bytes are not a valid encoding under the sedes.
    #[error("deserialization error: {0}")]
    Deserialization(#[from] DeserializationError),

    /// The sedes itself is invalid for the request.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl From<SszError> for Error {
    fn from(err: SszError) -> Self {
        match err {
            SszError::Serialization(e) => Error::Serialization(e),
            SszError::Deserialization(e) => Error::Deserialization(e),
            SszError::Schema(e) => Error::Schema(e),
        }
    }
}

/// Result type for SSZ API operations.
pub type Result<T> = std::result::Result<T, Error>;
