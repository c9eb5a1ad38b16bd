//! Transition table error types.

use thiserror::Error;

/// Errors that can occur when persisting or loading a transition table
#[derive(Debug, Error)]
pub enum TableError {
    /// Serialization to JSON failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Table version is not supported by this version
    #[error("Unsupported transition table version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
