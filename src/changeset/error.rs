//! Change-set decoding errors.

use thiserror::Error;

/// The bookkeeping field does not hold an encoded change-set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Malformed change set '{input}': {reason}")]
pub struct MalformedChangeSet {
    /// The text that failed to decode
    pub input: String,
    /// Why the parser rejected it
    pub reason: String,
}
