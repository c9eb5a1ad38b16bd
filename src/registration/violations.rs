//! Registration problems.

use thiserror::Error;

/// Problems found when pairing a receiver with a host field catalog
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationViolation {
    #[error("Governed column '{column}' is not in the field catalog")]
    ColumnMissing { column: String },

    #[error("Governed column '{column}' is read-only and never reported as changed")]
    ColumnReadOnly { column: String },

    #[error("Field catalog has no '{field}' field, so no handler will be dispatched")]
    ChangeDetectionFieldMissing { field: String },

    #[error("Handler for state '{state}' can never fire: no transition leads to it")]
    UnreachableHandler { state: String },

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}
