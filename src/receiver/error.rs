//! Pre-update rejection errors.

use crate::core::TransitionRejected;
use thiserror::Error;

/// Reasons the pre-update hook refuses an update.
///
/// The `Display` text is meant to be shown to whoever attempted the update.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpdateRejected {
    #[error(transparent)]
    Transition(#[from] TransitionRejected),

    #[error("Column '{column}' holds '{value}', which is not a known state: {reason}")]
    UnrecognizedState {
        column: String,
        value: String,
        reason: String,
    },
}
