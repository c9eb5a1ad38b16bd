//! Transition validation errors.

use thiserror::Error;

/// A proposed state change has no matching edge in the transition graph.
///
/// Both states are carried as their display labels so the message can be
/// surfaced to a user unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("The transition from state:'{from}' to state:'{to}' is not allowed")]
pub struct TransitionRejected {
    pub from: String,
    pub to: String,
}
