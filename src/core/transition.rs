//! Allowed transition pairs.

use super::state::State;
use serde::{Deserialize, Serialize};

/// An explicitly permitted move from one state to another.
///
/// Transitions are plain values; two transitions are the same edge when both
/// endpoints compare equal.
///
/// # Example
///
/// ```rust
/// use statewarden::core::Transition;
///
/// let edge = Transition::new("Draft".to_string(), "Review".to_string());
/// assert_eq!(edge.from, "Draft");
/// assert_eq!(edge.to, "Review");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Transition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
}

impl<S: State> Transition<S> {
    pub fn new(from: S, to: S) -> Self {
        Self { from, to }
    }

    /// Whether the transition leaves and re-enters the same state.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl<S: State> From<(S, S)> for Transition<S> {
    fn from((from, to): (S, S)) -> Self {
        Self::new(from, to)
    }
}
