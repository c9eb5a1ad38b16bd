//! Transition graph: the set of permitted state changes.
//!
//! The graph is built once during setup and then shared between concurrent
//! update operations. Every read and write goes through the same mutex, so a
//! single instance can be wrapped in an `Arc` and used from any thread.

use super::error::TransitionRejected;
use super::state::State;
use super::transition::Transition;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

#[derive(Debug)]
struct Edges<S: State> {
    /// from -> allowed targets
    index: HashMap<S, HashSet<S>>,
    /// Registration order, for deterministic export
    ordered: Vec<Transition<S>>,
}

impl<S: State> Edges<S> {
    fn contains(&self, from: &S, to: &S) -> bool {
        self.index
            .get(from)
            .is_some_and(|targets| targets.contains(to))
    }
}

/// Directed graph of allowed transitions between states.
///
/// A state with no outgoing edge is *final*; every other state is
/// *transitional*. Adding an edge that already exists is a no-op.
///
/// # Example
///
/// ```rust
/// use statewarden::core::TransitionGraph;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Doc {
///     Draft,
///     Review,
///     Approved,
/// }
///
/// let graph = TransitionGraph::new();
/// graph.add_allowed_transition(Doc::Draft, Doc::Review);
/// graph.add_allowed_transition(Doc::Review, Doc::Approved);
///
/// assert!(graph.is_allowed_transition(&Doc::Draft, &Doc::Review));
/// assert!(graph.validate_transition(&Doc::Draft, &Doc::Approved).is_err());
/// assert!(graph.is_final_state(&Doc::Approved));
/// assert!(graph.is_transitional_state(&Doc::Draft));
/// ```
#[derive(Debug)]
pub struct TransitionGraph<S: State> {
    edges: Mutex<Edges<S>>,
}

impl<S: State> TransitionGraph<S> {
    /// Create an empty graph. Every state is final until edges are added.
    pub fn new() -> Self {
        Self {
            edges: Mutex::new(Edges {
                index: HashMap::new(),
                ordered: Vec::new(),
            }),
        }
    }

    /// Build a graph from a sequence of transitions, dropping duplicates.
    pub fn from_transitions<I, T>(transitions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Transition<S>>,
    {
        let graph = Self::new();
        for transition in transitions {
            let Transition { from, to } = transition.into();
            graph.add_allowed_transition(from, to);
        }
        graph
    }

    /// Add a transition, consuming and returning the graph.
    pub fn with_transition(self, from: S, to: S) -> Self {
        self.add_allowed_transition(from, to);
        self
    }

    /// Permit the move `from -> to`.
    ///
    /// Returns `true` if the edge was new, `false` if it was already present.
    pub fn add_allowed_transition(&self, from: S, to: S) -> bool {
        let mut edges = self.edges.lock();
        if edges.contains(&from, &to) {
            return false;
        }

        debug!(
            target: "statewarden::graph",
            from = %from.label(),
            to = %to.label(),
            "Registered transition"
        );
        edges
            .index
            .entry(from.clone())
            .or_default()
            .insert(to.clone());
        edges.ordered.push(Transition { from, to });
        true
    }

    /// Whether the move `from -> to` is permitted. Never fails.
    pub fn is_allowed_transition(&self, from: &S, to: &S) -> bool {
        self.edges.lock().contains(from, to)
    }

    /// A state is final when no edge leaves it.
    pub fn is_final_state(&self, state: &S) -> bool {
        self.edges
            .lock()
            .index
            .get(state)
            .map_or(true, |targets| targets.is_empty())
    }

    pub fn is_transitional_state(&self, state: &S) -> bool {
        !self.is_final_state(state)
    }

    /// Check the move `from -> to`, describing the failure for a human.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionRejected`] when no matching edge exists.
    pub fn validate_transition(&self, from: &S, to: &S) -> Result<(), TransitionRejected> {
        if self.is_allowed_transition(from, to) {
            return Ok(());
        }

        let rejected = TransitionRejected {
            from: from.label(),
            to: to.label(),
        };
        warn!(target: "statewarden::graph", error = %rejected, "Transition rejected");
        Err(rejected)
    }

    /// States reachable in one step from `from`.
    pub fn targets(&self, from: &S) -> Vec<S> {
        let edges = self.edges.lock();
        edges
            .ordered
            .iter()
            .filter(|t| &t.from == from)
            .map(|t| t.to.clone())
            .collect()
    }

    /// Whether any edge leads into `state`.
    pub fn is_reachable(&self, state: &S) -> bool {
        self.edges
            .lock()
            .index
            .values()
            .any(|targets| targets.contains(state))
    }

    /// Snapshot of all edges in registration order.
    pub fn transitions(&self) -> Vec<Transition<S>> {
        self.edges.lock().ordered.clone()
    }

    pub fn len(&self) -> usize {
        self.edges.lock().ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: State> Default for TransitionGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}
