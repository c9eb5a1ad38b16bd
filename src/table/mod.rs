//! Persisted transition tables.
//!
//! A transition table is the serializable form of a [`TransitionGraph`]:
//! a versioned list of allowed transitions that can live in a configuration
//! file and be turned into a graph at startup.

use crate::core::{State, Transition, TransitionGraph};
use serde::{Deserialize, Serialize};
use tracing::info;

pub mod error;

pub use error::TableError;

/// Version identifier for the table format
pub const TABLE_VERSION: u32 = 1;

/// Serializable list of allowed transitions.
///
/// # Example
///
/// ```rust
/// use statewarden::table::TransitionTable;
///
/// let json = r#"{
///     "version": 1,
///     "column": "Status",
///     "transitions": [
///         { "from": "Draft", "to": "Review" },
///         { "from": "Review", "to": "Approved" }
///     ]
/// }"#;
///
/// let table: TransitionTable<String> = TransitionTable::from_json(json).unwrap();
/// let graph = table.into_graph();
/// assert!(graph.is_allowed_transition(&"Draft".to_string(), &"Review".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionTable<S: State> {
    /// Table format version
    pub version: u32,

    /// Governed column the table applies to, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    /// Allowed transitions, in registration order
    pub transitions: Vec<Transition<S>>,
}

impl<S: State> TransitionTable<S> {
    pub fn new(transitions: Vec<Transition<S>>) -> Self {
        Self {
            version: TABLE_VERSION,
            column: None,
            transitions,
        }
    }

    /// Record which column the table governs.
    pub fn for_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Snapshot the edges of `graph`.
    pub fn from_graph(graph: &TransitionGraph<S>) -> Self {
        Self::new(graph.transitions())
    }

    /// Build a graph holding every transition in the table.
    pub fn into_graph(self) -> TransitionGraph<S> {
        TransitionGraph::from_transitions(self.transitions)
    }

    pub fn to_json(&self) -> Result<String, TableError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TableError::SerializationFailed(e.to_string()))
    }

    /// Parse a table, rejecting unknown versions.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let table: Self = serde_json::from_str(json)
            .map_err(|e| TableError::DeserializationFailed(e.to_string()))?;

        if table.version != TABLE_VERSION {
            return Err(TableError::UnsupportedVersion {
                found: table.version,
                supported: TABLE_VERSION,
            });
        }

        info!(
            target: "statewarden::graph",
            transitions = table.transitions.len(),
            "Loaded transition table"
        );
        Ok(table)
    }
}

impl<S: State> From<&TransitionGraph<S>> for TransitionTable<S> {
    fn from(graph: &TransitionGraph<S>) -> Self {
        Self::from_graph(graph)
    }
}
