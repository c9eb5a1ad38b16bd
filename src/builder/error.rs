//! Build errors for receivers.

use thiserror::Error;

/// Errors that can occur when building a state machine receiver.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Governed column not specified. Call .column(name) before .build()")]
    MissingColumn,

    #[error("Transition graph not specified. Call .graph(graph) or .transition(from, to)")]
    MissingGraph,

    #[error("Column '{0}' is reserved for change detection and cannot be governed")]
    ReservedColumn(String),
}
