//! Core transition types and logic.
//!
//! This module contains the pure part of the crate:
//! - State values via the blanket `State` trait
//! - The thread-safe `TransitionGraph` of permitted moves
//! - Typed item validation through `ItemValidator`
//!
//! Nothing here touches record snapshots or handlers; the hook layer in
//! [`crate::receiver`] builds on these types.

mod error;
mod graph;
mod projection;
mod state;
mod transition;

pub use error::TransitionRejected;
pub use graph::TransitionGraph;
pub use projection::ItemValidator;
pub use state::State;
pub use transition::Transition;
