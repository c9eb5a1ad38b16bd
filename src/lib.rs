//! Statewarden: governed state transitions for record update pipelines
//!
//! Statewarden sits between a host record store and its update hooks. Before
//! an update is committed it checks that the record's state column moves
//! along a permitted edge and remembers which fields changed; after the
//! commit it runs the handler bound to the record's new state.
//!
//! # Core Concepts
//!
//! - **State**: any hashable, serializable value via the blanket `State` trait
//! - **TransitionGraph**: thread-safe set of permitted moves; states without
//!   outgoing moves are final
//! - **Change-set**: ordinals of the fields an update changed, stored in a
//!   hidden bookkeeping field between the two hooks
//! - **Dispatch**: one handler per state, run with a scoped event-firing flag
//!
//! # Example
//!
//! ```rust
//! use statewarden::core::TransitionGraph;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
//! enum Document {
//!     Draft,
//!     Review,
//!     Approved,
//! }
//!
//! let graph = TransitionGraph::new()
//!     .with_transition(Document::Draft, Document::Review)
//!     .with_transition(Document::Review, Document::Approved);
//!
//! assert!(graph.validate_transition(&Document::Draft, &Document::Review).is_ok());
//! assert!(graph.validate_transition(&Document::Draft, &Document::Approved).is_err());
//! assert!(graph.is_final_state(&Document::Approved));
//! ```

pub mod builder;
pub mod changeset;
pub mod core;
pub mod detect;
pub mod dispatch;
pub mod receiver;
pub mod registration;
pub mod table;

// Re-export commonly used types
pub use changeset::{ChangeSetCodec, MalformedChangeSet, CHANGE_DETECTION_FIELD};
pub use crate::core::{State, Transition, TransitionGraph, TransitionRejected};
pub use detect::{ChangeDetector, FieldCatalog, FieldDescriptor, FieldSnapshot};
pub use dispatch::{DispatchOutcome, EventFiring, StateDispatcher, StateHandler};
pub use receiver::{StateMachineReceiver, UpdateRejected};
