//! Hook points for a host record-update pipeline.
//!
//! A host calls [`StateMachineReceiver::item_updating`] before committing an
//! update and [`StateMachineReceiver::item_updated`] after. The first
//! validates the governed column's transition and records which fields
//! changed; the second replays that record and runs the handler for the new
//! state.
//!
//! # Example
//!
//! ```rust
//! use statewarden::changeset::CHANGE_DETECTION_FIELD;
//! use statewarden::core::TransitionGraph;
//! use statewarden::detect::{FieldCatalog, FieldDescriptor, FieldSnapshot};
//! use statewarden::dispatch::{EventFiring, StateHandler};
//! use statewarden::receiver::StateMachineReceiver;
//! use serde_json::json;
//!
//! let graph = TransitionGraph::new()
//!     .with_transition("Draft".to_string(), "Published".to_string());
//!
//! let receiver = StateMachineReceiver::builder()
//!     .column("Status")
//!     .graph(graph)
//!     .on_state(
//!         "Published".to_string(),
//!         StateHandler::new(|published: &mut u32, _| {
//!             *published += 1;
//!             Ok::<(), String>(())
//!         }),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let mut catalog = FieldCatalog::new().with_field(FieldDescriptor::new("Status"));
//! catalog.ensure_change_detection_field();
//!
//! let before = FieldSnapshot::from([("Status".to_string(), json!("Draft"))]);
//! let mut after = FieldSnapshot::from([("Status".to_string(), json!("Published"))]);
//! receiver.item_updating(&catalog, &before, &mut after).unwrap();
//! assert_eq!(after[CHANGE_DETECTION_FIELD], json!("[0]"));
//!
//! // The host commits `after`; the stored record now carries the change-set.
//! let mut published = 0;
//! let mut firing = EventFiring::Enabled;
//! receiver
//!     .item_updated(&catalog, &after, &mut firing, &mut published)
//!     .unwrap();
//! assert_eq!(published, 1);
//! ```

pub mod error;

pub use error::UpdateRejected;

use crate::builder::ReceiverBuilder;
use crate::changeset::{ChangeSetCodec, CHANGE_DETECTION_FIELD};
use crate::core::{State, TransitionGraph};
use crate::detect::{ChangeDetector, FieldCatalog, FieldSnapshot};
use crate::dispatch::{DispatchOutcome, EventFiring, HandlerRegistry, StateDispatcher};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Validates and dispatches state changes of one governed column.
pub struct StateMachineReceiver<S: State, C, E> {
    graph: Arc<TransitionGraph<S>>,
    dispatcher: StateDispatcher<S, C, E>,
    detector: ChangeDetector,
}

impl<S: State, C, E> StateMachineReceiver<S, C, E> {
    pub fn new(
        column: impl Into<String>,
        graph: Arc<TransitionGraph<S>>,
        handlers: HandlerRegistry<S, C, E>,
    ) -> Self {
        Self {
            graph,
            dispatcher: StateDispatcher::new(column, handlers),
            detector: ChangeDetector,
        }
    }

    /// Start a fluent [`ReceiverBuilder`].
    pub fn builder() -> ReceiverBuilder<S, C, E> {
        ReceiverBuilder::new()
    }

    pub fn governed_column(&self) -> &str {
        self.dispatcher.column()
    }

    pub fn graph(&self) -> &Arc<TransitionGraph<S>> {
        &self.graph
    }

    pub fn handlers(&self) -> &HandlerRegistry<S, C, E> {
        self.dispatcher.registry()
    }

    /// The transition graph governing `field`, if this receiver governs it.
    pub fn validator_for(&self, field: &str) -> Option<&TransitionGraph<S>> {
        (field == self.governed_column()).then(|| self.graph.as_ref())
    }

    /// Pre-update hook.
    ///
    /// Validates a change of the governed column, then records the changed
    /// field ordinals in `after` under [`CHANGE_DETECTION_FIELD`] when the
    /// catalog declares that field. Returns the ordinals.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateRejected`] when the governed column moves along an edge
    /// the graph does not contain, or holds a value that is not a state. The
    /// after snapshot is left untouched in that case.
    pub fn item_updating(
        &self,
        catalog: &FieldCatalog,
        before: &FieldSnapshot,
        after: &mut FieldSnapshot,
    ) -> Result<Vec<usize>, UpdateRejected> {
        let column = self.governed_column();
        let ordinals = self
            .detector
            .detect_with(catalog, before, after, |field, old, new| {
                if field.name == column {
                    self.validate_change(old, new)
                } else {
                    Ok(())
                }
            })?;

        if catalog.has_change_detection_field() {
            after.insert(
                CHANGE_DETECTION_FIELD.to_string(),
                ChangeSetCodec::encode_field(&ordinals),
            );
        }

        debug!(
            target: "statewarden::receiver",
            column,
            changed = ordinals.len(),
            "Update accepted"
        );
        Ok(ordinals)
    }

    /// Post-update hook.
    ///
    /// Decodes the change-set stored on `record` and dispatches the handler
    /// bound to the governed column's current value. A missing or malformed
    /// change-set skips dispatch.
    ///
    /// # Errors
    ///
    /// Propagates the handler's error unchanged.
    pub fn item_updated(
        &self,
        catalog: &FieldCatalog,
        record: &FieldSnapshot,
        firing: &mut EventFiring,
        context: &mut C,
    ) -> Result<DispatchOutcome<S>, E> {
        if !catalog.has_change_detection_field() {
            return Ok(DispatchOutcome::NoChangeSet);
        }

        let ordinals = match ChangeSetCodec::decode_field(record.get(CHANGE_DETECTION_FIELD)) {
            Ok(Some(ordinals)) => ordinals,
            Ok(None) => {
                debug!(target: "statewarden::receiver", "Record carries no change set");
                return Ok(DispatchOutcome::NoChangeSet);
            }
            Err(e) => {
                warn!(target: "statewarden::receiver", error = %e, "Skipping dispatch");
                return Ok(DispatchOutcome::NoChangeSet);
            }
        };

        self.dispatcher
            .dispatch(catalog, record, &ordinals, firing, context)
    }

    fn validate_change(&self, old: Option<&Value>, new: &Value) -> Result<(), UpdateRejected> {
        let from = self.parse_state(old.unwrap_or(&Value::Null))?;
        let to = self.parse_state(new)?;
        if from == to {
            return Ok(());
        }
        self.graph.validate_transition(&from, &to)?;
        Ok(())
    }

    fn parse_state(&self, value: &Value) -> Result<S, UpdateRejected> {
        S::from_field(value).map_err(|e| UpdateRejected::UnrecognizedState {
            column: self.governed_column().to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
    }
}
