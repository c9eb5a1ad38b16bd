//! Builder for constructing state machine receivers.

use crate::builder::error::BuildError;
use crate::changeset::CHANGE_DETECTION_FIELD;
use crate::core::{State, TransitionGraph};
use crate::dispatch::{EventFiring, HandlerRegistry, StateHandler};
use crate::receiver::StateMachineReceiver;
use std::sync::Arc;

/// Builder for constructing receivers with a fluent API.
pub struct ReceiverBuilder<S: State, C, E> {
    column: Option<String>,
    graph: Option<Arc<TransitionGraph<S>>>,
    handlers: HandlerRegistry<S, C, E>,
}

impl<S: State, C, E> ReceiverBuilder<S, C, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            column: None,
            graph: None,
            handlers: HandlerRegistry::new(),
        }
    }

    /// Set the governed column (required).
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.column = Some(name.into());
        self
    }

    /// Use `graph` for validation.
    pub fn graph(mut self, graph: TransitionGraph<S>) -> Self {
        self.graph = Some(Arc::new(graph));
        self
    }

    /// Use a graph shared with other receivers or validators.
    pub fn shared_graph(mut self, graph: Arc<TransitionGraph<S>>) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Permit `from -> to`, creating an empty graph first if none was set.
    pub fn transition(mut self, from: S, to: S) -> Self {
        self.graph
            .get_or_insert_with(|| Arc::new(TransitionGraph::new()))
            .add_allowed_transition(from, to);
        self
    }

    /// Bind a handler to a state. A second binding for the same state is ignored.
    pub fn on_state(mut self, state: S, handler: StateHandler<C, E>) -> Self {
        self.handlers.bind(state, handler);
        self
    }

    /// Bind a closure that runs with event firing left enabled.
    pub fn on_state_fn<F>(self, state: S, action: F) -> Self
    where
        F: Fn(&mut C, EventFiring) -> Result<(), E> + Send + Sync + 'static,
    {
        self.on_state(state, StateHandler::new(action))
    }

    /// Replace all bindings with a prepared registry.
    pub fn handlers(mut self, handlers: HandlerRegistry<S, C, E>) -> Self {
        self.handlers = handlers;
        self
    }

    /// Build the receiver.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<StateMachineReceiver<S, C, E>, BuildError> {
        let column = self.column.ok_or(BuildError::MissingColumn)?;
        if column == CHANGE_DETECTION_FIELD {
            return Err(BuildError::ReservedColumn(column));
        }
        let graph = self.graph.ok_or(BuildError::MissingGraph)?;

        Ok(StateMachineReceiver::new(column, graph, self.handlers))
    }
}

impl<S: State, C, E> Default for ReceiverBuilder<S, C, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Open,
        Closed,
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = ReceiverBuilder::<TestState, (), ()>::new().build();
        assert!(matches!(result, Err(BuildError::MissingColumn)));
    }

    #[test]
    fn builder_requires_graph() {
        let result = ReceiverBuilder::<TestState, (), ()>::new()
            .column("Status")
            .build();
        assert!(matches!(result, Err(BuildError::MissingGraph)));
    }

    #[test]
    fn builder_rejects_bookkeeping_column() {
        let result = ReceiverBuilder::<TestState, (), ()>::new()
            .column(CHANGE_DETECTION_FIELD)
            .transition(TestState::Open, TestState::Closed)
            .build();
        assert!(matches!(result, Err(BuildError::ReservedColumn(_))));
    }

    #[test]
    fn transitions_create_graph_on_demand() {
        let receiver = ReceiverBuilder::<TestState, (), ()>::new()
            .column("Status")
            .transition(TestState::Open, TestState::Closed)
            .transition(TestState::Open, TestState::Closed)
            .build()
            .unwrap();

        assert_eq!(receiver.governed_column(), "Status");
        assert_eq!(receiver.graph().len(), 1);
    }

    #[test]
    fn shared_graph_is_not_copied() {
        let graph = Arc::new(TransitionGraph::new());
        let receiver = ReceiverBuilder::<TestState, (), ()>::new()
            .column("Status")
            .shared_graph(Arc::clone(&graph))
            .build()
            .unwrap();

        graph.add_allowed_transition(TestState::Closed, TestState::Open);
        assert!(receiver
            .graph()
            .is_allowed_transition(&TestState::Closed, &TestState::Open));
    }

    #[test]
    fn fluent_api_binds_handlers() {
        let receiver = ReceiverBuilder::<TestState, u32, ()>::new()
            .column("Status")
            .transition(TestState::Open, TestState::Closed)
            .on_state_fn(TestState::Closed, |count: &mut u32, _| {
                *count += 1;
                Ok(())
            })
            .on_state(
                TestState::Open,
                StateHandler::new(|_: &mut u32, _| Ok(())).disable_firing(),
            )
            .build()
            .unwrap();

        assert_eq!(receiver.handlers().len(), 2);
    }
}
