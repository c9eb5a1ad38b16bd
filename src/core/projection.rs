//! Validation of typed items whose state lives in one of their fields.

use super::error::TransitionRejected;
use super::graph::TransitionGraph;
use super::state::State;
use std::marker::PhantomData;
use std::sync::Arc;

/// Validates transitions between typed items by projecting their state.
///
/// The projection is an accessor picking the governed state out of an item,
/// so callers can validate whole items instead of extracting states by hand.
///
/// # Example
///
/// ```rust
/// use statewarden::core::{ItemValidator, TransitionGraph};
/// use std::sync::Arc;
///
/// struct Ticket {
///     status: u8,
/// }
///
/// let graph = Arc::new(TransitionGraph::new().with_transition(0u8, 1u8));
/// let validator = ItemValidator::new(graph, |t: &Ticket| t.status);
///
/// assert!(validator
///     .validate_items(&Ticket { status: 0 }, &Ticket { status: 1 })
///     .is_ok());
/// assert!(validator.validate_item_to(&Ticket { status: 1 }, &0).is_err());
/// ```
pub struct ItemValidator<T, S: State> {
    graph: Arc<TransitionGraph<S>>,
    project: Box<dyn Fn(&T) -> S + Send + Sync>,
    _phantom: PhantomData<fn(&T)>,
}

impl<T, S: State> ItemValidator<T, S> {
    pub fn new<F>(graph: Arc<TransitionGraph<S>>, project: F) -> Self
    where
        F: Fn(&T) -> S + Send + Sync + 'static,
    {
        Self {
            graph,
            project: Box::new(project),
            _phantom: PhantomData,
        }
    }

    /// Current state of `item`.
    pub fn state_of(&self, item: &T) -> S {
        (self.project)(item)
    }

    /// Check that `from` may become `to`.
    pub fn validate_items(&self, from: &T, to: &T) -> Result<(), TransitionRejected> {
        self.validate_item_to(from, &self.state_of(to))
    }

    /// Check that `from` may move into `to`.
    pub fn validate_item_to(&self, from: &T, to: &S) -> Result<(), TransitionRejected> {
        self.graph.validate_transition(&self.state_of(from), to)
    }

    pub fn graph(&self) -> &TransitionGraph<S> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum OrderState {
        Placed,
        Shipped,
        Delivered,
    }

    struct Order {
        id: u32,
        state: OrderState,
    }

    fn validator() -> ItemValidator<Order, OrderState> {
        let graph = TransitionGraph::new()
            .with_transition(OrderState::Placed, OrderState::Shipped)
            .with_transition(OrderState::Shipped, OrderState::Delivered);
        ItemValidator::new(Arc::new(graph), |o: &Order| o.state.clone())
    }

    #[test]
    fn projects_state_from_item() {
        let order = Order {
            id: 1,
            state: OrderState::Shipped,
        };
        assert_eq!(validator().state_of(&order), OrderState::Shipped);
        assert_eq!(order.id, 1);
    }

    #[test]
    fn validates_item_to_item() {
        let before = Order {
            id: 7,
            state: OrderState::Placed,
        };
        let after = Order {
            id: 7,
            state: OrderState::Delivered,
        };

        let err = validator().validate_items(&before, &after).unwrap_err();
        assert_eq!(err.from, "Placed");
        assert_eq!(err.to, "Delivered");
    }

    #[test]
    fn validates_item_to_state() {
        let order = Order {
            id: 3,
            state: OrderState::Shipped,
        };
        assert!(validator()
            .validate_item_to(&order, &OrderState::Delivered)
            .is_ok());
    }
}
