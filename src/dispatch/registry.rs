//! State -> handler bindings.

use super::firing::EventFiring;
use crate::core::State;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Type alias for handler callables.
///
/// A handler receives the host's update context and the firing flag that is
/// in effect while it runs.
pub type HandlerFn<C, E> = Arc<dyn Fn(&mut C, EventFiring) -> Result<(), E> + Send + Sync>;

/// A callable bound to one state value.
pub struct StateHandler<C, E> {
    action: HandlerFn<C, E>,
    disable_firing: bool,
}

impl<C, E> StateHandler<C, E> {
    /// Create a handler that leaves event firing enabled while it runs.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(&mut C, EventFiring) -> Result<(), E> + Send + Sync + 'static,
    {
        Self {
            action: Arc::new(action),
            disable_firing: false,
        }
    }

    /// Suppress event firing while this handler runs.
    pub fn disable_firing(mut self) -> Self {
        self.disable_firing = true;
        self
    }

    /// The firing flag this handler runs under.
    pub fn firing(&self) -> EventFiring {
        EventFiring::from_enabled(!self.disable_firing)
    }

    pub(crate) fn invoke(&self, context: &mut C, firing: EventFiring) -> Result<(), E> {
        (self.action)(context, firing)
    }
}

impl<C, E> Clone for StateHandler<C, E> {
    fn clone(&self) -> Self {
        Self {
            action: Arc::clone(&self.action),
            disable_firing: self.disable_firing,
        }
    }
}

/// Maps each state to at most one handler.
///
/// When a state is bound twice the first binding is kept and the second is
/// dropped with a warning.
pub struct HandlerRegistry<S: State, C, E> {
    handlers: HashMap<S, StateHandler<C, E>>,
}

impl<S: State, C, E> HandlerRegistry<S, C, E> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Bind `handler` to `state`. Returns `false` if the state was already bound.
    pub fn bind(&mut self, state: S, handler: StateHandler<C, E>) -> bool {
        if self.handlers.contains_key(&state) {
            warn!(
                target: "statewarden::dispatch",
                state = %state.label(),
                "State already has a handler, ignoring duplicate binding"
            );
            return false;
        }
        self.handlers.insert(state, handler);
        true
    }

    pub fn handler_for(&self, state: &S) -> Option<&StateHandler<C, E>> {
        self.handlers.get(state)
    }

    /// States with a bound handler, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.handlers.keys()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<S: State, C, E> Default for HandlerRegistry<S, C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, C, E> Clone for HandlerRegistry<S, C, E> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_reports_firing_preference() {
        let loud: StateHandler<(), ()> = StateHandler::new(|_, _| Ok(()));
        let quiet: StateHandler<(), ()> = StateHandler::new(|_, _| Ok(())).disable_firing();

        assert_eq!(loud.firing(), EventFiring::Enabled);
        assert_eq!(quiet.firing(), EventFiring::Disabled);
    }

    #[test]
    fn invoke_passes_context_and_flag() {
        let handler: StateHandler<Vec<EventFiring>, ()> =
            StateHandler::new(|seen: &mut Vec<EventFiring>, firing| {
                seen.push(firing);
                Ok(())
            });

        let mut seen = Vec::new();
        handler.invoke(&mut seen, EventFiring::Disabled).unwrap();
        assert_eq!(seen, vec![EventFiring::Disabled]);
    }

    #[test]
    fn first_binding_wins() {
        let mut registry: HandlerRegistry<String, u32, ()> = HandlerRegistry::new();

        assert!(registry.bind(
            "Approved".to_string(),
            StateHandler::new(|count: &mut u32, _| {
                *count += 1;
                Ok(())
            })
        ));
        assert!(!registry.bind(
            "Approved".to_string(),
            StateHandler::new(|count: &mut u32, _| {
                *count += 100;
                Ok(())
            })
        ));
        assert_eq!(registry.len(), 1);

        let mut count = 0;
        registry
            .handler_for(&"Approved".to_string())
            .unwrap()
            .invoke(&mut count, EventFiring::Enabled)
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn unbound_state_has_no_handler() {
        let registry: HandlerRegistry<String, (), ()> = HandlerRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.handler_for(&"Draft".to_string()).is_none());
    }
}
