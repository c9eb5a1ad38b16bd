//! Post-update replay of a change-set.

use super::firing::{EventFiring, FiringScope};
use super::registry::{HandlerRegistry, StateHandler};
use crate::core::State;
use crate::detect::{FieldCatalog, FieldSnapshot};
use tracing::{debug, warn};

/// What a dispatch pass did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome<S: State> {
    /// The handler bound to `state` ran
    Dispatched { state: S },

    /// The governed column changed to `state`, which has no handler
    Unbound { state: S },

    /// The change-set does not touch the governed column, or its current
    /// value is not a recognised state
    Untracked,

    /// No usable change-set was recorded for the update
    NoChangeSet,
}

impl<S: State> DispatchOutcome<S> {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched { .. })
    }
}

/// Invokes the handler bound to a record's new state.
///
/// Only ordinals resolving to the governed column trigger dispatch; other
/// changed fields are ignored. A single update changes the column at most
/// once, so at most one handler runs per dispatch.
pub struct StateDispatcher<S: State, C, E> {
    column: String,
    registry: HandlerRegistry<S, C, E>,
}

impl<S: State, C, E> StateDispatcher<S, C, E> {
    pub fn new(column: impl Into<String>, registry: HandlerRegistry<S, C, E>) -> Self {
        Self {
            column: column.into(),
            registry,
        }
    }

    /// Name of the governed column.
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn registry(&self) -> &HandlerRegistry<S, C, E> {
        &self.registry
    }

    /// Replay `ordinals` against `record`.
    ///
    /// `firing` is the record's event-firing flag for this update. It is set
    /// to the handler's preference while the handler runs and restored
    /// afterwards, including when the handler fails.
    ///
    /// # Errors
    ///
    /// Propagates the handler's error unchanged.
    pub fn dispatch(
        &self,
        catalog: &FieldCatalog,
        record: &FieldSnapshot,
        ordinals: &[usize],
        firing: &mut EventFiring,
        context: &mut C,
    ) -> Result<DispatchOutcome<S>, E> {
        for &ordinal in ordinals {
            let Some(field) = catalog.field(ordinal) else {
                warn!(
                    target: "statewarden::dispatch",
                    ordinal,
                    fields = catalog.len(),
                    "Change-set ordinal outside the field catalog"
                );
                continue;
            };

            if field.name != self.column {
                continue;
            }

            return self.dispatch_current(record, firing, context);
        }

        Ok(DispatchOutcome::Untracked)
    }

    fn dispatch_current(
        &self,
        record: &FieldSnapshot,
        firing: &mut EventFiring,
        context: &mut C,
    ) -> Result<DispatchOutcome<S>, E> {
        let Some(value) = record.get(&self.column) else {
            debug!(target: "statewarden::dispatch", column = %self.column, "Governed column has no value");
            return Ok(DispatchOutcome::Untracked);
        };

        let state = match S::from_field(value) {
            Ok(state) => state,
            Err(e) => {
                warn!(
                    target: "statewarden::dispatch",
                    column = %self.column,
                    value = %value,
                    error = %e,
                    "Governed column holds an unrecognised state"
                );
                return Ok(DispatchOutcome::Untracked);
            }
        };

        match self.registry.handler_for(&state) {
            Some(handler) => {
                Self::invoke(handler, &state, firing, context)?;
                Ok(DispatchOutcome::Dispatched { state })
            }
            None => {
                debug!(target: "statewarden::dispatch", state = %state.label(), "No handler bound");
                Ok(DispatchOutcome::Unbound { state })
            }
        }
    }

    fn invoke(
        handler: &StateHandler<C, E>,
        state: &S,
        firing: &mut EventFiring,
        context: &mut C,
    ) -> Result<(), E> {
        let scope = FiringScope::enter(firing, handler.firing());
        debug!(
            target: "statewarden::dispatch",
            state = %state.label(),
            firing = ?scope.current(),
            "Invoking state handler"
        );
        handler.invoke(context, scope.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::FieldDescriptor;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Status {
        Draft,
        Review,
        Approved,
    }

    #[derive(Default)]
    struct Probe {
        calls: u32,
        observed: Vec<EventFiring>,
    }

    fn catalog() -> FieldCatalog {
        FieldCatalog::new()
            .with_field(FieldDescriptor::new("Title"))
            .with_field(FieldDescriptor::new("Status"))
    }

    fn record(status: &str) -> FieldSnapshot {
        FieldSnapshot::from([
            ("Title".to_string(), json!("Quarterly report")),
            ("Status".to_string(), json!(status)),
        ])
    }

    fn dispatcher(quiet: bool) -> StateDispatcher<Status, Probe, String> {
        let mut handler = StateHandler::new(|probe: &mut Probe, firing| {
            probe.calls += 1;
            probe.observed.push(firing);
            Ok(())
        });
        if quiet {
            handler = handler.disable_firing();
        }

        let mut registry = HandlerRegistry::new();
        registry.bind(Status::Approved, handler);
        registry.bind(
            Status::Review,
            StateHandler::new(|_: &mut Probe, _| Err("review handler failed".to_string()))
                .disable_firing(),
        );
        StateDispatcher::new("Status", registry)
    }

    #[test]
    fn handler_runs_once_for_governed_column() {
        let mut probe = Probe::default();
        let mut firing = EventFiring::Enabled;

        let outcome = dispatcher(false)
            .dispatch(&catalog(), &record("Approved"), &[0, 1], &mut firing, &mut probe)
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Dispatched { state: Status::Approved });
        assert_eq!(probe.calls, 1);
    }

    #[test]
    fn handler_observes_its_firing_preference() {
        let mut probe = Probe::default();
        let mut firing = EventFiring::Enabled;

        dispatcher(true)
            .dispatch(&catalog(), &record("Approved"), &[1], &mut firing, &mut probe)
            .unwrap();

        assert_eq!(probe.observed, vec![EventFiring::Disabled]);
        assert_eq!(firing, EventFiring::Enabled);
    }

    #[test]
    fn firing_flag_is_restored_when_handler_fails() {
        let mut probe = Probe::default();
        let mut firing = EventFiring::Enabled;

        let err = dispatcher(false)
            .dispatch(&catalog(), &record("Review"), &[1], &mut firing, &mut probe)
            .unwrap_err();

        assert_eq!(err, "review handler failed");
        assert_eq!(firing, EventFiring::Enabled);
    }

    #[test]
    fn other_columns_do_not_dispatch() {
        let mut probe = Probe::default();
        let mut firing = EventFiring::Enabled;

        let outcome = dispatcher(false)
            .dispatch(&catalog(), &record("Approved"), &[0], &mut firing, &mut probe)
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Untracked);
        assert_eq!(probe.calls, 0);
    }

    #[test]
    fn unbound_state_is_reported() {
        let mut probe = Probe::default();
        let mut firing = EventFiring::Enabled;

        let outcome = dispatcher(false)
            .dispatch(&catalog(), &record("Draft"), &[1], &mut firing, &mut probe)
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Unbound { state: Status::Draft });
        assert_eq!(probe.calls, 0);
    }

    #[test]
    fn unrecognised_value_is_untracked() {
        let mut probe = Probe::default();
        let mut firing = EventFiring::Enabled;

        let outcome = dispatcher(false)
            .dispatch(&catalog(), &record("Archived"), &[1], &mut firing, &mut probe)
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Untracked);
    }

    #[test]
    fn out_of_range_ordinals_are_skipped() {
        let mut probe = Probe::default();
        let mut firing = EventFiring::Enabled;

        let outcome = dispatcher(false)
            .dispatch(&catalog(), &record("Approved"), &[9, 1], &mut firing, &mut probe)
            .unwrap();

        assert!(outcome.is_dispatched());
        assert_eq!(probe.calls, 1);
    }

    #[test]
    fn repeated_column_ordinal_fires_once() {
        let mut probe = Probe::default();
        let mut firing = EventFiring::Enabled;

        dispatcher(false)
            .dispatch(&catalog(), &record("Approved"), &[1, 1], &mut firing, &mut probe)
            .unwrap();

        assert_eq!(probe.calls, 1);
    }
}
