//! Context provided to registration checks.

use crate::core::{State, TransitionGraph};
use crate::detect::FieldCatalog;
use crate::receiver::StateMachineReceiver;

/// Everything a registration check may inspect
pub struct RegistrationContext<'a, S: State> {
    pub column: &'a str,
    pub catalog: &'a FieldCatalog,
    pub graph: &'a TransitionGraph<S>,
    pub bound_states: Vec<S>,
}

impl<'a, S: State> RegistrationContext<'a, S> {
    /// Collect the context for `receiver` deployed against `catalog`.
    pub fn for_receiver<C, E>(
        receiver: &'a StateMachineReceiver<S, C, E>,
        catalog: &'a FieldCatalog,
    ) -> Self {
        Self {
            column: receiver.governed_column(),
            catalog,
            graph: receiver.graph(),
            bound_states: receiver.handlers().states().cloned().collect(),
        }
    }
}
