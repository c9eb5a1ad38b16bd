//! Registration checks using Validation.

use crate::changeset::CHANGE_DETECTION_FIELD;
use crate::core::State;
use crate::registration::context::RegistrationContext;
use crate::registration::violations::RegistrationViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for registration check functions
pub type RegistrationCheck<S> = Box<
    dyn Fn(&RegistrationContext<'_, S>) -> Validation<(), NonEmptyVec<RegistrationViolation>>
        + Send
        + Sync,
>;

/// Checks run when a receiver is deployed against a field catalog.
/// Uses Validation to accumulate ALL violations.
pub struct RegistrationRules<S: State> {
    required_checks: Vec<RegistrationCheck<S>>,
}

impl<S: State> RegistrationRules<S> {
    /// Rules with only the built-in checks.
    pub fn new() -> Self {
        Self {
            required_checks: Vec::new(),
        }
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&RegistrationContext<'_, S>) -> Validation<(), NonEmptyVec<RegistrationViolation>>
            + Send
            + Sync
            + 'static,
    {
        self.required_checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&RegistrationContext<'_, S>) -> bool + Send + Sync + 'static,
    {
        let check = move |ctx: &RegistrationContext<'_, S>| {
            if predicate(ctx) {
                Validation::success(())
            } else {
                Validation::fail(RegistrationViolation::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.required_checks.push(Box::new(check));
        self
    }

    /// Run the built-in and custom checks, accumulating ALL violations.
    /// Returns Validation::Success(()) if all checks pass.
    /// Returns Validation::Failure with ALL violations if any fail.
    pub fn check(
        &self,
        context: &RegistrationContext<'_, S>,
    ) -> Validation<(), NonEmptyVec<RegistrationViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<RegistrationViolation>>> = Vec::new();

        // Governed column must exist and be writable
        let column = context.column.to_string();
        let check = match context.catalog.get(context.column) {
            None => Validation::fail(RegistrationViolation::ColumnMissing { column }),
            Some(field) if field.read_only => {
                Validation::fail(RegistrationViolation::ColumnReadOnly { column })
            }
            Some(_) => Validation::success(()),
        };
        checks.push(check);

        // Dispatch depends on the bookkeeping field
        let check = if context.catalog.has_change_detection_field() {
            Validation::success(())
        } else {
            Validation::fail(RegistrationViolation::ChangeDetectionFieldMissing {
                field: CHANGE_DETECTION_FIELD.to_string(),
            })
        };
        checks.push(check);

        // Handlers only fire after a transition into their state
        let mut unreachable: Vec<String> = context
            .bound_states
            .iter()
            .filter(|state| !context.graph.is_reachable(state))
            .map(|state| state.label())
            .collect();
        unreachable.sort();
        for state in unreachable {
            checks.push(Validation::fail(
                RegistrationViolation::UnreachableHandler { state },
            ));
        }

        // Run custom checks
        for check_fn in &self.required_checks {
            checks.push(check_fn(context));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Run [`RegistrationRules::check`] and list the violations found.
    pub fn violations(&self, context: &RegistrationContext<'_, S>) -> Vec<RegistrationViolation> {
        match self.check(context) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }
}

impl<S: State> Default for RegistrationRules<S> {
    fn default() -> Self {
        Self::new()
    }
}
