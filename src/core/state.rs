//! Core State trait for governed state values.
//!
//! States are opaque values compared by value. They cross the host boundary
//! as JSON field values, so the trait carries the conversions in both
//! directions alongside a human-readable label for error messages.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for values stored in a governed column.
///
/// Implemented for every type with the required bounds, so plain enums,
/// strings and integers work without extra code.
///
/// # Required Traits
///
/// - `Clone`: states are copied between the graph, snapshots and handlers
/// - `Eq` + `Hash`: the transition graph indexes states by value
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `DeserializeOwned`: states are read from and written to
///   record fields
///
/// # Example
///
/// ```rust
/// use statewarden::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum TaskState {
///     Pending,
///     Running,
///     Complete,
/// }
///
/// assert_eq!(TaskState::Running.label(), "Running");
/// assert_eq!(
///     TaskState::from_field(&serde_json::json!("Complete")).unwrap(),
///     TaskState::Complete
/// );
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync
{
    /// Render the state for display/logging.
    ///
    /// A state that serializes to a JSON string renders as the raw string;
    /// anything else renders as its compact JSON text.
    fn label(&self) -> String {
        match serde_json::to_value(self) {
            Ok(Value::String(text)) => text,
            Ok(other) => other.to_string(),
            Err(_) => format!("{self:?}"),
        }
    }

    /// Read a state out of a record field value.
    fn from_field(value: &Value) -> Result<Self, serde_json::Error> {
        <Self as serde::Deserialize>::deserialize(value)
    }

    /// Write the state as a record field value.
    fn to_field(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl<T> State for T where
    T: Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync
{
}
