//! Per-state handler dispatch.
//!
//! After an update is committed, the handler bound to the record's new state
//! runs with the record's event-firing flag temporarily overridden. The flag
//! belongs to the update being processed and is passed in explicitly, so
//! concurrent updates of different records never share it.

mod dispatcher;
mod firing;
mod registry;

pub use dispatcher::{DispatchOutcome, StateDispatcher};
pub use firing::{EventFiring, FiringScope};
pub use registry::{HandlerFn, HandlerRegistry, StateHandler};
