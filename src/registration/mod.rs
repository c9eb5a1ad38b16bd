//! Validation-based registration checks.
//!
//! A receiver only works when the host catalog actually carries its governed
//! column and the change-detection field, and when every bound handler can be
//! reached through some transition. These checks run once at deployment time
//! and report every problem at once, using Stillwater's `Validation` type to
//! accumulate violations instead of stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use statewarden::core::TransitionGraph;
//! use statewarden::detect::{FieldCatalog, FieldDescriptor};
//! use statewarden::receiver::StateMachineReceiver;
//! use statewarden::registration::{RegistrationContext, RegistrationRules};
//!
//! let receiver = StateMachineReceiver::<u8, (), ()>::builder()
//!     .column("Stage")
//!     .graph(TransitionGraph::new().with_transition(1, 2))
//!     .build()
//!     .unwrap();
//!
//! let catalog = FieldCatalog::new().with_field(FieldDescriptor::new("Stage"));
//! let context = RegistrationContext::for_receiver(&receiver, &catalog);
//!
//! // The catalog has no change-detection field yet.
//! assert_eq!(RegistrationRules::new().violations(&context).len(), 1);
//! ```

pub mod context;
pub mod rules;
pub mod violations;

// Re-export commonly used types
pub use context::RegistrationContext;
pub use rules::{RegistrationCheck, RegistrationRules};
pub use violations::RegistrationViolation;
