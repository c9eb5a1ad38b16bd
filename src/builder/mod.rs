//! Builder API for ergonomic receiver construction.
//!
//! This module provides a fluent builder and macros for wiring a governed
//! column, its transition graph and its state handlers with minimal
//! boilerplate.

pub mod error;
pub mod macros;
pub mod receiver;

pub use error::BuildError;
pub use receiver::ReceiverBuilder;
