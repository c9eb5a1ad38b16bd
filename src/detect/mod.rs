//! Field-level change detection.
//!
//! The host hands over two snapshots of a record for every update: the
//! values before the update and the values the caller is writing. A field
//! missing from the after snapshot was not touched by the caller.

mod catalog;
mod detector;

pub use catalog::{FieldCatalog, FieldDescriptor};
pub use detector::ChangeDetector;

use serde_json::Value;
use std::collections::HashMap;

/// Field identifier -> value, as supplied by the host for one update.
pub type FieldSnapshot = HashMap<String, Value>;
