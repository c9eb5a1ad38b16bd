//! Before/after snapshot comparison.

use super::catalog::{FieldCatalog, FieldDescriptor};
use super::FieldSnapshot;
use crate::changeset::CHANGE_DETECTION_FIELD;
use serde_json::Value;
use std::convert::Infallible;
use tracing::debug;

/// Computes which catalog fields an update actually changed.
///
/// A field is reported when all of the following hold:
/// - it is not the change-detection bookkeeping field
/// - it is not read-only
/// - the after snapshot records a value for it
/// - that value differs from the before value (a missing before value
///   differs from anything)
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeDetector;

impl ChangeDetector {
    /// Ordinals of changed fields, in catalog order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statewarden::detect::{ChangeDetector, FieldCatalog, FieldDescriptor, FieldSnapshot};
    /// use serde_json::json;
    ///
    /// let catalog = FieldCatalog::new()
    ///     .with_field(FieldDescriptor::new("F0"))
    ///     .with_field(FieldDescriptor::new("F1").read_only())
    ///     .with_field(FieldDescriptor::new("F2"));
    ///
    /// let before = FieldSnapshot::from([
    ///     ("F0".to_string(), json!("a")),
    ///     ("F1".to_string(), json!("x")),
    ///     ("F2".to_string(), json!("p")),
    /// ]);
    /// let after = FieldSnapshot::from([
    ///     ("F0".to_string(), json!("b")),
    ///     ("F1".to_string(), json!("y")),
    ///     ("F2".to_string(), json!("p")),
    /// ]);
    ///
    /// assert_eq!(ChangeDetector.detect(&catalog, &before, &after), vec![0]);
    /// ```
    pub fn detect(
        &self,
        catalog: &FieldCatalog,
        before: &FieldSnapshot,
        after: &FieldSnapshot,
    ) -> Vec<usize> {
        let result: Result<_, Infallible> =
            self.detect_with(catalog, before, after, |_, _, _| Ok(()));
        match result {
            Ok(ordinals) => ordinals,
            Err(never) => match never {},
        }
    }

    /// Like [`ChangeDetector::detect`], running `on_change` for every changed
    /// field before its ordinal is recorded.
    ///
    /// # Errors
    ///
    /// The first error returned by `on_change` aborts detection; fields after
    /// the failing one are not examined.
    pub fn detect_with<E, F>(
        &self,
        catalog: &FieldCatalog,
        before: &FieldSnapshot,
        after: &FieldSnapshot,
        mut on_change: F,
    ) -> Result<Vec<usize>, E>
    where
        F: FnMut(&FieldDescriptor, Option<&Value>, &Value) -> Result<(), E>,
    {
        let mut changed = Vec::new();

        for (ordinal, field) in catalog.iter() {
            if field.name == CHANGE_DETECTION_FIELD || field.read_only {
                continue;
            }

            let Some(new_value) = after.get(&field.name) else {
                continue;
            };

            let old_value = before.get(&field.name);
            if old_value == Some(new_value) {
                continue;
            }

            on_change(field, old_value, new_value)?;

            debug!(
                target: "statewarden::detect",
                field = %field.name,
                ordinal,
                "Field changed"
            );
            changed.push(ordinal);
        }

        Ok(changed)
    }
}
