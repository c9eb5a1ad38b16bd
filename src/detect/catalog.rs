//! Host field catalog: ordered field descriptors.

use crate::changeset::CHANGE_DETECTION_FIELD;
use serde::{Deserialize, Serialize};

/// One field of the host's record schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Stable field identifier
    pub name: String,

    /// Read-only fields are never reported as changed
    #[serde(default)]
    pub read_only: bool,

    /// Hidden from normal editing
    #[serde(default)]
    pub hidden: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            read_only: false,
            hidden: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Ordered list of fields. A field's ordinal is its position in the list.
///
/// Ordinals written by the pre-update hook are resolved against the catalog
/// handed to the post-update hook, so both must share the same ordering.
///
/// # Example
///
/// ```rust
/// use statewarden::detect::{FieldCatalog, FieldDescriptor};
///
/// let catalog = FieldCatalog::new()
///     .with_field(FieldDescriptor::new("Title"))
///     .with_field(FieldDescriptor::new("Created").read_only())
///     .with_field(FieldDescriptor::new("Status"));
///
/// assert_eq!(catalog.ordinal_of("Status"), Some(2));
/// assert_eq!(catalog.field(1).map(|f| f.read_only), Some(true));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCatalog {
    fields: Vec<FieldDescriptor>,
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn push(&mut self, field: FieldDescriptor) {
        self.fields.push(field);
    }

    /// Field at `ordinal`, if the ordinal is in range.
    pub fn field(&self, ordinal: usize) -> Option<&FieldDescriptor> {
        self.fields.get(ordinal)
    }

    pub fn ordinal_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Fields paired with their ordinals, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &FieldDescriptor)> {
        self.fields.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn has_change_detection_field(&self) -> bool {
        self.contains(CHANGE_DETECTION_FIELD)
    }

    /// Append the hidden change-detection field unless it is already present.
    ///
    /// Returns `true` when the field was added.
    pub fn ensure_change_detection_field(&mut self) -> bool {
        if self.has_change_detection_field() {
            return false;
        }
        self.fields
            .push(FieldDescriptor::new(CHANGE_DETECTION_FIELD).hidden());
        true
    }
}

impl FromIterator<FieldDescriptor> for FieldCatalog {
    fn from_iter<I: IntoIterator<Item = FieldDescriptor>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
