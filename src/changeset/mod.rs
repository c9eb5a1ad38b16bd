//! Compact encoding of changed field ordinals.
//!
//! The pre-update hook writes the list of changed field positions into a
//! hidden text field so that the post-update hook can replay it without
//! diffing the record again. The encoding is a JSON array of integers,
//! e.g. `[0,3,5]`; an update with no changes encodes as `[]`.

pub mod error;

pub use error::MalformedChangeSet;

use serde_json::Value;

/// Identifier of the hidden field holding the encoded change-set.
pub const CHANGE_DETECTION_FIELD: &str = "__CHANGE_DETECTION_FIELD";

/// Encoder/decoder for ordered field ordinal lists.
///
/// # Example
///
/// ```rust
/// use statewarden::changeset::ChangeSetCodec;
///
/// let text = ChangeSetCodec::encode(&[0, 4, 2]);
/// assert_eq!(text, "[0,4,2]");
/// assert_eq!(ChangeSetCodec::decode(&text).unwrap(), vec![0, 4, 2]);
/// assert_eq!(ChangeSetCodec::decode("[]").unwrap(), Vec::<usize>::new());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeSetCodec;

impl ChangeSetCodec {
    /// Serialize ordinals, preserving order.
    pub fn encode(ordinals: &[usize]) -> String {
        serde_json::to_string(ordinals).expect("Integer sequences should always serialize")
    }

    /// Parse text produced by [`ChangeSetCodec::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`MalformedChangeSet`] when `text` is not a JSON array of
    /// non-negative integers.
    pub fn decode(text: &str) -> Result<Vec<usize>, MalformedChangeSet> {
        serde_json::from_str(text).map_err(|e| MalformedChangeSet {
            input: text.to_string(),
            reason: e.to_string(),
        })
    }

    /// Encode ordinals as a record field value.
    pub fn encode_field(ordinals: &[usize]) -> Value {
        Value::String(Self::encode(ordinals))
    }

    /// Decode a record field value.
    ///
    /// Returns `Ok(None)` when the field holds no value (absent or `null`),
    /// which is the case before the first tracked update of a record.
    pub fn decode_field(value: Option<&Value>) -> Result<Option<Vec<usize>>, MalformedChangeSet> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Self::decode(text).map(Some),
            Some(other) => Err(MalformedChangeSet {
                input: other.to_string(),
                reason: "expected a text value".to_string(),
            }),
        }
    }
}
