//! Value trees carried by override contributions.
//!
//! A [`ValueTree`] is either a leaf (a [`Scalar`] or an atomic sequence) or a
//! nested [`ValueMap`]. Only mappings take part in recursive merging; scalars
//! and sequences are always replaced or kept as a whole.
//!
//! Trees are usually built from loose JSON:
//!
//! ```rust
//! use config_overrides::{Scalar, ValueTree};
//! use serde_json::json;
//!
//! let tree = ValueTree::from(json!({"page": {"front": "/node"}, "tags": [1, 2]}));
//! let map = tree.as_map().expect("object roots become mappings");
//! assert!(map["page"].is_map());
//! assert_eq!(map["tags"].kind(), config_overrides::ValueKind::Sequence);
//! assert_eq!(ValueTree::from("x"), ValueTree::Scalar(Scalar::String("x".into())));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as JsonValue};

use crate::{OverrideError, OverrideResult};

#[cfg(feature = "toml")]
mod toml_convert;

/// Keyed children of a [`ValueTree::Node`].
pub type ValueMap = BTreeMap<String, ValueTree>;

/// Leaf values of a tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Explicit absence of a value.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integer or floating point number.
    Number(Number),
    /// UTF-8 string.
    String(String),
}

/// Recursively nested override data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueTree {
    /// A leaf value.
    Scalar(Scalar),
    /// An ordered list, merged as a single unit.
    Sequence(Vec<ValueTree>),
    /// A nested mapping, merged key by key.
    Node(ValueMap),
}

/// Structural category of a [`ValueTree`], used in diagnostics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueKind {
    /// A [`Scalar`] leaf.
    Scalar,
    /// A [`ValueTree::Sequence`].
    Sequence,
    /// A [`ValueTree::Node`].
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::Sequence => "sequence",
            Self::Map => "mapping",
        })
    }
}

impl ValueTree {
    /// Returns the structural category of this tree.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Node(_) => ValueKind::Map,
        }
    }

    /// Whether this tree is a nested mapping.
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Node(_))
    }

    /// Borrows the nested mapping, if any.
    #[must_use]
    pub const fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Node(map) => Some(map),
            _ => None,
        }
    }

    /// Borrows the scalar leaf, if any.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Consumes the tree, returning the nested mapping if it is one.
    #[must_use]
    pub fn into_map(self) -> Option<ValueMap> {
        match self {
            Self::Node(map) => Some(map),
            _ => None,
        }
    }

    /// Follows a dotted key path such as `page.front` through nested mappings.
    ///
    /// ```rust
    /// use config_overrides::ValueTree;
    /// use serde_json::json;
    ///
    /// let tree = ValueTree::from(json!({"page": {"front": "/node"}}));
    /// assert_eq!(tree.pointer("page.front"), Some(&ValueTree::from("/node")));
    /// assert!(tree.pointer("page.missing").is_none());
    /// ```
    #[must_use]
    pub fn pointer(&self, path: &str) -> Option<&Self> {
        path.split('.')
            .try_fold(self, |node, key| node.as_map().and_then(|map| map.get(key)))
    }

    /// Converts the tree into a [`serde_json::Value`].
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Scalar(Scalar::Null) => JsonValue::Null,
            Self::Scalar(Scalar::Bool(flag)) => JsonValue::Bool(*flag),
            Self::Scalar(Scalar::Number(number)) => JsonValue::Number(number.clone()),
            Self::Scalar(Scalar::String(text)) => JsonValue::String(text.clone()),
            Self::Sequence(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            Self::Node(map) => JsonValue::Object(map_to_json(map)),
        }
    }
}

impl From<JsonValue> for ValueTree {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Scalar(Scalar::Null),
            JsonValue::Bool(flag) => Self::Scalar(Scalar::Bool(flag)),
            JsonValue::Number(number) => Self::Scalar(Scalar::Number(number)),
            JsonValue::String(text) => Self::Scalar(Scalar::String(text)),
            JsonValue::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(map) => Self::Node(
                map.into_iter()
                    .map(|(key, child)| (key, Self::from(child)))
                    .collect(),
            ),
        }
    }
}

impl From<Scalar> for ValueTree {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<ValueMap> for ValueTree {
    fn from(map: ValueMap) -> Self {
        Self::Node(map)
    }
}

impl From<&str> for ValueTree {
    fn from(text: &str) -> Self {
        Self::Scalar(Scalar::String(text.to_owned()))
    }
}

impl From<String> for ValueTree {
    fn from(text: String) -> Self {
        Self::Scalar(Scalar::String(text))
    }
}

impl From<bool> for ValueTree {
    fn from(flag: bool) -> Self {
        Self::Scalar(Scalar::Bool(flag))
    }
}

impl From<i64> for ValueTree {
    fn from(number: i64) -> Self {
        Self::Scalar(Scalar::Number(number.into()))
    }
}

/// Converts a loose JSON document into a [`ValueMap`].
///
/// `name` identifies the configuration object the document is meant for and
/// is only used in the error.
///
/// # Errors
///
/// Returns [`OverrideError::NotAMapping`] when `value` is not a JSON object.
///
/// # Examples
///
/// ```rust
/// use config_overrides::{OverrideError, map_from_json};
/// use serde_json::json;
///
/// let map = map_from_json("system.site", json!({"name": "Site"}))?;
/// assert_eq!(map.len(), 1);
///
/// let err = map_from_json("system.site", json!(["not", "a", "map"])).unwrap_err();
/// assert!(matches!(err, OverrideError::NotAMapping { .. }));
/// # Ok::<_, OverrideError>(())
/// ```
pub fn map_from_json(name: &str, value: JsonValue) -> OverrideResult<ValueMap> {
    let tree = ValueTree::from(value);
    let found = tree.kind();
    tree.into_map().ok_or_else(|| OverrideError::NotAMapping {
        name: name.to_owned(),
        found,
    })
}

/// Converts a [`ValueMap`] into a JSON object map.
#[must_use]
pub fn map_to_json(map: &ValueMap) -> Map<String, JsonValue> {
    map.iter()
        .map(|(key, child)| (key.clone(), child.to_json()))
        .collect()
}
