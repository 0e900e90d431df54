//! Immutable result of a finished collection pass.

use std::collections::BTreeMap;
use std::collections::btree_map::Iter;

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use unic_langid::LanguageIdentifier;

use crate::value::{ValueMap, ValueTree, map_to_json};

/// Final override patch-set for one set of names and one language.
///
/// Serialises as a plain mapping from configuration name to override tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedOverrides {
    language: Option<LanguageIdentifier>,
    overrides: BTreeMap<String, ValueMap>,
}

impl ResolvedOverrides {
    pub(crate) const fn new(
        language: Option<LanguageIdentifier>,
        overrides: BTreeMap<String, ValueMap>,
    ) -> Self {
        Self {
            language,
            overrides,
        }
    }

    /// Language the overrides were collected for.
    #[must_use]
    pub const fn language(&self) -> Option<&LanguageIdentifier> {
        self.language.as_ref()
    }

    /// Override tree for `name`, if any provider contributed one.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ValueMap> {
        self.overrides.get(name)
    }

    /// Follows a dotted `path` inside the override for `name`.
    ///
    /// ```rust
    /// use config_overrides::{OverrideCollector, ValueTree};
    /// use serde_json::json;
    ///
    /// let mut collector = OverrideCollector::new(["system.site"], None);
    /// collector.set_override_json("system.site", json!({"page": {"front": "/fr"}}))?;
    /// let resolved = collector.finish();
    /// assert_eq!(resolved.lookup("system.site", "page.front"), Some(&ValueTree::from("/fr")));
    /// assert!(resolved.lookup("system.site", "page.403").is_none());
    /// # Ok::<_, config_overrides::OverrideError>(())
    /// ```
    #[must_use]
    pub fn lookup(&self, name: &str, path: &str) -> Option<&ValueTree> {
        let mut segments = path.split('.');
        let first = self.get(name)?.get(segments.next()?)?;
        segments.try_fold(first, |node, key| node.as_map().and_then(|map| map.get(key)))
    }

    /// Iterates over overrides in name order.
    pub fn iter(&self) -> Iter<'_, String, ValueMap> {
        self.overrides.iter()
    }

    /// Number of configuration names with overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Whether no overrides were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Consumes the result, returning the raw override map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, ValueMap> {
        self.overrides
    }

    /// Renders the overrides as a JSON object keyed by configuration name.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.overrides
                .iter()
                .map(|(name, map)| (name.clone(), JsonValue::Object(map_to_json(map))))
                .collect(),
        )
    }
}

impl Serialize for ResolvedOverrides {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.overrides.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a ResolvedOverrides {
    type Item = (&'a String, &'a ValueMap);
    type IntoIter = Iter<'a, String, ValueMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.overrides.iter()
    }
}
