//! Overrides that only apply to one language.

use std::collections::{BTreeMap, HashMap};

use unic_langid::LanguageIdentifier;

use super::OverrideProvider;
use crate::value::ValueMap;
use crate::{OverrideCollector, OverrideResult};

/// Contributes translated overrides matching the collector's language.
///
/// Matching is exact: overrides stored for `fr` do not apply to `fr-CA`.
/// Choosing the language is the caller's job.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LanguageOverrides {
    id: String,
    priority: i32,
    languages: HashMap<LanguageIdentifier, BTreeMap<String, ValueMap>>,
}

impl LanguageOverrides {
    /// Creates an empty provider identified by `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            priority: 0,
            languages: HashMap::new(),
        }
    }

    /// Sets the provider priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Adds `values` for `name` in `language`, builder style.
    #[must_use]
    pub fn with_override(
        mut self,
        language: LanguageIdentifier,
        name: impl Into<String>,
        values: ValueMap,
    ) -> Self {
        self.insert(language, name, values);
        self
    }

    /// Adds `values` for `name` in `language`, replacing any earlier entry.
    pub fn insert(
        &mut self,
        language: LanguageIdentifier,
        name: impl Into<String>,
        values: ValueMap,
    ) -> &mut Self {
        self.languages
            .entry(language)
            .or_default()
            .insert(name.into(), values);
        self
    }

    /// Overrides held for `name` in `language`.
    #[must_use]
    pub fn get(&self, language: &LanguageIdentifier, name: &str) -> Option<&ValueMap> {
        self.languages.get(language)?.get(name)
    }

    /// Languages with at least one override.
    pub fn languages(&self) -> impl Iterator<Item = &LanguageIdentifier> {
        self.languages.keys()
    }

    pub(crate) fn contribute_to(&self, collector: &mut OverrideCollector) {
        let Some(overrides) = collector
            .language()
            .and_then(|language| self.languages.get(language))
        else {
            return;
        };
        for (name, values) in overrides {
            collector.set_override(name, values.clone());
        }
    }
}

impl OverrideProvider for LanguageOverrides {
    fn id(&self) -> &str {
        &self.id
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn provide(&self, collector: &mut OverrideCollector) -> OverrideResult<()> {
        self.contribute_to(collector);
        Ok(())
    }
}
