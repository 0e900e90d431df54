//! Language-independent overrides, such as those kept in a settings file.

use std::collections::BTreeMap;

use super::OverrideProvider;
use crate::value::ValueMap;
use crate::{OverrideCollector, OverrideResult};

/// Contributes the same overrides whatever the collector's language.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticOverrides {
    id: String,
    priority: i32,
    overrides: BTreeMap<String, ValueMap>,
}

impl StaticOverrides {
    /// Creates an empty provider identified by `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            priority: 0,
            overrides: BTreeMap::new(),
        }
    }

    /// Sets the provider priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Adds `values` for `name`, builder style.
    #[must_use]
    pub fn with_override(mut self, name: impl Into<String>, values: ValueMap) -> Self {
        self.insert(name, values);
        self
    }

    /// Adds `values` for `name`, replacing any earlier entry for that name.
    pub fn insert(&mut self, name: impl Into<String>, values: ValueMap) -> &mut Self {
        self.overrides.insert(name.into(), values);
        self
    }

    /// Overrides held for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ValueMap> {
        self.overrides.get(name)
    }

    /// Whether the provider holds no overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    pub(crate) fn contribute_to(&self, collector: &mut OverrideCollector) {
        for (name, values) in &self.overrides {
            collector.set_override(name, values.clone());
        }
    }
}

impl OverrideProvider for StaticOverrides {
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
