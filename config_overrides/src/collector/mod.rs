//! Accumulation of override contributions for one resolution request.
//!
//! An [`OverrideCollector`] is created for a fixed set of configuration
//! names and an optional, already resolved language. Override providers are
//! then run against it by exclusive reference, **highest priority first**.
//! The collector never sees priorities itself: the first contribution for a
//! name is kept, and every later one may only fill keys that are still
//! missing. Callers that run providers out of order get the wrong winner.
//!
//! # Example
//!
//! ```rust
//! use config_overrides::{OverrideCollector, map_from_json};
//! use serde_json::json;
//! use unic_langid::langid;
//!
//! let mut collector = OverrideCollector::new(["system.site"], Some(langid!("fr")));
//! collector
//!     .set_override("system.site", map_from_json("system.site", json!({"name": "Site FR"}))?)
//!     .set_override("system.site", map_from_json("system.site", json!({"name": "Fallback", "slogan": "Bienvenue"}))?)
//!     .set_override("unrelated.config", map_from_json("unrelated.config", json!({"x": 1}))?);
//!
//! let resolved = collector.finish();
//! assert_eq!(
//!     resolved.to_json(),
//!     json!({"system.site": {"name": "Site FR", "slogan": "Bienvenue"}})
//! );
//! # Ok::<_, config_overrides::OverrideError>(())
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use unic_langid::LanguageIdentifier;

use crate::merge::{fill_missing, find_conflicts};
use crate::value::{ValueMap, map_from_json};
use crate::{OverrideError, OverrideResult};

mod resolved;

pub use resolved::ResolvedOverrides;

/// Details of a contribution discarded because its name was not eligible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppedOverride {
    /// Configuration name the contribution targeted.
    pub name: String,
    /// Language of the collector that rejected it.
    pub language: Option<LanguageIdentifier>,
}

/// Reporter invoked whenever a contribution is dropped.
pub type DropReporter = Arc<dyn Fn(&DroppedOverride) + Send + Sync>;

/// Collects override contributions for a fixed set of configuration names.
pub struct OverrideCollector {
    names: BTreeSet<String>,
    language: Option<LanguageIdentifier>,
    overrides: BTreeMap<String, ValueMap>,
    report_drop: Option<DropReporter>,
}

impl OverrideCollector {
    /// Creates an empty collector for `names` in `language`.
    ///
    /// Duplicate names collapse into one.
    #[must_use]
    pub fn new<I, S>(names: I, language: Option<LanguageIdentifier>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            language,
            overrides: BTreeMap::new(),
            report_drop: None,
        }
    }

    /// Installs a reporter called for every dropped contribution.
    ///
    /// Dropping stays silent for the provider; the reporter only observes.
    #[must_use]
    pub fn with_drop_reporter(mut self, reporter: DropReporter) -> Self {
        self.report_drop = Some(reporter);
        self
    }

    /// Configuration names eligible for override.
    #[must_use]
    pub const fn names(&self) -> &BTreeSet<String> {
        &self.names
    }

    /// Language the overrides are collected for.
    #[must_use]
    pub const fn language(&self) -> Option<&LanguageIdentifier> {
        self.language.as_ref()
    }

    /// Overrides accumulated so far, keyed by configuration name.
    #[must_use]
    pub const fn overrides(&self) -> &BTreeMap<String, ValueMap> {
        &self.overrides
    }

    /// Whether contributions for `name` are accepted.
    #[must_use]
    pub fn is_eligible(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Contributes `values` for `name`.
    ///
    /// Contributions for ineligible names are dropped without error. The
    /// first contribution for a name is stored as given; later ones only fill
    /// keys that are still missing, recursing through nested mappings. Where a
    /// mapping meets a scalar or sequence, the existing value is kept and the
    /// conflict is logged.
    pub fn set_override(&mut self, name: &str, values: ValueMap) -> &mut Self {
        if self.admit(name) {
            self.apply(name, values);
        }
        self
    }

    /// Contributes `values` for `name`, rejecting structural disagreements.
    ///
    /// Behaves like [`set_override`](Self::set_override) except that a shape
    /// conflict with the existing entry leaves the collector untouched.
    ///
    /// # Errors
    ///
    /// Returns [`OverrideError::ShapeConflict`] listing every conflicting key
    /// path.
    pub fn try_set_override(&mut self, name: &str, values: ValueMap) -> OverrideResult<&mut Self> {
        if !self.admit(name) {
            return Ok(self);
        }
        if let Some(existing) = self.overrides.get(name) {
            let conflicts = find_conflicts(existing, &values);
            if !conflicts.is_empty() {
                return Err(OverrideError::ShapeConflict {
                    name: name.to_owned(),
                    conflicts,
                });
            }
        }
        self.apply(name, values);
        Ok(self)
    }

    /// Contributes a loose JSON document for `name`.
    ///
    /// The document is validated before eligibility is checked, so malformed
    /// input is reported even for names that would be dropped.
    ///
    /// # Errors
    ///
    /// Returns [`OverrideError::NotAMapping`] when `values` is not a JSON
    /// object and [`OverrideError::ShapeConflict`] as
    /// [`try_set_override`](Self::try_set_override) does.
    pub fn set_override_json(
        &mut self,
        name: &str,
        values: serde_json::Value,
    ) -> OverrideResult<&mut Self> {
        let map = map_from_json(name, values)?;
        self.try_set_override(name, map)
    }

    /// Finalises collection, returning the immutable result.
    #[must_use]
    pub fn finish(self) -> ResolvedOverrides {
        ResolvedOverrides::new(self.language, self.overrides)
    }

    fn admit(&self, name: &str) -> bool {
        if self.is_eligible(name) {
            return true;
        }
        tracing::debug!(name, "dropping override for ineligible configuration name");
        if let Some(report) = &self.report_drop {
            report(&DroppedOverride {
                name: name.to_owned(),
                language: self.language.clone(),
            });
        }
        false
    }

    fn apply(&mut self, name: &str, values: ValueMap) {
        match self.overrides.get_mut(name) {
            Some(existing) => {
                for conflict in fill_missing(existing, values) {
                    tracing::warn!(name, %conflict, "kept higher-priority override value");
                }
            }
            None => {
                self.overrides.insert(name.to_owned(), values);
            }
        }
    }
}

impl fmt::Debug for OverrideCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideCollector")
            .field("names", &self.names)
            .field("language", &self.language)
            .field("overrides", &self.overrides)
            .field("report_drop", &self.report_drop.is_some())
            .finish()
    }
}
