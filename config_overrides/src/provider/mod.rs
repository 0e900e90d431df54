//! Override providers and the ordered chain that drives them.
//!
//! A provider contributes partial overrides to an [`OverrideCollector`]. The
//! collector keeps the first value written for every key, so providers must
//! run from highest to lowest priority. [`ProviderChain`] does exactly that
//! and nothing more: it is a convenience for callers without their own
//! dispatcher.
//!
//! ```rust
//! use config_overrides::{LanguageOverrides, ProviderChain, StaticOverrides, map_from_json};
//! use serde_json::json;
//! use unic_langid::langid;
//!
//! let settings = StaticOverrides::new("settings")
//!     .with_priority(5)
//!     .with_override("system.site", map_from_json("system.site", json!({"name": "Site", "slogan": "Hi"}))?);
//! let language = LanguageOverrides::new("language")
//!     .with_priority(10)
//!     .with_override(langid!("fr"), "system.site", map_from_json("system.site", json!({"name": "Site FR"}))?);
//!
//! let chain = ProviderChain::new().with(settings).with(language);
//! let resolved = chain.resolve(["system.site"], Some(langid!("fr")))?;
//! assert_eq!(resolved.to_json(), json!({"system.site": {"name": "Site FR", "slogan": "Hi"}}));
//! # Ok::<_, config_overrides::OverrideError>(())
//! ```

use std::cmp::Reverse;
use std::fmt;

use camino::Utf8Path;
use unic_langid::LanguageIdentifier;

use crate::{OverrideCollector, OverrideError, OverrideResult, ResolvedOverrides};

mod document;
mod language;
mod static_overrides;

pub use document::{FileOverrides, load_override_document};
pub use language::LanguageOverrides;
pub use static_overrides::StaticOverrides;

/// Source of partial configuration overrides.
///
/// Implementations read [`OverrideCollector::names`] and
/// [`OverrideCollector::language`] to decide what to contribute, and write
/// through [`OverrideCollector::set_override`] (or its strict variants).
pub trait OverrideProvider: Send + Sync {
    /// Identifier used in logs and errors.
    fn id(&self) -> &str;

    /// Relative priority; higher values run first and win conflicts.
    fn priority(&self) -> i32 {
        0
    }

    /// Contributes overrides to `collector`.
    ///
    /// # Errors
    ///
    /// Implementations return an [`OverrideError`] when a contribution is
    /// malformed or conflicts with a higher-priority one they refuse to
    /// yield to.
    fn provide(&self, collector: &mut OverrideCollector) -> OverrideResult<()>;
}

/// Providers run in descending priority order.
///
/// Providers sharing a priority keep the order they were added in.
#[derive(Default)]
pub struct ProviderChain {
    providers: Vec<Box<dyn OverrideProvider>>,
}

impl ProviderChain {
    /// Creates an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Loads one [`FileOverrides`] provider per document in `paths`.
    ///
    /// Every path is attempted; failures are reported together.
    ///
    /// # Errors
    ///
    /// Returns the single failure, or [`OverrideError::Aggregate`] when
    /// several documents fail to load.
    pub fn from_files<I, P>(paths: I) -> OverrideResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Utf8Path>,
    {
        let mut chain = Self::new();
        let mut errors = Vec::new();
        for path in paths {
            match load_override_document(path.as_ref()) {
                Ok(provider) => {
                    chain.push(provider);
                }
                Err(err) => errors.push(err),
            }
        }
        OverrideError::try_aggregate(errors).map_or(Ok(chain), Err)
    }

    /// Appends a provider.
    pub fn push<P: OverrideProvider + 'static>(&mut self, provider: P) -> &mut Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Appends a provider, builder style.
    #[must_use]
    pub fn with<P: OverrideProvider + 'static>(mut self, provider: P) -> Self {
        self.push(provider);
        self
    }

    /// Number of providers in the chain.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the chain holds no providers.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Providers in the order they will run.
    #[must_use]
    pub fn ordered(&self) -> Vec<&dyn OverrideProvider> {
        let mut ordered: Vec<&dyn OverrideProvider> =
            self.providers.iter().map(|provider| provider.as_ref()).collect();
        ordered.sort_by_key(|provider| Reverse(provider.priority()));
        ordered
    }

    /// Runs every provider against `collector`, highest priority first.
    ///
    /// # Errors
    ///
    /// Stops at the first failing provider and returns
    /// [`OverrideError::Provider`] naming it. Contributions made by earlier
    /// providers remain in `collector`.
    pub fn apply(&self, collector: &mut OverrideCollector) -> OverrideResult<()> {
        for provider in self.ordered() {
            tracing::debug!(
                provider = provider.id(),
                priority = provider.priority(),
                "applying override provider"
            );
            provider
                .provide(collector)
                .map_err(|err| OverrideError::provider(provider.id(), err))?;
        }
        Ok(())
    }

    /// Collects overrides for `names` in `language` from every provider.
    ///
    /// # Errors
    ///
    /// Propagates the first provider failure as [`apply`](Self::apply) does.
    pub fn resolve<I, S>(
        &self,
        names: I,
        language: Option<LanguageIdentifier>,
    ) -> OverrideResult<ResolvedOverrides>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collector = OverrideCollector::new(names, language);
        self.apply(&mut collector)?;
        Ok(collector.finish())
    }
}

impl fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.providers
                    .iter()
                    .map(|provider| (provider.id(), provider.priority())),
            )
            .finish()
    }
}
