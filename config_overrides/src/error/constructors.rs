//! Constructors and aggregation helpers for `OverrideError`.

use camino::Utf8Path;

use super::{AggregatedErrors, OverrideError};

impl OverrideError {
    /// Tries to build an [`OverrideError`] from an iterator of errors.
    ///
    /// The iterator is consumed eagerly. It returns:
    /// * `None` when no errors are supplied;
    /// * the error itself when exactly one is supplied; and
    /// * [`Self::Aggregate`] combining every error for two or more inputs.
    #[must_use]
    pub fn try_aggregate<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut errors: Vec<Self> = errors.into_iter().collect();
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Aggregate(Box::new(AggregatedErrors::new(errors)))),
        }
    }

    /// Build an [`OverrideError`] from at least one error.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Use [`OverrideError::try_aggregate`] to
    /// avoid panicking when the error list may be empty.
    #[must_use]
    #[track_caller]
    pub fn aggregate<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::try_aggregate(errors).map_or_else(
            || panic!("aggregate requires at least one error"),
            |err| err,
        )
    }

    /// Construct a document error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use config_overrides::OverrideError;
    /// let e = OverrideError::file(Utf8Path::new("overrides.toml"), figment::Error::from("boom"));
    /// assert!(matches!(e, OverrideError::File { .. }));
    /// ```
    #[must_use]
    pub fn file(path: &Utf8Path, source: figment::Error) -> Self {
        Self::File {
            path: path.to_owned(),
            source: Box::new(source),
        }
    }

    /// Attribute `source` to the provider identified by `provider`.
    #[must_use]
    pub fn provider(provider: &str, source: Self) -> Self {
        Self::Provider {
            provider: provider.to_owned(),
            source: Box::new(source),
        }
    }
}
