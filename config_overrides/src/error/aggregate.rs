//! Aggregation container for multiple `OverrideError` values.

use std::{error::Error, fmt};

use super::OverrideError;

/// Collection of [`OverrideError`]s gathered during a single load attempt.
///
/// # Examples
///
/// ```
/// use config_overrides::OverrideError;
/// let e = OverrideError::aggregate(vec![
///     OverrideError::UnsupportedFormat { path: "a.ini".into() },
///     OverrideError::UnsupportedFormat { path: "b.yaml".into() },
/// ]);
/// if let OverrideError::Aggregate(agg) = e {
///     assert_eq!(agg.len(), 2);
/// }
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<OverrideError>);

impl AggregatedErrors {
    /// Create a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<OverrideError>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> std::slice::Iter<'_, OverrideError> {
        self.0.iter()
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the aggregation is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a OverrideError;
    type IntoIter = std::slice::Iter<'a, OverrideError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = OverrideError;
    type IntoIter = std::vec::IntoIter<OverrideError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
