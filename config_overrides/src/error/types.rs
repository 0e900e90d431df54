//! Primary error enum for override collection flows.

use camino::Utf8PathBuf;
use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::merge::ShapeConflict;
use crate::value::ValueKind;

/// Convenience alias for results carrying an [`OverrideError`].
pub type OverrideResult<T> = Result<T, OverrideError>;

/// Errors that can occur while collecting or loading overrides.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OverrideError {
    /// A contribution's root value was not a mapping.
    #[error("override for '{name}' must be a mapping, found a {found}")]
    NotAMapping {
        /// Configuration object the contribution targeted.
        name: String,
        /// Kind of the rejected root value.
        found: ValueKind,
    },

    /// A contribution disagreed in structure with the existing override.
    #[error("conflicting override shapes for '{name}': {}", join_conflicts(.conflicts))]
    ShapeConflict {
        /// Configuration object the contribution targeted.
        name: String,
        /// Every conflicting key found in the contribution.
        conflicts: Vec<ShapeConflict>,
    },

    /// A language tag could not be parsed.
    #[error("invalid language tag '{tag}': {source}")]
    InvalidLanguage {
        /// Tag as written in the source.
        tag: String,
        /// Parser failure.
        #[source]
        source: unic_langid::LanguageIdentifierError,
    },

    /// An override document could not be read.
    #[error("failed to read override document '{path}': {source}")]
    Read {
        /// Path of the offending document.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// An override document could not be parsed into overrides.
    #[error("override document error in '{path}': {source}")]
    File {
        /// Path of the offending document.
        path: Utf8PathBuf,
        /// Underlying loader failure.
        #[source]
        source: Box<figment::Error>,
    },

    /// An override document has an extension no loader understands.
    #[error("unsupported override document format: '{path}'")]
    UnsupportedFormat {
        /// Path of the offending document.
        path: Utf8PathBuf,
    },

    /// An override provider failed while contributing.
    #[error("override provider '{provider}' failed: {source}")]
    Provider {
        /// Identifier of the failing provider.
        provider: String,
        /// Failure reported by the provider.
        #[source]
        source: Box<OverrideError>,
    },

    /// Multiple errors occurred while loading providers.
    #[error("multiple override errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}

fn join_conflicts(conflicts: &[ShapeConflict]) -> String {
    conflicts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
