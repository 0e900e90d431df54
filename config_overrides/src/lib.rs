//! Precedence-ordered collection of configuration overrides.
//!
//! A resolution request names the configuration objects it wants overridden
//! and, optionally, the language it is resolving for. Override providers are
//! run against an [`OverrideCollector`] from highest to lowest priority; each
//! may contribute partial [`ValueTree`]s for any eligible name. The collector
//! keeps the first value written for every key and lets later contributions
//! fill the gaps, producing the patch-set a caller applies to stored
//! configuration.
//!
//! The collector never sees priorities: ordering is the caller's contract.
//! [`ProviderChain`] is available for callers without their own dispatcher.

mod collector;
mod error;
mod merge;
pub mod provider;
mod value;

pub use collector::{DropReporter, DroppedOverride, OverrideCollector, ResolvedOverrides};
pub use error::{AggregatedErrors, OverrideError, OverrideResult};
pub use merge::{KeyPath, ShapeConflict};
pub use provider::{
    FileOverrides, LanguageOverrides, OverrideProvider, ProviderChain, StaticOverrides,
    load_override_document,
};
pub use value::{Scalar, ValueKind, ValueMap, ValueTree, map_from_json, map_to_json};
