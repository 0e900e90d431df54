//! Error types produced while collecting and loading overrides.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::{OverrideError, OverrideResult};
