//! Shared test fixtures for integration tests.
//!
//! This module provides value builders and a scripted provider that can be
//! imported by multiple integration test files to avoid duplication.

pub mod providers;

use config_overrides::{ValueMap, map_from_json};

/// Builds a [`ValueMap`] from a JSON object literal.
///
/// # Panics
///
/// Panics when `value` is not a JSON object.
pub fn tree(value: serde_json::Value) -> ValueMap {
    map_from_json("fixture", value).expect("fixture values must be JSON objects")
}
