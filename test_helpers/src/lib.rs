//! Test helpers shared across crates.
//!
//! This crate provides a `figment::Jail` wrapper for tests that write
//! override documents to disk, a thread-safe recorder for observing callbacks,
//! and text helpers for behavioural step arguments.

pub mod figment;
pub mod recorder;
pub mod text;
