//! Precedence-preserving merge mechanics for override trees.
//!
//! Contributions arrive highest priority first, so the tree already held by
//! the collector always wins. A later contribution may only add keys the
//! existing tree does not define yet:
//!
//! - keys present on one side only are kept as they are;
//! - two mappings under the same key are merged recursively;
//! - anything else (scalars, sequences, or a mapping meeting a non-mapping)
//!   keeps the existing value and discards the incoming one.
//!
//! The last case is reported as a [`ShapeConflict`] so callers can decide
//! whether it is acceptable.

use std::collections::btree_map::Entry;
use std::fmt;

use crate::value::{ValueKind, ValueMap, ValueTree};

/// Dotted location of a key inside an override tree.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Builds a path from its segments.
    #[must_use]
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Borrows the individual key segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// A key where the existing and incoming trees disagree on structure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShapeConflict {
    /// Location of the conflicting key.
    pub path: KeyPath,
    /// Kind of the value that was kept.
    pub existing: ValueKind,
    /// Kind of the value that was offered.
    pub incoming: ValueKind,
}

impl fmt::Display for ShapeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' holds a {} but a {} was supplied",
            self.path, self.existing, self.incoming
        )
    }
}

/// Fill `target` with the keys of `incoming` it does not already define.
///
/// Returns every shape conflict encountered; each was resolved in favour of
/// `target`.
pub(crate) fn fill_missing(target: &mut ValueMap, incoming: ValueMap) -> Vec<ShapeConflict> {
    let mut conflicts = Vec::new();
    let mut path = Vec::new();
    fill_map(target, incoming, &mut path, &mut conflicts);
    conflicts
}

/// Lists the shape conflicts [`fill_missing`] would report, without merging.
pub(crate) fn find_conflicts(target: &ValueMap, incoming: &ValueMap) -> Vec<ShapeConflict> {
    let mut conflicts = Vec::new();
    let mut path = Vec::new();
    scan_map(target, incoming, &mut path, &mut conflicts);
    conflicts
}

fn fill_map(
    target: &mut ValueMap,
    incoming: ValueMap,
    path: &mut Vec<String>,
    conflicts: &mut Vec<ShapeConflict>,
) {
    for (key, value) in incoming {
        match target.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => {
                path.push(slot.key().clone());
                fill_value(slot.get_mut(), value, path, conflicts);
                path.pop();
            }
        }
    }
}

fn fill_value(
    existing: &mut ValueTree,
    incoming: ValueTree,
    path: &mut Vec<String>,
    conflicts: &mut Vec<ShapeConflict>,
) {
    match (existing, incoming) {
        (ValueTree::Node(target), ValueTree::Node(map)) => fill_map(target, map, path, conflicts),
        (kept, discarded) => record_mismatch(kept, &discarded, path, conflicts),
    }
}

fn scan_map(
    target: &ValueMap,
    incoming: &ValueMap,
    path: &mut Vec<String>,
    conflicts: &mut Vec<ShapeConflict>,
) {
    for (key, value) in incoming {
        let Some(existing) = target.get(key) else {
            continue;
        };
        path.push(key.clone());
        match (existing, value) {
            (ValueTree::Node(inner), ValueTree::Node(map)) => scan_map(inner, map, path, conflicts),
            (kept, discarded) => record_mismatch(kept, discarded, path, conflicts),
        }
        path.pop();
    }
}

fn record_mismatch(
    kept: &ValueTree,
    discarded: &ValueTree,
    path: &[String],
    conflicts: &mut Vec<ShapeConflict>,
) {
    // Scalars and sequences are both atomic, so only map/non-map pairs clash.
    if kept.is_map() != discarded.is_map() {
        conflicts.push(ShapeConflict {
            path: KeyPath::new(path.iter().cloned()),
            existing: kept.kind(),
            incoming: discarded.kind(),
        });
    }
}
