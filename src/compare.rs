//! Differ
//!
//! Structural difference between a baseline and the current snapshot. Pure and total.

use crate::types::{ComponentKey, Snapshot};
use serde::Serialize;

/// Outcome of comparing two snapshots. Each list is sorted by key and the three lists
/// are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompareResult {
    pub modified: Vec<ComponentKey>,
    pub added: Vec<ComponentKey>,
    pub removed: Vec<ComponentKey>,
}

impl CompareResult {
    pub fn is_clean(&self) -> bool {
        self.modified.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compare `baseline` against `current`.
pub fn compare(baseline: &Snapshot, current: &Snapshot) -> CompareResult {
    let mut result = CompareResult::default();

    for (key, recorded) in baseline.iter() {
        match current.get(key) {
            None => result.removed.push(key.clone()),
            Some(now) if now != recorded => result.modified.push(key.clone()),
            Some(_) => {}
        }
    }

    result.added = current
        .keys()
        .filter(|key| !baseline.contains_key(key))
        .cloned()
        .collect();

    result
}
