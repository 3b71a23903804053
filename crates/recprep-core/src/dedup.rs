//! Exact-duplicate removal for merged rows.

use std::collections::HashSet;

use tracing::info;

use crate::types::MergedTable;

/// Remove rows identical in every column, keeping the first occurrence.
///
/// Surviving rows keep their relative order and are renumbered from 0 by
/// their position. Returns the number of rows removed.
pub fn drop_duplicates(merged: &mut MergedTable) -> usize {
    let before = merged.records.len();
    let mut seen = HashSet::with_capacity(before);
    merged.records.retain(|record| seen.insert(record.clone()));

    let removed = before - merged.records.len();
    info!("Removed {} duplicate rows, {} remain", removed, merged.records.len());
    removed
}
