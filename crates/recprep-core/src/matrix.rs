//! User-item rating matrix for collaborative filtering.
//!
//! The matrix is dense and zero-filled: every (consumer, item) cell without an
//! interaction holds `0.0`. Consumers and items are sorted in ascending order,
//! numerically when every id is an integer and lexically otherwise.

use std::collections::HashMap;

use ndarray::{Array2, ArrayView1};
use tracing::info;

use crate::config::Aggregation;
use crate::types::MergedTable;

/// Ratings indexed by consumer (rows) and item (columns).
#[derive(Debug, Clone)]
pub struct UserItemMatrix {
    consumer_ids: Vec<String>,
    item_ids: Vec<String>,
    values: Array2<f32>,
}

impl UserItemMatrix {
    /// Pivot merged rows into a matrix, collapsing duplicate pairs with `aggregation`.
    pub fn from_merged(merged: &MergedTable, aggregation: Aggregation) -> Self {
        let consumer_ids = sorted_ids(merged.records.iter().map(|r| r.consumer_id()));
        let item_ids = sorted_ids(merged.records.iter().map(|r| r.item_id()));

        let row_of: HashMap<&str, usize> = consumer_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        let col_of: HashMap<&str, usize> = item_ids
            .iter()
            .enumerate()
            .map(|(j, id)| (id.as_str(), j))
            .collect();

        let mut cells: HashMap<(usize, usize), CellAccumulator> = HashMap::new();
        for record in &merged.records {
            let key = (row_of[record.consumer_id()], col_of[record.item_id()]);
            cells
                .entry(key)
                .or_default()
                .push(f32::from(record.rating));
        }

        let duplicates = cells.values().filter(|c| c.count > 1).count();

        let mut values = Array2::<f32>::zeros((consumer_ids.len(), item_ids.len()));
        for ((i, j), cell) in cells {
            values[[i, j]] = cell.resolve(aggregation);
        }

        info!(
            "Built {}x{} user-item matrix ({} duplicate pairs aggregated by {:?})",
            consumer_ids.len(),
            item_ids.len(),
            duplicates,
            aggregation
        );

        Self {
            consumer_ids,
            item_ids,
            values,
        }
    }

    /// (consumers, items)
    pub fn shape(&self) -> (usize, usize) {
        (self.consumer_ids.len(), self.item_ids.len())
    }

    pub fn consumer_ids(&self) -> &[String] {
        &self.consumer_ids
    }

    pub fn item_ids(&self) -> &[String] {
        &self.item_ids
    }

    pub fn values(&self) -> &Array2<f32> {
        &self.values
    }

    /// Rating for a pair, `None` if either id is unknown.
    pub fn get(&self, consumer_id: &str, item_id: &str) -> Option<f32> {
        let i = self.consumer_ids.iter().position(|c| c == consumer_id)?;
        let j = self.item_ids.iter().position(|c| c == item_id)?;
        Some(self.values[[i, j]])
    }

    /// All ratings of one consumer, in column order.
    pub fn row(&self, consumer_id: &str) -> Option<ArrayView1<'_, f32>> {
        let i = self.consumer_ids.iter().position(|c| c == consumer_id)?;
        Some(self.values.row(i))
    }

    /// Number of non-zero cells.
    pub fn nnz(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0.0).count()
    }
}

#[derive(Debug, Default)]
struct CellAccumulator {
    max: f32,
    sum: f32,
    last: f32,
    count: u32,
}

impl CellAccumulator {
    fn push(&mut self, rating: f32) {
        self.max = if self.count == 0 { rating } else { self.max.max(rating) };
        self.sum += rating;
        self.last = rating;
        self.count += 1;
    }

    fn resolve(&self, aggregation: Aggregation) -> f32 {
        match aggregation {
            Aggregation::Max => self.max,
            Aggregation::Mean => self.sum / self.count as f32,
            Aggregation::Last => self.last,
        }
    }
}

/// Unique ids in ascending order.
pub(crate) fn sorted_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut unique: Vec<String> = ids.map(str::to_string).collect();
    unique.sort();
    unique.dedup();

    if unique.iter().all(|id| id.parse::<i64>().is_ok()) {
        unique.sort_by_key(|id| id.parse::<i64>().unwrap_or_default());
    }
    unique
}
