//! Pipeline orchestration.
//!
//! Runs every stage in order, synchronously and in memory:
//!
//! ```text
//! load ─▶ impute ratings ─▶ filter language ─▶ join ─▶ active filter ─▶ pivot
//!   │                                                                     │
//!   └──▶ TF-IDF (all content rows)                         dedup ◀────────┘
//!                                                             │
//!                                                           write
//! ```

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::{DatasetPaths, PipelineConfig};
use crate::dedup::drop_duplicates;
use crate::error::{Error, Result};
use crate::filter::{active_item_ids, filter_language, retain_active};
use crate::impute::impute_ratings;
use crate::join::join_content;
use crate::loader::{load_content, load_interactions};
use crate::matrix::UserItemMatrix;
use crate::tfidf::{ContentFeatures, TfidfConfig};
use crate::types::{ContentItem, InteractionTable, MergedTable};
use crate::writer::{write_content_features, write_merged, write_user_item_matrix};

/// In-memory results of a run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub user_item_matrix: UserItemMatrix,
    pub content_features: ContentFeatures,
    pub merged: MergedTable,
    pub summary: RunSummary,
}

/// Row counts and shapes recorded during a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageCounts {
    pub interactions_loaded: usize,
    pub interactions_rated: usize,
    pub content_loaded: usize,
    pub content_in_language: usize,
    pub active_items: usize,
    pub joined_rows: usize,
    pub active_rows: usize,
    pub duplicates_removed: usize,
    pub merged_rows: usize,
    pub matrix_consumers: usize,
    pub matrix_items: usize,
    pub matrix_nonzero: usize,
    pub feature_rows: usize,
    pub feature_terms: usize,
}

/// Report of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub counts: StageCounts,
    /// Output files, empty when the run was not persisted
    pub outputs: Vec<PathBuf>,
}

impl RunSummary {
    /// Write the summary as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| Error::io(path, e))
    }
}

/// The preprocessing pipeline.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline after validating its configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load inputs, transform, and write all three outputs.
    #[instrument(skip(self), fields(transactions = %paths.transactions.display()))]
    pub fn run(&self, paths: &DatasetPaths) -> Result<PipelineOutput> {
        let interactions = load_interactions(&paths.transactions)?;
        let content = load_content(&paths.content, &self.config.content_status_column)?;

        let mut output = self.transform(interactions, content);

        write_user_item_matrix(&paths.user_item_matrix, &output.user_item_matrix)?;
        write_content_features(&paths.content_features, &output.content_features)?;
        write_merged(&paths.merged_data, &output.merged)?;

        output.summary.outputs = vec![
            paths.user_item_matrix.clone(),
            paths.content_features.clone(),
            paths.merged_data.clone(),
        ];
        output.summary.finished_at = Utc::now();
        Ok(output)
    }

    /// Apply every transformation stage to already-loaded tables.
    pub fn transform(&self, interactions: InteractionTable, content: Vec<ContentItem>) -> PipelineOutput {
        let started_at = Utc::now();
        let run_id = Uuid::new_v4();
        info!(%run_id, "Starting preprocessing run");

        let mut counts = StageCounts {
            interactions_loaded: interactions.len(),
            content_loaded: content.len(),
            ..Default::default()
        };

        let rated = impute_ratings(interactions, &self.config);
        counts.interactions_rated = rated.len();

        let in_language = filter_language(&content, &self.config.language);
        counts.content_in_language = in_language.len();

        let mut merged = join_content(&rated, &in_language);
        counts.joined_rows = merged.len();

        let active = active_item_ids(&in_language, &self.config.active_status);
        counts.active_items = active.len();
        retain_active(&mut merged, &active);
        counts.active_rows = merged.len();

        let user_item_matrix = UserItemMatrix::from_merged(&merged, self.config.aggregation);
        let (consumers, items) = user_item_matrix.shape();
        counts.matrix_consumers = consumers;
        counts.matrix_items = items;
        counts.matrix_nonzero = user_item_matrix.nnz();

        // Features cover every content row, not only the language subset
        let content_features = ContentFeatures::extract(&content, TfidfConfig::from(&self.config));
        let (rows, terms) = content_features.shape();
        counts.feature_rows = rows;
        counts.feature_terms = terms;

        counts.duplicates_removed = drop_duplicates(&mut merged);
        counts.merged_rows = merged.len();

        info!(%run_id, merged_rows = counts.merged_rows, "Preprocessing complete");

        PipelineOutput {
            user_item_matrix,
            content_features,
            merged,
            summary: RunSummary {
                run_id,
                started_at,
                finished_at: Utc::now(),
                counts,
                outputs: Vec::new(),
            },
        }
    }
}
