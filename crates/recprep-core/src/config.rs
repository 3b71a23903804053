//! Pipeline configuration.
//!
//! All tunables of the preprocessing run live here. The defaults reproduce the
//! fixed behavior of the pipeline; a JSON file can override any subset of them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default interaction file name.
pub const TRANSACTIONS_FILE: &str = "consumer_transactions.csv";
/// Default content file name.
pub const CONTENT_FILE: &str = "platform_content.csv";
/// Default user-item matrix output name.
pub const USER_ITEM_MATRIX_FILE: &str = "user_item_matrix.csv";
/// Default content features output name.
pub const CONTENT_FEATURES_FILE: &str = "content_features.csv";
/// Default merged table output name.
pub const MERGED_DATA_FILE: &str = "merged_data.csv";

/// How duplicate (consumer, item) ratings collapse into one matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Keep the strongest interaction
    #[default]
    Max,
    /// Average all ratings for the pair
    Mean,
    /// Keep the rating that appears last in the joined data
    Last,
}

/// How the vocabulary is ranked when it exceeds `max_features`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureRanking {
    /// Number of documents containing the term
    #[default]
    DocumentFrequency,
    /// Total occurrences of the term across the corpus
    TermFrequency,
}

/// Semantic parameters of a preprocessing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Interaction type -> rating
    pub interaction_weights: BTreeMap<String, u8>,
    /// Content language kept for the join
    pub language: String,
    /// Status value marking content as still published
    pub active_status: String,
    /// Column of the content file holding the status value
    pub content_status_column: String,
    /// Vocabulary cap for content features
    pub max_features: usize,
    /// Vocabulary ranking used to apply the cap
    pub feature_ranking: FeatureRanking,
    /// Drop English stop words before counting terms
    pub remove_stop_words: bool,
    /// Collision rule for the user-item pivot
    pub aggregation: Aggregation,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let interaction_weights = [
            ("content_followed", 5),
            ("content_commented_on", 4),
            ("content_liked", 3),
            ("content_saved", 2),
            ("content_watched", 1),
        ]
        .into_iter()
        .map(|(kind, weight)| (kind.to_string(), weight))
        .collect();

        Self {
            interaction_weights,
            language: "English".to_string(),
            active_status: "content_present".to_string(),
            content_status_column: "interaction_type".to_string(),
            max_features: 5000,
            feature_ranking: FeatureRanking::DocumentFrequency,
            remove_stop_words: true,
            aggregation: Aggregation::Max,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<()> {
        if self.interaction_weights.is_empty() {
            return Err(Error::InvalidConfig(
                "interaction_weights must not be empty".into(),
            ));
        }
        if let Some((kind, _)) = self.interaction_weights.iter().find(|(_, &w)| w == 0) {
            return Err(Error::InvalidConfig(format!(
                "weight for '{}' must be positive; zero is the matrix fill value",
                kind
            )));
        }
        if self.max_features == 0 {
            return Err(Error::InvalidConfig("max_features must be at least 1".into()));
        }
        if self.content_status_column.is_empty() {
            return Err(Error::InvalidConfig(
                "content_status_column must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Rating for an interaction type, if it is weighted.
    pub fn rating_for(&self, interaction_type: &str) -> Option<u8> {
        self.interaction_weights.get(interaction_type).copied()
    }
}

/// Locations of the two inputs and three outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetPaths {
    pub transactions: PathBuf,
    pub content: PathBuf,
    pub user_item_matrix: PathBuf,
    pub content_features: PathBuf,
    pub merged_data: PathBuf,
}

impl DatasetPaths {
    /// Standard file names under the given input and output directories.
    pub fn in_dirs(input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();
        Self {
            transactions: input_dir.join(TRANSACTIONS_FILE),
            content: input_dir.join(CONTENT_FILE),
            user_item_matrix: output_dir.join(USER_ITEM_MATRIX_FILE),
            content_features: output_dir.join(CONTENT_FEATURES_FILE),
            merged_data: output_dir.join(MERGED_DATA_FILE),
        }
    }
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self::in_dirs(".", ".")
    }
}
