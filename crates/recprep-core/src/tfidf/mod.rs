//! TF-IDF content features.
//!
//! Descriptions are lowercased and split into tokens of two or more word
//! characters (alphanumeric or `_`). After optional stop-word removal the
//! vocabulary is capped at `max_features` terms and each document becomes a
//! row of smoothed TF-IDF weights:
//!
//! ```text
//! tf(t, d)  = raw count of t in d
//! idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//! w(t, d)   = tf(t, d) * idf(t), rows L2-normalized
//! ```

pub mod stop_words;

use std::collections::HashMap;

use ndarray::Array2;
use tracing::{debug, info};

use crate::config::{FeatureRanking, PipelineConfig};
use crate::types::ContentItem;

/// Vectorizer configuration.
#[derive(Debug, Clone)]
pub struct TfidfConfig {
    /// Maximum vocabulary size
    pub max_features: usize,
    /// Ranking used when the vocabulary exceeds `max_features`
    pub ranking: FeatureRanking,
    /// Drop English stop words
    pub remove_stop_words: bool,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            ranking: FeatureRanking::DocumentFrequency,
            remove_stop_words: true,
        }
    }
}

impl From<&PipelineConfig> for TfidfConfig {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            max_features: config.max_features,
            ranking: config.feature_ranking,
            remove_stop_words: config.remove_stop_words,
        }
    }
}

/// TF-IDF vectorizer over a fixed corpus.
pub struct TfidfVectorizer {
    config: TfidfConfig,
    /// Sorted vocabulary after fitting
    vocabulary: Vec<String>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Create a vectorizer with default configuration.
    pub fn new() -> Self {
        Self::with_config(TfidfConfig::default())
    }

    /// Create a vectorizer with custom configuration.
    pub fn with_config(config: TfidfConfig) -> Self {
        Self {
            config,
            vocabulary: Vec::new(),
            idf: Vec::new(),
        }
    }

    /// Fitted vocabulary, in column order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Split a document into lowercase tokens, dropping stop words when configured.
    pub fn tokenize(&self, document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        let stop = self.config.remove_stop_words.then(stop_words::english);
        lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|t| t.chars().count() >= 2)
            .filter(|t| stop.map_or(true, |stop| !stop.contains(t)))
            .map(str::to_string)
            .collect()
    }

    /// Learn the vocabulary and idf weights, then weight every document.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Array2<f64> {
        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf = HashMap::new();
                for token in self.tokenize(doc.as_ref()) {
                    *tf.entry(token).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        // term -> (document frequency, corpus frequency)
        let mut stats: HashMap<&str, (usize, usize)> = HashMap::new();
        for tf in &counts {
            for (term, &count) in tf {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += count;
            }
        }

        let mut ranked: Vec<(&str, usize)> = stats
            .iter()
            .map(|(&term, &(df, cf))| {
                let score = match self.config.ranking {
                    FeatureRanking::DocumentFrequency => df,
                    FeatureRanking::TermFrequency => cf,
                };
                (term, score)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        if ranked.len() > self.config.max_features {
            debug!(
                "Capping vocabulary at {} of {} terms",
                self.config.max_features,
                ranked.len()
            );
            ranked.truncate(self.config.max_features);
        }

        let mut vocabulary: Vec<String> = ranked.iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort();

        let n = documents.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = stats[term.as_str()].0 as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let column: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(j, t)| (t.as_str(), j))
            .collect();

        let mut matrix = Array2::<f64>::zeros((documents.len(), vocabulary.len()));
        for (i, tf) in counts.iter().enumerate() {
            for (term, &count) in tf {
                if let Some(&j) = column.get(term.as_str()) {
                    matrix[[i, j]] = count as f64 * idf[j];
                }
            }
            let mut row = matrix.row_mut(i);
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|v| v / norm);
            }
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
        matrix
    }

    /// Inverse document frequency of a fitted term.
    pub fn idf(&self, term: &str) -> Option<f64> {
        let j = self.vocabulary.binary_search_by(|t| t.as_str().cmp(term)).ok()?;
        Some(self.idf[j])
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// TF-IDF weights for every content row, indexed by item id.
#[derive(Debug, Clone)]
pub struct ContentFeatures {
    pub item_ids: Vec<String>,
    pub terms: Vec<String>,
    pub values: Array2<f64>,
}

impl ContentFeatures {
    /// Vectorize the descriptions of all given content rows.
    pub fn extract(items: &[ContentItem], config: TfidfConfig) -> Self {
        let descriptions: Vec<&str> = items.iter().map(|i| i.text_description.as_str()).collect();

        let mut vectorizer = TfidfVectorizer::with_config(config);
        let values = vectorizer.fit_transform(&descriptions);

        info!(
            "Extracted {} TF-IDF features for {} content items",
            vectorizer.vocabulary().len(),
            items.len()
        );

        Self {
            item_ids: items.iter().map(|i| i.item_id.clone()).collect(),
            terms: vectorizer.vocabulary,
            values,
        }
    }

    /// (rows, terms)
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }
}
