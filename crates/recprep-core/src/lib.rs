//! Recprep Core - Recommendation Data Preparation
//!
//! This crate turns raw interaction and content catalogs into training
//! artifacts for recommendation models:
//! - Rating imputation from interaction types
//! - Language and active-content filtering
//! - User-item rating matrix for collaborative filtering
//! - TF-IDF content features for content-based models
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Recprep Core                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐                      ┌──────────────┐         │
//! │  │ Transactions │                      │   Content    │         │
//! │  │    Loader    │                      │    Loader    │         │
//! │  └──────┬───────┘                      └──────┬───────┘         │
//! │         │                                     │                 │
//! │  ┌──────┴───────┐   ┌──────────────┐          ├────────┐        │
//! │  │    Rating    │   │   Language   │◀─────────┘        │        │
//! │  │   Imputer    │   │    Filter    │                   │        │
//! │  └──────┬───────┘   └──────┬───────┘                   │        │
//! │         └────────┬─────────┘                           │        │
//! │           ┌──────┴──────┐                       ┌──────┴─────┐  │
//! │           │ Join+Active │                       │   TF-IDF   │  │
//! │           └──────┬──────┘                       │ Vectorizer │  │
//! │         ┌────────┴────────┐                     └──────┬─────┘  │
//! │  ┌──────┴──────┐   ┌──────┴──────┐                     │        │
//! │  │  User-Item  │   │    Dedup    │                     │        │
//! │  │   Matrix    │   └──────┬──────┘                     │        │
//! │  └──────┬──────┘          │                            │        │
//! │         └─────────────────┼────────────────────────────┘        │
//! │                    ┌──────┴──────┐                              │
//! │                    │ CSV Writer  │                              │
//! │                    └─────────────┘                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod config;
pub mod types;
pub mod loader;
pub mod impute;
pub mod filter;
pub mod join;
pub mod matrix;
pub mod tfidf;
pub mod dedup;
pub mod writer;
pub mod pipeline;

pub use error::{Error, Result};
pub use config::{Aggregation, DatasetPaths, FeatureRanking, PipelineConfig};
pub use types::*;
pub use matrix::UserItemMatrix;
pub use tfidf::{ContentFeatures, TfidfConfig, TfidfVectorizer};
pub use pipeline::{Pipeline, PipelineOutput, RunSummary, StageCounts};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() {
    tracing::info!(version = VERSION, "Recprep Core initialized");
}
