//! # cascade-growth: early prediction of information cascade growth
//!
//! Given only the first `k` retweets of a message, predict whether the
//! cascade will at least double in size. The crate turns raw retweet logs
//! into deduplicated cascades, cuts them into `k`-prefixes, builds the
//! retweet tree of each prefix and extracts temporal and structural features
//! that feed a pair of baseline classifiers.
//!
//! ## Features
//!
//! - **Cascades**: event model, deduplication, prefix truncation
//! - **Graph**: adjacency trees and BFS-based structural metrics
//! - **Features**: temporal statistics merged with tree metrics
//! - **Models**: standard scaler, logistic regression, random forest
//! - **Core**: labels, train/test split and per-`k` experiment reports

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Cascade and event data structures
pub mod cascade;

/// Retweet trees and structural metrics
pub mod graph;

/// Feature extraction for cascade prefixes
pub mod features;

/// Baseline classifiers and evaluation metrics
pub mod models;

/// Labels, configuration and the experiment pipeline
pub mod core;

/// Dataset parsing and serialization helpers
pub mod utils;

// Re-export commonly used types
pub use crate::cascade::{Cascade, CascadeId, Event, UserId, earliest_event_by_user, generate_prefix_cascades};
pub use crate::graph::{CascadeTree, StructuralMetrics, build_tree, compute_depths, structural_metrics};
pub use crate::features::{FeatureMatrix, FeatureVector, extract_features, temporal_features};
pub use crate::core::{ExperimentConfig, construct_labels};

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum CascadeError {
    /// A dataset line could not be turned into a cascade
    #[error("Line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number in the input
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// A feature vector lacks a name present in the batch ordering
    #[error("Missing feature: {0}")]
    MissingFeature(String),

    /// Experiment configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Classifier misuse (shape mismatch, prediction before fit)
    #[error("Model error: {0}")]
    Model(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, CascadeError>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        cascade::{Cascade, Event, earliest_event_by_user, generate_prefix_cascades},
        graph::{CascadeTree, StructuralMetrics, build_tree, compute_depths, structural_metrics},
        features::{FeatureMatrix, FeatureVector, extract_features},
        core::{ExperimentConfig, construct_labels, run_for_k, Outcome},
        utils::parse_dataset,
        Result, CascadeError,
    };
}
