//! Labels, configuration and the per-k experiment pipeline

mod labels;
mod config;
mod training;
mod experiment;

pub use labels::{construct_labels, label_distribution};
pub use config::ExperimentConfig;
pub use training::{CascadeSplit, TrainedModels, split_by_cascade, train_models, evaluate_models};
pub use experiment::{EvaluationReport, Outcome, SkipReason, full_sizes, run_for_k, run_experiment};
