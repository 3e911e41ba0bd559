//! Experiment configuration

use serde::{Serialize, Deserialize};
use crate::{CascadeError, Result};

/// Settings of one experiment run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Prefix lengths to evaluate
    pub ks: Vec<usize>,
    /// Fraction of cascades held out for testing
    pub test_size: f64,
    /// Seed for the split and the random forest
    pub random_state: u64,
    /// Trees in the random forest
    pub n_estimators: usize,
    /// Logistic regression iterations
    pub max_iter: usize,
    /// Feature importances to report
    pub top_n: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            ks: vec![5],
            test_size: 0.3,
            random_state: 42,
            n_estimators: 200,
            max_iter: 1000,
            top_n: 10,
        }
    }
}

impl ExperimentConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.ks.is_empty() {
            return Err(CascadeError::InvalidConfig("at least one k is required".to_string()));
        }

        if self.ks.contains(&0) {
            return Err(CascadeError::InvalidConfig("k must be positive".to_string()));
        }

        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(CascadeError::InvalidConfig(format!(
                "test size must lie in (0, 1), got {}", self.test_size
            )));
        }

        if self.n_estimators == 0 {
            return Err(CascadeError::InvalidConfig("random forest needs at least one tree".to_string()));
        }

        if self.max_iter == 0 {
            return Err(CascadeError::InvalidConfig("max_iter must be positive".to_string()));
        }

        Ok(())
    }
}
