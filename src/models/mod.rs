//! Baseline classifiers for growth prediction
//!
//! Two fixed-configuration models are trained per prefix length: a logistic
//! regression on standardised features and a random forest on raw features.

mod scaler;
mod logistic;
mod forest;
mod evaluation;

use ndarray::{Array1, Array2};
use crate::{CascadeError, Result};

pub use scaler::StandardScaler;
pub use logistic::LogisticRegression;
pub use forest::{RandomForest, ForestConfig};
pub use evaluation::{ModelScores, accuracy, auc, f1_score, compute_scores, top_importances};

/// A binary classifier over dense feature rows
pub trait Classifier {
    /// Fit on rows `x` with labels `y` in {0, 1}
    fn fit(&mut self, x: &Array2<f64>, y: &[u8]) -> Result<()>;

    /// Probability of class 1 for every row
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>>;

    /// Hard predictions at threshold 0.5
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<u8>> {
        let probs = self.predict_proba(x)?;
        Ok(probs.iter().map(|&p| u8::from(p >= 0.5)).collect())
    }
}

/// Reject empty or mismatched training data
pub(crate) fn check_training_data(x: &Array2<f64>, y: &[u8]) -> Result<()> {
    if x.nrows() == 0 {
        return Err(CascadeError::Model("cannot fit on an empty sample".to_string()));
    }
    if x.nrows() != y.len() {
        return Err(CascadeError::Model(format!(
            "{} rows but {} labels", x.nrows(), y.len()
        )));
    }
    Ok(())
}

/// Reject prediction input whose width differs from the fitted width
pub(crate) fn check_width(x: &Array2<f64>, expected: usize) -> Result<()> {
    if x.ncols() != expected {
        return Err(CascadeError::Model(format!(
            "expected {} features, got {}", expected, x.ncols()
        )));
    }
    Ok(())
}
