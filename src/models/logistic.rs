//! L2-regularised logistic regression

use ndarray::{Array1, Array2};
use serde::{Serialize, Deserialize};
use crate::{CascadeError, Result};
use super::{Classifier, check_training_data, check_width};

/// Logistic regression fitted by full-batch gradient descent
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Inverse regularisation strength
    pub c: f64,
    /// Gradient descent iterations
    pub max_iter: usize,
    /// Step size
    pub learning_rate: f64,
    weights: Option<Array1<f64>>,
    bias: f64,
}

impl LogisticRegression {
    /// Create an unfitted model
    pub fn new(max_iter: usize) -> Self {
        LogisticRegression {
            c: 1.0,
            max_iter,
            learning_rate: 0.1,
            weights: None,
            bias: 0.0,
        }
    }

    /// Fitted coefficients
    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.weights.as_ref()
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(1000)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, x: &Array2<f64>, y: &[u8]) -> Result<()> {
        check_training_data(x, y)?;

        let n = x.nrows() as f64;
        let targets: Array1<f64> = y.iter().map(|&label| f64::from(label)).collect();
        let mut weights = Array1::zeros(x.ncols());
        let mut bias = 0.0;

        for _ in 0..self.max_iter {
            let residual = (x.dot(&weights) + bias).mapv(sigmoid) - &targets;
            let grad_w = x.t().dot(&residual) / n + &weights / (self.c * n);
            let grad_b = residual.sum() / n;

            weights = weights - grad_w * self.learning_rate;
            bias -= grad_b * self.learning_rate;
        }

        self.weights = Some(weights);
        self.bias = bias;
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let weights = self.weights.as_ref()
            .ok_or_else(|| CascadeError::Model("logistic regression used before fit".to_string()))?;
        check_width(x, weights.len())?;
        Ok((x.dot(weights) + self.bias).mapv(sigmoid))
    }
}
