//! Per-column standardisation

use ndarray::{Array1, Array2, Axis};
use serde::{Serialize, Deserialize};
use crate::{CascadeError, Result};
use super::check_width;

/// Centers columns to zero mean and scales them to unit variance
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Option<Array1<f64>>,
    scale: Option<Array1<f64>>,
}

impl StandardScaler {
    /// Create an unfitted scaler
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn column means and population standard deviations
    ///
    /// Constant columns get a scale of 1 so they map to zero.
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<()> {
        let mean = x.mean_axis(Axis(0))
            .ok_or_else(|| CascadeError::Model("cannot fit scaler on an empty sample".to_string()))?;
        let scale = x.std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 0.0 { s } else { 1.0 });

        self.mean = Some(mean);
        self.scale = Some(scale);
        Ok(())
    }

    /// Standardise `x` with the fitted statistics
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let (mean, scale) = match (&self.mean, &self.scale) {
            (Some(mean), Some(scale)) => (mean, scale),
            _ => return Err(CascadeError::Model("scaler used before fit".to_string())),
        };
        check_width(x, mean.len())?;
        Ok((x - mean) / scale)
    }

    /// Fit, then transform the same data
    pub fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }
}
