//! Train/test splitting and model fitting

use std::collections::{BTreeMap, BTreeSet, HashSet};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;
use crate::cascade::CascadeId;
use crate::models::{
    Classifier, ForestConfig, LogisticRegression, ModelScores, RandomForest, StandardScaler,
    compute_scores,
};
use crate::Result;
use super::ExperimentConfig;

/// Cascade ids assigned to each side of a split
#[derive(Clone, Debug, PartialEq)]
pub struct CascadeSplit {
    /// Training cascades
    pub train: HashSet<CascadeId>,
    /// Held-out cascades
    pub test: HashSet<CascadeId>,
}

impl CascadeSplit {
    /// Row masks over `ids` for the train and test sides
    pub fn masks(&self, ids: &[CascadeId]) -> (Vec<bool>, Vec<bool>) {
        let train = ids.iter().map(|id| self.train.contains(id)).collect();
        let test = ids.iter().map(|id| self.test.contains(id)).collect();
        (train, test)
    }
}

/// Split the distinct cascade ids into train and test sets
///
/// Ids are sorted, then shuffled with a seeded RNG. The test side holds
/// `ceil(test_size * n)` cascades, so no cascade lands on both sides.
pub fn split_by_cascade(ids: &[CascadeId], test_size: f64, seed: u64) -> CascadeSplit {
    let mut unique: Vec<CascadeId> = ids.iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    unique.shuffle(&mut rng);

    let n_test = ((unique.len() as f64 * test_size).ceil() as usize).min(unique.len());
    let test = unique[..n_test].iter().copied().collect();
    let train = unique[n_test..].iter().copied().collect();

    CascadeSplit { train, test }
}

/// Fitted models of one prefix length
#[derive(Clone, Debug)]
pub struct TrainedModels {
    /// Scaler applied before the logistic regression
    pub scaler: StandardScaler,
    /// Logistic regression on scaled features
    pub logreg: LogisticRegression,
    /// Random forest on raw features
    pub forest: RandomForest,
}

/// Fit the scaler, the logistic regression and the random forest
pub fn train_models(x_train: &Array2<f64>, y_train: &[u8], config: &ExperimentConfig) -> Result<TrainedModels> {
    let mut scaler = StandardScaler::new();
    let x_scaled = scaler.fit_transform(x_train)?;

    let mut logreg = LogisticRegression::new(config.max_iter);
    logreg.fit(&x_scaled, y_train)?;
    debug!(coefficients = ?logreg.coefficients(), "fitted logistic regression");

    let mut forest = RandomForest::new(ForestConfig {
        n_estimators: config.n_estimators,
        seed: config.random_state,
        ..ForestConfig::default()
    });
    forest.fit(x_train, y_train)?;

    Ok(TrainedModels { scaler, logreg, forest })
}

/// Score every model on the test rows, keyed by model name
pub fn evaluate_models(models: &TrainedModels, x_test: &Array2<f64>, y_test: &[u8]) -> Result<BTreeMap<String, ModelScores>> {
    let mut results = BTreeMap::new();

    let x_scaled = models.scaler.transform(x_test)?;
    let probs = models.logreg.predict_proba(&x_scaled)?.to_vec();
    let preds = models.logreg.predict(&x_scaled)?;
    results.insert("logreg".to_string(), compute_scores(y_test, &preds, &probs));

    let probs = models.forest.predict_proba(x_test)?.to_vec();
    let preds = models.forest.predict(x_test)?;
    results.insert("rf".to_string(), compute_scores(y_test, &preds, &probs));

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_split_is_disjoint_and_complete() {
        let ids = vec![5, 1, 3, 3, 9, 1, 7, 2, 8, 4];
        let split = split_by_cascade(&ids, 0.3, 42);

        assert_eq!(split.test.len(), 3); // ceil(0.3 * 8) = 3
        assert_eq!(split.train.len(), 5);
        assert!(split.train.is_disjoint(&split.test));

        let (train_mask, test_mask) = split.masks(&ids);
        for (t, s) in train_mask.iter().zip(&test_mask) {
            assert!(t ^ s);
        }
    }

    #[test]
    fn test_split_is_seeded() {
        let ids: Vec<CascadeId> = (0..50).collect();
        assert_eq!(split_by_cascade(&ids, 0.3, 7), split_by_cascade(&ids, 0.3, 7));
    }

    #[test]
    fn test_train_and_evaluate() {
        let x = array![[0.0, 1.0], [1.0, 1.0], [2.0, 0.0], [8.0, 1.0], [9.0, 0.0], [10.0, 1.0]];
        let y = [0, 0, 0, 1, 1, 1];
        let config = ExperimentConfig {
            n_estimators: 20,
            ..ExperimentConfig::default()
        };

        let models = train_models(&x, &y, &config).unwrap();
        let results = evaluate_models(&models, &x, &y).unwrap();

        assert_eq!(results.keys().cloned().collect::<Vec<_>>(), vec!["logreg", "rf"]);
        assert_eq!(results["logreg"].accuracy, 1.0);
        assert_eq!(results["logreg"].auc, 1.0);
        assert!(results["rf"].accuracy >= 5.0 / 6.0);
    }
}
