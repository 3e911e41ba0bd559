//! Random forest of CART trees with Gini impurity

use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use crate::{CascadeError, Result};
use super::{Classifier, check_training_data, check_width};

/// Forest hyperparameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees
    pub n_estimators: usize,
    /// Seed for bootstrap and feature sampling
    pub seed: u64,
    /// Features tried per split; `None` means `sqrt(n_features)`
    pub max_features: Option<usize>,
    /// Optional depth limit
    pub max_depth: Option<usize>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        ForestConfig {
            n_estimators: 200,
            seed: 42,
            max_features: None,
            max_depth: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        /// Fraction of class 1 among the samples that reached this leaf
        prob: f64,
    },
}

impl TreeNode {
    fn predict(&self, row: ArrayView1<f64>) -> f64 {
        let mut node = self;
        loop {
            match node {
                TreeNode::Split { feature, threshold, left, right } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
                TreeNode::Leaf { prob } => return *prob,
            }
        }
    }
}

fn gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}

/// Best split of one feature as `(threshold, weighted child impurity)`
fn best_threshold(x: &Array2<f64>, y: &[u8], samples: &[usize], feature: usize) -> Option<(f64, f64)> {
    let mut sorted: Vec<(f64, u8)> = samples.iter()
        .map(|&i| (x[[i, feature]], y[i]))
        .collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let total = sorted.len();
    if total < 2 {
        return None;
    }
    let total_pos = sorted.iter().filter(|(_, label)| *label == 1).count();
    let mut left_pos = 0;
    let mut best: Option<(f64, f64)> = None;

    for i in 0..total - 1 {
        left_pos += usize::from(sorted[i].1);
        if sorted[i].0 == sorted[i + 1].0 {
            continue;
        }

        let n_left = i + 1;
        let n_right = total - n_left;
        let weighted = (n_left as f64 * gini(left_pos, n_left)
            + n_right as f64 * gini(total_pos - left_pos, n_right))
            / total as f64;

        if best.map_or(true, |(_, b)| weighted < b) {
            best = Some(((sorted[i].0 + sorted[i + 1].0) / 2.0, weighted));
        }
    }

    best
}

struct TreeBuilder<'a> {
    x: &'a Array2<f64>,
    y: &'a [u8],
    max_features: usize,
    max_depth: Option<usize>,
    importances: Vec<f64>,
    rng: StdRng,
}

impl<'a> TreeBuilder<'a> {
    fn build(&mut self, samples: &[usize], depth: usize) -> TreeNode {
        let total = samples.len();
        let positives = samples.iter().filter(|&&i| self.y[i] == 1).count();
        let leaf = TreeNode::Leaf { prob: positives as f64 / total as f64 };

        let pure = positives == 0 || positives == total;
        let depth_reached = self.max_depth.map_or(false, |max| depth >= max);
        if pure || total < 2 || depth_reached {
            return leaf;
        }

        let impurity = gini(positives, total);
        let n_features = self.x.ncols();
        // random feature order; keep looking past max_features until a split is found
        let order = rand::seq::index::sample(&mut self.rng, n_features, n_features);

        let mut best: Option<(usize, f64, f64)> = None;
        for (tried, feature) in order.iter().enumerate() {
            if tried >= self.max_features && best.is_some() {
                break;
            }
            if let Some((threshold, weighted)) = best_threshold(self.x, self.y, samples, feature) {
                if weighted < impurity && best.map_or(true, |(_, _, b)| weighted < b) {
                    best = Some((feature, threshold, weighted));
                }
            }
        }

        let Some((feature, threshold, weighted)) = best else {
            return leaf;
        };

        // mean decrease in impurity, weighted by node size
        self.importances[feature] += total as f64 * (impurity - weighted);

        let (left, right): (Vec<usize>, Vec<usize>) = samples.iter()
            .partition(|&&i| self.x[[i, feature]] <= threshold);

        TreeNode::Split {
            feature,
            threshold,
            left: Box::new(self.build(&left, depth + 1)),
            right: Box::new(self.build(&right, depth + 1)),
        }
    }
}

/// Bagged ensemble of decision trees
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RandomForest {
    /// Hyperparameters
    pub config: ForestConfig,
    trees: Vec<TreeNode>,
    importances: Vec<f64>,
    n_features: usize,
}

impl RandomForest {
    /// Create an unfitted forest
    pub fn new(config: ForestConfig) -> Self {
        RandomForest {
            config,
            trees: Vec::new(),
            importances: Vec::new(),
            n_features: 0,
        }
    }

    /// Normalised mean decrease in impurity per feature
    ///
    /// All zeros when no tree found a split.
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }

    /// Number of fitted trees
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    fn fit_tree(&self, x: &Array2<f64>, y: &[u8], seed: u64) -> (TreeNode, Vec<f64>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = x.nrows();
        let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();

        let n_features = x.ncols();
        let max_features = self.config.max_features
            .unwrap_or_else(|| (n_features as f64).sqrt() as usize)
            .clamp(1, n_features.max(1));

        let mut builder = TreeBuilder {
            x,
            y,
            max_features: max_features.min(n_features),
            max_depth: self.config.max_depth,
            importances: vec![0.0; n_features],
            rng,
        };
        let root = builder.build(&bootstrap, 0);

        let total: f64 = builder.importances.iter().sum();
        if total > 0.0 {
            builder.importances.iter_mut().for_each(|v| *v /= total);
        }
        (root, builder.importances)
    }
}

impl Classifier for RandomForest {
    fn fit(&mut self, x: &Array2<f64>, y: &[u8]) -> Result<()> {
        check_training_data(x, y)?;
        if self.config.n_estimators == 0 {
            return Err(CascadeError::Model("forest needs at least one tree".to_string()));
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let seeds: Vec<u64> = (0..self.config.n_estimators).map(|_| rng.gen()).collect();

        let fitted: Vec<(TreeNode, Vec<f64>)> = seeds.par_iter()
            .map(|&seed| self.fit_tree(x, y, seed))
            .collect();

        let n_features = x.ncols();
        let mut importances = vec![0.0; n_features];
        for (_, tree_importances) in &fitted {
            for (total, value) in importances.iter_mut().zip(tree_importances) {
                *total += value;
            }
        }
        let sum: f64 = importances.iter().sum();
        if sum > 0.0 {
            importances.iter_mut().for_each(|v| *v /= sum);
        }

        self.trees = fitted.into_iter().map(|(tree, _)| tree).collect();
        self.importances = importances;
        self.n_features = n_features;
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if self.trees.is_empty() {
            return Err(CascadeError::Model("random forest used before fit".to_string()));
        }
        check_width(x, self.n_features)?;

        let n_trees = self.trees.len() as f64;
        Ok(x.rows()
            .into_iter()
            .map(|row| self.trees.iter().map(|tree| tree.predict(row)).sum::<f64>() / n_trees)
            .collect())
    }
}
