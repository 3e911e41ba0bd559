//! Classification metrics

use serde::{Serialize, Deserialize};

/// Test-set scores of one model
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelScores {
    /// Fraction of correct predictions
    pub accuracy: f64,
    /// F1 of class 1
    pub f1: f64,
    /// Area under the ROC curve
    pub auc: f64,
}

/// Fraction of matching labels; 0 for empty input
pub fn accuracy(y_true: &[u8], y_pred: &[u8]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let hits = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    hits as f64 / y_true.len() as f64
}

/// F1 score of the positive class
///
/// 0 when `y_true` holds a single class or precision and recall are both 0.
pub fn f1_score(y_true: &[u8], y_pred: &[u8]) -> f64 {
    let positives = y_true.iter().filter(|&&t| t == 1).count();
    if positives == 0 || positives == y_true.len() {
        return 0.0;
    }

    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut fn_ = 0usize;
    for (&t, &p) in y_true.iter().zip(y_pred) {
        match (t, p) {
            (1, 1) => tp += 1,
            (0, 1) => fp += 1,
            (1, 0) => fn_ += 1,
            _ => {}
        }
    }

    let denom = 2 * tp + fp + fn_;
    if denom == 0 {
        0.0
    } else {
        2.0 * tp as f64 / denom as f64
    }
}

/// ROC AUC via the rank-sum statistic, ties sharing their mean rank
///
/// 0 when either class is missing.
pub fn auc(y_true: &[u8], scores: &[f64]) -> f64 {
    let n_pos = y_true.iter().filter(|&&t| t == 1).count();
    let n_neg = y_true.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return 0.0;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut ranks = vec![0.0; scores.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        // 1-based ranks i+1 ..= j+1 share their mean
        let mean_rank = (i + j + 2) as f64 / 2.0;
        for &idx in &order[i..=j] {
            ranks[idx] = mean_rank;
        }
        i = j + 1;
    }

    let pos_rank_sum: f64 = y_true.iter()
        .zip(&ranks)
        .filter(|(t, _)| **t == 1)
        .map(|(_, r)| *r)
        .sum();

    let n_pos = n_pos as f64;
    (pos_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg as f64)
}

/// Accuracy, F1 and AUC in one go
pub fn compute_scores(y_true: &[u8], y_pred: &[u8], y_prob: &[f64]) -> ModelScores {
    ModelScores {
        accuracy: accuracy(y_true, y_pred),
        f1: f1_score(y_true, y_pred),
        auc: auc(y_true, y_prob),
    }
}

/// The `top_n` most important features, highest first
pub fn top_importances(names: &[String], importances: &[f64], top_n: usize) -> Vec<(String, f64)> {
    let mut pairs: Vec<(String, f64)> = names.iter()
        .cloned()
        .zip(importances.iter().copied())
        .collect();
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
    pairs.truncate(top_n);
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_and_f1() {
        let y_true = [1, 0, 1, 1, 0];
        let y_pred = [1, 0, 0, 1, 1];

        assert_eq!(accuracy(&y_true, &y_pred), 0.6);
        // tp=2 fp=1 fn=1
        assert!((f1_score(&y_true, &y_pred) - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_class_fallbacks() {
        assert_eq!(f1_score(&[1, 1], &[1, 1]), 0.0);
        assert_eq!(auc(&[0, 0, 0], &[0.1, 0.2, 0.3]), 0.0);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn test_auc() {
        assert_eq!(auc(&[0, 0, 1, 1], &[0.1, 0.2, 0.8, 0.9]), 1.0);
        assert_eq!(auc(&[1, 1, 0, 0], &[0.1, 0.2, 0.8, 0.9]), 0.0);
        assert_eq!(auc(&[0, 1], &[0.5, 0.5]), 0.5);
        assert_eq!(auc(&[0, 0, 1, 1], &[0.1, 0.4, 0.35, 0.8]), 0.75);
    }

    #[test]
    fn test_top_importances() {
        let names: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let top = top_importances(&names, &[0.2, 0.5, 0.3], 2);
        assert_eq!(top, vec![("b".to_string(), 0.5), ("c".to_string(), 0.3)]);
    }
}
