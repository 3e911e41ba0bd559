//! Per-k experiment: prefixes, features, labels, models, report

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use serde::{Serialize, Deserialize};
use tracing::{debug, info, warn};
use crate::cascade::{Cascade, CascadeId, generate_prefix_cascades};
use crate::features::{FeatureMatrix, extract_batch};
use crate::models::{ModelScores, top_importances};
use crate::Result;
use super::{ExperimentConfig, construct_labels, label_distribution, split_by_cascade, train_models, evaluate_models};

/// Scores and feature ranking for one prefix length
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Prefix length
    pub k: usize,
    /// Number of prefixes built
    pub num_prefixes: usize,
    /// Count of each label value
    pub label_distribution: BTreeMap<u8, usize>,
    /// Test scores per model name
    pub scores: BTreeMap<String, ModelScores>,
    /// Most important random forest features, highest first
    pub importances: Vec<(String, f64)>,
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Results for k={} ===", self.k)?;
        writeln!(f, "Number of prefix cascades: {}", self.num_prefixes)?;
        writeln!(f, "Label distribution: {:?}", self.label_distribution)?;
        for (model, scores) in &self.scores {
            writeln!(
                f,
                "{} accuracy: {:.3}, F1: {:.3}, AUC: {:.3}",
                model, scores.accuracy, scores.f1, scores.auc
            )?;
        }
        if !self.importances.is_empty() {
            writeln!(f, "Top feature importances from random forest:")?;
            for (name, score) in &self.importances {
                writeln!(f, "  {:20} {:.4}", name, score)?;
            }
        }
        Ok(())
    }
}

/// Why a prefix length produced no report
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No cascade has at least k events
    NoPrefixes,
    /// Every prefix carries the same label
    SingleClass {
        /// Count of each label value
        distribution: BTreeMap<u8, usize>,
    },
    /// The split left one side without cascades
    EmptySplit {
        /// Training cascades
        train: usize,
        /// Test cascades
        test: usize,
    },
}

/// Result of running one prefix length
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Models were trained and scored
    Report(EvaluationReport),
    /// Nothing to train on at this k
    Skipped {
        /// Prefix length
        k: usize,
        /// Cause
        reason: SkipReason,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Report(report) => write!(f, "{}", report),
            Outcome::Skipped { k, reason } => match reason {
                SkipReason::NoPrefixes => {
                    writeln!(f, "k={}: no cascades have at least {} retweets. Skipping.", k, k)
                }
                SkipReason::SingleClass { distribution } => {
                    writeln!(f, "k={}: only one class present ({:?}). Skipping model training.", k, distribution)
                }
                SkipReason::EmptySplit { train, test } => {
                    writeln!(f, "k={}: split left {} train and {} test cascades. Skipping.", k, train, test)
                }
            },
        }
    }
}

/// Final event count of every cascade
pub fn full_sizes(cascades: &[Cascade]) -> HashMap<CascadeId, usize> {
    cascades.iter().map(|c| (c.id, c.n_events())).collect()
}

/// Build prefixes of length `k`, train both models and score them
///
/// Insufficient data is reported as [`Outcome::Skipped`], never as an error.
pub fn run_for_k(
    cascades: &mut [Cascade],
    full_sizes: &HashMap<CascadeId, usize>,
    k: usize,
    config: &ExperimentConfig,
) -> Result<Outcome> {
    let mut prefixes = generate_prefix_cascades(cascades, k);
    if prefixes.is_empty() {
        warn!(k, "no cascade reaches the prefix length");
        return Ok(Outcome::Skipped { k, reason: SkipReason::NoPrefixes });
    }

    let vectors = extract_batch(&mut prefixes);
    let matrix = FeatureMatrix::from_vectors(&vectors)?;
    let labels = construct_labels(&prefixes, full_sizes, k);
    let distribution = label_distribution(&labels);
    debug!(k, prefixes = prefixes.len(), features = matrix.num_features(), "built feature matrix");

    if distribution.len() < 2 {
        warn!(k, ?distribution, "single label class");
        return Ok(Outcome::Skipped { k, reason: SkipReason::SingleClass { distribution } });
    }

    let ids: Vec<CascadeId> = prefixes.iter().map(|p| p.id).collect();
    let split = split_by_cascade(&ids, config.test_size, config.random_state);
    if split.train.is_empty() || split.test.is_empty() {
        warn!(k, train = split.train.len(), test = split.test.len(), "empty side after split");
        return Ok(Outcome::Skipped {
            k,
            reason: SkipReason::EmptySplit { train: split.train.len(), test: split.test.len() },
        });
    }

    let (train_mask, test_mask) = split.masks(&ids);
    let x_train = matrix.select_rows(&train_mask);
    let x_test = matrix.select_rows(&test_mask);
    let y_train = select(&labels, &train_mask);
    let y_test = select(&labels, &test_mask);

    info!(k, train = y_train.len(), test = y_test.len(), "training models");
    let models = train_models(&x_train, &y_train, config)?;
    let scores = evaluate_models(&models, &x_test, &y_test)?;
    let importances = top_importances(&matrix.names, models.forest.feature_importances(), config.top_n);

    Ok(Outcome::Report(EvaluationReport {
        k,
        num_prefixes: prefixes.len(),
        label_distribution: distribution,
        scores,
        importances,
    }))
}

/// Run every configured prefix length in order
pub fn run_experiment(cascades: &mut [Cascade], config: &ExperimentConfig) -> Result<Vec<Outcome>> {
    config.validate()?;
    let sizes = full_sizes(cascades);
    config.ks.iter()
        .map(|&k| run_for_k(cascades, &sizes, k, config))
        .collect()
}

fn select(labels: &[u8], mask: &[bool]) -> Vec<u8> {
    labels.iter()
        .zip(mask)
        .filter_map(|(&label, &keep)| keep.then_some(label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cascade_of(id: CascadeId, size: usize) -> Cascade {
        let mut cascade = Cascade::new(id, 0, 0.0);
        for i in 0..size {
            let parent = if i % 3 == 0 { 0 } else { i as i64 };
            cascade.add_event(i as i64 + 1, parent, (i * (id as usize % 4 + 1)) as f64);
        }
        cascade
    }

    fn small_config(ks: Vec<usize>) -> ExperimentConfig {
        ExperimentConfig {
            ks,
            n_estimators: 10,
            max_iter: 200,
            ..ExperimentConfig::default()
        }
    }

    #[test]
    fn test_skip_without_prefixes() {
        let mut cascades = vec![cascade_of(1, 2), cascade_of(2, 3)];
        let outcomes = run_experiment(&mut cascades, &small_config(vec![5])).unwrap();
        assert_eq!(outcomes, vec![Outcome::Skipped { k: 5, reason: SkipReason::NoPrefixes }]);
    }

    #[test]
    fn test_skip_single_class() {
        let mut cascades = vec![cascade_of(1, 3), cascade_of(2, 3)];
        let outcomes = run_experiment(&mut cascades, &small_config(vec![2])).unwrap();
        match &outcomes[0] {
            Outcome::Skipped { reason: SkipReason::SingleClass { distribution }, .. } => {
                assert_eq!(distribution.get(&0), Some(&2));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_report_for_mixed_labels() {
        let mut cascades: Vec<Cascade> = (1..=20)
            .map(|id| cascade_of(id, if id % 2 == 0 { 12 } else { 4 }))
            .collect();
        let outcomes = run_experiment(&mut cascades, &small_config(vec![3])).unwrap();

        let Outcome::Report(report) = &outcomes[0] else {
            panic!("expected a report, got {:?}", outcomes[0]);
        };
        assert_eq!(report.k, 3);
        assert_eq!(report.num_prefixes, 20);
        assert_eq!(report.label_distribution.get(&1), Some(&10));
        assert!(report.scores.contains_key("logreg"));
        assert!(report.scores.contains_key("rf"));
        assert!(report.importances.len() <= 10);
        assert!(report.to_string().contains("=== Results for k=3 ==="));
    }

    #[test]
    fn test_invalid_config() {
        let mut cascades = vec![cascade_of(1, 3)];
        assert!(run_experiment(&mut cascades, &small_config(vec![])).is_err());
    }
}
