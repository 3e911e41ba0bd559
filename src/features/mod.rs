//! Feature extraction for cascade prefixes

mod temporal;
mod vector;

use rayon::prelude::*;
use crate::cascade::Cascade;
use crate::graph::{build_tree, structural_metrics};

pub use temporal::{TemporalFeatures, temporal_features};
pub use vector::{FeatureMatrix, FeatureVector};

/// Temporal and structural features of one prefix
///
/// Sorts the prefix, then merges the timing statistics, the tree metrics
/// and `num_nodes` (every key of the tree, disconnected stubs included).
pub fn extract_features(prefix: &mut Cascade) -> FeatureVector {
    prefix.sort_events();

    let mut features = FeatureVector::new();
    features.extend(temporal_features(prefix).named());

    let tree = build_tree(prefix);
    features.extend(structural_metrics(&tree, tree.root()).named());
    features.insert("num_nodes", tree.size() as f64);

    features
}

/// Extract features of every prefix in parallel, preserving order
pub fn extract_batch(prefixes: &mut [Cascade]) -> Vec<FeatureVector> {
    prefixes.par_iter_mut()
        .map(extract_features)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_features() {
        let mut prefix = Cascade::new(1, 0, 0.0);
        prefix.add_event(2, 1, 3.0);
        prefix.add_event(1, 0, 1.0);
        prefix.add_event(3, 0, 4.0);
        prefix.add_event(4, 77, 10.0);

        let features = extract_features(&mut prefix);
        let names: Vec<&str> = features.names().collect();
        assert_eq!(names, vec![
            "time_to_k", "mean_inter_time", "var_inter_time", "half_life_ratio",
            "speed_change", "depth", "avg_depth", "leaves", "branching_factor",
            "wiener_root_avg", "num_nodes",
        ]);

        assert_eq!(features.get("time_to_k"), Some(10.0));
        assert_eq!(features.get("depth"), Some(2.0));
        // root, 1, 2, 3 reachable; 77 and 4 form a fragment
        assert_eq!(features.get("num_nodes"), Some(6.0));
        assert_eq!(features.get("leaves"), Some(2.0));
        assert_eq!(features.get("branching_factor"), Some(1.5));
    }

    #[test]
    fn test_extract_batch_preserves_order() {
        let mut prefixes: Vec<Cascade> = (1..=5)
            .map(|i| {
                let mut c = Cascade::new(i, 0, 0.0);
                c.add_event(1, 0, i as f64);
                c
            })
            .collect();

        let batch = extract_batch(&mut prefixes);
        let times: Vec<f64> = batch.iter()
            .map(|f| f.get("time_to_k").unwrap())
            .collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
