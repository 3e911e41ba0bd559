//! Doubling labels for prefix cascades

use std::collections::{BTreeMap, HashMap};
use crate::cascade::{Cascade, CascadeId};

/// Label every prefix by the doubling rule
///
/// A prefix of length `k` is labelled 1 when its full cascade reached at
/// least `2 * k` events. Unknown cascade ids count as size 0.
pub fn construct_labels(prefixes: &[Cascade], full_sizes: &HashMap<CascadeId, usize>, k: usize) -> Vec<u8> {
    let threshold = 2 * k;
    prefixes.iter()
        .map(|prefix| {
            let final_size = full_sizes.get(&prefix.id).copied().unwrap_or(0);
            u8::from(final_size >= threshold)
        })
        .collect()
}

/// Count of each label value, in ascending label order
pub fn label_distribution(labels: &[u8]) -> BTreeMap<u8, usize> {
    let mut counts = BTreeMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubling_rule() {
        let prefixes = vec![Cascade::new(1, 0, 0.0), Cascade::new(2, 0, 0.0), Cascade::new(3, 0, 0.0)];
        let full_sizes = HashMap::from([(1, 10), (2, 3)]);

        assert_eq!(construct_labels(&prefixes, &full_sizes, 5), vec![1, 0, 0]);
    }

    #[test]
    fn test_label_distribution() {
        let dist = label_distribution(&[1, 0, 1, 1]);
        assert_eq!(dist.get(&0), Some(&1));
        assert_eq!(dist.get(&1), Some(&3));
        assert_eq!(label_distribution(&[]).len(), 0);
    }
}
