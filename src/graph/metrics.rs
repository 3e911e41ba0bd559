//! Structural metrics of cascade trees

use std::collections::{HashMap, VecDeque};
use serde::{Serialize, Deserialize};
use crate::cascade::UserId;
use super::CascadeTree;

/// Depth marker for nodes not reachable from the root
pub const UNREACHABLE: i64 = -1;

/// Shape statistics of the part of a tree reachable from its root
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructuralMetrics {
    /// Maximum depth
    pub depth: f64,
    /// Mean depth of reachable nodes
    pub avg_depth: f64,
    /// Reachable nodes without children
    pub leaves: f64,
    /// Mean child count of reachable nodes that have children
    pub branching_factor: f64,
    /// Mean distance from the root
    pub wiener_root_avg: f64,
}

impl StructuralMetrics {
    /// Metrics of a missing or empty tree: the root alone counts as a leaf
    pub fn no_tree() -> Self {
        StructuralMetrics {
            depth: 0.0,
            avg_depth: 0.0,
            leaves: 1.0,
            branching_factor: 0.0,
            wiener_root_avg: 0.0,
        }
    }

    /// Named values, in feature order
    pub fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("depth", self.depth),
            ("avg_depth", self.avg_depth),
            ("leaves", self.leaves),
            ("branching_factor", self.branching_factor),
            ("wiener_root_avg", self.wiener_root_avg),
        ]
    }
}

/// Breadth-first depths from `root`
///
/// Every node of the mapping is present in the result; nodes the search
/// does not reach keep [`UNREACHABLE`]. A node found again at a smaller
/// depth is relaxed and re-queued, so depths stay shortest-path even when
/// a user hangs under several parents.
pub fn compute_depths(tree: &CascadeTree, root: UserId) -> HashMap<UserId, i64> {
    let mut depths: HashMap<UserId, i64> = tree.nodes()
        .map(|node| (node, UNREACHABLE))
        .collect();

    if !tree.contains(root) {
        return depths;
    }

    depths.insert(root, 0);
    let mut queue = VecDeque::new();
    queue.push_back(root);

    while let Some(current) = queue.pop_front() {
        let next = depths[&current] + 1;
        for child in tree.children(current) {
            let known = depths.get(&child).copied().unwrap_or(UNREACHABLE);
            if known == UNREACHABLE || known > next {
                depths.insert(child, next);
                queue.push_back(child);
            }
        }
    }

    depths
}

/// Depth, leaf and branching statistics of the tree under `root`
pub fn structural_metrics(tree: &CascadeTree, root: UserId) -> StructuralMetrics {
    if !tree.contains(root) {
        return StructuralMetrics::no_tree();
    }

    let depths = compute_depths(tree, root);
    let reachable: Vec<(UserId, i64)> = depths.into_iter()
        .filter(|&(_, d)| d >= 0)
        .collect();

    if reachable.is_empty() {
        return StructuralMetrics::no_tree();
    }

    let n = reachable.len() as f64;
    let max_depth = reachable.iter().map(|&(_, d)| d).max().unwrap_or(0);
    let depth_sum: i64 = reachable.iter().map(|&(_, d)| d).sum();

    let mut leaves = 0usize;
    let mut parents = 0usize;
    let mut child_total = 0usize;
    for &(node, _) in &reachable {
        let degree = tree.node_degree(node);
        if degree == 0 {
            leaves += 1;
        } else {
            parents += 1;
            child_total += degree;
        }
    }

    let branching_factor = if parents > 0 {
        child_total as f64 / parents as f64
    } else {
        0.0
    };

    // avg_depth and wiener_root_avg coincide; both are reported
    let avg_depth = depth_sum as f64 / n;
    let wiener_root_avg = depth_sum as f64 / n;

    StructuralMetrics {
        depth: max_depth as f64,
        avg_depth,
        leaves: leaves as f64,
        branching_factor,
        wiener_root_avg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use proptest::prelude::*;

    fn chain() -> CascadeTree {
        let mut tree = CascadeTree::new(0);
        tree.add_edge(0, 1);
        tree.add_edge(1, 2);
        tree
    }

    #[test]
    fn test_depths_chain() {
        let depths = compute_depths(&chain(), 0);
        assert_eq!(depths[&0], 0);
        assert_eq!(depths[&1], 1);
        assert_eq!(depths[&2], 2);
    }

    #[test]
    fn test_depths_unreachable() {
        let mut tree = CascadeTree::new(0);
        tree.add_edge(0, 1);
        tree.add_edge(50, 51);
        let depths = compute_depths(&tree, 0);

        assert_eq!(depths[&50], UNREACHABLE);
        assert_eq!(depths[&51], UNREACHABLE);
        assert_eq!(depths[&1], 1);
    }

    #[test]
    fn test_depths_missing_root() {
        let depths = compute_depths(&chain(), 77);
        assert_eq!(depths.len(), 3);
        assert!(depths.values().all(|&d| d == UNREACHABLE));
    }

    #[test]
    fn test_depths_relaxation_with_two_parents() {
        // 3 is reachable both at depth 3 (0-1-2-3) and depth 2 (0-4-3)
        let mut tree = CascadeTree::new(0);
        tree.add_edge(0, 1);
        tree.add_edge(1, 2);
        tree.add_edge(2, 3);
        tree.add_edge(0, 4);
        tree.add_edge(4, 3);
        tree.add_edge(3, 5);

        let depths = compute_depths(&tree, 0);
        assert_eq!(depths[&3], 2);
        assert_eq!(depths[&5], 3);
    }

    #[test]
    fn test_depths_tolerate_cycle() {
        let mut tree = CascadeTree::new(0);
        tree.add_edge(0, 1);
        tree.add_edge(1, 2);
        tree.add_edge(2, 1);
        let depths = compute_depths(&tree, 0);
        assert_eq!(depths[&1], 1);
        assert_eq!(depths[&2], 2);
    }

    #[test]
    fn test_metrics_chain() {
        let metrics = structural_metrics(&chain(), 0);
        assert_eq!(metrics.depth, 2.0);
        assert_eq!(metrics.avg_depth, 1.0);
        assert_eq!(metrics.leaves, 1.0);
        assert_eq!(metrics.branching_factor, 1.0);
        assert_eq!(metrics.wiener_root_avg, 1.0);
    }

    #[test]
    fn test_metrics_root_only() {
        let metrics = structural_metrics(&CascadeTree::new(9), 9);
        assert_eq!(metrics.leaves, 1.0);
        assert_eq!(metrics.depth, 0.0);
        assert_eq!(metrics.branching_factor, 0.0);
        assert_eq!(metrics.avg_depth, 0.0);
    }

    #[test]
    fn test_metrics_missing_root() {
        let tree = CascadeTree::from_adjacency(3, HashMap::new());
        assert_eq!(structural_metrics(&tree, 3), StructuralMetrics::no_tree());
    }

    #[test]
    fn test_metrics_star_with_fragment() {
        let mut tree = CascadeTree::new(0);
        tree.add_edge(0, 1);
        tree.add_edge(0, 2);
        tree.add_edge(0, 3);
        tree.add_edge(2, 4);
        // disconnected stub, ignored
        tree.add_edge(90, 91);

        let metrics = structural_metrics(&tree, 0);
        assert_eq!(metrics.depth, 2.0);
        assert_eq!(metrics.leaves, 3.0);
        assert_eq!(metrics.branching_factor, 2.0);
        assert!((metrics.avg_depth - 5.0 / 5.0).abs() < 1e-12);
        assert_eq!(metrics.avg_depth, metrics.wiener_root_avg);
    }

    proptest! {
        #[test]
        fn prop_every_depth_has_parent_one_level_up(edges in prop::collection::vec((0i64..15, 0i64..15), 0..40)) {
            let mut children: HashMap<UserId, HashSet<UserId>> = HashMap::new();
            children.entry(0).or_default();
            for (p, c) in edges {
                children.entry(c).or_default();
                children.entry(p).or_default().insert(c);
            }
            let tree = CascadeTree::from_adjacency(0, children);
            let depths = compute_depths(&tree, 0);

            prop_assert_eq!(depths[&0], 0);
            for (&node, &d) in &depths {
                if d > 0 {
                    let has_parent = tree.nodes()
                        .any(|p| depths[&p] == d - 1 && tree.children(p).any(|c| c == node));
                    prop_assert!(has_parent);
                }
            }
        }
    }
}
