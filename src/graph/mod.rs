//! Retweet trees and their structural metrics

mod tree;
mod metrics;

pub use tree::{CascadeTree, build_tree};
pub use metrics::{StructuralMetrics, UNREACHABLE, compute_depths, structural_metrics};
