//! Retweet tree as an adjacency mapping

use std::collections::{HashMap, HashSet};
use serde::{Serialize, Deserialize};
use crate::cascade::{Cascade, UserId};

/// A cascade tree represented as an adjacency mapping
///
/// - Every node maps to the set of users who retweeted directly from it
/// - The root is always a key, possibly with an empty child set
/// - Parents that never retweeted themselves are kept as keys, so the
///   mapping may contain fragments that are not reachable from the root
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeTree {
    root: UserId,
    children: HashMap<UserId, HashSet<UserId>>,
}

impl CascadeTree {
    /// Create a tree with a single root node
    pub fn new(root: UserId) -> Self {
        let mut children = HashMap::new();
        children.insert(root, HashSet::new());
        CascadeTree { root, children }
    }

    /// Build a tree directly from an adjacency mapping
    ///
    /// Unlike [`CascadeTree::new`] the root is not inserted, which lets
    /// callers describe degenerate mappings.
    pub fn from_adjacency(root: UserId, children: HashMap<UserId, HashSet<UserId>>) -> Self {
        CascadeTree { root, children }
    }

    /// Add the edge `parent -> child`, registering both nodes
    pub fn add_edge(&mut self, parent: UserId, child: UserId) {
        self.children.entry(child).or_default();
        self.children.entry(parent).or_default().insert(child);
    }

    /// The root user
    pub fn root(&self) -> UserId {
        self.root
    }

    /// Number of nodes (mapping keys)
    pub fn size(&self) -> usize {
        self.children.len()
    }

    /// Whether `node` is a key of the mapping
    pub fn contains(&self, node: UserId) -> bool {
        self.children.contains_key(&node)
    }

    /// Children of a node; unknown nodes have none
    pub fn children(&self, node: UserId) -> impl Iterator<Item = UserId> + '_ {
        self.children.get(&node).into_iter().flatten().copied()
    }

    /// Number of direct children of a node
    pub fn node_degree(&self, node: UserId) -> usize {
        self.children.get(&node).map_or(0, HashSet::len)
    }

    /// All nodes, in no particular order
    pub fn nodes(&self) -> impl Iterator<Item = UserId> + '_ {
        self.children.keys().copied()
    }
}

/// Build the retweet tree of a cascade
pub fn build_tree(cascade: &Cascade) -> CascadeTree {
    let mut tree = CascadeTree::new(cascade.root);
    for event in &cascade.events {
        tree.add_edge(event.parent, event.user);
    }
    tree
}
