//! Statistics and introspection for the radix tree.
//!
//! Gathers figures about the shape of a tree: how many nodes path compression left, how deep
//! the tree goes, how wide it branches and how many symbols sit on its edges. Useful for
//! understanding memory usage and for checking that compression holds up on a given key set.

use std::collections::BTreeMap;

use crate::keys::KeyTrait;
use crate::node::Node;
use crate::partials::Partial;

pub trait TreeStatsTrait {
    fn get_tree_stats(&self) -> TreeStats;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TreeStats {
    /// Every node, the root included.
    pub num_nodes: usize,
    /// Nodes carrying an entry.
    pub num_values: usize,
    /// Nodes carrying no entry: the root (when it has none) and branch points.
    pub num_inner_nodes: usize,
    /// Nodes without children.
    pub num_leaves: usize,
    /// Number of nodes on the longest root-to-node path, the root counting as 1.
    pub max_height: usize,
    pub max_children: usize,
    /// Sum of the prefix lengths of every node, i.e. the symbols actually stored on edges.
    pub total_prefix_len: usize,
    /// Number of nodes by number of children.
    pub fanout: BTreeMap<usize, usize>,
}

impl TreeStats {
    /// Average number of symbols per edge, or 0 for a tree holding only its root.
    pub fn average_prefix_len(&self) -> f64 {
        let edges = self.num_nodes.saturating_sub(1);
        if edges == 0 {
            return 0.0;
        }
        self.total_prefix_len as f64 / edges as f64
    }
}

pub(crate) fn update_tree_stats<K: KeyTrait, V>(
    tree_stats: &mut TreeStats,
    node: &Node<K, V>,
    height: usize,
) {
    let num_children = node.num_children();

    tree_stats.num_nodes += 1;
    if node.is_leaf() {
        tree_stats.num_values += 1;
    } else {
        tree_stats.num_inner_nodes += 1;
    }
    if num_children == 0 {
        tree_stats.num_leaves += 1;
    }
    tree_stats.max_height = tree_stats.max_height.max(height);
    tree_stats.max_children = tree_stats.max_children.max(num_children);
    tree_stats.total_prefix_len += node.prefix.len();
    *tree_stats.fanout.entry(num_children).or_default() += 1;
}
