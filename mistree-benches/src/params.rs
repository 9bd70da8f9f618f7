//! Benchmark parameter types.

use std::fmt;

/// Parameters for a branch-finding benchmark run.
#[derive(Clone, Debug)]
pub struct BranchBenchParams {
    /// Number of nodes in the tree.
    pub node_count: usize,
    /// Grid cells per axis, or `None` for edge-id order.
    pub subdivisions: Option<usize>,
}

impl fmt::Display for BranchBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(cells) = self.subdivisions else {
            return write!(f, "n={},naive", self.node_count);
        };
        write!(f, "n={},grid={cells}", self.node_count)
    }
}

/// Parameters for a tree-traversal benchmark run.
#[derive(Clone, Debug)]
pub struct TreeBenchParams {
    /// Number of nodes in the tree.
    pub node_count: usize,
}

impl fmt::Display for TreeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.node_count)
    }
}
