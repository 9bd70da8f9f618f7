//! Node degree and per-edge lookups of node statistics.

use super::EdgeIndex;
use crate::error::{MistreeError, Result};

/// Counts the edges incident to every node.
///
/// The sum of the result is twice the number of edges.
///
/// # Examples
/// ```
/// use mistree_core::graph::{EdgeIndex, degree};
///
/// let edges = EdgeIndex::new(4, &[(0, 1), (1, 2), (1, 3)]).expect("valid edges");
/// assert_eq!(degree(&edges), vec![1, 3, 1, 1]);
/// ```
#[must_use]
pub fn degree(edges: &EdgeIndex) -> Vec<usize> {
    let mut counts = vec![0_usize; edges.node_count()];
    for node in edges.iter().flat_map(|(i, j)| [i, j]) {
        if let Some(count) = counts.get_mut(node) {
            *count += 1;
        }
    }
    counts
}

/// A per-node statistic read at both ends of every edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStat<T> {
    first: Vec<T>,
    second: Vec<T>,
}

impl<T: Copy> EdgeStat<T> {
    /// Returns the statistic at the first endpoint of every edge.
    #[must_use]
    #[rustfmt::skip]
    pub const fn first(&self) -> &[T] { self.first.as_slice() }

    /// Returns the statistic at the second endpoint of every edge.
    #[must_use]
    #[rustfmt::skip]
    pub const fn second(&self) -> &[T] { self.second.as_slice() }

    /// Returns the number of edges covered.
    #[must_use]
    #[rustfmt::skip]
    pub const fn len(&self) -> usize { self.first.len() }

    /// Returns `true` when no edges are covered.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_empty(&self) -> bool { self.first.is_empty() }

    /// Returns both values for `edge`.
    #[must_use]
    pub fn at(&self, edge: usize) -> Option<(T, T)> {
        Some((*self.first.get(edge)?, *self.second.get(edge)?))
    }
}

/// Looks up `stat` at both endpoints of every edge.
///
/// Applied to [`degree`] this yields the edge degree used by branch finding.
///
/// # Errors
/// Returns [`MistreeError::LengthMismatch`] unless `stat` holds one value per
/// node.
pub fn stat_at_edge_ends<T: Copy>(edges: &EdgeIndex, stat: &[T]) -> Result<EdgeStat<T>> {
    if stat.len() != edges.node_count() {
        return Err(MistreeError::LengthMismatch {
            what: "stat",
            expected: edges.node_count(),
            got: stat.len(),
        });
    }
    // Every id is below `node_count`, so no edge is skipped.
    let (first, second) = edges
        .iter()
        .filter_map(|(i, j)| Some((*stat.get(i)?, *stat.get(j)?)))
        .unzip();
    Ok(EdgeStat { first, second })
}
