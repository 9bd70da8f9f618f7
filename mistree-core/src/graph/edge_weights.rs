//! Weight lookup keyed by ordered node pairs.

use std::collections::HashMap;

use super::Graph;
use crate::error::{MistreeError, Result};
use crate::index::cantor_pair;

/// Dictionary from an ordered node pair to the weight of the edge joining it.
///
/// Keys are the Cantor pairing of `(from, to)`, so `(i, j)` and `(j, i)` are
/// distinct entries. Both orientations of every edge are stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeWeights {
    by_pair: HashMap<u64, f64>,
}

impl EdgeWeights {
    /// Stores `w` under both `(i, j)` and `(j, i)`.
    ///
    /// # Errors
    /// Returns [`MistreeError::InvalidNodeId`] when a node id is too large to
    /// pair into a `u64` key.
    ///
    /// # Examples
    /// ```
    /// use mistree_core::graph::{EdgeIndex, EdgeWeights, Graph};
    ///
    /// let edges = EdgeIndex::new(2, &[(0, 1)]).expect("valid edges");
    /// let graph = Graph::new(edges, vec![2.0]).expect("valid weights");
    /// let weights = EdgeWeights::symmetric(&graph).expect("ids fit in a key");
    /// assert_eq!(weights.get(1, 0), Some(2.0));
    /// ```
    pub fn symmetric(graph: &Graph) -> Result<Self> {
        Self::populate(graph, 1.0)
    }

    /// Stores `w` under `(i, j)` and `-w` under `(j, i)`.
    ///
    /// # Errors
    /// As [`EdgeWeights::symmetric`].
    pub fn antisymmetric(graph: &Graph) -> Result<Self> {
        Self::populate(graph, -1.0)
    }

    #[expect(clippy::float_arithmetic, reason = "the reverse orientation scales the weight by a sign")]
    fn populate(graph: &Graph, reverse_sign: f64) -> Result<Self> {
        let node_count = graph.node_count();
        let mut by_pair = HashMap::with_capacity(graph.edge_count() * 2);
        for ((i, j), &weight) in graph.edges().iter().zip(graph.weights()) {
            // Repeated pairs keep their first weight, as the adjacency does.
            by_pair.entry(key(i, j, node_count)?).or_insert(weight);
            by_pair
                .entry(key(j, i, node_count)?)
                .or_insert(reverse_sign * weight);
        }
        Ok(Self { by_pair })
    }

    /// Returns the number of stored ordered pairs.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.by_pair.len() }

    /// Returns `true` when nothing is stored.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.by_pair.is_empty() }

    /// Returns the weight stored for `(from, to)`.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        let k1 = u64::try_from(from).ok()?;
        let k2 = u64::try_from(to).ok()?;
        self.by_pair.get(&cantor_pair(k1, k2)?).copied()
    }

    /// Returns the weight stored for `(from, to)`.
    ///
    /// # Errors
    /// Returns [`MistreeError::MissingEdge`] when the pair is not an edge.
    pub fn weight(&self, from: usize, to: usize) -> Result<f64> {
        self.get(from, to)
            .ok_or(MistreeError::MissingEdge { from, to })
    }
}

fn key(from: usize, to: usize, node_count: usize) -> Result<u64> {
    let invalid = |node| MistreeError::InvalidNodeId { node, node_count };
    let k1 = u64::try_from(from).map_err(|_| invalid(from))?;
    let k2 = u64::try_from(to).map_err(|_| invalid(to))?;
    cantor_pair(k1, k2).ok_or_else(|| invalid(from.max(to)))
}
