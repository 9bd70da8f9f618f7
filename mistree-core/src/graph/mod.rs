//! Undirected weighted graphs and the per-node views derived from them.
//!
//! A [`Graph`] pairs an [`EdgeIndex`] with one non-negative weight per edge.
//! The submodules turn it into degrees, CSR adjacency and a weight dictionary.

mod adjacency;
mod degree;
mod edge_weights;


pub use adjacency::{Adjacency, build_adjacency};
pub use degree::{EdgeStat, degree, stat_at_edge_ends};
pub use edge_weights::EdgeWeights;

use crate::error::{MistreeError, Result};

/// Validated table of undirected edges over `node_count` nodes.
///
/// Edge `k` joins `sources()[k]` and `targets()[k]`. Every id lies in
/// `[0, node_count)` and no edge is a self-loop.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EdgeIndex {
    node_count: usize,
    sources: Vec<usize>,
    targets: Vec<usize>,
}

impl EdgeIndex {
    /// Builds an edge table from `(i, j)` pairs.
    ///
    /// # Errors
    /// Returns [`MistreeError::EmptyGraph`] when `node_count` is zero,
    /// [`MistreeError::InvalidNodeId`] for ids outside the graph and
    /// [`MistreeError::SelfLoop`] for an edge from a node to itself.
    ///
    /// # Examples
    /// ```
    /// use mistree_core::graph::EdgeIndex;
    ///
    /// let edges = EdgeIndex::new(3, &[(0, 1), (1, 2)]).expect("valid edges");
    /// assert_eq!(edges.len(), 2);
    /// assert_eq!(edges.endpoints(1), Some((1, 2)));
    /// ```
    pub fn new(node_count: usize, pairs: &[(usize, usize)]) -> Result<Self> {
        let (sources, targets) = pairs.iter().copied().unzip();
        Self::from_columns(node_count, sources, targets)
    }

    /// Builds an edge table from two parallel columns of node ids.
    ///
    /// # Errors
    /// As [`EdgeIndex::new`], plus [`MistreeError::LengthMismatch`] when the
    /// columns differ in length.
    pub fn from_columns(node_count: usize, sources: Vec<usize>, targets: Vec<usize>) -> Result<Self> {
        if node_count == 0 {
            return Err(MistreeError::EmptyGraph);
        }
        if targets.len() != sources.len() {
            return Err(MistreeError::LengthMismatch {
                what: "targets",
                expected: sources.len(),
                got: targets.len(),
            });
        }
        for (edge, (&i, &j)) in sources.iter().zip(&targets).enumerate() {
            for node in [i, j] {
                if node >= node_count {
                    return Err(MistreeError::InvalidNodeId { node, node_count });
                }
            }
            if i == j {
                return Err(MistreeError::SelfLoop { edge, node: i });
            }
        }
        Ok(Self {
            node_count,
            sources,
            targets,
        })
    }

    /// Returns the number of nodes the table is defined over.
    #[must_use]
    #[rustfmt::skip]
    pub const fn node_count(&self) -> usize { self.node_count }

    /// Returns the number of edges.
    #[must_use]
    #[rustfmt::skip]
    pub const fn len(&self) -> usize { self.sources.len() }

    /// Returns `true` when the table holds no edges.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_empty(&self) -> bool { self.sources.is_empty() }

    /// Returns the first endpoint of every edge.
    #[must_use]
    #[rustfmt::skip]
    pub const fn sources(&self) -> &[usize] { self.sources.as_slice() }

    /// Returns the second endpoint of every edge.
    #[must_use]
    #[rustfmt::skip]
    pub const fn targets(&self) -> &[usize] { self.targets.as_slice() }

    /// Returns both endpoints of `edge`.
    #[must_use]
    pub fn endpoints(&self, edge: usize) -> Option<(usize, usize)> {
        Some((*self.sources.get(edge)?, *self.targets.get(edge)?))
    }

    /// Iterates over `(i, j)` pairs in edge-id order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, usize)> + '_ {
        self.sources.iter().copied().zip(self.targets.iter().copied())
    }
}

/// An undirected graph with one weight per edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    edges: EdgeIndex,
    weights: Vec<f64>,
}

impl Graph {
    /// Pairs an edge table with its weights.
    ///
    /// # Errors
    /// Returns [`MistreeError::LengthMismatch`] when there is not exactly one
    /// weight per edge, [`MistreeError::NonFiniteWeight`] for NaN or infinite
    /// weights and [`MistreeError::NegativeWeight`] for negative ones.
    ///
    /// # Examples
    /// ```
    /// use mistree_core::graph::{EdgeIndex, Graph};
    ///
    /// let edges = EdgeIndex::new(3, &[(0, 1), (1, 2)]).expect("valid edges");
    /// let graph = Graph::new(edges, vec![1.0, 2.5]).expect("valid weights");
    /// assert_eq!(graph.node_count(), 3);
    /// assert_eq!(graph.weights(), &[1.0, 2.5]);
    /// ```
    pub fn new(edges: EdgeIndex, weights: Vec<f64>) -> Result<Self> {
        validate_weights(&weights, edges.len())?;
        Ok(Self { edges, weights })
    }

    /// Returns the edge table.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edges(&self) -> &EdgeIndex { &self.edges }

    /// Returns the edge weights in edge-id order.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weights(&self) -> &[f64] { self.weights.as_slice() }

    /// Returns the number of nodes.
    #[must_use]
    #[rustfmt::skip]
    pub const fn node_count(&self) -> usize { self.edges.node_count() }

    /// Returns the number of edges.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edge_count(&self) -> usize { self.edges.len() }

    /// Builds the deduplicated adjacency of this graph.
    ///
    /// # Errors
    /// Never fails for a validated graph; the signature mirrors
    /// [`build_adjacency`].
    pub fn adjacency(&self) -> Result<Adjacency> {
        build_adjacency(&self.edges, &self.weights, self.node_count())
    }

    /// Returns a copy with every weight mapped through `f`.
    ///
    /// # Errors
    /// Fails when `f` produces a negative or non-finite weight.
    pub fn map_weights(&self, f: impl Fn(f64) -> f64) -> Result<Self> {
        let weights: Vec<f64> = self.weights.iter().map(|&w| f(w)).collect();
        Self::new(self.edges.clone(), weights)
    }
}

fn validate_weights(weights: &[f64], expected: usize) -> Result<()> {
    if weights.len() != expected {
        return Err(MistreeError::LengthMismatch {
            what: "weights",
            expected,
            got: weights.len(),
        });
    }
    for (edge, &weight) in weights.iter().enumerate() {
        if !weight.is_finite() {
            return Err(MistreeError::NonFiniteWeight { edge });
        }
        if weight < 0.0 {
            return Err(MistreeError::NegativeWeight { edge, weight });
        }
    }
    Ok(())
}
