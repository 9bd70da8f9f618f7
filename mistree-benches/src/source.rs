//! Synthetic planar trees for benchmarking.
//!
//! Points are uniform in the unit square. Nodes attach to their predecessor
//! to form chains of `chain_length` nodes; each chain hangs off a random
//! earlier node. Edge weights are Euclidean edge lengths.

use mistree_core::{EdgeIndex, Graph, MistreeError, Points};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Configuration for a synthetic planar tree.
#[derive(Clone, Debug)]
pub struct SyntheticTreeConfig {
    /// Number of nodes to generate.
    pub node_count: usize,
    /// Nodes per degree-2 chain; 1 attaches every node at random.
    pub chain_length: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A generated tree together with its node coordinates.
#[derive(Clone, Debug)]
pub struct SyntheticTree {
    graph: Graph,
    points: Points,
}

impl SyntheticTree {
    /// Generates a tree from `config`.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::ZeroValue`] for a zero node count or chain
    /// length, and [`BenchSetupError::Mistree`] when the generated graph is
    /// rejected.
    pub fn generate(config: &SyntheticTreeConfig) -> Result<Self, BenchSetupError> {
        if config.node_count == 0 {
            return Err(BenchSetupError::ZeroValue {
                context: "node_count",
            });
        }
        if config.chain_length == 0 {
            return Err(BenchSetupError::ZeroValue {
                context: "chain_length",
            });
        }
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let x: Vec<f64> = (0..config.node_count).map(|_| rng.r#gen::<f64>()).collect();
        let y: Vec<f64> = (0..config.node_count).map(|_| rng.r#gen::<f64>()).collect();
        let points = Points::planar(x, y)?;

        let pairs: Vec<(usize, usize)> = (1..config.node_count)
            .map(|node| {
                let parent = if node.is_multiple_of(config.chain_length) {
                    rng.gen_range(0..node)
                } else {
                    node - 1
                };
                (parent, node)
            })
            .collect();
        let edges = EdgeIndex::new(config.node_count, &pairs)?;
        let weights = pairs
            .iter()
            .map(|&(i, j)| {
                points.distance(i, j).ok_or(MistreeError::InvalidNodeId {
                    node: j,
                    node_count: points.len(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        let graph = Graph::new(edges, weights)?;
        Ok(Self { graph, points })
    }

    /// Returns the generated graph.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns the node coordinates.
    #[must_use]
    pub const fn points(&self) -> &Points {
        &self.points
    }
}
