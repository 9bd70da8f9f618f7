//! Shared test utilities for `mistree-core`.

use mistree_test_support::ci::property_test_profile::ProptestRunProfile;
use mistree_test_support::fixtures::{chained_tree_pairs, random_planar_points, random_tree_pairs};
use proptest::test_runner::Config as ProptestConfig;

use crate::coords::Points;
use crate::graph::{EdgeIndex, Graph};

/// Builds a proptest configuration from the shared CI profile.
///
/// Every property suite reads `PROGTEST_CASES` and `MISTREE_PBT_FORK` the
/// same way.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Random spanning tree over `node_count` nodes.
pub(crate) fn random_tree_edges(node_count: usize, seed: u64) -> EdgeIndex {
    EdgeIndex::new(node_count, &random_tree_pairs(node_count, seed)).expect("generated trees are valid")
}

/// Random planar tree whose edge weights are the Euclidean edge lengths.
///
/// `chained` selects the generator with long degree-2 chains.
pub(crate) fn planar_tree(node_count: usize, seed: u64, chained: bool) -> (Graph, Points) {
    let pairs = if chained {
        chained_tree_pairs(node_count, 8, seed)
    } else {
        random_tree_pairs(node_count, seed)
    };
    let (x, y) = random_planar_points(node_count, seed.wrapping_add(1));
    let points = Points::planar(x, y).expect("generated points are finite");
    let edges = EdgeIndex::new(node_count, &pairs).expect("generated trees are valid");
    let weights = edges
        .iter()
        .map(|(i, j)| points.distance(i, j).expect("endpoints have coordinates"))
        .collect();
    let graph = Graph::new(edges, weights).expect("lengths are finite and non-negative");
    (graph, points)
}

/// Builds a graph from pairs with unit weights.
pub(crate) fn unit_graph(node_count: usize, pairs: &[(usize, usize)]) -> Graph {
    let edges = EdgeIndex::new(node_count, pairs).expect("fixture edges are valid");
    let weights = vec![1.0; edges.len()];
    Graph::new(edges, weights).expect("unit weights are valid")
}
