//! Unit tests for grouping, rooting, paths, centrality, spines and walks.

use mistree_test_support::fixtures::path_pairs;
use proptest::prelude::*;
use rstest::{fixture, rstest};

use super::*;
use crate::coords::Points;
use crate::error::MistreeError;
use crate::graph::{Adjacency, EdgeIndex, EdgeWeights, Graph, degree};
use crate::test_utils::{random_tree_edges, suite_proptest_config, unit_graph};

fn adjacency_of(graph: &Graph) -> Adjacency {
    graph.adjacency().expect("fixture adjacency is valid")
}

fn rooted(graph: &Graph, root: usize) -> RootedTree {
    build_tree(&adjacency_of(graph), root, true).expect("fixture is a spanning tree")
}

#[fixture]
fn path() -> Graph {
    unit_graph(4, &[(0, 1), (1, 2), (2, 3)])
}

#[fixture]
fn star() -> Graph {
    unit_graph(4, &[(0, 1), (0, 2), (0, 3)])
}

/// 0 - 1 - 2 - 3 with a side branch 1 - 4 - 5.
#[fixture]
fn forked() -> Graph {
    unit_graph(6, &[(0, 1), (1, 2), (2, 3), (1, 4), (4, 5)])
}

#[rstest]
fn groups_two_components() {
    let graph = unit_graph(4, &[(0, 1), (2, 3)]);
    let groups = find_groups(&adjacency_of(&graph), 0).expect("root in range");
    assert_eq!(groups.labels(), &[1, 1, 2, 2]);
    assert_eq!(groups.count(), 2);
    assert!(!groups.is_spanning());
}

#[rstest]
fn groups_number_root_component_first() {
    let graph = unit_graph(5, &[(0, 1), (3, 4)]);
    let groups = find_groups(&adjacency_of(&graph), 3).expect("root in range");
    assert_eq!(groups.labels(), &[2, 2, 3, 1, 1]);
    assert_eq!(groups.count(), 3);
}

#[rstest]
fn groups_reject_out_of_range_root(path: Graph) {
    let err = find_groups(&adjacency_of(&path), 9).expect_err("root is out of range");
    assert_eq!(
        err,
        MistreeError::InvalidNodeId {
            node: 9,
            node_count: 4
        }
    );
}

#[rstest]
fn builds_path_from_interior_root(path: Graph) {
    let tree = rooted(&path, 1);
    assert_eq!(tree.root(), 1);
    assert_eq!(tree.parent(1), None);
    assert_eq!(tree.children(1), Some(&[0, 2][..]));
    assert_eq!(tree.children(0), None);
    assert_eq!(tree.parent(3), Some(2));
    assert_eq!(tree.depth(3), Some(2));
    assert_eq!(tree.order(), &[1, 0, 2, 3]);
}

#[rstest]
#[case(true)]
#[case(false)]
fn rejects_disconnected_graph(#[case] validate: bool) {
    let graph = unit_graph(4, &[(0, 1), (2, 3)]);
    let err = build_tree(&adjacency_of(&graph), 0, validate).expect_err("graph is disconnected");
    assert_eq!(err, MistreeError::NotSpanning { groups: 2 });
}

#[rstest]
fn reroots_preserving_edges(forked: Graph) {
    let tree = rooted(&forked, 0);
    let moved = tree.rerooted(4).expect("root in range");
    assert_eq!(moved.root(), 4);
    assert_eq!(moved.children(4), Some(&[5, 1][..]));
    assert_eq!(moved.children(1), Some(&[2, 0][..]));
    assert_eq!(moved.parent(0), Some(1));
    assert_eq!(moved.children(0), None);
    assert!(tree.rerooted(6).is_err());
}

#[rstest]
fn walks_to_root(forked: Graph) {
    let tree = rooted(&forked, 0);
    assert_eq!(path_to_root(5, &tree).expect("node in range"), vec![5, 4, 1, 0]);
    assert_eq!(path_to_root(0, &tree).expect("node in range"), vec![0]);
    assert!(matches!(
        path_to_root(6, &tree),
        Err(MistreeError::InvalidNodeId { node: 6, .. })
    ));
}

#[rstest]
#[case(5, 3, vec![5, 4, 1, 2, 3])]
#[case(3, 0, vec![3, 2, 1, 0])]
#[case(2, 2, vec![2])]
fn finds_paths_through_common_ancestor(
    forked: Graph,
    #[case] a: usize,
    #[case] b: usize,
    #[case] expected: Vec<usize>,
) {
    let tree = rooted(&forked, 0);
    assert_eq!(path_between(a, b, &tree).expect("nodes in range"), expected);
}

#[rstest]
fn sums_path_weights() {
    let edges = EdgeIndex::new(3, &[(0, 1), (1, 2)]).expect("valid edges");
    let graph = Graph::new(edges, vec![1.5, 2.0]).expect("valid weights");
    let weights = EdgeWeights::symmetric(&graph).expect("ids fit in a key");
    assert_eq!(path_weight(&[0, 1, 2], &weights), Ok(3.5));
    assert_eq!(path_weight(&[2], &weights), Ok(0.0));
    assert_eq!(
        path_weight(&[0, 2], &weights),
        Err(MistreeError::MissingEdge { from: 0, to: 2 })
    );
}

#[rstest]
#[case(&[(0, 1), (1, 2)], vec![1.0, 3.0, 1.0])]
#[case(&[(0, 1), (0, 2), (0, 3)], vec![4.0, 1.0, 1.0, 1.0])]
#[case(&[(0, 1), (1, 2), (2, 3), (3, 4)], vec![1.0, 2.0, 5.0, 2.0, 1.0])]
#[case(&[(0, 1)], vec![1.0, 2.0])]
#[case(&[], vec![1.0])]
fn peels_known_trees(#[case] pairs: &[(usize, usize)], #[case] expected: Vec<f64>) {
    let edges = EdgeIndex::new(expected.len(), pairs).expect("valid edges");
    assert_eq!(get_centrality(&edges).expect("edges form a tree"), expected);
}

#[test]
fn peeling_rejects_forest() {
    let edges = EdgeIndex::new(4, &[(0, 1), (2, 3)]).expect("valid edges");
    let err = get_centrality(&edges).expect_err("two components");
    assert!(matches!(err, MistreeError::PeelingDisconnected { remaining: 2, .. }));
}

#[test]
fn peeling_rejects_cycle() {
    let edges = EdgeIndex::new(3, &[(0, 1), (1, 2), (2, 0)]).expect("valid edges");
    let err = get_centrality(&edges).expect_err("no leaves in a cycle");
    assert_eq!(
        err,
        MistreeError::PeelingDisconnected {
            remaining: 3,
            edge: 0
        }
    );
}

#[rstest]
fn spine_follows_central_children(forked: Graph) {
    let tree = rooted(&forked, 0);
    let centrality = get_centrality(forked.edges()).expect("edges form a tree");
    assert_eq!(get_spine(0, &tree, &centrality).expect("valid inputs"), vec![0, 1, 2, 3]);
    assert_eq!(get_spine(4, &tree, &centrality).expect("valid inputs"), vec![4, 5]);
    assert!(matches!(
        get_spine(0, &tree, &[1.0]),
        Err(MistreeError::LengthMismatch { what: "centrality", .. })
    ));
}

#[rstest]
fn spines_cover_star(star: Graph) {
    let tree = rooted(&star, 1);
    let centrality = get_centrality(star.edges()).expect("edges form a tree");
    let spines = get_spines(&tree, &centrality).expect("valid inputs");
    assert_eq!(spines.spines(), &[vec![2, 0, 1], vec![3]]);
    assert_eq!(spines.levels(), &[1, 1, 1, 2]);
}

#[rstest]
#[case::centre(0, vec![1, 0, 2])]
#[case::low_leaf(1, vec![2, 0, 1])]
#[case::middle_leaf(2, vec![1, 0, 2])]
#[case::high_leaf(3, vec![1, 0, 2])]
fn backbone_extends_to_lowest_free_neighbour(
    star: Graph,
    #[case] root: usize,
    #[case] backbone: Vec<usize>,
) {
    // Every leaf of the star has centrality 1, so the second half of the
    // backbone goes to the lowest id the first half left uncovered.
    let tree = rooted(&star, root);
    let centrality = get_centrality(star.edges()).expect("edges form a tree");
    let spines = get_spines(&tree, &centrality).expect("valid inputs");
    assert_eq!(spines.spines().first(), Some(&backbone));
    assert_eq!(spines.len(), 2);
    assert_eq!(spines.levels().iter().filter(|&&level| level == 2).count(), 1);
}

#[test]
fn spines_of_single_node() {
    let graph = unit_graph(1, &[]);
    let tree = rooted(&graph, 0);
    let spines = get_spines(&tree, &[1.0]).expect("valid inputs");
    assert_eq!(spines.spines(), &[vec![0]]);
    assert_eq!(spines.level(0), Some(1));
}

#[rstest]
fn enumerates_walks_from_root(forked: Graph) {
    let adjacency = adjacency_of(&forked);
    let walks = percolation_paths_from(&adjacency, 1, 2).expect("valid request");
    assert_eq!(walks, vec![vec![1, 2, 3], vec![1, 4, 5]]);
    assert!(percolation_paths_from(&adjacency, 3, 9).expect("valid request").is_empty());
    assert_eq!(
        percolation_paths_from(&adjacency, 0, 0),
        Err(MistreeError::InvalidPercolationSteps { got: 0 })
    );
}

#[rstest]
fn enumerates_walks_in_both_directions(path: Graph) {
    let adjacency = adjacency_of(&path);
    let walks = percolation_paths(&adjacency, 3).expect("valid request");
    assert_eq!(walks, vec![vec![0, 1, 2, 3], vec![3, 2, 1, 0]]);

    let weights = EdgeWeights::symmetric(&path).expect("ids fit in a key");
    assert_eq!(percolation_weights(&walks, &weights), Ok(vec![3.0, 3.0]));
    assert_eq!(percolation_ends(&walks), vec![(0, 3), (3, 0)]);

    let points = Points::planar(vec![0.0, 1.0, 2.0, 3.0], vec![0.0; 4]).expect("valid points");
    assert_eq!(percolation_end_distances(&walks, &points), Ok(vec![3.0, 3.0]));
}

#[test]
fn walks_span_a_long_chain() {
    let node_count = 30_000;
    let graph = unit_graph(node_count, &path_pairs(node_count));
    let adjacency = adjacency_of(&graph);

    let walks = percolation_paths_from(&adjacency, 0, node_count - 1).expect("valid request");
    assert_eq!(walks, vec![(0..node_count).collect::<Vec<_>>()]);

    // Only the half towards node 0 is long enough from the middle.
    let middle = node_count / 2;
    let half = percolation_paths_from(&adjacency, middle, middle).expect("valid request");
    assert_eq!(half, vec![(0..=middle).rev().collect::<Vec<_>>()]);
}

proptest! {
    #![proptest_config(suite_proptest_config(96))]

    #[test]
    fn rooted_tree_spans_every_node(node_count in 1_usize..150, seed in any::<u64>(), root_pick in any::<usize>()) {
        let edges = random_tree_edges(node_count, seed);
        let graph = Graph::new(edges, vec![1.0; node_count - 1]).expect("unit weights");
        let root = root_pick % node_count;
        let tree = build_tree(&adjacency_of(&graph), root, true).expect("random trees span");
        prop_assert_eq!(tree.order().len(), node_count);
        let child_total: usize = (0..node_count)
            .map(|node| tree.children(node).map_or(0, <[usize]>::len))
            .sum();
        prop_assert_eq!(child_total, node_count - 1);
        for node in 0..node_count {
            let up = path_to_root(node, &tree).expect("node in range");
            prop_assert_eq!(up.last().copied(), Some(root));
            prop_assert_eq!(up.len(), tree.depth(node).expect("node in range") + 1);
        }
    }

    #[test]
    fn paths_reverse_symmetrically(node_count in 2_usize..120, seed in any::<u64>(), a in any::<usize>(), b in any::<usize>()) {
        let edges = random_tree_edges(node_count, seed);
        let graph = Graph::new(edges, vec![1.0; node_count - 1]).expect("unit weights");
        let tree = build_tree(&adjacency_of(&graph), 0, true).expect("random trees span");
        let (a, b) = (a % node_count, b % node_count);
        let forward = path_between(a, b, &tree).expect("nodes in range");
        let mut backward = path_between(b, a, &tree).expect("nodes in range");
        backward.reverse();
        prop_assert_eq!(&forward, &backward);
        prop_assert_eq!(forward.first().copied(), Some(a));
        prop_assert_eq!(forward.last().copied(), Some(b));
    }

    #[test]
    fn centrality_peaks_inside_the_tree(node_count in 3_usize..200, seed in any::<u64>()) {
        let edges = random_tree_edges(node_count, seed);
        let degrees = degree(&edges);
        let centrality = get_centrality(&edges).expect("random trees peel");
        let peak = centrality
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(node, _)| node)
            .expect("non-empty tree");
        prop_assert!(degrees[peak] > 1);
        for (node, &value) in centrality.iter().enumerate() {
            if degrees[node] == 1 {
                prop_assert_eq!(value, 1.0);
            }
        }
    }

    #[test]
    fn spines_partition_the_nodes(node_count in 1_usize..150, seed in any::<u64>()) {
        let edges = random_tree_edges(node_count, seed);
        let graph = Graph::new(edges, vec![1.0; node_count - 1]).expect("unit weights");
        let tree = build_tree(&adjacency_of(&graph), 0, true).expect("random trees span");
        let centrality = get_centrality(graph.edges()).expect("random trees peel");
        let spines = get_spines(&tree, &centrality).expect("valid inputs");

        let mut seen = vec![0_usize; node_count];
        for (index, spine) in spines.spines().iter().enumerate() {
            for &node in spine {
                seen[node] += 1;
                prop_assert_eq!(spines.level(node), Some(index + 1));
            }
        }
        prop_assert!(seen.iter().all(|&count| count == 1));
    }
}
