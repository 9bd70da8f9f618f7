//! Unit and property tests for branch walking and branch statistics.

use std::num::NonZeroUsize;

use mistree_test_support::fixtures::{path_pairs, star_pairs};
use proptest::prelude::*;
use rstest::rstest;
use test_strategy::Arbitrary;

use super::*;
use crate::coords::{AngleUnits, Points};
use crate::graph::{EdgeIndex, Graph, degree, stat_at_edge_ends};
use crate::test_utils::{planar_tree, suite_proptest_config, unit_graph};

fn branches_of(pairs: &[(usize, usize)], node_count: usize) -> Vec<Vec<usize>> {
    let edges = EdgeIndex::new(node_count, pairs).expect("fixture edges are valid");
    find_branches(&edges, &degree(&edges), None, None)
        .expect("fixture is a tree")
        .into_inner()
}

fn subdivisions(n: usize) -> Option<NonZeroUsize> {
    NonZeroUsize::new(n)
}

#[rstest]
#[case::path(&[(0, 1), (1, 2), (2, 3)], 4, vec![vec![0, 1, 2]])]
#[case::single_edge(&[(0, 1)], 2, vec![vec![0]])]
#[case::star(&[(0, 1), (0, 2), (0, 3)], 4, vec![vec![0], vec![1], vec![2]])]
#[case::path_listed_backwards(&[(2, 3), (1, 2), (0, 1)], 4, vec![vec![0, 1, 2]])]
#[case::forked(
    &[(0, 1), (1, 2), (2, 3), (1, 4), (4, 5)],
    6,
    vec![vec![0], vec![1, 2], vec![3, 4]]
)]
#[case::lone_node(&[], 1, vec![])]
fn finds_known_branches(
    #[case] pairs: &[(usize, usize)],
    #[case] node_count: usize,
    #[case] expected: Vec<Vec<usize>>,
) {
    assert_eq!(branches_of(pairs, node_count), expected);
}

#[test]
fn rejects_degree_disagreeing_with_edges() {
    let edges = EdgeIndex::new(3, &[(0, 1), (1, 2)]).expect("valid edges");
    let err = find_branches(&edges, &[1, 1, 1], None, None).expect_err("degree is wrong");
    assert_eq!(
        err,
        MistreeError::DegreeMismatch {
            node: 1,
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn rejects_short_degree() {
    let edges = EdgeIndex::new(3, &[(0, 1), (1, 2)]).expect("valid edges");
    let err = find_branches(&edges, &[1, 2], None, None).expect_err("degree is short");
    assert!(matches!(err, MistreeError::LengthMismatch { what: "degree", .. }));
}

#[test]
fn rejects_cycle_of_chain_nodes() {
    // The triangle 2-3-4 is detached from 0-1 and has no seed edge.
    let edges = EdgeIndex::new(5, &[(0, 1), (2, 3), (3, 4), (4, 2)]).expect("valid edges");
    let err = find_branches(&edges, &degree(&edges), None, None).expect_err("cycle has no seed");
    assert_eq!(err, MistreeError::MalformedTree { edge: 1, budget: 4 });
    assert_eq!(err.kind(), crate::error::ErrorKind::MalformedTree);
}

#[test]
fn grid_requires_points() {
    let edges = EdgeIndex::new(2, &[(0, 1)]).expect("valid edges");
    let err = find_branches(&edges, &[1, 1], None, subdivisions(2)).expect_err("no points");
    assert_eq!(err, MistreeError::MissingCoordinates);
}

#[test]
fn grid_requires_a_point_per_node() {
    let edges = EdgeIndex::new(3, &[(0, 1), (1, 2)]).expect("valid edges");
    let points = Points::planar(vec![0.0, 1.0], vec![0.0, 1.0]).expect("valid points");
    let err = find_branches(&edges, &[1, 2, 1], Some(&points), subdivisions(2))
        .expect_err("points are short");
    assert!(matches!(err, MistreeError::LengthMismatch { what: "points", .. }));
}

#[test]
fn grid_counts_walks_leaving_their_cell() {
    // Junction 0 with two short spurs and a chain 0-1-2-3 running into the
    // second cell along x.
    let edges =
        EdgeIndex::new(6, &[(0, 1), (1, 2), (2, 3), (0, 4), (0, 5)]).expect("valid edges");
    let points = Points::planar(vec![0.0, 1.0, 2.0, 3.0, 0.1, 0.2], vec![0.0; 6])
        .expect("valid points");
    let branches = find_branches(&edges, &degree(&edges), Some(&points), subdivisions(2))
        .expect("edges form a tree");
    assert_eq!(branches.as_slice(), &[vec![0, 1, 2], vec![3], vec![4]]);
    let diagnostics = branches.diagnostics();
    assert_eq!(diagnostics.strategy, "grid");
    assert_eq!(diagnostics.cells, 2);
    assert_eq!(diagnostics.cross_cell, 1);
    assert_eq!(diagnostics.seeds_walked, 3);
    assert_eq!(diagnostics.seeds_skipped, 1);
}

#[test]
fn naive_diagnostics_report_single_cell() {
    let edges = EdgeIndex::new(4, &path_pairs(4)).expect("valid edges");
    let branches = find_branches(&edges, &degree(&edges), None, None).expect("edges form a tree");
    assert_eq!(
        branches.diagnostics(),
        BranchDiagnostics {
            strategy: "naive",
            seeds_walked: 1,
            seeds_skipped: 1,
            cross_cell: 0,
            cells: 1,
        }
    );
}

#[test]
fn measures_branch_weight_and_edge_count() {
    let edges = EdgeIndex::new(5, &[(0, 1), (1, 2), (2, 3), (1, 4)]).expect("valid edges");
    let graph = Graph::new(edges, vec![1.0, 2.0, 0.5, 4.0]).expect("valid weights");
    let branches = find_branches(graph.edges(), &degree(graph.edges()), None, None)
        .expect("edges form a tree");
    assert_eq!(
        branch_weight(branches.as_slice(), graph.weights()),
        Ok(vec![1.0, 2.5, 4.0])
    );
    assert_eq!(branch_edge_count(branches.as_slice()), vec![1, 2, 1]);
    assert!(matches!(
        branch_weight(&[vec![7]], graph.weights()),
        Err(MistreeError::LengthMismatch { what: "edge_weights", .. })
    ));
}

#[test]
fn finds_branch_ends() {
    let graph = unit_graph(6, &[(0, 1), (2, 1), (2, 3), (1, 4), (4, 5)]);
    let edges = graph.edges();
    let degrees = degree(edges);
    let edge_degree = stat_at_edge_ends(edges, &degrees).expect("one degree per node");
    let branches = find_branches(edges, &degrees, None, None).expect("edges form a tree");
    let ends = branch_end_nodes(branches.as_slice(), edges, &edge_degree).expect("valid branches");
    assert_eq!(ends, vec![(0, 1), (1, 3), (1, 5)]);
    assert_eq!(
        branch_end_nodes(&[vec![]], edges, &edge_degree),
        Err(MistreeError::DegenerateBranch { branch: 0 })
    );
}

#[test]
#[expect(clippy::float_arithmetic, reason = "test compares measured values via subtraction")]
fn measures_planar_branch_shape() {
    let graph = unit_graph(4, &path_pairs(4));
    let edges = graph.edges();
    let degrees = degree(edges);
    let edge_degree = stat_at_edge_ends(edges, &degrees).expect("one degree per node");
    let points = Points::planar(vec![0.0, 1.0, 1.0, 2.0], vec![0.0, 0.0, 1.0, 1.0]).expect("valid points");
    let branches = find_branches(edges, &degrees, None, None).expect("edges form a tree");
    let weights = branch_weight(branches.as_slice(), graph.weights()).expect("weights cover edges");
    let shape = branch_shape(branches.as_slice(), edges, &edge_degree, &weights, &points)
        .expect("non-degenerate branch");
    assert_eq!(shape.len(), 1);
    assert!((shape[0] - 5.0_f64.sqrt() / 3.0).abs() < 1e-12);
}

#[test]
#[expect(clippy::float_arithmetic, reason = "test compares measured values via subtraction")]
fn measures_spherical_branch_shape() {
    // Three points on the equator an eighth of a turn apart.
    let graph = unit_graph(3, &path_pairs(3));
    let edges = graph.edges();
    let degrees = degree(edges);
    let edge_degree = stat_at_edge_ends(edges, &degrees).expect("one degree per node");
    let points = Points::unit_sphere(&[0.0, 45.0, 90.0], &[90.0; 3], AngleUnits::Degrees)
        .expect("valid angles");
    let arc = points.distance(0, 1).expect("points exist");
    let branches = find_branches(edges, &degrees, None, None).expect("edges form a tree");
    let shape = branch_shape(branches.as_slice(), edges, &edge_degree, &[2.0 * arc], &points)
        .expect("non-degenerate branch");
    assert!((shape[0] - 1.0).abs() < 1e-12);
}

#[test]
fn rejects_zero_length_branch() {
    let graph = unit_graph(3, &star_pairs(3));
    let edges = graph.edges();
    let degrees = degree(edges);
    let edge_degree = stat_at_edge_ends(edges, &degrees).expect("one degree per node");
    let points = Points::planar(vec![0.0; 3], vec![0.0; 3]).expect("valid points");
    let err = branch_shape(&[vec![0, 1]], edges, &edge_degree, &[0.0], &points)
        .expect_err("zero length");
    assert_eq!(err, MistreeError::DegenerateBranch { branch: 0 });
}

/// Tree generators exercised by the property suite.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
enum TreeShape {
    /// Uniform random attachment: short branches, many junctions.
    #[weight(3)]
    Uniform,
    /// Long degree-2 chains hanging off random nodes.
    #[weight(3)]
    Chained,
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn branches_partition_edges(
        shape in any::<TreeShape>(),
        node_count in 2_usize..250,
        seed in any::<u64>(),
    ) {
        let (graph, _) = planar_tree(node_count, seed, shape == TreeShape::Chained);
        let edges = graph.edges();
        let degrees = degree(edges);
        let branches = find_branches(edges, &degrees, None, None).expect("random trees decompose");

        let mut owner = vec![None; edges.len()];
        for (index, branch) in branches.as_slice().iter().enumerate() {
            prop_assert!(branch.first() <= branch.last());
            for &edge in branch {
                prop_assert_eq!(owner[edge], None);
                owner[edge] = Some(index);
            }
        }
        prop_assert!(owner.iter().all(Option::is_some));
        prop_assert!(branches.as_slice().windows(2).all(|pair| pair[0][0] < pair[1][0]));
    }

    #[test]
    fn grid_matches_naive(
        shape in any::<TreeShape>(),
        node_count in 2_usize..250,
        seed in any::<u64>(),
        cells in 1_usize..12,
    ) {
        let (graph, points) = planar_tree(node_count, seed, shape == TreeShape::Chained);
        let edges = graph.edges();
        let degrees = degree(edges);
        let naive = find_branches(edges, &degrees, None, None).expect("random trees decompose");
        let grid = find_branches(edges, &degrees, Some(&points), subdivisions(cells))
            .expect("random trees decompose");
        prop_assert_eq!(naive.as_slice(), grid.as_slice());
        if cells == 1 {
            prop_assert_eq!(grid.diagnostics().cross_cell, 0);
        }
    }

    #[test]
    fn branch_shape_is_bounded(
        shape in any::<TreeShape>(),
        node_count in 2_usize..200,
        seed in any::<u64>(),
    ) {
        let (graph, points) = planar_tree(node_count, seed, shape == TreeShape::Chained);
        let edges = graph.edges();
        let degrees = degree(edges);
        let edge_degree = stat_at_edge_ends(edges, &degrees).expect("one degree per node");
        let branches = find_branches(edges, &degrees, None, None).expect("random trees decompose");
        let weights = branch_weight(branches.as_slice(), graph.weights()).expect("weights cover edges");
        let shapes = branch_shape(branches.as_slice(), edges, &edge_degree, &weights, &points)
            .expect("random points never coincide");
        for value in shapes {
            prop_assert!(value > 0.0);
            prop_assert!(value <= 1.0 + 1e-9);
        }
    }
}
