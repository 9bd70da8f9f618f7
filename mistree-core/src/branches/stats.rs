//! Per-branch statistics: length, edge count, end nodes and shape.

use crate::coords::Points;
use crate::error::{MistreeError, Result};
use crate::graph::{EdgeIndex, EdgeStat};

/// Sums the edge weights of each branch.
///
/// # Errors
/// Returns [`MistreeError::LengthMismatch`] when a branch references an edge
/// beyond the end of `edge_weights`.
pub fn branch_weight(branches: &[Vec<usize>], edge_weights: &[f64]) -> Result<Vec<f64>> {
    branches
        .iter()
        .map(|branch| {
            branch
                .iter()
                .map(|&edge| {
                    edge_weights
                        .get(edge)
                        .copied()
                        .ok_or(MistreeError::LengthMismatch {
                            what: "edge_weights",
                            expected: edge + 1,
                            got: edge_weights.len(),
                        })
                })
                .sum()
        })
        .collect()
}

/// Counts the edges of each branch.
#[must_use]
pub fn branch_edge_count(branches: &[Vec<usize>]) -> Vec<usize> {
    branches.iter().map(Vec::len).collect()
}

/// Finds the two end nodes of each branch.
///
/// The ends are the endpoints of the first and last edges whose degree is not
/// 2. A single-edge branch ends at both endpoints of its edge.
///
/// # Errors
/// Returns [`MistreeError::DegenerateBranch`] for an empty branch and
/// [`MistreeError::MalformedTree`] when a branch references an unknown edge.
///
/// # Examples
/// ```
/// use mistree_core::branches::{branch_end_nodes, find_branches};
/// use mistree_core::graph::{EdgeIndex, degree, stat_at_edge_ends};
///
/// let edges = EdgeIndex::new(4, &[(0, 1), (1, 2), (2, 3)]).expect("valid edges");
/// let degrees = degree(&edges);
/// let edge_degree = stat_at_edge_ends(&edges, &degrees).expect("one degree per node");
/// let branches = find_branches(&edges, &degrees, None, None).expect("edges form a tree");
/// let ends = branch_end_nodes(branches.as_slice(), &edges, &edge_degree).expect("valid branches");
/// assert_eq!(ends, vec![(0, 3)]);
/// ```
pub fn branch_end_nodes(
    branches: &[Vec<usize>],
    edges: &EdgeIndex,
    edge_degree: &EdgeStat<usize>,
) -> Result<Vec<(usize, usize)>> {
    branches
        .iter()
        .enumerate()
        .map(|(index, branch)| {
            let (Some(&first), Some(&last)) = (branch.first(), branch.last()) else {
                return Err(MistreeError::DegenerateBranch { branch: index });
            };
            let (a, b) = endpoints(edges, first)?;
            if branch.len() == 1 {
                return Ok((a, b));
            }
            Ok((outer_end(edges, edge_degree, first)?, outer_end(edges, edge_degree, last)?))
        })
        .collect()
}

/// Measures how straight each branch is: the distance between its end nodes
/// divided by its summed edge weight.
///
/// Planar and spatial points use the Euclidean distance; unit-sphere points use
/// the great-circle angle. For weights equal to the geometric edge lengths the
/// result lies in `(0, 1]`.
///
/// # Errors
/// Returns [`MistreeError::LengthMismatch`] when `weights` does not hold one
/// value per branch, [`MistreeError::DegenerateBranch`] for a branch of zero
/// weight, [`MistreeError::InvalidNodeId`] when an end node has no coordinates
/// and every error of [`branch_end_nodes`].
#[expect(clippy::float_arithmetic, reason = "shape is the ratio of two lengths")]
pub fn branch_shape(
    branches: &[Vec<usize>],
    edges: &EdgeIndex,
    edge_degree: &EdgeStat<usize>,
    weights: &[f64],
    points: &Points,
) -> Result<Vec<f64>> {
    if weights.len() != branches.len() {
        return Err(MistreeError::LengthMismatch {
            what: "branch weights",
            expected: branches.len(),
            got: weights.len(),
        });
    }
    let ends = branch_end_nodes(branches, edges, edge_degree)?;
    ends.iter()
        .zip(weights)
        .enumerate()
        .map(|(branch, (&(start, end), &weight))| {
            if weight <= 0.0 {
                return Err(MistreeError::DegenerateBranch { branch });
            }
            let span = points
                .distance(start, end)
                .ok_or(MistreeError::InvalidNodeId {
                    node: start.max(end),
                    node_count: points.len(),
                })?;
            Ok(span / weight)
        })
        .collect()
}

fn endpoints(edges: &EdgeIndex, edge: usize) -> Result<(usize, usize)> {
    edges.endpoints(edge).ok_or(MistreeError::MalformedTree {
        edge,
        budget: edges.len(),
    })
}

/// Returns the endpoint of `edge` that does not continue the chain.
fn outer_end(edges: &EdgeIndex, edge_degree: &EdgeStat<usize>, edge: usize) -> Result<usize> {
    let (a, b) = endpoints(edges, edge)?;
    let (degree_a, _) = edge_degree.at(edge).ok_or(MistreeError::MalformedTree {
        edge,
        budget: edges.len(),
    })?;
    Ok(if degree_a == 2 { b } else { a })
}
