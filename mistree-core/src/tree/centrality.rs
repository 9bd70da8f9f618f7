//! Leaf-peeling centrality.

use tracing::instrument;

use crate::error::{MistreeError, Result};
use crate::graph::EdgeIndex;

/// Computes the leaf-peeling centrality of every node of a tree.
///
/// Every node starts at 1. Each round finds the current leaves, adds each
/// leaf's value into its single neighbour and removes the leaf edges. When one
/// edge is left, the endpoint with the smaller value is merged into the other.
/// Leaves keep a centrality of 1 and the largest value lands on an internal
/// node once the tree has three or more nodes.
///
/// # Errors
/// Returns [`MistreeError::PeelingDisconnected`] when the edges do not form a
/// tree: two leaves joined while other edges remain, or a round in which no
/// leaf is found.
///
/// # Examples
/// ```
/// use mistree_core::graph::EdgeIndex;
/// use mistree_core::tree::get_centrality;
///
/// let edges = EdgeIndex::new(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]).expect("valid edges");
/// let centrality = get_centrality(&edges).expect("edges form a tree");
/// assert_eq!(centrality, vec![1.0, 2.0, 5.0, 2.0, 1.0]);
/// ```
#[instrument(
    name = "tree.get_centrality",
    err,
    skip(edges),
    fields(nodes = edges.node_count(), edges = edges.len()),
)]
pub fn get_centrality(edges: &EdgeIndex) -> Result<Vec<f64>> {
    let node_count = edges.node_count();
    let mut centrality = vec![1.0_f64; node_count];
    let mut active: Vec<(usize, (usize, usize))> = edges.iter().enumerate().collect();
    let mut degree = vec![0_usize; node_count];

    while active.len() > 1 {
        degree.fill(0);
        for node in active.iter().flat_map(|&(_, (i, j))| [i, j]) {
            if let Some(count) = degree.get_mut(node) {
                *count += 1;
            }
        }
        let is_leaf = |node: usize| degree.get(node) == Some(&1);

        if let Some(&(edge, _)) = active
            .iter()
            .find(|&&(_, (i, j))| is_leaf(i) && is_leaf(j))
        {
            return Err(MistreeError::PeelingDisconnected {
                remaining: active.len(),
                edge,
            });
        }

        for &(_, (i, j)) in &active {
            if is_leaf(i) {
                absorb(&mut centrality, j, i);
            }
        }
        for &(_, (i, j)) in &active {
            if is_leaf(j) {
                absorb(&mut centrality, i, j);
            }
        }

        let before = active.len();
        active.retain(|&(_, (i, j))| !is_leaf(i) && !is_leaf(j));
        if active.len() == before {
            return Err(MistreeError::PeelingDisconnected {
                remaining: before,
                edge: active.first().map_or(0, |&(edge, _)| edge),
            });
        }
    }

    if let &[(_, (a, b))] = active.as_slice() {
        let value = |node: usize| centrality.get(node).copied().unwrap_or(0.0);
        if value(b) >= value(a) {
            absorb(&mut centrality, b, a);
        } else {
            absorb(&mut centrality, a, b);
        }
    }
    Ok(centrality)
}

/// Adds the centrality of `from` into `into`.
#[expect(clippy::float_arithmetic, reason = "peeling accumulates leaf values")]
fn absorb(centrality: &mut [f64], into: usize, from: usize) {
    let Some(&value) = centrality.get(from) else {
        return;
    };
    if let Some(slot) = centrality.get_mut(into) {
        *slot += value;
    }
}
