//! Hierarchical spine decomposition driven by centrality.

use tracing::{debug, instrument};

use super::rooted::RootedTree;
use crate::error::{MistreeError, Result};

/// Tree nodes split into ordered spines, each with a 1-based level.
///
/// The first spine is the backbone through the most central node. Every node
/// belongs to exactly one spine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpineDecomposition {
    spines: Vec<Vec<usize>>,
    levels: Vec<usize>,
}

impl SpineDecomposition {
    /// Returns the spines as node paths, backbone first.
    #[must_use]
    #[rustfmt::skip]
    pub const fn spines(&self) -> &[Vec<usize>] { self.spines.as_slice() }

    /// Returns the spine level of every node.
    #[must_use]
    #[rustfmt::skip]
    pub const fn levels(&self) -> &[usize] { self.levels.as_slice() }

    /// Returns the spine level of `node`.
    #[must_use]
    pub fn level(&self, node: usize) -> Option<usize> {
        self.levels.get(node).copied()
    }

    /// Returns the number of spines.
    #[must_use]
    #[rustfmt::skip]
    pub const fn len(&self) -> usize { self.spines.len() }

    /// Returns `true` when there are no spines.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_empty(&self) -> bool { self.spines.is_empty() }
}

/// Descends from `root`, always stepping to the most central child.
///
/// Ties go to the child listed first. The walk stops at a node without
/// children.
///
/// # Errors
/// Returns [`MistreeError::LengthMismatch`] unless `centrality` has one value
/// per node and [`MistreeError::InvalidNodeId`] when `root` is out of range.
pub fn get_spine(root: usize, tree: &RootedTree, centrality: &[f64]) -> Result<Vec<usize>> {
    check_inputs(tree, centrality)?;
    let node_count = tree.node_count();
    if root >= node_count {
        return Err(MistreeError::InvalidNodeId {
            node: root,
            node_count,
        });
    }
    Ok(descend(root, tree, centrality, &[]))
}

/// Splits a tree into spines ranked by centrality.
///
/// The backbone passes through the first node of maximal centrality `m`. It
/// descends through the most central child of `m`, then through the highest
/// ranked remaining neighbour of `m`, where ties in centrality go to the
/// lower node id. Further spines start at the most central node not yet
/// covered and descend through uncovered children; spine `k` (0-based) has
/// level `k + 1`.
///
/// # Errors
/// Returns [`MistreeError::LengthMismatch`] unless `centrality` has one value
/// per node.
///
/// # Examples
/// ```
/// use mistree_core::graph::{EdgeIndex, build_adjacency};
/// use mistree_core::tree::{build_tree, get_centrality, get_spines};
///
/// let edges = EdgeIndex::new(5, &[(0, 1), (1, 2), (2, 3), (1, 4)]).expect("valid edges");
/// let adjacency = build_adjacency(&edges, &[1.0; 4], 5).expect("valid graph");
/// let tree = build_tree(&adjacency, 0, true).expect("spanning tree");
/// let centrality = get_centrality(&edges).expect("edges form a tree");
/// let spines = get_spines(&tree, &centrality).expect("one value per node");
/// assert_eq!(spines.spines().first(), Some(&vec![3, 2, 1, 0]));
/// assert_eq!(spines.level(4), Some(2));
/// ```
#[instrument(
    name = "tree.get_spines",
    err,
    skip(tree, centrality),
    fields(nodes = tree.node_count()),
)]
pub fn get_spines(tree: &RootedTree, centrality: &[f64]) -> Result<SpineDecomposition> {
    check_inputs(tree, centrality)?;
    let node_count = tree.node_count();

    // Most central first; the stable sort keeps lower ids ahead on ties.
    let mut ranking: Vec<usize> = (0..node_count).collect();
    ranking.sort_by(|&a, &b| score(centrality, b).total_cmp(&score(centrality, a)));

    let mut levels = vec![0_usize; node_count];
    let mut spines = Vec::new();
    let Some(&centre) = ranking.first() else {
        return Ok(SpineDecomposition { spines, levels });
    };

    let centred = tree.rerooted(centre)?;
    let first = descend(centre, &centred, centrality, &levels);
    mark(&first, 1, &mut levels);
    let mut backbone: Vec<usize> = first.into_iter().rev().collect();
    // The centre is the root of `centred`, so its neighbours are its children.
    let second_seed = ranking
        .iter()
        .copied()
        .find(|&node| centred.parent(node) == Some(centre) && is_free(&levels, node));
    if let Some(seed) = second_seed {
        let second = descend(seed, &centred, centrality, &levels);
        mark(&second, 1, &mut levels);
        backbone.extend(second);
    }
    spines.push(backbone);

    for &seed in &ranking {
        if !is_free(&levels, seed) {
            continue;
        }
        let spine = descend(seed, &centred, centrality, &levels);
        mark(&spine, spines.len() + 1, &mut levels);
        spines.push(spine);
    }

    debug!(spines = spines.len(), "spine decomposition complete");
    Ok(SpineDecomposition { spines, levels })
}

const fn check_inputs(tree: &RootedTree, centrality: &[f64]) -> Result<()> {
    if centrality.len() == tree.node_count() {
        Ok(())
    } else {
        Err(MistreeError::LengthMismatch {
            what: "centrality",
            expected: tree.node_count(),
            got: centrality.len(),
        })
    }
}

/// Walks down from `start` through children whose level is still 0.
///
/// An empty `levels` slice leaves every child eligible.
fn descend(start: usize, tree: &RootedTree, centrality: &[f64], levels: &[usize]) -> Vec<usize> {
    let mut spine = vec![start];
    let mut current = start;
    while let Some(next) = most_central(tree.children(current).unwrap_or(&[]), centrality, levels) {
        spine.push(next);
        current = next;
    }
    spine
}

fn most_central(candidates: &[usize], centrality: &[f64], levels: &[usize]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for &node in candidates {
        if levels.get(node).is_some_and(|&level| level != 0) {
            continue;
        }
        if best.is_none_or(|current| score(centrality, node) > score(centrality, current)) {
            best = Some(node);
        }
    }
    best
}

fn score(centrality: &[f64], node: usize) -> f64 {
    centrality.get(node).copied().unwrap_or(f64::NEG_INFINITY)
}

fn is_free(levels: &[usize], node: usize) -> bool {
    levels.get(node) == Some(&0)
}

fn mark(spine: &[usize], level: usize, levels: &mut [usize]) {
    for &node in spine {
        if let Some(slot) = levels.get_mut(node) {
            *slot = level;
        }
    }
}
