//! Root paths, lowest-common-ancestor paths and their summed weights.

use super::rooted::RootedTree;
use crate::error::{MistreeError, Result};
use crate::graph::EdgeWeights;

/// Follows parent links from `node` up to the root, inclusive of both.
///
/// # Errors
/// Returns [`MistreeError::InvalidNodeId`] when `node` is out of range and
/// [`MistreeError::CycleDetected`] when the chain is longer than the tree.
///
/// # Examples
/// ```
/// use mistree_core::graph::{EdgeIndex, build_adjacency};
/// use mistree_core::tree::{build_tree, path_to_root};
///
/// let edges = EdgeIndex::new(4, &[(0, 1), (1, 2), (2, 3)]).expect("valid edges");
/// let adjacency = build_adjacency(&edges, &[1.0; 3], 4).expect("valid graph");
/// let tree = build_tree(&adjacency, 0, true).expect("spanning tree");
/// assert_eq!(path_to_root(3, &tree).expect("node in range"), vec![3, 2, 1, 0]);
/// ```
pub fn path_to_root(node: usize, tree: &RootedTree) -> Result<Vec<usize>> {
    let node_count = tree.node_count();
    if node >= node_count {
        return Err(MistreeError::InvalidNodeId { node, node_count });
    }
    let mut path = vec![node];
    let mut current = node;
    while let Some(parent) = tree.parent(current) {
        if path.len() >= node_count {
            return Err(MistreeError::CycleDetected { node });
        }
        path.push(parent);
        current = parent;
    }
    Ok(path)
}

/// Returns the tree path from `a` to `b` through their lowest common ancestor.
///
/// The path runs `a` up to the ancestor, then down to `b`. Reversing it gives
/// the path from `b` to `a`.
///
/// # Errors
/// As [`path_to_root`], plus [`MistreeError::NoCommonAncestor`] when the root
/// paths never meet.
pub fn path_between(a: usize, b: usize, tree: &RootedTree) -> Result<Vec<usize>> {
    let up_from_a = path_to_root(a, tree)?;
    let up_from_b = path_to_root(b, tree)?;

    let mut on_b_path = vec![false; tree.node_count()];
    for &node in &up_from_b {
        if let Some(flag) = on_b_path.get_mut(node) {
            *flag = true;
        }
    }
    let Some((meet, &ancestor)) = up_from_a
        .iter()
        .enumerate()
        .find(|&(_, &node)| on_b_path.get(node) == Some(&true))
    else {
        return Err(MistreeError::NoCommonAncestor { left: a, right: b });
    };
    let Some(down) = up_from_b.iter().position(|&node| node == ancestor) else {
        return Err(MistreeError::NoCommonAncestor { left: a, right: b });
    };

    let mut path: Vec<usize> = up_from_a.iter().take(meet + 1).copied().collect();
    path.extend(up_from_b.iter().take(down).rev());
    Ok(path)
}

/// Sums the weights of consecutive steps along `path`.
///
/// # Errors
/// Returns [`MistreeError::MissingEdge`] when two consecutive nodes are not
/// adjacent.
pub fn path_weight(path: &[usize], weights: &EdgeWeights) -> Result<f64> {
    path.iter()
        .zip(path.iter().skip(1))
        .map(|(&from, &to)| weights.weight(from, to))
        .sum()
}
