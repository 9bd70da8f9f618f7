//! Breadth-first rooting of a spanning tree.

use std::collections::VecDeque;

use tracing::{debug, instrument};

use super::groups::find_groups;
use crate::error::{MistreeError, Result};
use crate::graph::Adjacency;

/// A spanning tree rooted at one node, stored as an arena indexed by node id.
///
/// Every node except the root has a parent. Children are listed in the order
/// the traversal discovered them; a node with no children reports `None`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RootedTree {
    root: usize,
    parent: Vec<Option<usize>>,
    depth: Vec<usize>,
    child_spans: Vec<(usize, usize)>,
    children: Vec<usize>,
    order: Vec<usize>,
}

impl RootedTree {
    /// Returns the root node.
    #[must_use]
    #[rustfmt::skip]
    pub const fn root(&self) -> usize { self.root }

    /// Returns the number of nodes in the tree.
    #[must_use]
    #[rustfmt::skip]
    pub const fn node_count(&self) -> usize { self.parent.len() }

    /// Returns the parent of `node`, or `None` for the root and for ids out of
    /// range.
    #[must_use]
    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parent.get(node).copied().flatten()
    }

    /// Returns the children of `node`, or `None` when it has none.
    #[must_use]
    pub fn children(&self, node: usize) -> Option<&[usize]> {
        let &(start, len) = self.child_spans.get(node)?;
        if len == 0 {
            return None;
        }
        self.children.get(start..start + len)
    }

    /// Returns the number of edges between `node` and the root.
    #[must_use]
    pub fn depth(&self, node: usize) -> Option<usize> {
        self.depth.get(node).copied()
    }

    /// Returns the nodes in breadth-first order from the root.
    #[must_use]
    #[rustfmt::skip]
    pub const fn order(&self) -> &[usize] { self.order.as_slice() }

    /// Re-roots the same undirected tree at `new_root`.
    ///
    /// Each node's new children are its previous children followed by its
    /// previous parent, minus whichever of those is now its parent.
    ///
    /// # Errors
    /// Returns [`MistreeError::InvalidNodeId`] when `new_root` is out of range.
    pub fn rerooted(&self, new_root: usize) -> Result<Self> {
        let node_count = self.node_count();
        if new_root >= node_count {
            return Err(MistreeError::InvalidNodeId {
                node: new_root,
                node_count,
            });
        }
        let tree = traverse(node_count, new_root, |node, out| {
            out.extend_from_slice(self.children(node).unwrap_or(&[]));
            out.extend(self.parent(node));
        });
        Ok(tree)
    }
}

/// Roots `adjacency` at `root` with a breadth-first traversal.
///
/// Each node's neighbours that have not been seen yet, in adjacency order,
/// become its children. With `validate` set, the component count is checked
/// before traversal; without it, unreachable nodes are still detected once the
/// traversal finishes.
///
/// # Errors
/// Returns [`MistreeError::EmptyGraph`] for an adjacency without nodes,
/// [`MistreeError::InvalidNodeId`] when `root` is out of range and
/// [`MistreeError::NotSpanning`] when the graph has more than one connected
/// group.
///
/// # Examples
/// ```
/// use mistree_core::graph::{EdgeIndex, build_adjacency};
/// use mistree_core::tree::build_tree;
///
/// let edges = EdgeIndex::new(4, &[(0, 1), (1, 2), (1, 3)]).expect("valid edges");
/// let adjacency = build_adjacency(&edges, &[1.0; 3], 4).expect("valid graph");
/// let tree = build_tree(&adjacency, 0, true).expect("spanning tree");
/// assert_eq!(tree.children(1), Some(&[2, 3][..]));
/// assert_eq!(tree.parent(3), Some(1));
/// assert_eq!(tree.children(2), None);
/// ```
#[instrument(
    name = "tree.build_tree",
    err,
    skip(adjacency),
    fields(nodes = adjacency.node_count()),
)]
pub fn build_tree(adjacency: &Adjacency, root: usize, validate: bool) -> Result<RootedTree> {
    let node_count = adjacency.node_count();
    if node_count == 0 {
        return Err(MistreeError::EmptyGraph);
    }
    if root >= node_count {
        return Err(MistreeError::InvalidNodeId {
            node: root,
            node_count,
        });
    }
    if validate {
        let groups = find_groups(adjacency, root)?;
        if !groups.is_spanning() {
            return Err(MistreeError::NotSpanning {
                groups: groups.count(),
            });
        }
    }

    let tree = traverse(node_count, root, |node, out| {
        out.extend_from_slice(adjacency.neighbours(node));
    });
    if tree.order.len() < node_count {
        let groups = find_groups(adjacency, root)?;
        return Err(MistreeError::NotSpanning {
            groups: groups.count(),
        });
    }
    debug!(root, depth = tree.depth.iter().max().copied().unwrap_or(0), "rooted tree");
    Ok(tree)
}

/// Breadth-first traversal over the neighbour lists written by `neighbours`.
///
/// Nodes are marked when discovered, so each is attached to the first node
/// that reaches it.
fn traverse(
    node_count: usize,
    root: usize,
    mut neighbours: impl FnMut(usize, &mut Vec<usize>),
) -> RootedTree {
    let mut parent = vec![None; node_count];
    let mut depth = vec![0_usize; node_count];
    let mut seen = vec![false; node_count];
    let mut child_spans = vec![(0_usize, 0_usize); node_count];
    let mut children = Vec::with_capacity(node_count.saturating_sub(1));
    let mut order = Vec::with_capacity(node_count);
    let mut frontier = VecDeque::from([root]);
    let mut scratch = Vec::new();
    if let Some(flag) = seen.get_mut(root) {
        *flag = true;
    }

    while let Some(node) = frontier.pop_front() {
        order.push(node);
        scratch.clear();
        neighbours(node, &mut scratch);
        let start = children.len();
        let child_depth = depth.get(node).map_or(1, |&above| above + 1);
        for &next in &scratch {
            let Some(flag) = seen.get_mut(next) else {
                continue;
            };
            if *flag {
                continue;
            }
            *flag = true;
            if let Some(slot) = parent.get_mut(next) {
                *slot = Some(node);
            }
            if let Some(slot) = depth.get_mut(next) {
                *slot = child_depth;
            }
            children.push(next);
            frontier.push_back(next);
        }
        if let Some(span) = child_spans.get_mut(node) {
            *span = (start, children.len() - start);
        }
    }

    RootedTree {
        root,
        parent,
        depth,
        child_spans,
        children,
        order,
    }
}
