//! Breadth-first connected-component labelling.

use std::collections::VecDeque;

use tracing::instrument;

use crate::error::{MistreeError, Result};
use crate::graph::Adjacency;

/// Connected-component labels for every node.
///
/// Labels start at 1 for the component holding the traversal root; later
/// components are numbered in order of their lowest node id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Groups {
    labels: Vec<usize>,
    count: usize,
}

impl Groups {
    /// Returns the 1-based group label of every node.
    #[must_use]
    #[rustfmt::skip]
    pub const fn labels(&self) -> &[usize] { self.labels.as_slice() }

    /// Returns the number of groups.
    #[must_use]
    #[rustfmt::skip]
    pub const fn count(&self) -> usize { self.count }

    /// Returns `true` when every node belongs to a single group.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_spanning(&self) -> bool { self.count == 1 }
}

/// Labels the connected components of `adjacency`, starting from `root`.
///
/// # Errors
/// Returns [`MistreeError::EmptyGraph`] for an adjacency without nodes and
/// [`MistreeError::InvalidNodeId`] when `root` is out of range.
///
/// # Examples
/// ```
/// use mistree_core::graph::{EdgeIndex, build_adjacency};
/// use mistree_core::tree::find_groups;
///
/// let edges = EdgeIndex::new(4, &[(0, 1), (2, 3)]).expect("valid edges");
/// let adjacency = build_adjacency(&edges, &[1.0, 1.0], 4).expect("valid graph");
/// let groups = find_groups(&adjacency, 0).expect("root in range");
/// assert_eq!(groups.labels(), &[1, 1, 2, 2]);
/// assert_eq!(groups.count(), 2);
/// ```
#[instrument(
    name = "tree.find_groups",
    err,
    skip(adjacency),
    fields(nodes = adjacency.node_count()),
)]
pub fn find_groups(adjacency: &Adjacency, root: usize) -> Result<Groups> {
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

    let mut labels = vec![0_usize; node_count];
    let mut frontier = VecDeque::new();
    let mut count = 0;
    let mut next_seed = 0;
    let mut seed = Some(root);
    while let Some(start) = seed {
        count += 1;
        if let Some(label) = labels.get_mut(start) {
            *label = count;
        }
        frontier.push_back(start);
        while let Some(node) = frontier.pop_front() {
            for &neighbour in adjacency.neighbours(node) {
                if let Some(label) = labels.get_mut(neighbour)
                    && *label == 0
                {
                    *label = count;
                    frontier.push_back(neighbour);
                }
            }
        }
        while labels.get(next_seed).is_some_and(|&label| label != 0) {
            next_seed += 1;
        }
        seed = (next_seed < node_count).then_some(next_seed);
    }

    Ok(Groups { labels, count })
}
