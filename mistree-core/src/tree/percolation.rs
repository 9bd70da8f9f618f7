//! Fixed-length self-avoiding walks over an adjacency.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

use super::paths::path_weight;
use crate::coords::Points;
use crate::error::{MistreeError, Result};
use crate::graph::{Adjacency, EdgeWeights};

/// Enumerates every walk of exactly `steps` edges that starts at `root` and
/// never revisits a node.
///
/// Walks are produced in lexicographic order of their node sequence. A walk
/// that runs out of unvisited neighbours before `steps` edges is dropped.
///
/// # Errors
/// Returns [`MistreeError::InvalidPercolationSteps`] when `steps` is zero and
/// [`MistreeError::InvalidNodeId`] when `root` is out of range.
///
/// # Examples
/// ```
/// use mistree_core::graph::{EdgeIndex, build_adjacency};
/// use mistree_core::tree::percolation_paths_from;
///
/// let edges = EdgeIndex::new(4, &[(0, 1), (1, 2), (1, 3)]).expect("valid edges");
/// let adjacency = build_adjacency(&edges, &[1.0; 3], 4).expect("valid graph");
/// let paths = percolation_paths_from(&adjacency, 0, 2).expect("valid walk request");
/// assert_eq!(paths, vec![vec![0, 1, 2], vec![0, 1, 3]]);
/// ```
pub fn percolation_paths_from(
    adjacency: &Adjacency,
    root: usize,
    steps: usize,
) -> Result<Vec<Vec<usize>>> {
    check_steps(steps)?;
    let node_count = adjacency.node_count();
    if root >= node_count {
        return Err(MistreeError::InvalidNodeId {
            node: root,
            node_count,
        });
    }
    Ok(walks_from(adjacency, root, steps))
}

/// Enumerates the walks of [`percolation_paths_from`] for every start node in
/// id order and concatenates them.
///
/// Each undirected walk therefore appears once per direction. With the
/// `parallel` feature the start nodes fan out across the rayon pool; the
/// output order is unchanged.
///
/// # Errors
/// Returns [`MistreeError::InvalidPercolationSteps`] when `steps` is zero.
#[instrument(
    name = "tree.percolation_paths",
    err,
    skip(adjacency),
    fields(nodes = adjacency.node_count()),
)]
pub fn percolation_paths(adjacency: &Adjacency, steps: usize) -> Result<Vec<Vec<usize>>> {
    check_steps(steps)?;
    let roots = 0..adjacency.node_count();

    #[cfg(feature = "parallel")]
    let per_root: Vec<Vec<Vec<usize>>> = roots
        .into_par_iter()
        .map(|root| walks_from(adjacency, root, steps))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let per_root: Vec<Vec<Vec<usize>>> = roots
        .map(|root| walks_from(adjacency, root, steps))
        .collect();

    Ok(per_root.into_iter().flatten().collect())
}

/// Sums edge weights along each walk.
///
/// # Errors
/// Returns [`MistreeError::MissingEdge`] when a walk steps between nodes that
/// share no edge.
pub fn percolation_weights(paths: &[Vec<usize>], weights: &EdgeWeights) -> Result<Vec<f64>> {
    paths.iter().map(|path| path_weight(path, weights)).collect()
}

/// Returns the first and last node of each walk.
#[must_use]
pub fn percolation_ends(paths: &[Vec<usize>]) -> Vec<(usize, usize)> {
    paths
        .iter()
        .filter_map(|path| Some((*path.first()?, *path.last()?)))
        .collect()
}

/// Measures the distance between the two ends of each walk.
///
/// # Errors
/// Returns [`MistreeError::InvalidNodeId`] when a walk references a node with
/// no coordinates.
pub fn percolation_end_distances(paths: &[Vec<usize>], points: &Points) -> Result<Vec<f64>> {
    percolation_ends(paths)
        .into_iter()
        .map(|(start, end)| {
            points
                .distance(start, end)
                .ok_or(MistreeError::InvalidNodeId {
                    node: start.max(end),
                    node_count: points.len(),
                })
        })
        .collect()
}

const fn check_steps(steps: usize) -> Result<()> {
    if steps == 0 {
        Err(MistreeError::InvalidPercolationSteps { got: steps })
    } else {
        Ok(())
    }
}

/// Depth-first enumeration with an explicit stack, one `(node, cursor)` frame
/// per node on the current walk, so the walk length never touches the call
/// stack.
fn walks_from(adjacency: &Adjacency, root: usize, steps: usize) -> Vec<Vec<usize>> {
    let mut walks = Vec::new();
    let mut on_walk = vec![false; adjacency.node_count()];
    let mut frames: Vec<(usize, usize)> =
        Vec::with_capacity(steps.min(adjacency.node_count()).saturating_add(1));
    enter(&mut frames, &mut on_walk, root);

    while let Some(&(tip, cursor)) = frames.last() {
        if frames.len() > steps {
            walks.push(frames.iter().map(|&(node, _)| node).collect());
            leave(&mut frames, &mut on_walk);
            continue;
        }
        let Some(&next) = adjacency.neighbours(tip).get(cursor) else {
            leave(&mut frames, &mut on_walk);
            continue;
        };
        if let Some(frame) = frames.last_mut() {
            frame.1 = cursor + 1;
        }
        if on_walk.get(next) == Some(&false) {
            enter(&mut frames, &mut on_walk, next);
        }
    }
    walks
}

fn enter(frames: &mut Vec<(usize, usize)>, on_walk: &mut [bool], node: usize) {
    if let Some(flag) = on_walk.get_mut(node) {
        *flag = true;
    }
    frames.push((node, 0));
}

fn leave(frames: &mut Vec<(usize, usize)>, on_walk: &mut [bool]) {
    if let Some((node, _)) = frames.pop()
        && let Some(flag) = on_walk.get_mut(node)
    {
        *flag = false;
    }
}
