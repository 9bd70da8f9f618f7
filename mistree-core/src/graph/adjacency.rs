//! Compressed sparse row adjacency built from an edge table.

use tracing::instrument;

use super::EdgeIndex;
use crate::error::{MistreeError, Result};

/// Per-node neighbour lists in CSR layout.
///
/// The neighbours of node `v` occupy `offsets[v]..offsets[v + 1]` of the
/// `neighbours` and `weights` arrays. Each list is sorted by neighbour id and
/// holds every neighbour once.
#[derive(Clone, Debug, PartialEq)]
pub struct Adjacency {
    offsets: Vec<usize>,
    neighbours: Vec<usize>,
    weights: Vec<f64>,
}

impl Adjacency {
    /// Returns the number of nodes.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Returns the CSR row offsets (`node_count + 1` entries).
    #[must_use]
    #[rustfmt::skip]
    pub const fn offsets(&self) -> &[usize] { self.offsets.as_slice() }

    fn span(&self, node: usize) -> core::ops::Range<usize> {
        match (self.offsets.get(node), self.offsets.get(node + 1)) {
            (Some(&start), Some(&end)) => start..end,
            _ => 0..0,
        }
    }

    /// Returns the sorted neighbours of `node`, empty when out of range.
    #[must_use]
    pub fn neighbours(&self, node: usize) -> &[usize] {
        self.neighbours.get(self.span(node)).unwrap_or(&[])
    }

    /// Returns the weights aligned with [`Adjacency::neighbours`].
    #[must_use]
    pub fn weights(&self, node: usize) -> &[f64] {
        self.weights.get(self.span(node)).unwrap_or(&[])
    }

    /// Returns the number of distinct neighbours of `node`.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.span(node).len()
    }

    /// Returns the weight stored for the step `from -> to`, if adjacent.
    #[must_use]
    pub fn weight_between(&self, from: usize, to: usize) -> Option<f64> {
        let position = self.neighbours(from).binary_search(&to).ok()?;
        self.weights(from).get(position).copied()
    }

    /// Replaces every node's value with the mean over itself and its
    /// neighbours, `iterations` times.
    ///
    /// Zero iterations returns a copy of `stat`.
    ///
    /// # Errors
    /// Returns [`MistreeError::LengthMismatch`] unless `stat` has one value per
    /// node.
    ///
    /// # Examples
    /// ```
    /// use mistree_core::graph::{EdgeIndex, build_adjacency};
    ///
    /// let edges = EdgeIndex::new(3, &[(0, 1), (1, 2)]).expect("valid edges");
    /// let adjacency = build_adjacency(&edges, &[1.0, 1.0], 3).expect("valid graph");
    /// let smoothed = adjacency.smooth_stat(&[0.0, 3.0, 6.0], 1).expect("one value per node");
    /// assert_eq!(smoothed, vec![1.5, 3.0, 4.5]);
    /// ```
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "smoothing averages floating-point values over neighbour counts"
    )]
    pub fn smooth_stat(&self, stat: &[f64], iterations: usize) -> Result<Vec<f64>> {
        if stat.len() != self.node_count() {
            return Err(MistreeError::LengthMismatch {
                what: "stat",
                expected: self.node_count(),
                got: stat.len(),
            });
        }
        let mut current = stat.to_vec();
        let mut next = vec![0.0; current.len()];
        for _ in 0..iterations {
            for (node, slot) in next.iter_mut().enumerate() {
                let neighbours = self.neighbours(node);
                let value = |n: usize| current.get(n).copied().unwrap_or(0.0);
                let total: f64 = value(node) + neighbours.iter().map(|&n| value(n)).sum::<f64>();
                let count = (neighbours.len() + 1) as f64;
                *slot = total / count;
            }
            core::mem::swap(&mut current, &mut next);
        }
        Ok(current)
    }
}

/// Builds the deduplicated adjacency of an undirected weighted graph.
///
/// Each edge `(i, j, w)` contributes `j` to the list of `i` and `i` to the list
/// of `j`. A neighbour listed more than once keeps the weight of the edge that
/// introduced it first.
///
/// # Errors
/// Returns [`MistreeError::LengthMismatch`] when `weights` does not hold one
/// value per edge and [`MistreeError::InvalidNodeId`] when an edge references a
/// node at or beyond `node_count`.
#[instrument(
    name = "tree.build_adjacency",
    err,
    skip(edges, weights),
    fields(nodes = node_count, edges = edges.len()),
)]
pub fn build_adjacency(edges: &EdgeIndex, weights: &[f64], node_count: usize) -> Result<Adjacency> {
    if weights.len() != edges.len() {
        return Err(MistreeError::LengthMismatch {
            what: "weights",
            expected: edges.len(),
            got: weights.len(),
        });
    }

    let mut counts = vec![0_usize; node_count];
    for (i, j) in edges.iter() {
        for node in [i, j] {
            let slot = counts
                .get_mut(node)
                .ok_or(MistreeError::InvalidNodeId { node, node_count })?;
            *slot += 1;
        }
    }

    let mut offsets = Vec::with_capacity(node_count + 1);
    offsets.push(0);
    let mut running = 0;
    for count in &counts {
        running += count;
        offsets.push(running);
    }

    // Scatter both directions of every edge in edge-id order so each row
    // lists its entries in insertion order before sorting.
    let mut cursor: Vec<usize> = offsets.iter().take(node_count).copied().collect();
    let mut entries = vec![(0_usize, 0.0_f64); running];
    for ((i, j), &weight) in edges.iter().zip(weights) {
        scatter(&mut entries, &mut cursor, i, (j, weight));
        scatter(&mut entries, &mut cursor, j, (i, weight));
    }

    let mut compact_offsets = Vec::with_capacity(node_count + 1);
    compact_offsets.push(0);
    let mut neighbours = Vec::with_capacity(running);
    let mut compact_weights = Vec::with_capacity(running);
    for window in offsets.windows(2) {
        let &[start, end] = window else {
            continue;
        };
        let Some(row) = entries.get_mut(start..end) else {
            continue;
        };
        // Stable sort keeps the first-inserted duplicate at the front.
        row.sort_by_key(|&(neighbour, _)| neighbour);
        let mut previous = None;
        for &(neighbour, weight) in row.iter() {
            if previous == Some(neighbour) {
                continue;
            }
            previous = Some(neighbour);
            neighbours.push(neighbour);
            compact_weights.push(weight);
        }
        compact_offsets.push(neighbours.len());
    }

    Ok(Adjacency {
        offsets: compact_offsets,
        neighbours,
        weights: compact_weights,
    })
}

/// Writes `entry` at the next free slot of `node`'s row.
fn scatter(entries: &mut [(usize, f64)], cursor: &mut [usize], node: usize, entry: (usize, f64)) {
    if let Some(position) = cursor.get_mut(node) {
        if let Some(slot) = entries.get_mut(*position) {
            *slot = entry;
        }
        *position += 1;
    }
}
