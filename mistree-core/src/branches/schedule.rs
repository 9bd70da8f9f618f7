//! Seed orderings for branch walking.
//!
//! A [`SeedSchedule`] decides the order in which seed edges are walked. The
//! branches found never depend on it; the order only changes which walks
//! start first and, for [`GridSchedule`], how many leave their seed's cell.

use std::num::NonZeroUsize;

use crate::coords::Points;
use crate::error::{MistreeError, Result};

/// Seed edges in walking order, with optional cell labels for nodes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScheduledSeeds {
    /// Seed edge ids in the order they are walked.
    pub order: Vec<usize>,
    /// Dense cell label of every node, when the schedule buckets space.
    pub node_cells: Option<Vec<usize>>,
    /// Number of occupied cells.
    pub cells: usize,
}

/// Orders the seed edges handed to the branch walker.
pub trait SeedSchedule {
    /// Short name recorded in spans and diagnostics.
    fn name(&self) -> &'static str;

    /// Orders `seeds`, given the non-degree-2 node each seed is anchored at.
    ///
    /// `seeds` arrive in edge-id order and `anchors[k]` belongs to
    /// `seeds[k]`. `node_count` is the number of nodes in the graph.
    ///
    /// # Errors
    /// Implementations report inputs they cannot schedule, such as
    /// coordinates that do not cover every node.
    fn schedule(&self, seeds: &[usize], anchors: &[usize], node_count: usize) -> Result<ScheduledSeeds>;
}

/// Walks seeds in edge-id order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NaiveSchedule;

impl SeedSchedule for NaiveSchedule {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn schedule(&self, seeds: &[usize], _anchors: &[usize], _node_count: usize) -> Result<ScheduledSeeds> {
        Ok(ScheduledSeeds {
            order: seeds.to_vec(),
            node_cells: None,
            cells: 1,
        })
    }
}

/// Buckets nodes into a regular grid over the bounding box of the points and
/// walks seeds cell by cell.
///
/// Each axis is split into `subdivisions` equal intervals. Seeds are grouped
/// by the cell of their anchor node; within a cell they keep edge-id order.
///
/// The grid only reorders seeds and lets the walker count walks that leave
/// their seed's cell (`cross_cell` in [`crate::BranchDiagnostics`]). It does
/// not make branch finding faster: the walker already looks up the edges of a
/// node in constant time, so there is nothing left for spatial locality to
/// save.
#[derive(Clone, Copy, Debug)]
pub struct GridSchedule<'a> {
    points: &'a Points,
    subdivisions: NonZeroUsize,
}

impl<'a> GridSchedule<'a> {
    /// Creates a grid schedule over `points`.
    #[must_use]
    pub const fn new(points: &'a Points, subdivisions: NonZeroUsize) -> Self {
        Self {
            points,
            subdivisions,
        }
    }

    /// Returns the number of intervals per axis.
    #[must_use]
    #[rustfmt::skip]
    pub const fn subdivisions(&self) -> NonZeroUsize { self.subdivisions }

    /// Labels every node with a dense id for its occupied cell.
    fn node_cells(&self, node_count: usize) -> Result<(Vec<usize>, usize)> {
        if self.points.len() != node_count {
            return Err(MistreeError::LengthMismatch {
                what: "points",
                expected: node_count,
                got: self.points.len(),
            });
        }
        let dimensions = self.points.dimensions();
        let positions: Vec<[f64; 3]> = (0..node_count)
            .filter_map(|node| self.points.position(node))
            .collect();

        let mut low = [f64::INFINITY; 3];
        let mut high = [f64::NEG_INFINITY; 3];
        for position in &positions {
            for ((lo, hi), &value) in low.iter_mut().zip(high.iter_mut()).zip(position).take(dimensions) {
                *lo = f64::min(*lo, value);
                *hi = f64::max(*hi, value);
            }
        }

        let per_axis = self.subdivisions.get();
        let coordinates: Vec<[usize; 3]> = positions
            .iter()
            .map(|position| {
                let mut cell = [0_usize; 3];
                let bounds = position.iter().zip(&low).zip(&high);
                for (slot, ((&value, &lo), &hi)) in cell.iter_mut().zip(bounds).take(dimensions) {
                    *slot = bucket(value, lo, hi, per_axis);
                }
                cell
            })
            .collect();

        let mut occupied = coordinates.clone();
        occupied.sort_unstable();
        occupied.dedup();
        let labels = coordinates
            .iter()
            .map(|cell| occupied.binary_search(cell).unwrap_or_default())
            .collect();
        Ok((labels, occupied.len()))
    }
}

impl SeedSchedule for GridSchedule<'_> {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn schedule(&self, seeds: &[usize], anchors: &[usize], node_count: usize) -> Result<ScheduledSeeds> {
        let (node_cells, cells) = self.node_cells(node_count)?;
        let mut ranked: Vec<(usize, usize)> = seeds
            .iter()
            .zip(anchors)
            .map(|(&seed, &anchor)| (node_cells.get(anchor).copied().unwrap_or_default(), seed))
            .collect();
        ranked.sort_unstable();
        Ok(ScheduledSeeds {
            order: ranked.into_iter().map(|(_, seed)| seed).collect(),
            node_cells: Some(node_cells),
            cells,
        })
    }
}

/// Maps `value` to one of `per_axis` equal intervals of `[low, high]`.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the fraction is clamped to [0, 1], so the scaled value lies in [0, per_axis]"
)]
fn bucket(value: f64, low: f64, high: f64, per_axis: usize) -> usize {
    let span = high - low;
    if span <= 0.0 {
        return 0;
    }
    let fraction = ((value - low) / span).clamp(0.0, 1.0);
    ((fraction * per_axis as f64) as usize).min(per_axis - 1)
}
