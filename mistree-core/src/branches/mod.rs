//! Branch decomposition of a tree.
//!
//! A branch is a maximal chain of edges joined through degree-2 nodes. Every
//! tree edge belongs to exactly one branch: walks start at seed edges (those
//! touching a node whose degree is not 2) and follow the single onward edge of
//! each degree-2 node until they reach a leaf or a junction.

mod schedule;
mod stats;

#[cfg(test)]
mod tests;

use std::num::NonZeroUsize;

use tracing::{debug, instrument};

pub use schedule::{GridSchedule, NaiveSchedule, ScheduledSeeds, SeedSchedule};
pub use stats::{branch_edge_count, branch_end_nodes, branch_shape, branch_weight};

use crate::coords::Points;
use crate::error::{MistreeError, Result};
use crate::graph::EdgeIndex;

/// Counters describing how a branch decomposition was produced.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BranchDiagnostics {
    /// Name of the seed schedule used.
    pub strategy: &'static str,
    /// Seed edges that started a walk.
    pub seeds_walked: usize,
    /// Seed edges skipped because an earlier walk had already claimed them.
    pub seeds_skipped: usize,
    /// Walks that visited a node outside their seed's grid cell.
    pub cross_cell: usize,
    /// Occupied grid cells, or 1 without a grid.
    pub cells: usize,
}

/// The branches of a tree in canonical order.
///
/// Each branch lists edge ids from its lower-id end edge to its other end;
/// branches are sorted by their first edge id.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Branches {
    branches: Vec<Vec<usize>>,
    diagnostics: BranchDiagnostics,
}

impl Branches {
    /// Returns the branches as lists of edge ids.
    #[must_use]
    #[rustfmt::skip]
    pub const fn as_slice(&self) -> &[Vec<usize>] { self.branches.as_slice() }

    /// Returns the number of branches.
    #[must_use]
    #[rustfmt::skip]
    pub const fn len(&self) -> usize { self.branches.len() }

    /// Returns `true` when there are no branches.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_empty(&self) -> bool { self.branches.is_empty() }

    /// Returns how the decomposition was produced.
    #[must_use]
    #[rustfmt::skip]
    pub const fn diagnostics(&self) -> BranchDiagnostics { self.diagnostics }

    /// Consumes the decomposition and returns the edge-id lists.
    #[must_use]
    pub fn into_inner(self) -> Vec<Vec<usize>> {
        self.branches
    }
}

/// Partitions the edges of a tree into branches.
///
/// Without `grid_subdivisions` seeds are walked in edge-id order. With it,
/// nodes are bucketed into a grid over `points` and seeds are walked cell by
/// cell; the branches are the same either way.
///
/// # Errors
/// Returns [`MistreeError::MissingCoordinates`] when a grid is requested
/// without points, plus every error of [`find_branches_with`].
///
/// # Examples
/// ```
/// use mistree_core::branches::find_branches;
/// use mistree_core::graph::{EdgeIndex, degree};
///
/// let edges = EdgeIndex::new(5, &[(0, 1), (1, 2), (2, 3), (1, 4)]).expect("valid edges");
/// let branches = find_branches(&edges, &degree(&edges), None, None).expect("edges form a tree");
/// assert_eq!(branches.as_slice(), &[vec![0], vec![1, 2], vec![3]]);
/// ```
pub fn find_branches(
    edges: &EdgeIndex,
    degree: &[usize],
    points: Option<&Points>,
    grid_subdivisions: Option<NonZeroUsize>,
) -> Result<Branches> {
    let Some(subdivisions) = grid_subdivisions else {
        return find_branches_with(edges, degree, &NaiveSchedule);
    };
    let located = points.ok_or(MistreeError::MissingCoordinates)?;
    find_branches_with(edges, degree, &GridSchedule::new(located, subdivisions))
}

/// Partitions the edges of a tree into branches, walking seeds in the order
/// chosen by `schedule`.
///
/// # Errors
/// Returns [`MistreeError::LengthMismatch`] unless `degree` has one value per
/// node, [`MistreeError::DegreeMismatch`] when a degree disagrees with the
/// edge list and [`MistreeError::MalformedTree`] when a walk revisits an edge,
/// runs longer than the edge count or edges are left unassigned.
#[instrument(
    name = "tree.find_branches",
    err,
    skip(edges, degree, schedule),
    fields(nodes = edges.node_count(), edges = edges.len(), strategy = schedule.name()),
)]
pub fn find_branches_with<S>(edges: &EdgeIndex, degree: &[usize], schedule: &S) -> Result<Branches>
where
    S: SeedSchedule + ?Sized,
{
    let incidence = Incidence::new(edges, degree)?;
    let budget = edges.len();

    let mut seeds = Vec::new();
    let mut anchors = Vec::new();
    for (edge, (i, j)) in edges.iter().enumerate() {
        if !is_chain(degree, i) {
            seeds.push(edge);
            anchors.push(i);
        } else if !is_chain(degree, j) {
            seeds.push(edge);
            anchors.push(j);
        }
    }
    let ScheduledSeeds {
        order,
        node_cells,
        cells,
    } = schedule.schedule(&seeds, &anchors, edges.node_count())?;

    let mut assigned = vec![false; budget];
    let mut branches = Vec::new();
    let mut diagnostics = BranchDiagnostics {
        strategy: schedule.name(),
        cells,
        ..BranchDiagnostics::default()
    };
    for seed in order {
        if assigned.get(seed) == Some(&true) {
            diagnostics.seeds_skipped += 1;
            continue;
        }
        diagnostics.seeds_walked += 1;
        let walk = walk_from(seed, edges, degree, &incidence, &mut assigned)?;
        if node_cells
            .as_deref()
            .is_some_and(|cells| walk.leaves_cell(edges, cells))
        {
            diagnostics.cross_cell += 1;
        }
        branches.push(walk.edges);
    }

    if let Some(edge) = assigned.iter().position(|&done| !done) {
        return Err(MistreeError::MalformedTree { edge, budget });
    }

    for branch in &mut branches {
        if branch.last() < branch.first() {
            branch.reverse();
        }
    }
    branches.sort_unstable_by_key(|branch| branch.first().copied());

    record_branches(&branches, diagnostics);
    debug!(
        branches = branches.len(),
        cross_cell = diagnostics.cross_cell,
        "branch walk complete"
    );
    Ok(Branches {
        branches,
        diagnostics,
    })
}

/// Edge ids incident to each node, in CSR layout.
struct Incidence {
    offsets: Vec<usize>,
    edges: Vec<usize>,
}

impl Incidence {
    fn new(edges: &EdgeIndex, degree: &[usize]) -> Result<Self> {
        let node_count = edges.node_count();
        if degree.len() != node_count {
            return Err(MistreeError::LengthMismatch {
                what: "degree",
                expected: node_count,
                got: degree.len(),
            });
        }
        let mut counts = vec![0_usize; node_count];
        for node in edges.iter().flat_map(|(i, j)| [i, j]) {
            if let Some(count) = counts.get_mut(node) {
                *count += 1;
            }
        }
        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        let mut running = 0;
        for (node, (&counted, &claimed)) in counts.iter().zip(degree).enumerate() {
            if counted != claimed {
                return Err(MistreeError::DegreeMismatch {
                    node,
                    expected: counted,
                    got: claimed,
                });
            }
            running += counted;
            offsets.push(running);
        }
        let mut cursor = offsets.clone();
        let mut incident = vec![0_usize; running];
        for (edge, (i, j)) in edges.iter().enumerate() {
            for node in [i, j] {
                if let Some(position) = cursor.get_mut(node) {
                    if let Some(slot) = incident.get_mut(*position) {
                        *slot = edge;
                    }
                    *position += 1;
                }
            }
        }
        Ok(Self {
            offsets,
            edges: incident,
        })
    }

    fn of(&self, node: usize) -> &[usize] {
        let start = self.offsets.get(node).copied().unwrap_or(0);
        let end = self.offsets.get(node + 1).copied().unwrap_or(start);
        self.edges.get(start..end).unwrap_or(&[])
    }
}

/// One walk's edges plus the node it started from.
struct Walk {
    anchor: usize,
    edges: Vec<usize>,
}

impl Walk {
    fn leaves_cell(&self, edges: &EdgeIndex, node_cells: &[usize]) -> bool {
        let Some(home) = node_cells.get(self.anchor) else {
            return false;
        };
        self.edges
            .iter()
            .filter_map(|&edge| edges.endpoints(edge))
            .any(|(i, j)| node_cells.get(i) != Some(home) || node_cells.get(j) != Some(home))
    }
}

fn walk_from(
    seed: usize,
    edges: &EdgeIndex,
    degree: &[usize],
    incidence: &Incidence,
    assigned: &mut [bool],
) -> Result<Walk> {
    let budget = edges.len();
    let (i, j) = edges
        .endpoints(seed)
        .ok_or(MistreeError::MalformedTree { edge: seed, budget })?;
    // Step away from the non-degree-2 end; a seed with both ends off degree 2
    // is a branch on its own.
    let (anchor, mut node) = if is_chain(degree, i) { (j, i) } else { (i, j) };
    let mut previous = seed;
    let mut walk = Walk {
        anchor,
        edges: vec![seed],
    };
    if let Some(flag) = assigned.get_mut(seed) {
        *flag = true;
    }

    while is_chain(degree, node) {
        if walk.edges.len() > budget {
            return Err(MistreeError::MalformedTree { edge: previous, budget });
        }
        let Some(&next) = incidence.of(node).iter().find(|&&edge| edge != previous) else {
            return Err(MistreeError::MalformedTree { edge: previous, budget });
        };
        let was_assigned = assigned
            .get_mut(next)
            .map(|flag| core::mem::replace(flag, true));
        if was_assigned != Some(false) {
            return Err(MistreeError::MalformedTree { edge: next, budget });
        }
        walk.edges.push(next);
        let (a, b) = edges
            .endpoints(next)
            .ok_or(MistreeError::MalformedTree { edge: next, budget })?;
        node = if a == node { b } else { a };
        previous = next;
    }
    Ok(walk)
}

/// Returns `true` for a node joined to exactly two edges.
fn is_chain(degree: &[usize], node: usize) -> bool {
    degree.get(node) == Some(&2)
}

#[cfg(feature = "metrics")]
#[expect(
    clippy::cast_precision_loss,
    reason = "histogram samples are f64 and branch sizes stay far below 2^52"
)]
fn record_branches(branches: &[Vec<usize>], diagnostics: BranchDiagnostics) {
    let count = |value: usize| u64::try_from(value).unwrap_or(u64::MAX);
    metrics::counter!("mistree_branches_found").increment(count(branches.len()));
    metrics::counter!("mistree_cross_cell_walks").increment(count(diagnostics.cross_cell));
    for branch in branches {
        metrics::histogram!("mistree_branch_edges").record(branch.len() as f64);
    }
}

#[cfg(not(feature = "metrics"))]
const fn record_branches(_branches: &[Vec<usize>], _diagnostics: BranchDiagnostics) {}
