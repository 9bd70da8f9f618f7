//! Staged analysis of a spanning tree.
//!
//! [`MstAnalysis`] owns the graph, its points and an [`AnalysisConfig`]. Each
//! `compute_*` stage stores its output on success and leaves earlier outputs
//! untouched on failure; stages that depend on another stage report
//! [`MistreeError::Precondition`] when run too early.

mod config;


use tracing::{debug, info, instrument, warn};

pub use config::{AnalysisConfig, AnalysisConfigBuilder};

use crate::branches::{Branches, branch_edge_count, branch_shape, branch_weight, find_branches};
use crate::coords::{Mode, Points, chord_to_angle};
use crate::error::{MistreeError, Result};
use crate::graph::{Adjacency, EdgeIndex, EdgeStat, Graph, degree, stat_at_edge_ends};
use crate::tree::{RootedTree, SpineDecomposition, build_tree, get_centrality, get_spines};

/// Headline statistics of a tree.
///
/// Produced by [`MstAnalysis::run`]. The edge and branch index are present
/// only when [`AnalysisConfig::include_index`] is set.
#[derive(Clone, Debug, PartialEq)]
pub struct MstSummary {
    degree: Vec<usize>,
    edge_length: Vec<f64>,
    branch_length: Vec<f64>,
    branch_shape: Vec<f64>,
    edge_index: Option<EdgeIndex>,
    branch_index: Option<Vec<Vec<usize>>>,
}

impl MstSummary {
    /// Degree of every node.
    #[must_use]
    #[rustfmt::skip]
    pub const fn degree(&self) -> &[usize] { self.degree.as_slice() }

    /// Length of every edge.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edge_length(&self) -> &[f64] { self.edge_length.as_slice() }

    /// Summed edge length of every branch.
    #[must_use]
    #[rustfmt::skip]
    pub const fn branch_length(&self) -> &[f64] { self.branch_length.as_slice() }

    /// End-to-end distance over length for every branch.
    #[must_use]
    #[rustfmt::skip]
    pub const fn branch_shape(&self) -> &[f64] { self.branch_shape.as_slice() }

    /// Edge endpoints, when requested.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edge_index(&self) -> Option<&EdgeIndex> { self.edge_index.as_ref() }

    /// Edge ids of every branch, when requested.
    #[must_use]
    pub fn branch_index(&self) -> Option<&[Vec<usize>]> {
        self.branch_index.as_deref()
    }
}

/// Runs the tree statistics pipeline over one graph.
///
/// # Examples
/// ```
/// use mistree_core::{AnalysisConfig, EdgeIndex, Graph, MstAnalysis, Points};
///
/// let edges = EdgeIndex::new(4, &[(0, 1), (1, 2), (2, 3)]).expect("valid edges");
/// let graph = Graph::new(edges, vec![1.0, 1.0, 1.0]).expect("valid weights");
/// let points = Points::planar(vec![0.0, 1.0, 2.0, 3.0], vec![0.0; 4]).expect("valid points");
/// let mut analysis = MstAnalysis::new(graph, points, AnalysisConfig::default())
///     .expect("one point per node");
/// let summary = analysis.run().expect("path is a tree");
/// assert_eq!(summary.degree(), &[1, 2, 2, 1]);
/// assert_eq!(summary.branch_length(), &[3.0]);
/// assert_eq!(summary.branch_shape(), &[1.0]);
/// assert!(summary.branch_index().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct MstAnalysis {
    graph: Graph,
    points: Points,
    config: AnalysisConfig,
    degree: Option<Vec<usize>>,
    edge_degree: Option<EdgeStat<usize>>,
    branches: Option<Branches>,
    branch_length: Option<Vec<f64>>,
    branch_edge_count: Option<Vec<usize>>,
    branch_shape: Option<Vec<f64>>,
    adjacency: Option<Adjacency>,
    tree: Option<RootedTree>,
    centrality: Option<Vec<f64>>,
    spines: Option<SpineDecomposition>,
}

impl MstAnalysis {
    /// Prepares an analysis of `graph` whose nodes sit at `points`.
    ///
    /// With [`AnalysisConfig::angular_edge_lengths`] set and unit-sphere
    /// points, edge weights are treated as chord lengths and converted to
    /// angles. For other modes the flag is ignored with a warning.
    ///
    /// # Errors
    /// Returns [`MistreeError::LengthMismatch`] unless there is one point per
    /// node.
    pub fn new(graph: Graph, points: Points, config: AnalysisConfig) -> Result<Self> {
        if points.len() != graph.node_count() {
            warn!(
                nodes = graph.node_count(),
                points = points.len(),
                "point count does not match node count"
            );
            return Err(MistreeError::LengthMismatch {
                what: "points",
                expected: graph.node_count(),
                got: points.len(),
            });
        }
        let weighted = match (config.angular_edge_lengths(), points.mode()) {
            (true, Mode::UnitSphere) => graph.map_weights(chord_to_angle)?,
            (true, mode) => {
                warn!(
                    mode = mode.as_str(),
                    "angular edge lengths need unit-sphere points, keeping weights"
                );
                graph
            }
            (false, _) => graph,
        };
        Ok(Self {
            graph: weighted,
            points,
            config,
            degree: None,
            edge_degree: None,
            branches: None,
            branch_length: None,
            branch_edge_count: None,
            branch_shape: None,
            adjacency: None,
            tree: None,
            centrality: None,
            spines: None,
        })
    }

    /// Counts the edges incident to every node.
    pub fn compute_degree(&mut self) {
        self.degree = Some(degree(self.graph.edges()));
    }

    /// Reads the degree at both ends of every edge.
    ///
    /// # Errors
    /// Returns [`MistreeError::Precondition`] before [`Self::compute_degree`].
    pub fn compute_edge_degree(&mut self) -> Result<()> {
        let degree = require(self.degree.as_ref(), "compute_edge_degree", "compute_degree")?;
        let edge_degree = stat_at_edge_ends(self.graph.edges(), degree)?;
        self.edge_degree = Some(edge_degree);
        Ok(())
    }

    /// Splits the tree into branches and measures their lengths.
    ///
    /// # Errors
    /// Returns [`MistreeError::Precondition`] before [`Self::compute_degree`]
    /// and every error of [`find_branches`].
    pub fn compute_branches(&mut self) -> Result<()> {
        let degree = require(self.degree.as_ref(), "compute_branches", "compute_degree")?;
        let branches = find_branches(
            self.graph.edges(),
            degree,
            Some(&self.points),
            self.config.grid_subdivisions(),
        )?;
        let lengths = branch_weight(branches.as_slice(), self.graph.weights())?;
        debug!(branches = branches.len(), "branches computed");
        self.branches = Some(branches);
        self.branch_length = Some(lengths);
        Ok(())
    }

    /// Counts the edges of every branch.
    ///
    /// # Errors
    /// Returns [`MistreeError::Precondition`] before [`Self::compute_branches`].
    pub fn compute_branch_edge_count(&mut self) -> Result<()> {
        let branches = require(self.branches.as_ref(), "compute_branch_edge_count", "compute_branches")?;
        self.branch_edge_count = Some(branch_edge_count(branches.as_slice()));
        Ok(())
    }

    /// Measures how straight every branch is.
    ///
    /// # Errors
    /// Returns [`MistreeError::Precondition`] before
    /// [`Self::compute_edge_degree`] or [`Self::compute_branches`], and every
    /// error of [`branch_shape`].
    pub fn compute_branch_shape(&mut self) -> Result<()> {
        let edge_degree = require(self.edge_degree.as_ref(), "compute_branch_shape", "compute_edge_degree")?;
        let branches = require(self.branches.as_ref(), "compute_branch_shape", "compute_branches")?;
        let lengths = require(self.branch_length.as_ref(), "compute_branch_shape", "compute_branches")?;
        let shape = branch_shape(
            branches.as_slice(),
            self.graph.edges(),
            edge_degree,
            lengths,
            &self.points,
        )?;
        self.branch_shape = Some(shape);
        Ok(())
    }

    /// Roots the tree at the configured node.
    ///
    /// # Errors
    /// Returns every error of [`build_tree`].
    pub fn compute_tree(&mut self) -> Result<()> {
        let adjacency = self.graph.adjacency()?;
        let tree = build_tree(&adjacency, self.config.root(), self.config.validate())?;
        self.adjacency = Some(adjacency);
        self.tree = Some(tree);
        Ok(())
    }

    /// Computes leaf-peeling centrality for every node.
    ///
    /// # Errors
    /// Returns every error of [`get_centrality`].
    pub fn compute_centrality(&mut self) -> Result<()> {
        self.centrality = Some(get_centrality(self.graph.edges())?);
        Ok(())
    }

    /// Decomposes the tree into spines.
    ///
    /// # Errors
    /// Returns [`MistreeError::Precondition`] before [`Self::compute_tree`] or
    /// [`Self::compute_centrality`], and every error of [`get_spines`].
    pub fn compute_spines(&mut self) -> Result<()> {
        let tree = require(self.tree.as_ref(), "compute_spines", "compute_tree")?;
        let centrality = require(self.centrality.as_ref(), "compute_spines", "compute_centrality")?;
        let spines = get_spines(tree, centrality)?;
        self.spines = Some(spines);
        Ok(())
    }

    /// Runs degree, edge degree, branches and branch shape, then summarises.
    ///
    /// # Errors
    /// Returns the first stage error. Outputs of stages that finished stay
    /// available through the accessors.
    #[instrument(
        name = "analysis.run",
        err,
        skip(self),
        fields(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            mode = self.points.mode().as_str(),
        ),
    )]
    pub fn run(&mut self) -> Result<MstSummary> {
        self.compute_degree();
        self.compute_edge_degree()?;
        self.compute_branches()?;
        self.compute_branch_shape()?;

        let summary = self.summary()?;
        info!(
            branches = summary.branch_length.len(),
            "analysis completed"
        );
        Ok(summary)
    }

    fn summary(&self) -> Result<MstSummary> {
        let degree = require(self.degree.as_ref(), "run", "compute_degree")?;
        let branch_length = require(self.branch_length.as_ref(), "run", "compute_branches")?;
        let shape = require(self.branch_shape.as_ref(), "run", "compute_branch_shape")?;
        let include_index = self.config.include_index();
        Ok(MstSummary {
            degree: degree.clone(),
            edge_length: self.graph.weights().to_vec(),
            branch_length: branch_length.clone(),
            branch_shape: shape.clone(),
            edge_index: include_index.then(|| self.graph.edges().clone()),
            branch_index: include_index
                .then(|| self.branches.as_ref().map(|b| b.as_slice().to_vec()))
                .flatten(),
        })
    }

    /// The analysed graph, with converted weights when requested.
    #[must_use]
    #[rustfmt::skip]
    pub const fn graph(&self) -> &Graph { &self.graph }

    /// Node coordinates.
    #[must_use]
    #[rustfmt::skip]
    pub const fn points(&self) -> &Points { &self.points }

    /// Settings in force.
    #[must_use]
    #[rustfmt::skip]
    pub const fn config(&self) -> AnalysisConfig { self.config }

    /// Node degrees from [`Self::compute_degree`].
    #[must_use]
    pub fn degree(&self) -> Option<&[usize]> {
        self.degree.as_deref()
    }

    /// Degree at both ends of every edge, from [`Self::compute_edge_degree`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn edge_degree(&self) -> Option<&EdgeStat<usize>> { self.edge_degree.as_ref() }

    /// Branch decomposition from [`Self::compute_branches`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn branches(&self) -> Option<&Branches> { self.branches.as_ref() }

    /// Summed edge weight of every branch.
    #[must_use]
    pub fn branch_length(&self) -> Option<&[f64]> {
        self.branch_length.as_deref()
    }

    /// Edge count of every branch.
    #[must_use]
    pub fn branch_edge_count(&self) -> Option<&[usize]> {
        self.branch_edge_count.as_deref()
    }

    /// Straightness of every branch.
    #[must_use]
    pub fn branch_shape(&self) -> Option<&[f64]> {
        self.branch_shape.as_deref()
    }

    /// Adjacency built by [`Self::compute_tree`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn adjacency(&self) -> Option<&Adjacency> { self.adjacency.as_ref() }

    /// Rooted tree from [`Self::compute_tree`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn tree(&self) -> Option<&RootedTree> { self.tree.as_ref() }

    /// Leaf-peeling centrality of every node.
    #[must_use]
    pub fn centrality(&self) -> Option<&[f64]> {
        self.centrality.as_deref()
    }

    /// Spine decomposition from [`Self::compute_spines`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn spines(&self) -> Option<&SpineDecomposition> { self.spines.as_ref() }
}

const fn require<'a, T>(
    output: Option<&'a T>,
    stage: &'static str,
    requires: &'static str,
) -> Result<&'a T> {
    match output {
        Some(value) => Ok(value),
        None => Err(MistreeError::Precondition { stage, requires }),
    }
}
