//! Mistree core library: statistics of minimum spanning trees.
//!
//! Given the edges of a spanning tree over planar, spatial or unit-sphere
//! points, the crate derives node degree, branches (maximal chains through
//! degree-2 nodes) with their lengths and shapes, leaf-peeling centrality and
//! a hierarchical spine decomposition. [`MstAnalysis`] drives the common
//! pipeline; the modules expose each stage on its own.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod analysis;
pub mod branches;
pub mod coords;
mod error;
pub mod graph;
pub mod index;
pub mod tree;

#[cfg(test)]
mod test_utils;

pub use crate::{
    analysis::{AnalysisConfig, AnalysisConfigBuilder, MstAnalysis, MstSummary},
    branches::{BranchDiagnostics, Branches, GridSchedule, NaiveSchedule, SeedSchedule},
    coords::{AngleUnits, Mode, Points},
    error::{ErrorKind, MistreeError, MistreeErrorCode, Result},
    graph::{Adjacency, EdgeIndex, EdgeWeights, Graph},
    tree::{Groups, RootedTree, SpineDecomposition},
};
