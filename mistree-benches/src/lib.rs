//! Benchmark support crate for mistree.
//!
//! Provides synthetic planar trees and parameter types used by the Criterion
//! benchmarks for branch finding, centrality and spine decomposition.

pub mod error;
pub mod params;
pub mod source;
