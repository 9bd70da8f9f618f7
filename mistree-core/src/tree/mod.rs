//! Rooted views of a spanning tree and the statistics read from them.
//!
//! [`find_groups`] labels connected components, [`build_tree`] roots an
//! adjacency with a breadth-first traversal, and the remaining modules walk
//! the resulting [`RootedTree`]: root and LCA paths, leaf-peeling centrality,
//! spine decomposition and fixed-length percolation walks.

mod centrality;
mod groups;
mod paths;
mod percolation;
mod rooted;
mod spine;

#[cfg(test)]
mod tests;

pub use centrality::get_centrality;
pub use groups::{Groups, find_groups};
pub use paths::{path_between, path_to_root, path_weight};
pub use percolation::{
    percolation_end_distances, percolation_ends, percolation_paths, percolation_paths_from,
    percolation_weights,
};
pub use rooted::{RootedTree, build_tree};
pub use spine::{SpineDecomposition, get_spine, get_spines};
