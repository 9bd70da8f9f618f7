//! Seeded generators for trees and point clouds.
//!
//! The generators return plain node pairs and coordinate columns so any crate
//! in the workspace can wrap them in its own types.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Generates a uniformly attached random tree over `node_count` nodes.
///
/// Node labels, edge order and edge orientation are shuffled so the tree has
/// no structure tied to node ids.
///
/// # Examples
/// ```
/// use mistree_test_support::fixtures::random_tree_pairs;
///
/// let pairs = random_tree_pairs(10, 7);
/// assert_eq!(pairs.len(), 9);
/// assert_eq!(pairs, random_tree_pairs(10, 7));
/// ```
#[must_use]
pub fn random_tree_pairs(node_count: usize, seed: u64) -> Vec<(usize, usize)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut labels: Vec<usize> = (0..node_count).collect();
    labels.shuffle(&mut rng);

    let mut pairs: Vec<(usize, usize)> = (1..node_count)
        .map(|child| {
            let parent = rng.gen_range(0..child);
            let (a, b) = (labels[parent], labels[child]);
            if rng.gen_bool(0.5) { (a, b) } else { (b, a) }
        })
        .collect();
    pairs.shuffle(&mut rng);
    pairs
}

/// Generates a tree with long degree-2 chains hanging off a few junctions.
///
/// Each new chain starts from a random node already in the tree, so the
/// result has many branches of varied length.
#[must_use]
pub fn chained_tree_pairs(node_count: usize, max_chain: usize, seed: u64) -> Vec<(usize, usize)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut pairs = Vec::with_capacity(node_count.saturating_sub(1));
    let mut next = 1;
    while next < node_count {
        let mut tip = rng.gen_range(0..next);
        let length = rng.gen_range(1..=max_chain.max(1));
        for _ in 0..length {
            if next >= node_count {
                break;
            }
            pairs.push((tip, next));
            tip = next;
            next += 1;
        }
    }
    pairs
}

/// Returns the pairs of a path `0 - 1 - ... - (node_count - 1)`.
#[must_use]
pub fn path_pairs(node_count: usize) -> Vec<(usize, usize)> {
    (1..node_count).map(|node| (node - 1, node)).collect()
}

/// Returns the pairs of a star centred on node 0.
#[must_use]
pub fn star_pairs(node_count: usize) -> Vec<(usize, usize)> {
    (1..node_count).map(|leaf| (0, leaf)).collect()
}

/// Draws `count` planar points uniformly from the unit square.
#[must_use]
pub fn random_planar_points(count: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count).map(|_| (rng.r#gen::<f64>(), rng.r#gen::<f64>())).unzip()
}

/// Draws `count` points uniformly from the unit cube.
#[must_use]
pub fn random_spatial_points(count: usize, seed: u64) -> [Vec<f64>; 3] {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut columns = [Vec::with_capacity(count), Vec::with_capacity(count), Vec::with_capacity(count)];
    for _ in 0..count {
        for column in &mut columns {
            column.push(rng.r#gen::<f64>());
        }
    }
    columns
}
