use mistree_core::{AnalysisConfig, EdgeIndex, Graph, MstAnalysis, Points};

/// Lays `pairs` out on the x axis with unit edge weights.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "fixture coordinates are small node ids"
)]
pub fn line_analysis(node_count: usize, pairs: &[(usize, usize)], config: AnalysisConfig) -> MstAnalysis {
    let edges = EdgeIndex::new(node_count, pairs).expect("fixture edges are valid");
    let weights = vec![1.0; edges.len()];
    let graph = Graph::new(edges, weights).expect("unit weights are valid");
    let x = (0..node_count).map(|node| node as f64).collect();
    let points = Points::planar(x, vec![0.0; node_count]).expect("fixture points are finite");
    MstAnalysis::new(graph, points, config).expect("one point per node")
}
