//! Learnable parameter total for a graph.

use crate::catalog::param_count;
use crate::parse::graph::ModelGraph;

/// Sum of `param_count` over every node. Nodes of unknown type contribute
/// nothing.
pub fn total_params(graph: &ModelGraph) -> u64 {
    graph
        .graph
        .node_weights()
        .filter_map(|node| node.kind().map(|kind| param_count(kind, node.params())))
        .fold(0u64, u64::saturating_add)
}
