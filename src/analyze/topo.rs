//! Topological sort of the model graph.

use std::collections::VecDeque;

use crate::error::GraphError;
use crate::parse::graph::ModelGraph;

/// Returns node ids in execution order (Kahn's algorithm).
///
/// Ties are broken by declaration: the queue starts with the in-degree-zero
/// nodes in the order they were declared, and each node's successors are
/// released in edge declaration order. The same document therefore always
/// yields the same order.
pub fn topo_sort(graph: &ModelGraph) -> Result<Vec<String>, GraphError> {
    let g = &graph.graph;
    let mut in_degree: Vec<usize> = g
        .node_indices()
        .map(|idx| graph.predecessor_indices(idx).len())
        .collect();

    let mut queue: VecDeque<_> = g
        .node_indices()
        .filter(|idx| in_degree[idx.index()] == 0)
        .collect();
    let mut order = Vec::with_capacity(g.node_count());

    while let Some(idx) = queue.pop_front() {
        order.push(graph.node(idx).id().to_string());
        for next in graph.successor_indices(idx) {
            in_degree[next.index()] -= 1;
            if in_degree[next.index()] == 0 {
                queue.push_back(next);
            }
        }
    }

    if order.len() < g.node_count() {
        return Err(GraphError::schedule("T001", "Cannot perform topological sort"));
    }
    Ok(order)
}
