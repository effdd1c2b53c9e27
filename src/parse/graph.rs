//! petgraph-based directed graph wrapper for the model document.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use super::types::{GraphDocument, NodeDocument};

/// The resolved graph of one document.
///
/// Nodes with an empty id are left out, and for a repeated id only the first
/// declaration is added. Edges are added only when both endpoints resolve, so
/// every edge in `graph` is a resolved edge. Node indices follow declaration
/// order.
pub struct ModelGraph<'a> {
    pub graph: DiGraph<&'a NodeDocument, ()>,
    pub node_indices: HashMap<&'a str, NodeIndex>,
}

impl<'a> ModelGraph<'a> {
    pub fn build(document: &'a GraphDocument) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        // Add all nodes
        for node in &document.nodes {
            if node.id.is_empty() || node_indices.contains_key(node.id()) {
                continue;
            }
            let idx = graph.add_node(node);
            node_indices.insert(node.id(), idx);
        }

        // Add resolved edges
        for edge in &document.edges {
            if let (Some(&s), Some(&t)) = (
                node_indices.get(edge.source.as_str()),
                node_indices.get(edge.target.as_str()),
            ) {
                graph.add_edge(s, t, ());
            }
        }

        ModelGraph { graph, node_indices }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn node(&self, idx: NodeIndex) -> &'a NodeDocument {
        self.graph[idx]
    }

    pub fn index_of(&self, node_id: &str) -> Option<NodeIndex> {
        self.node_indices.get(node_id).copied()
    }

    /// Targets of `idx`'s outgoing edges, in edge declaration order. Parallel
    /// edges appear once per edge.
    pub fn successor_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors_in_order(idx, Direction::Outgoing)
    }

    /// Sources of `idx`'s incoming edges, in edge declaration order.
    pub fn predecessor_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors_in_order(idx, Direction::Incoming)
    }

    // petgraph walks adjacency lists newest edge first.
    fn neighbors_in_order(&self, idx: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self.graph.neighbors_directed(idx, dir).collect();
        out.reverse();
        out
    }

    pub fn successors(&self, node_id: &str) -> Vec<&'a str> {
        let Some(idx) = self.index_of(node_id) else {
            return vec![];
        };
        self.successor_indices(idx)
            .into_iter()
            .map(|n| self.graph[n].id())
            .collect()
    }

    pub fn predecessors(&self, node_id: &str) -> Vec<&'a str> {
        let Some(idx) = self.index_of(node_id) else {
            return vec![];
        };
        self.predecessor_indices(idx)
            .into_iter()
            .map(|n| self.graph[n].id())
            .collect()
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        self.index_of(node_id)
            .map(|idx| self.graph.neighbors_directed(idx, Direction::Incoming).count())
            .unwrap_or(0)
    }

    pub fn outgoing_count(&self, node_id: &str) -> usize {
        self.index_of(node_id)
            .map(|idx| self.graph.neighbors_directed(idx, Direction::Outgoing).count())
            .unwrap_or(0)
    }
}
