//! Graph-level validation phase, run before scheduling.
//!
//! Validates every node against the catalog, then the graph structure.

pub mod node_rules;
pub mod structural;

use crate::error::GraphError;
use crate::parse::graph::ModelGraph;
use crate::parse::types::{GraphDocument, NodeDocument};

/// Validate the entire graph (node configs + structure).
pub fn validate_graph(document: &GraphDocument, graph: &ModelGraph) -> Vec<GraphError> {
    let mut errors: Vec<GraphError> = document.nodes.iter().flat_map(validate_node).collect();
    errors.extend(structural::validate_structural(document, graph));
    errors
}

/// Validate a single node's type and parameters.
pub fn validate_node(node: &NodeDocument) -> Vec<GraphError> {
    node_rules::validate_node_config(node)
}
