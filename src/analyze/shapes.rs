//! Shape inference over an execution order.

use std::collections::BTreeMap;
use std::slice;

use crate::catalog::{shape_transfer, NodeKind, Shape};
use crate::error::GraphError;
use crate::parse::graph::ModelGraph;

/// Inferred output shape per node id.
pub type ShapeMap = BTreeMap<String, Shape>;

/// Propagate shapes from the `Input` node along `order`.
///
/// Each non-input node takes the shape of its first predecessor (by edge
/// declaration order). Nodes whose predecessor has no shape are skipped, and
/// a failing transfer becomes an error for that node without stopping the
/// pass.
pub fn infer_shapes(graph: &ModelGraph, order: &[String]) -> (ShapeMap, Vec<GraphError>) {
    let mut shapes = ShapeMap::new();
    let mut errors = Vec::new();

    for node_id in order {
        let Some(idx) = graph.index_of(node_id) else {
            continue;
        };
        let node = graph.node(idx);
        let Some(kind) = node.kind() else {
            continue;
        };

        let result = if kind == NodeKind::Input {
            shape_transfer(kind, &[], node.params())
        } else {
            let Some(&pred) = graph.predecessor_indices(idx).first() else {
                continue;
            };
            let Some(input) = shapes.get(graph.node(pred).id()) else {
                continue;
            };
            shape_transfer(kind, slice::from_ref(input), node.params())
        };

        match result {
            Ok(shape) => {
                shapes.insert(node_id.clone(), shape);
            }
            Err(e) => errors.push(GraphError::shape(
                "I001",
                format!("Shape inference failed - {}", e),
                node_id,
            )),
        }
    }

    (shapes, errors)
}
