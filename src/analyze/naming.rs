//! Layer attribute names shown in the editor and used by the emitter.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::NodeKind;
use crate::parse::graph::ModelGraph;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerName {
    pub node_id: String,
    pub layer_name: String,
}

/// Name every layer-backed node along `order` as `<type><n>`, numbering each
/// kind from 1. Functional kinds get no name.
pub fn layer_names(graph: &ModelGraph, order: &[String]) -> Vec<LayerName> {
    let mut counters: HashMap<NodeKind, usize> = HashMap::new();
    let mut names = Vec::new();

    for node_id in order {
        let Some(kind) = graph
            .index_of(node_id)
            .and_then(|idx| graph.node(idx).kind())
        else {
            continue;
        };
        if kind.is_functional() {
            continue;
        }
        let n = counters.entry(kind).or_insert(0);
        *n += 1;
        names.push(LayerName {
            node_id: node_id.clone(),
            layer_name: format!("{}{}", kind.type_name(), n),
        });
    }

    names
}
