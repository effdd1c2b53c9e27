//! Graph-level structural validation rules (S001–S005).

use std::collections::HashSet;

use petgraph::graph::NodeIndex;

use crate::catalog::{schema_for, Arity};
use crate::error::GraphError;
use crate::parse::graph::ModelGraph;
use crate::parse::types::GraphDocument;

/// Run all structural validation rules. Returns all errors found.
pub fn validate_structural(document: &GraphDocument, graph: &ModelGraph) -> Vec<GraphError> {
    let mut errors = Vec::new();

    s001_exactly_one_input(document, &mut errors);
    s002_unique_node_ids(document, &mut errors);
    s003_edges_reference_existing_nodes(document, graph, &mut errors);
    s004_input_arity(graph, &mut errors);
    s005_no_cycles(graph, &mut errors);

    errors
}

fn s001_exactly_one_input(document: &GraphDocument, errors: &mut Vec<GraphError>) {
    let input_count = document.nodes.iter().filter(|n| n.is_input()).count();
    if input_count == 0 {
        errors.push(GraphError::structure(
            "S001",
            "Graph must have at least one Input node",
            None,
        ));
    } else if input_count > 1 {
        errors.push(GraphError::structure(
            "S001",
            "Graph can only have one Input node",
            None,
        ));
    }
}

fn s002_unique_node_ids(document: &GraphDocument, errors: &mut Vec<GraphError>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for node in document.nodes.iter().filter(|n| !n.id.is_empty()) {
        if !seen.insert(node.id()) && reported.insert(node.id()) {
            errors.push(GraphError::structure(
                "S002",
                "Duplicate node id",
                Some(node.id()),
            ));
        }
    }
}

fn s003_edges_reference_existing_nodes(
    document: &GraphDocument,
    graph: &ModelGraph,
    errors: &mut Vec<GraphError>,
) {
    for edge in &document.edges {
        if graph.index_of(&edge.source).is_none() {
            errors.push(GraphError::structure(
                "S003",
                format!("Edge references unknown source node: {}", edge.source),
                None,
            ));
        } else if graph.index_of(&edge.target).is_none() {
            errors.push(GraphError::structure(
                "S003",
                format!("Edge references unknown target node: {}", edge.target),
                None,
            ));
        }
    }
}

/// Only resolved edges exist in `graph`, so dangling ones are not counted.
fn s004_input_arity(graph: &ModelGraph, errors: &mut Vec<GraphError>) {
    for idx in graph.graph.node_indices() {
        let node = graph.node(idx);
        let Some(kind) = node.kind() else {
            continue;
        };
        let Arity::Fixed(expected) = schema_for(kind).inputs else {
            continue;
        };

        let actual = graph.incoming_count(node.id());
        if expected > 0 && actual == 0 {
            errors.push(GraphError::structure(
                "S004",
                format!("{} requires {} input(s)", kind, expected),
                Some(node.id()),
            ));
        } else if actual > expected {
            errors.push(GraphError::structure(
                "S004",
                format!("{} has too many inputs ({} > {})", kind, actual, expected),
                Some(node.id()),
            ));
        }
    }
}

fn s005_no_cycles(graph: &ModelGraph, errors: &mut Vec<GraphError>) {
    if has_cycle(graph) {
        errors.push(GraphError::structure(
            "S005",
            "Graph contains cycles (must be DAG)",
            None,
        ));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    OnPath,
    Done,
}

/// Depth-first search from every unvisited node, tracking the nodes on the
/// current path. Reaching a node that is still on the path closes a cycle.
pub fn has_cycle(graph: &ModelGraph) -> bool {
    let g = &graph.graph;
    let mut state = vec![Visit::Unvisited; g.node_count()];

    for start in g.node_indices() {
        if state[start.index()] != Visit::Unvisited {
            continue;
        }
        state[start.index()] = Visit::OnPath;
        let mut stack: Vec<(NodeIndex, _)> = vec![(start, g.neighbors(start).detach())];

        while let Some((node, walker)) = stack.last_mut() {
            let node = *node;
            match walker.next_node(g) {
                Some(next) => match state[next.index()] {
                    Visit::OnPath => return true,
                    Visit::Unvisited => {
                        state[next.index()] = Visit::OnPath;
                        stack.push((next, g.neighbors(next).detach()));
                    }
                    Visit::Done => {}
                },
                None => {
                    state[node.index()] = Visit::Done;
                    stack.pop();
                }
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{NodeKind, Params};
    use crate::parse::types::{EdgeDocument, NodeDocument};

    fn doc(ids: &[&str], edges: &[(&str, &str)]) -> GraphDocument {
        GraphDocument {
            nodes: ids
                .iter()
                .map(|id| NodeDocument::new(id, NodeKind::Relu, Params::new()))
                .collect(),
            edges: edges.iter().map(|(s, t)| EdgeDocument::new(s, t)).collect(),
        }
    }

    #[test]
    fn chain_has_no_cycle() {
        let d = doc(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        assert!(!has_cycle(&ModelGraph::build(&d)));
    }

    #[test]
    fn diamond_has_no_cycle() {
        let d = doc(&["a", "b", "c", "d"], &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
        assert!(!has_cycle(&ModelGraph::build(&d)));
    }

    #[test]
    fn back_edge_is_a_cycle() {
        let d = doc(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "b")]);
        assert!(has_cycle(&ModelGraph::build(&d)));
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let d = doc(&["a"], &[("a", "a")]);
        assert!(has_cycle(&ModelGraph::build(&d)));
    }

    #[test]
    fn cycle_in_disconnected_component_is_found() {
        let d = doc(&["a", "b", "x", "y"], &[("a", "b"), ("x", "y"), ("y", "x")]);
        assert!(has_cycle(&ModelGraph::build(&d)));
    }

    #[test]
    fn dangling_edges_are_ignored() {
        let d = doc(&["a", "b"], &[("a", "b"), ("b", "ghost"), ("ghost", "a")]);
        assert!(!has_cycle(&ModelGraph::build(&d)));
    }
}
