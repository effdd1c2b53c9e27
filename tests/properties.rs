//! Property tests over randomly wired graphs.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use nnir::analyze::topo_sort;
use nnir::catalog::NodeKind;
use nnir::parse::{GraphDocument, ModelGraph};
use nnir::validate::structural::has_cycle;
use proptest::prelude::*;

/// `n` nodes: an Input followed by variadic Add nodes, wired by `edges`.
fn wired(n: usize, edges: &[(usize, usize)]) -> GraphDocument {
    let ids: Vec<String> = (0..n).map(|i| format!("n{}", i)).collect();
    let nodes = ids
        .iter()
        .enumerate()
        .map(|(i, id)| if i == 0 { input(id, &[1, 4]) } else { node(id, NodeKind::Add) })
        .collect();
    let pairs: Vec<(&str, &str)> = edges
        .iter()
        .map(|&(s, t)| (ids[s].as_str(), ids[t].as_str()))
        .collect();
    graph(nodes, &pairs)
}

fn arb_graph() -> impl Strategy<Value = GraphDocument> {
    (1usize..8)
        .prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..16)))
        .prop_map(|(n, edges)| wired(n, &edges))
}

/// Edges only run from lower to higher index, so the graph is acyclic.
fn arb_dag() -> impl Strategy<Value = GraphDocument> {
    (2usize..8)
        .prop_flat_map(|n| (Just(n), prop::collection::vec((0..n - 1, 1..n), 0..16)))
        .prop_map(|(n, edges)| {
            let forward: Vec<(usize, usize)> = edges.into_iter().filter(|(s, t)| s < t).collect();
            wired(n, &forward)
        })
}

proptest! {
    #[test]
    fn cycle_check_agrees_with_scheduler(document in arb_graph()) {
        let graph = ModelGraph::build(&document);
        prop_assert_eq!(has_cycle(&graph), topo_sort(&graph).is_err());
    }

    #[test]
    fn schedule_covers_every_node_once(document in arb_dag()) {
        let graph = ModelGraph::build(&document);
        let order = topo_sort(&graph).unwrap();
        let mut sorted = order.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), document.nodes.len());
        assert_topological(&document, &order);
    }

    #[test]
    fn acyclic_single_input_graphs_are_valid(document in arb_dag()) {
        let result = nnir::validate(&document);
        prop_assert!(result.valid, "{:?}", result.errors);
        prop_assert_eq!(result.total_params, 0);
    }

    #[test]
    fn invalid_graphs_report_no_params(document in arb_graph()) {
        let result = nnir::validate(&document);
        if !result.valid {
            prop_assert_eq!(result.total_params, 0);
            prop_assert!(!result.errors.is_empty());
        }
    }

    #[test]
    fn validation_is_deterministic(document in arb_graph()) {
        let first = nnir::analyze(&document);
        let second = nnir::analyze(&document);
        prop_assert_eq!(first.errors(), second.errors());
        prop_assert_eq!(first.execution_order, second.execution_order);
        prop_assert_eq!(first.shapes, second.shapes);
    }
}
