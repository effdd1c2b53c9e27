use nnir::catalog::{NodeKind, Params};
use nnir::parse::{EdgeDocument, GraphDocument, NodeDocument};

// =============================================================================
// Graph builders
// =============================================================================

pub fn graph(nodes: Vec<NodeDocument>, edges: &[(&str, &str)]) -> GraphDocument {
    GraphDocument {
        nodes,
        edges: edges.iter().map(|(s, t)| EdgeDocument::new(s, t)).collect(),
    }
}

/// Connect `nodes` in declaration order.
pub fn chain(nodes: Vec<NodeDocument>) -> GraphDocument {
    let ids: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();
    let edges: Vec<(&str, &str)> = ids
        .windows(2)
        .map(|pair| (pair[0].as_str(), pair[1].as_str()))
        .collect();
    graph(nodes, &edges)
}

/// Scenario graph: Input([1,784]) → Linear(784,128) → ReLU → Linear(128,10).
pub fn mlp() -> GraphDocument {
    chain(vec![
        input("input", &[1, 784]),
        linear("linear1", 784, 128),
        node("relu1", NodeKind::Relu),
        linear("linear2", 128, 10),
    ])
}

// =============================================================================
// Node builders
// =============================================================================

pub fn node(id: &str, kind: NodeKind) -> NodeDocument {
    NodeDocument::new(id, kind, Params::new())
}

pub fn input(id: &str, shape: &[usize]) -> NodeDocument {
    NodeDocument::new(id, NodeKind::Input, Params::new().with("shape", shape.to_vec()))
}

pub fn linear(id: &str, in_features: i64, out_features: i64) -> NodeDocument {
    NodeDocument::new(
        id,
        NodeKind::Linear,
        Params::new()
            .with("in_features", in_features)
            .with("out_features", out_features),
    )
}

pub fn conv2d(id: &str, in_channels: i64, out_channels: i64, kernel_size: i64) -> NodeDocument {
    NodeDocument::new(
        id,
        NodeKind::Conv2D,
        Params::new()
            .with("in_channels", in_channels)
            .with("out_channels", out_channels)
            .with("kernel_size", kernel_size),
    )
}

pub fn with_param(mut node: NodeDocument, name: &str, value: impl Into<serde_json::Value>) -> NodeDocument {
    node.data.params = node.data.params.with(name, value);
    node
}

// =============================================================================
// Assertions
// =============================================================================

pub fn assert_has_error(errors: &[String], needle: &str) {
    assert!(
        errors.iter().any(|e| e.contains(needle)),
        "Expected an error containing {:?}, got: {:?}",
        needle,
        errors
    );
}

/// Every edge goes forward in `order`.
pub fn assert_topological(document: &GraphDocument, order: &[String]) {
    let position = |id: &str| order.iter().position(|o| o == id);
    for edge in &document.edges {
        let (Some(s), Some(t)) = (position(&edge.source), position(&edge.target)) else {
            panic!("edge {} -> {} not covered by order {:?}", edge.source, edge.target, order);
        };
        assert!(s < t, "edge {} -> {} runs backwards in {:?}", edge.source, edge.target, order);
    }
}
