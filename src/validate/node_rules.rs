//! Per-node parameter validation against the catalog.
//! SYNC NOTE: Domain checks here must track the parameter names declared in
//! `catalog/schema.rs`.

use tracing::debug;

use crate::catalog::{schema_for, NodeKind, Params};
use crate::error::GraphError;
use crate::parse::types::NodeDocument;

/// Validate a single node. Returns all errors found.
pub fn validate_node_config(node: &NodeDocument) -> Vec<GraphError> {
    let mut errors = Vec::new();

    if node.id.is_empty() {
        errors.push(GraphError::node("N001", "Node missing id", None));
        return errors;
    }
    let node_id = Some(node.id());

    let Some(kind) = node.kind() else {
        errors.push(GraphError::node(
            "N002",
            format!("Invalid node type {}", node.type_name),
            node_id,
        ));
        return errors;
    };

    let schema = schema_for(kind);
    let params = node.params();

    for name in schema.required {
        if !params.is_set(name) {
            errors.push(GraphError::node(
                "N003",
                format!("Missing required parameter: {}", name),
                node_id,
            ));
        }
    }

    for name in params.names().filter(|n| !schema.recognizes(n)) {
        debug!(node_id = node.id(), param = name, kind = %kind, "ignoring unrecognized parameter");
    }

    match kind {
        NodeKind::Linear => {
            check_positive(params, "in_features", node_id, &mut errors);
            check_positive(params, "out_features", node_id, &mut errors);
        }
        NodeKind::Conv2D => {
            check_positive(params, "in_channels", node_id, &mut errors);
            check_positive(params, "out_channels", node_id, &mut errors);
            check_positive(params, "kernel_size", node_id, &mut errors);
        }
        NodeKind::Dropout => {
            if let Some(value) = params.get("p") {
                match value.as_f64() {
                    Some(p) if (0.0..1.0).contains(&p) => {}
                    Some(_) => errors.push(GraphError::node(
                        "N004",
                        "dropout probability must be in [0, 1)",
                        node_id,
                    )),
                    None => errors.push(not_a_number("p", node_id)),
                }
            }
        }
        _ => {}
    }

    errors
}

/// A parameter that is set must be an integer greater than zero. Absence is
/// reported by the required-parameter check.
fn check_positive(params: &Params, name: &str, node_id: Option<&str>, errors: &mut Vec<GraphError>) {
    let Some(value) = params.get(name) else {
        return;
    };
    if !value.is_number() {
        errors.push(not_a_number(name, node_id));
        return;
    }
    if !params.integer(name).is_some_and(|n| n > 0) {
        errors.push(GraphError::node(
            "N004",
            format!("{} must be a positive integer", name),
            node_id,
        ));
    }
}

fn not_a_number(name: &str, node_id: Option<&str>) -> GraphError {
    GraphError::node("N004", format!("{} must be a number", name), node_id)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn node(value: serde_json::Value) -> NodeDocument {
        serde_json::from_value(value).unwrap()
    }

    fn messages(node: &NodeDocument) -> Vec<String> {
        validate_node_config(node).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn valid_linear_has_no_errors() {
        let n = node(json!({"id": "l1", "type": "linear", "data": {"params": {"in_features": 4, "out_features": 2}}}));
        assert!(messages(&n).is_empty());
    }

    #[test]
    fn missing_id_short_circuits() {
        let n = node(json!({"type": "nonsense"}));
        assert_eq!(messages(&n), vec!["Node missing id"]);
    }

    #[test]
    fn unknown_type_skips_param_checks() {
        let n = node(json!({"id": "x", "type": "transformer", "data": {"params": {"in_features": -1}}}));
        assert_eq!(messages(&n), vec!["Node x: Invalid node type transformer"]);
    }

    #[test]
    fn null_required_param_is_missing() {
        let n = node(json!({"id": "l1", "type": "linear", "data": {"params": {"in_features": 4, "out_features": null}}}));
        assert_eq!(messages(&n), vec!["Node l1: Missing required parameter: out_features"]);
    }

    #[test]
    fn conv2d_domain_checks() {
        let n = node(json!({"id": "c", "type": "conv2d", "data": {"params": {"in_channels": 0, "out_channels": 8, "kernel_size": "3"}}}));
        assert_eq!(
            messages(&n),
            vec!["Node c: in_channels must be a positive integer", "Node c: kernel_size must be a number"]
        );
    }

    #[test]
    fn dropout_probability_range() {
        let ok = node(json!({"id": "d", "type": "dropout", "data": {"params": {"p": 0.0}}}));
        assert!(messages(&ok).is_empty());
        let defaulted = node(json!({"id": "d", "type": "dropout"}));
        assert!(messages(&defaulted).is_empty());
        let bad = node(json!({"id": "d", "type": "dropout", "data": {"params": {"p": 1.0}}}));
        assert_eq!(messages(&bad), vec!["Node d: dropout probability must be in [0, 1)"]);
    }

    #[test]
    fn input_requires_shape() {
        let n = node(json!({"id": "in", "type": "input", "data": {"params": {}}}));
        assert_eq!(messages(&n), vec!["Node in: Missing required parameter: shape"]);
    }
}
