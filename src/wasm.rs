//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::analyze::LayerName;
use crate::catalog::{all_schemas, NodeSchema};
use crate::check::{analyze, ValidationResult};
use crate::error::GraphError;
use crate::parse;

/// Validate a graph JSON.
/// Returns `{valid, errors, total_params, diagnostics}`.
#[wasm_bindgen]
pub fn validate_graph(json: &str) -> JsValue {
    let result = validate_graph_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_graph_inner(json: &str) -> ValidationDto {
    let analysis = match parse::parse(json) {
        Ok(document) => analyze(&document),
        Err(errors) => {
            return ValidationDto {
                result: ValidationResult {
                    valid: false,
                    errors: errors.iter().map(ToString::to_string).collect(),
                    total_params: 0,
                },
                diagnostics: errors.into_iter().map(ErrorDto::from).collect(),
            };
        }
    };

    ValidationDto {
        result: analysis.to_result(),
        diagnostics: analysis.diagnostics.into_iter().map(ErrorDto::from).collect(),
    }
}

/// Execution order and layer names of a valid graph.
/// Returns a JSON object with either `order` (success) or `errors` (failure).
#[wasm_bindgen]
pub fn execution_order(json: &str) -> JsValue {
    let result = execution_order_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn execution_order_inner(json: &str) -> OrderResult {
    let document = match parse::parse(json) {
        Ok(d) => d,
        Err(errors) => {
            return OrderResult::Errors {
                errors: errors.into_iter().map(ErrorDto::from).collect(),
            };
        }
    };

    let analysis = analyze(&document);
    if !analysis.is_valid() {
        return OrderResult::Errors {
            errors: analysis.diagnostics.into_iter().map(ErrorDto::from).collect(),
        };
    }

    OrderResult::Success {
        order: analysis.execution_order,
        layer_names: analysis.layer_names,
    }
}

/// Every node schema, for the editor palette.
#[wasm_bindgen]
pub fn node_catalog() -> JsValue {
    let schemas: Vec<&'static NodeSchema> = all_schemas().collect();
    serde_wasm_bindgen::to_value(&schemas).unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct ValidationDto {
    #[serde(flatten)]
    result: ValidationResult,
    diagnostics: Vec<ErrorDto>,
}

#[derive(serde::Serialize)]
struct ErrorDto {
    code: String,
    stage: String,
    message: String,
    node_id: Option<String>,
}

impl From<GraphError> for ErrorDto {
    fn from(e: GraphError) -> Self {
        ErrorDto {
            message: e.to_string(),
            code: e.code.into(),
            stage: e.stage.to_string(),
            node_id: e.node_id,
        }
    }
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum OrderResult {
    #[serde(rename = "success")]
    Success {
        order: Vec<String>,
        layer_names: Vec<LayerName>,
    },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_json_is_a_single_parse_error() {
        let dto = validate_graph_inner("{ nodes: ");
        assert!(!dto.result.valid);
        assert_eq!(dto.diagnostics.len(), 1);
        assert_eq!(dto.diagnostics[0].code, "P001");
        assert_eq!(dto.diagnostics[0].stage, "Parse");
    }

    #[test]
    fn diagnostics_carry_node_ids() {
        let json = r#"{"nodes": [{"id": "fc", "type": "linear", "data": {"params": {"in_features": 4}}}], "edges": []}"#;
        let dto = validate_graph_inner(json);
        assert!(!dto.result.valid);
        let missing = dto
            .diagnostics
            .iter()
            .find(|d| d.code == "N003")
            .expect("missing parameter diagnostic");
        assert_eq!(missing.node_id.as_deref(), Some("fc"));
        assert_eq!(missing.message, "Node fc: Missing required parameter: out_features");
    }

    #[test]
    fn order_result_on_invalid_graph_is_errors() {
        match execution_order_inner(r#"{"nodes": []}"#) {
            OrderResult::Errors { errors } => assert_eq!(errors[0].message, "Graph has no nodes"),
            OrderResult::Success { .. } => panic!("expected errors"),
        }
    }
}
