//! Validator facade: one call runs every stage in order.
//!
//! Stages: validate nodes → structure (input count, ids, edges + arity,
//! cycles) → [gate] → schedule + shape inference → [gate] → parameter count +
//! layer names. A gate stops the run when any error has been recorded, so
//! shape errors never pile on top of structural ones and a broken graph never
//! reports a parameter count.
//!
//! Every function here is a pure function of its input. Working maps live on
//! the stack of a single call.

use serde::Serialize;
use tracing::{debug, error, instrument};

use crate::analyze::{infer_shapes, layer_names, topo_sort, total_params, LayerName, ShapeMap};
use crate::error::GraphError;
use crate::parse::{self, GraphDocument, ModelGraph};
use crate::validate::validate_graph;

/// The result reported to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub total_params: u64,
}

/// Everything one run produced.
///
/// `execution_order` and `shapes` are filled once the structural gate passes;
/// `total_params` and `layer_names` only for a fully valid graph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Analysis {
    pub diagnostics: Vec<GraphError>,
    pub execution_order: Vec<String>,
    pub shapes: ShapeMap,
    pub layer_names: Vec<LayerName>,
    pub total_params: u64,
}

impl Analysis {
    fn failed(diagnostics: Vec<GraphError>) -> Self {
        Analysis {
            diagnostics,
            ..Analysis::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn errors(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    pub fn to_result(&self) -> ValidationResult {
        let valid = self.is_valid();
        ValidationResult {
            valid,
            errors: self.errors(),
            total_params: if valid { self.total_params } else { 0 },
        }
    }
}

impl From<Analysis> for ValidationResult {
    fn from(analysis: Analysis) -> Self {
        analysis.to_result()
    }
}

/// Run every stage over `document`.
#[instrument(level = "debug", skip_all, fields(nodes = document.nodes.len(), edges = document.edges.len()))]
pub fn analyze(document: &GraphDocument) -> Analysis {
    if document.nodes.is_empty() {
        return Analysis::failed(vec![GraphError::parse("P002", "Graph has no nodes")]);
    }

    let graph = ModelGraph::build(document);

    let diagnostics = validate_graph(document, &graph);
    if !diagnostics.is_empty() {
        debug!(errors = diagnostics.len(), "graph rejected before shape inference");
        return Analysis::failed(diagnostics);
    }

    let execution_order = match topo_sort(&graph) {
        Ok(order) => order,
        Err(e) => {
            error!("cycle check passed but topological sort did not cover every node");
            return Analysis::failed(vec![e]);
        }
    };

    let (shapes, diagnostics) = infer_shapes(&graph, &execution_order);
    if !diagnostics.is_empty() {
        debug!(errors = diagnostics.len(), "shape inference failed");
        return Analysis {
            diagnostics,
            execution_order,
            shapes,
            ..Analysis::default()
        };
    }

    let total_params = total_params(&graph);
    let layer_names = layer_names(&graph, &execution_order);
    debug!(total_params, layers = layer_names.len(), "graph is valid");

    Analysis {
        diagnostics,
        execution_order,
        shapes,
        layer_names,
        total_params,
    }
}

/// Validate a graph document.
pub fn validate(document: &GraphDocument) -> ValidationResult {
    analyze(document).into()
}

/// Validate a graph given as JSON text. A document that is not valid JSON is
/// reported as a single error.
pub fn validate_json(json: &str) -> ValidationResult {
    match parse::parse(json) {
        Ok(document) => validate(&document),
        Err(errors) => Analysis::failed(errors).into(),
    }
}

/// The execution order of a valid graph, or the errors that make it invalid.
pub fn execution_order(document: &GraphDocument) -> Result<Vec<String>, Vec<GraphError>> {
    let analysis = analyze(document);
    if analysis.is_valid() {
        Ok(analysis.execution_order)
    } else {
        Err(analysis.diagnostics)
    }
}
