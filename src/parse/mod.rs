//! Parse phase: JSON → Rust types + graph construction.

pub mod graph;
pub mod types;

pub use graph::ModelGraph;
pub use types::*;

use crate::error::GraphError;

/// Deserialize a graph JSON string into a `GraphDocument`.
pub fn parse(json: &str) -> Result<GraphDocument, Vec<GraphError>> {
    serde_json::from_str::<GraphDocument>(json).map_err(|e| {
        vec![GraphError::parse(
            "P001",
            format!("Failed to parse graph JSON: {}", e),
        )]
    })
}

/// Same as `parse`, from an already decoded JSON value.
pub fn from_value(value: serde_json::Value) -> Result<GraphDocument, Vec<GraphError>> {
    serde_json::from_value::<GraphDocument>(value).map_err(|e| {
        vec![GraphError::parse(
            "P001",
            format!("Failed to parse graph JSON: {}", e),
        )]
    })
}
