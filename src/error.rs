//! Unified diagnostic type used across all validation stages.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Parse,
    Node,
    Structure,
    Schedule,
    Shape,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Parse => write!(f, "Parse"),
            Stage::Node => write!(f, "Node"),
            Stage::Structure => write!(f, "Structure"),
            Stage::Schedule => write!(f, "Schedule"),
            Stage::Shape => write!(f, "Shape"),
        }
    }
}

/// One defect found in a graph.
///
/// `Display` renders the user-facing line: node-scoped errors are prefixed
/// with `Node <id>: `, graph-level ones are printed as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphError {
    pub code: &'static str,
    pub stage: Stage,
    pub message: String,
    pub node_id: Option<String>,
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node_id {
            Some(id) => write!(f, "Node {}: {}", id, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for GraphError {}

impl GraphError {
    pub fn parse(code: &'static str, message: impl Into<String>) -> Self {
        GraphError {
            code,
            stage: Stage::Parse,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn node(code: &'static str, message: impl Into<String>, node_id: Option<&str>) -> Self {
        GraphError {
            code,
            stage: Stage::Node,
            message: message.into(),
            node_id: node_id.map(str::to_string),
        }
    }

    pub fn structure(code: &'static str, message: impl Into<String>, node_id: Option<&str>) -> Self {
        GraphError {
            code,
            stage: Stage::Structure,
            message: message.into(),
            node_id: node_id.map(str::to_string),
        }
    }

    pub fn schedule(code: &'static str, message: impl Into<String>) -> Self {
        GraphError {
            code,
            stage: Stage::Schedule,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn shape(code: &'static str, message: impl Into<String>, node_id: &str) -> Self {
        GraphError {
            code,
            stage: Stage::Shape,
            message: message.into(),
            node_id: Some(node_id.to_string()),
        }
    }
}
