//! Rust types mirroring the editor's graph document.
//!
//! These types are the serde target for the `{nodes, edges}` JSON the editor
//! sends. Deserialization is lenient: missing or `null` fields become empty
//! values and non-string ids or types are kept as their JSON text, so a
//! malformed node is diagnosed by the validators instead of rejecting the
//! whole document.
//! SYNC NOTE: Keep `type` strings aligned with `catalog::kind::NodeKind`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::catalog::{NodeKind, Params};

// =============================================================================
// TOP-LEVEL DOCUMENT
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<NodeDocument>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<EdgeDocument>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeDocument {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub type_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: NodeData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: Params,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDocument {
    #[serde(default, deserialize_with = "lenient_string")]
    pub source: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub target: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any JSON value as text: strings as is, `null` as empty, anything else in
/// its JSON form (`42`, `true`).
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

// =============================================================================
// ACCESSORS + BUILDERS
// =============================================================================

impl NodeDocument {
    pub fn new(id: &str, kind: NodeKind, params: Params) -> Self {
        NodeDocument {
            id: id.to_string(),
            type_name: kind.type_name().to_string(),
            data: NodeData { params },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The declared kind, or `None` when the `type` string is unknown.
    pub fn kind(&self) -> Option<NodeKind> {
        NodeKind::from_type_name(&self.type_name)
    }

    pub fn params(&self) -> &Params {
        &self.data.params
    }

    pub fn is_input(&self) -> bool {
        self.kind() == Some(NodeKind::Input)
    }
}

impl EdgeDocument {
    pub fn new(source: &str, target: &str) -> Self {
        EdgeDocument {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}
