use crate::error::DefinitionError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A blueprint described as plain data, typically loaded from JSON.
///
/// ```json
/// {
///   "nodes": [
///     { "key": "start", "type": "Event: On Start" },
///     { "key": "two", "type": "Data: Number", "value": 2 },
///     { "key": "print", "type": "Debug: Print", "defaults": { "value": "Hi" } }
///   ],
///   "links": [
///     { "from": "start.exec", "to": "print.exec" },
///     { "from": "two.value", "to": "print.value" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlueprintDefinition {
    pub nodes: Vec<NodeDefinition>,
    #[serde(default)]
    pub links: Vec<LinkDefinition>,
}

/// One node to spawn from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDefinition {
    /// Local handle used by links; not a graph identifier.
    pub key: String,
    /// Catalog name, e.g. `"Math: Add"`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Stored value of a literal node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Default literals of unconnected input data ports, keyed by port name.
    #[serde(default)]
    pub defaults: AHashMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<(f32, f32)>,
}

/// A link between two `key.port` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDefinition {
    pub from: String,
    pub to: String,
}

impl BlueprintDefinition {
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        serde_json::from_str(json).map_err(|e| DefinitionError::JsonParseError(e.to_string()))
    }
}
