//! Static node metadata for host discovery.
//!
//! The host runtime discovers a node's parameter schema and output shape
//! without constructing it.  Parameter schemas are JSON Schema objects so the
//! host can render editors and validate graph wiring; bounds and enumerations
//! declared here are re-checked at `process` time by the node itself.

use serde::{Deserialize, Serialize};

/// The output shape of a node, fixed per node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Fire-and-forget action; the node produces no value.
    None,
    /// A single boolean success indicator.
    Boolean,
    /// A single string value.
    Text,
    /// A list of strings.
    TextList,
    /// A list of structured records.
    RecordList,
    /// An in-memory image value.
    Image,
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Boolean => write!(f, "boolean"),
            Self::Text => write!(f, "text"),
            Self::TextList => write!(f, "text_list"),
            Self::RecordList => write!(f, "record_list"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// Discoverable description of a node type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Machine-readable node type (e.g. `apple.calendar.CreateEvent`).
    pub node_type: String,
    /// Human-readable description of what the node does.
    pub description: String,
    /// The automation surface the node invokes (e.g. `Calendar`, `say`).
    pub surface: String,
    /// JSON Schema describing the node's input parameters, including
    /// defaults, numeric bounds, and enumerations.
    pub parameters: serde_json::Value,
    /// The node's fixed output shape.
    pub output: OutputKind,
}

impl NodeMetadata {
    /// Iterate the `(name, schema)` pairs of the parameter schema's
    /// `properties` object.  Empty when the node takes no parameters.
    pub fn parameter_entries(&self) -> Vec<(&String, &serde_json::Value)> {
        self.parameters
            .get("properties")
            .and_then(|p| p.as_object())
            .map(|props| props.iter().collect())
            .unwrap_or_default()
    }
}
