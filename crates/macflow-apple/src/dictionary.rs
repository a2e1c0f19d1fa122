//! Dictionary node -- look up terms in the system dictionary.
//!
//! The lookup goes through the JavaScript-for-Automation ObjC bridge to
//! `DCSCopyTextDefinition`, which returns one flattened entry string (or
//! nothing for an unknown term).  The entry is split into line-sized
//! definitions on this side; zero matches is an empty list, not an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use macflow_node::validate::{require_at_least_i64, require_non_empty};
use macflow_node::{Node, NodeMetadata, OutputKind, ProcessingContext, Result};

use crate::script::{escape_applescript, run_jxa};

const SURFACE: &str = "Dictionary";

/// Look up a term in the system dictionary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDictionary {
    /// Term to look up.
    pub term: String,
    /// Maximum number of definitions to return; at least 1.
    pub max_results: i64,
}

impl Default for SearchDictionary {
    fn default() -> Self {
        Self {
            term: String::new(),
            max_results: 5,
        }
    }
}

/// Split a raw dictionary entry into per-line definitions, capped at
/// `max_results`.  Empty input (no match) yields an empty list.
fn parse_definitions(raw: &str, max_results: usize) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(max_results)
        .map(str::to_string)
        .collect()
}

impl SearchDictionary {
    const NODE_TYPE: &'static str = "apple.dictionary.SearchDictionary";

    fn build_script(&self) -> String {
        let term = escape_applescript(self.term.trim());
        format!(
            "(() => {{\n\
             \tObjC.import('CoreServices');\n\
             \tconst term = \"{term}\";\n\
             \tconst range = $.CFRangeMake(0, term.length);\n\
             \tconst definition = $.DCSCopyTextDefinition(null, term, range);\n\
             \tif (!definition) return \"\";\n\
             \treturn ObjC.unwrap(definition);\n\
             }})()"
        )
    }
}

#[async_trait]
impl Node for SearchDictionary {
    type Output = Vec<String>;

    fn metadata() -> NodeMetadata {
        NodeMetadata {
            node_type: Self::NODE_TYPE.into(),
            description: "Look up a term in the macOS system dictionary".into(),
            surface: SURFACE.into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "term": { "type": "string", "default": "" },
                    "max_results": { "type": "integer", "default": 5, "minimum": 1 }
                },
                "required": ["term"]
            }),
            output: OutputKind::TextList,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<Vec<String>> {
        require_non_empty(Self::NODE_TYPE, "term", &self.term)?;
        require_at_least_i64(Self::NODE_TYPE, "max_results", self.max_results, 1)?;

        debug!(term = %self.term, max_results = self.max_results, "searching dictionary");
        let raw = run_jxa(Self::NODE_TYPE, SURFACE, &self.build_script()).await?;
        Ok(parse_definitions(&raw, self.max_results as usize))
    }
}
