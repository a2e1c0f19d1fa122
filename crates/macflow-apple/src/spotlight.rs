//! Spotlight node -- search local files through `mdfind`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use macflow_node::validate::require_at_least_i64;
use macflow_node::{Node, NodeMetadata, OutputKind, ProcessingContext, Result};

use crate::command::run_command;

const SURFACE: &str = "mdfind";

/// Search the Spotlight index.  An empty query returns an empty list
/// without touching the surface; `limit` of 0 means uncapped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotlightSearch {
    /// Spotlight query in `mdfind` syntax.
    pub query: String,
    /// Maximum results to return; 0 means no cap.
    pub limit: i64,
    /// Optional directory to constrain the search to.
    pub only_in: String,
}

impl Default for SpotlightSearch {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: 20,
            only_in: String::new(),
        }
    }
}

/// Split `mdfind -0` output into paths.  Output is NUL-separated so paths
/// containing newlines survive.
fn parse_mdfind_output(raw: &[u8]) -> Vec<String> {
    raw.split(|b| *b == 0)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| String::from_utf8_lossy(chunk).to_string())
        .filter(|path| !path.trim().is_empty())
        .collect()
}

impl SpotlightSearch {
    const NODE_TYPE: &'static str = "apple.spotlight.SpotlightSearch";

    fn mdfind_args(&self) -> Vec<String> {
        let mut args = vec!["-0".to_string()];
        let only_in = self.only_in.trim();
        if !only_in.is_empty() {
            args.push("-onlyin".to_string());
            args.push(only_in.to_string());
        }
        args.push(self.query.clone());
        args
    }
}

#[async_trait]
impl Node for SpotlightSearch {
    type Output = Vec<String>;

    fn metadata() -> NodeMetadata {
        NodeMetadata {
            node_type: Self::NODE_TYPE.into(),
            description: "Search local files via the Spotlight index".into(),
            surface: SURFACE.into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "default": "" },
                    "limit": { "type": "integer", "default": 20, "minimum": 0 },
                    "only_in": { "type": "string", "default": "" }
                },
                "required": []
            }),
            output: OutputKind::TextList,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<Vec<String>> {
        require_at_least_i64(Self::NODE_TYPE, "limit", self.limit, 0)?;
        if self.query.trim().is_empty() {
            return Ok(Vec::new());
        }

        debug!(query = %self.query, limit = self.limit, "spotlight search");
        let raw = run_command(Self::NODE_TYPE, SURFACE, "mdfind", &self.mdfind_args()).await?;

        let mut paths = parse_mdfind_output(&raw);
        if self.limit > 0 {
            paths.truncate(self.limit as usize);
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macflow_node::NodeError;

    #[tokio::test]
    async fn empty_query_short_circuits_to_empty_list() {
        let node = SpotlightSearch::default();
        let paths = node.process(&ProcessingContext::new()).await.unwrap();
        assert!(paths.is_empty());
    }

    #[tokio::test]
    async fn negative_limit_is_a_validation_error() {
        let node = SpotlightSearch {
            query: "kMDItemKind == 'PDF'".into(),
            limit: -1,
            ..Default::default()
        };
        let err = node.process(&ProcessingContext::new()).await.unwrap_err();
        assert!(matches!(err, NodeError::Validation { parameter: "limit", .. }));
    }

    #[test]
    fn args_without_only_in() {
        let node = SpotlightSearch {
            query: "report".into(),
            ..Default::default()
        };
        assert_eq!(node.mdfind_args(), vec!["-0", "report"]);
    }

    #[test]
    fn args_with_only_in() {
        let node = SpotlightSearch {
            query: "report".into(),
            only_in: "/Users/dana/Documents".into(),
            ..Default::default()
        };
        assert_eq!(
            node.mdfind_args(),
            vec!["-0", "-onlyin", "/Users/dana/Documents", "report"]
        );
    }

    #[test]
    fn parse_splits_on_nul() {
        let raw = b"/a/b.pdf\0/c/d e.txt\0";
        assert_eq!(parse_mdfind_output(raw), vec!["/a/b.pdf", "/c/d e.txt"]);
    }

    #[test]
    fn parse_empty_output_is_empty() {
        assert!(parse_mdfind_output(b"").is_empty());
        assert!(parse_mdfind_output(b"\0\0").is_empty());
    }
}
