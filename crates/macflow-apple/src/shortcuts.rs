//! Shortcuts nodes -- list and run user Shortcuts via the `shortcuts` CLI.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use macflow_node::validate::require_non_empty;
use macflow_node::{Node, NodeError, NodeMetadata, OutputKind, ProcessingContext, Result};

use crate::command::run_command;

const SURFACE: &str = "shortcuts";

// ---------------------------------------------------------------------------
// ListShortcuts
// ---------------------------------------------------------------------------

/// List the Shortcuts available to the current user, one name per line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListShortcuts {}

/// Parse `shortcuts list` output into names, dropping blank lines.
fn parse_shortcut_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl Node for ListShortcuts {
    type Output = Vec<String>;

    fn metadata() -> NodeMetadata {
        NodeMetadata {
            node_type: "apple.shortcuts.ListShortcuts".into(),
            description: "List the Shortcuts available on this account".into(),
            surface: SURFACE.into(),
            parameters: json!({ "type": "object", "properties": {}, "required": [] }),
            output: OutputKind::TextList,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<Vec<String>> {
        debug!("listing shortcuts");
        let raw = run_command(
            "apple.shortcuts.ListShortcuts",
            SURFACE,
            "shortcuts",
            &["list".to_string()],
        )
        .await?;
        Ok(parse_shortcut_list(&String::from_utf8_lossy(&raw)))
    }
}

// ---------------------------------------------------------------------------
// RunShortcut
// ---------------------------------------------------------------------------

/// Run a named Shortcut, optionally feeding it text input, and return its
/// output as text.
///
/// Output is read from the CLI's `--output-path` file; the CLI's stdout is
/// the fallback for shortcuts that print instead of returning a value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunShortcut {
    /// Shortcut name or identifier.
    pub shortcut: String,
    /// Optional text input, passed as a temporary file.
    pub input_text: String,
}

impl RunShortcut {
    const NODE_TYPE: &'static str = "apple.shortcuts.RunShortcut";

    fn run_args(shortcut: &str, output_path: &str, input_path: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            shortcut.to_string(),
            "--output-path".to_string(),
            output_path.to_string(),
        ];
        if let Some(input) = input_path {
            args.push("--input-path".to_string());
            args.push(input.to_string());
        }
        args
    }
}

#[async_trait]
impl Node for RunShortcut {
    type Output = String;

    fn metadata() -> NodeMetadata {
        NodeMetadata {
            node_type: Self::NODE_TYPE.into(),
            description: "Run a Shortcut and capture its output as text".into(),
            surface: SURFACE.into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "shortcut": { "type": "string", "default": "" },
                    "input_text": { "type": "string", "default": "" }
                },
                "required": ["shortcut"]
            }),
            output: OutputKind::Text,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<String> {
        let shortcut = require_non_empty(Self::NODE_TYPE, "shortcut", &self.shortcut)?;

        let dir = tempfile::tempdir().map_err(|e| NodeError::Failure {
            node: Self::NODE_TYPE,
            surface: SURFACE,
            reason: format!("failed to create shortcut work directory: {e}"),
        })?;
        let output_path = dir.path().join("output");

        let input_path = if self.input_text.is_empty() {
            None
        } else {
            let path = dir.path().join("input.txt");
            tokio::fs::write(&path, &self.input_text)
                .await
                .map_err(|e| NodeError::Failure {
                    node: Self::NODE_TYPE,
                    surface: SURFACE,
                    reason: format!("failed to write shortcut input: {e}"),
                })?;
            Some(path.to_string_lossy().to_string())
        };

        let args = Self::run_args(
            shortcut,
            &output_path.to_string_lossy(),
            input_path.as_deref(),
        );

        debug!(shortcut = %shortcut, has_input = input_path.is_some(), "running shortcut");
        let stdout = run_command(Self::NODE_TYPE, SURFACE, "shortcuts", &args).await?;

        let bytes = match tokio::fs::read(&output_path).await {
            Ok(bytes) if !bytes.is_empty() => bytes,
            _ => stdout,
        };
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_parse_drops_blank_lines() {
        let raw = "Morning Routine\n\n  Resize Images  \n";
        assert_eq!(
            parse_shortcut_list(raw),
            vec!["Morning Routine", "Resize Images"]
        );
    }

    #[test]
    fn list_parse_empty_is_empty() {
        assert!(parse_shortcut_list("").is_empty());
    }

    #[tokio::test]
    async fn run_rejects_empty_shortcut() {
        let node = RunShortcut::default();
        let err = node.process(&ProcessingContext::new()).await.unwrap_err();
        assert!(matches!(err, NodeError::Validation { parameter: "shortcut", .. }));
    }

    #[test]
    fn run_args_without_input() {
        let args = RunShortcut::run_args("Morning Routine", "/tmp/out", None);
        assert_eq!(
            args,
            vec!["run", "Morning Routine", "--output-path", "/tmp/out"]
        );
    }

    #[test]
    fn run_args_with_input() {
        let args = RunShortcut::run_args("Summarize", "/tmp/out", Some("/tmp/in.txt"));
        assert_eq!(
            args,
            vec![
                "run",
                "Summarize",
                "--output-path",
                "/tmp/out",
                "--input-path",
                "/tmp/in.txt"
            ]
        );
    }
}
