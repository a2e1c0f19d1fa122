//! Clipboard nodes -- read and write the pasteboard via `pbpaste`/`pbcopy`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use macflow_node::{Node, NodeMetadata, OutputKind, ProcessingContext, Result};

use crate::command::{run_command, run_command_with_stdin};

// ---------------------------------------------------------------------------
// GetClipboardText
// ---------------------------------------------------------------------------

/// Read the current plain-text clipboard contents.  An empty clipboard is
/// an empty string, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GetClipboardText {}

#[async_trait]
impl Node for GetClipboardText {
    type Output = String;

    fn metadata() -> NodeMetadata {
        NodeMetadata {
            node_type: "apple.clipboard.GetClipboardText".into(),
            description: "Read plain text from the clipboard".into(),
            surface: "pbpaste".into(),
            parameters: json!({ "type": "object", "properties": {}, "required": [] }),
            output: OutputKind::Text,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<String> {
        debug!("reading clipboard");
        let raw = run_command("apple.clipboard.GetClipboardText", "pbpaste", "pbpaste", &[]).await?;
        Ok(String::from_utf8_lossy(&raw).to_string())
    }
}

// ---------------------------------------------------------------------------
// SetClipboardText
// ---------------------------------------------------------------------------

/// Replace the clipboard contents with the given text.  Empty text is
/// allowed and clears the clipboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetClipboardText {
    /// Text to put on the clipboard.
    pub text: String,
}

#[async_trait]
impl Node for SetClipboardText {
    type Output = bool;

    fn metadata() -> NodeMetadata {
        NodeMetadata {
            node_type: "apple.clipboard.SetClipboardText".into(),
            description: "Write plain text to the clipboard".into(),
            surface: "pbcopy".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string", "default": "" }
                },
                "required": []
            }),
            output: OutputKind::Boolean,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<bool> {
        debug!(bytes = self.text.len(), "writing clipboard");
        run_command_with_stdin(
            "apple.clipboard.SetClipboardText",
            "pbcopy",
            "pbcopy",
            &[],
            self.text.as_bytes(),
        )
        .await?;
        Ok(true)
    }
}
