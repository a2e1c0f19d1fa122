//! Notification node -- post to Notification Center via `display notification`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use macflow_node::{Node, NodeMetadata, OutputKind, ProcessingContext, Result};

use crate::script::{escape_applescript, run_osascript};

const SURFACE: &str = "Notification Center";

/// Post a Notification Center banner.  Subtitle and sound are appended to
/// the command only when non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostNotification {
    /// Notification title.
    pub title: String,
    /// Optional subtitle.
    pub subtitle: String,
    /// Notification body.
    pub message: String,
    /// Optional sound name (e.g. "Glass"); empty means silent.
    pub sound_name: String,
}

impl Default for PostNotification {
    fn default() -> Self {
        Self {
            title: "Macflow".into(),
            subtitle: String::new(),
            message: String::new(),
            sound_name: String::new(),
        }
    }
}

impl PostNotification {
    const NODE_TYPE: &'static str = "apple.notifications.PostNotification";

    fn build_script(&self) -> String {
        let title = escape_applescript(&self.title);
        let message = escape_applescript(&self.message);

        let mut parts = vec![format!(
            "display notification \"{message}\" with title \"{title}\""
        )];
        if !self.subtitle.is_empty() {
            parts.push(format!("subtitle \"{}\"", escape_applescript(&self.subtitle)));
        }
        if !self.sound_name.is_empty() {
            parts.push(format!(
                "sound name \"{}\"",
                escape_applescript(&self.sound_name)
            ));
        }
        parts.join(" ")
    }
}

#[async_trait]
impl Node for PostNotification {
    type Output = bool;

    fn metadata() -> NodeMetadata {
        NodeMetadata {
            node_type: Self::NODE_TYPE.into(),
            description: "Post a Notification Center notification".into(),
            surface: SURFACE.into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string", "default": "Macflow" },
                    "subtitle": { "type": "string", "default": "" },
                    "message": { "type": "string", "default": "" },
                    "sound_name": { "type": "string", "default": "" }
                },
                "required": []
            }),
            output: OutputKind::Boolean,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<bool> {
        debug!(title = %self.title, "posting notification");
        run_osascript(Self::NODE_TYPE, SURFACE, &self.build_script()).await?;
        Ok(true)
    }
}
