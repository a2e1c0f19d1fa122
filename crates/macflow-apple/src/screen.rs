//! Screen capture node -- grab the display (or a region) via `screencapture`.
//!
//! The surface only writes to a file, so the capture lands in a temp
//! directory that is dropped after the bytes are read back; the host
//! receives the image in memory, never a path.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use macflow_node::validate::require_at_least_i64;
use macflow_node::{Node, NodeError, NodeMetadata, OutputKind, ProcessingContext, Result};

use crate::command::run_command;

const SURFACE: &str = "screencapture";

/// An image handed to the host as an in-memory value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageValue {
    /// Encoded image bytes.
    pub data: Vec<u8>,
    /// MIME type of `data`.
    pub mime_type: String,
}

/// Capture the whole screen or a pixel rectangle.
///
/// With `whole_screen` set, the rectangle parameters are ignored; otherwise
/// `width` and `height` must be positive.  A visually empty capture is still
/// a successful capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureScreen {
    /// Capture the entire screen, ignoring the rectangle.
    pub whole_screen: bool,
    /// Rectangle origin X in pixels.
    pub x: i64,
    /// Rectangle origin Y in pixels.
    pub y: i64,
    /// Rectangle width in pixels; positive when `whole_screen` is false.
    pub width: i64,
    /// Rectangle height in pixels; positive when `whole_screen` is false.
    pub height: i64,
}

impl Default for CaptureScreen {
    fn default() -> Self {
        Self {
            whole_screen: true,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        }
    }
}

impl CaptureScreen {
    const NODE_TYPE: &'static str = "apple.screen.CaptureScreen";

    /// `screencapture` arguments: `-x` suppresses the shutter sound, `-R`
    /// selects the rectangle when not capturing the whole screen.
    fn capture_args(&self, output_path: &str) -> Vec<String> {
        let mut args = vec!["-x".to_string()];
        if !self.whole_screen {
            args.push(format!("-R{},{},{},{}", self.x, self.y, self.width, self.height));
        }
        args.push(output_path.to_string());
        args
    }
}

#[async_trait]
impl Node for CaptureScreen {
    type Output = ImageValue;

    fn metadata() -> NodeMetadata {
        NodeMetadata {
            node_type: Self::NODE_TYPE.into(),
            description: "Capture the screen or a pixel region as a PNG".into(),
            surface: SURFACE.into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "whole_screen": { "type": "boolean", "default": true },
                    "x": { "type": "integer", "default": 0 },
                    "y": { "type": "integer", "default": 0 },
                    "width": { "type": "integer", "default": 0 },
                    "height": { "type": "integer", "default": 0 }
                },
                "required": []
            }),
            output: OutputKind::Image,
        }
    }

    async fn process(&self, _context: &ProcessingContext) -> Result<ImageValue> {
        if !self.whole_screen {
            require_at_least_i64(Self::NODE_TYPE, "width", self.width, 1)?;
            require_at_least_i64(Self::NODE_TYPE, "height", self.height, 1)?;
        }

        let dir = tempfile::tempdir().map_err(|e| NodeError::Failure {
            node: Self::NODE_TYPE,
            surface: SURFACE,
            reason: format!("failed to create capture directory: {e}"),
        })?;
        let path = dir.path().join("capture.png");
        let path_str = path.to_string_lossy().to_string();

        debug!(whole_screen = self.whole_screen, "capturing screen");
        run_command(
            Self::NODE_TYPE,
            SURFACE,
            "screencapture",
            &self.capture_args(&path_str),
        )
        .await?;

        let data = tokio::fs::read(&path).await.map_err(|e| NodeError::Failure {
            node: Self::NODE_TYPE,
            surface: SURFACE,
            reason: format!("capture produced no readable file: {e}"),
        })?;

        Ok(ImageValue {
            data,
            mime_type: "image/png".into(),
        })
    }
}
