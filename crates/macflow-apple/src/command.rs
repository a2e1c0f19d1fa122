//! Generic CLI invocation for the non-AppleScript surfaces
//! (`screencapture`, `say`, `mdfind`, `shortcuts`, `pbpaste`, `pbcopy`).
//!
//! Error mapping matches [`crate::script`]: a spawn error is
//! [`NodeError::Unavailable`], a non-zero exit is [`NodeError::Failure`].

use std::process::Stdio;

use tokio::io::AsyncWriteExt;

use macflow_node::{NodeError, Result};

/// Run a command to completion and return raw stdout bytes.
pub(crate) async fn run_command(
    node: &'static str,
    surface: &'static str,
    program: &str,
    args: &[String],
) -> Result<Vec<u8>> {
    let output = tokio::process::Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| NodeError::Unavailable {
            node,
            surface,
            reason: format!("failed to spawn `{program}`: {e}"),
        })?;

    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(NodeError::Failure {
            node,
            surface,
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Run a command with the given bytes written to its stdin.
pub(crate) async fn run_command_with_stdin(
    node: &'static str,
    surface: &'static str,
    program: &str,
    args: &[String],
    stdin: &[u8],
) -> Result<Vec<u8>> {
    let mut child = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| NodeError::Unavailable {
            node,
            surface,
            reason: format!("failed to spawn `{program}`: {e}"),
        })?;

    if let Some(mut handle) = child.stdin.take() {
        handle.write_all(stdin).await.map_err(|e| NodeError::Failure {
            node,
            surface,
            reason: format!("failed to write to `{program}` stdin: {e}"),
        })?;
        // Dropping the handle closes the pipe so the child sees EOF.
    }

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| NodeError::Failure {
            node,
            surface,
            reason: format!("`{program}` did not complete: {e}"),
        })?;

    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(NodeError::Failure {
            node,
            surface,
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
