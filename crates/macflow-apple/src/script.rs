//! AppleScript plumbing shared by the scripting-bridge nodes.
//!
//! Scripts are executed through `osascript`; a spawn error means the surface
//! is unreachable ([`NodeError::Unavailable`]) while a non-zero exit means
//! the script ran and the application rejected it ([`NodeError::Failure`],
//! with stderr as the message).  Any value interpolated into a script MUST
//! pass through [`escape_applescript`] first — unescaped quotes or
//! backslashes would change the script's structure.

use macflow_node::{NodeError, Result};

/// Run an AppleScript via `osascript -e` and return trimmed stdout.
pub(crate) async fn run_osascript(
    node: &'static str,
    surface: &'static str,
    script: &str,
) -> Result<String> {
    run_osascript_args(node, surface, &["-e", script]).await
}

/// Run a JavaScript-for-Automation script via `osascript -l JavaScript -e`.
pub(crate) async fn run_jxa(
    node: &'static str,
    surface: &'static str,
    script: &str,
) -> Result<String> {
    run_osascript_args(node, surface, &["-l", "JavaScript", "-e", script]).await
}

async fn run_osascript_args(
    node: &'static str,
    surface: &'static str,
    args: &[&str],
) -> Result<String> {
    let output = tokio::process::Command::new("osascript")
        .args(args)
        .output()
        .await
        .map_err(|e| NodeError::Unavailable {
            node,
            surface,
            reason: format!("failed to spawn osascript: {e}"),
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(NodeError::Failure {
            node,
            surface,
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Escape a value for interpolation inside a double-quoted AppleScript (or
/// JavaScript) string literal.
pub fn escape_applescript(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Split delimiter-framed script output into field lists.
///
/// Scripting-bridge nodes emit one record per `record_sep` with fields
/// joined by `field_sep`.  Empty fragments and records with fewer than
/// `min_fields` fields are dropped rather than surfaced as errors — a
/// malformed record usually means the script hit an item it could not read.
pub fn parse_delimited_records(
    raw: &str,
    record_sep: &str,
    field_sep: &str,
    min_fields: usize,
) -> Vec<Vec<String>> {
    raw.split(record_sep)
        .filter(|fragment| !fragment.trim().is_empty())
        .filter_map(|fragment| {
            let fields: Vec<String> = fragment.split(field_sep).map(str::to_string).collect();
            (fields.len() >= min_fields).then_some(fields)
        })
        .collect()
}
