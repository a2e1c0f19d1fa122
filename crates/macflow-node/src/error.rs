//! Node error types.
//!
//! Every failure a node can raise is one of three kinds: the input was
//! rejected before any external call, the automation surface could not be
//! reached at all, or the surface ran and reported an error.  Each variant
//! carries the node's identity and enough context for the host to render an
//! actionable message without inspecting opaque strings.

/// Unified error type for macflow nodes.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// A parameter value violates its declared bounds, enumeration, or a
    /// required combination.  Raised before any external invocation; no side
    /// effects have been applied.
    #[error("invalid parameter `{parameter}` for node `{node}`: {reason}")]
    Validation {
        node: &'static str,
        parameter: &'static str,
        reason: String,
    },

    /// The automation surface cannot be reached: the tool is missing, the
    /// platform is not macOS, or the process could not be spawned.
    #[error("{surface} unavailable for node `{node}`: {reason}")]
    Unavailable {
        node: &'static str,
        surface: &'static str,
        reason: String,
    },

    /// The automation surface executed and reported an application-level
    /// error (non-zero exit; the message is the surface's own diagnostic).
    #[error("{surface} failed for node `{node}`: {reason}")]
    Failure {
        node: &'static str,
        surface: &'static str,
        reason: String,
    },
}

impl NodeError {
    /// The node that raised this error.
    pub fn node(&self) -> &'static str {
        match self {
            Self::Validation { node, .. }
            | Self::Unavailable { node, .. }
            | Self::Failure { node, .. } => node,
        }
    }

    /// Whether this error was raised before any external call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Convenience alias used throughout the macflow crates.
pub type Result<T> = std::result::Result<T, NodeError>;
