//! The node trait.

use async_trait::async_trait;

use crate::context::ProcessingContext;
use crate::error::Result;
use crate::metadata::NodeMetadata;

/// A single workflow adapter: one capability, one invocation, one output.
///
/// A node instance is a plain parameter record populated by the host from
/// the workflow graph's current values immediately before invocation and
/// discarded afterwards.  `process` validates the parameters, invokes the
/// node's automation surface once, and maps the result into [`Node::Output`].
/// It holds no state across invocations and performs no retries.
#[async_trait]
pub trait Node: Send + Sync {
    /// The node's fixed output type.  Fire-and-forget actions use `()`.
    type Output;

    /// Static schema for host discovery: node type, parameter schema with
    /// defaults and bounds, and output shape.
    fn metadata() -> NodeMetadata
    where
        Self: Sized;

    /// Run the node once.  Blocks (logically) until the external surface
    /// returns or fails; raises exactly one [`crate::NodeError`] on failure.
    async fn process(&self, context: &ProcessingContext) -> Result<Self::Output>;
}
