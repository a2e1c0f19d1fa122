//! Node contract for macflow adapters.
//!
//! A node is a single adapter unit: it validates a fixed set of typed
//! parameters, invokes one OS automation surface, and maps the raw result
//! into a typed output the host runtime can consume.  This crate defines the
//! shape every node shares:
//!
//! - **[`node`]** -- the [`Node`] trait (one `process` entry point per node).
//! - **[`metadata`]** -- static parameter/output schemas for host discovery.
//! - **[`error`]** -- the [`NodeError`] taxonomy via [`thiserror`].
//! - **[`context`]** -- the opaque [`ProcessingContext`] supplied by the host.
//! - **[`validate`]** -- shared bounds/emptiness checks.

pub mod context;
pub mod error;
pub mod metadata;
pub mod node;
pub mod validate;

pub use context::ProcessingContext;
pub use error::{NodeError, Result};
pub use metadata::{NodeMetadata, OutputKind};
pub use node::Node;
