//! Execution context handed to every node invocation.

/// Opaque execution context supplied by the host runtime.
///
/// Nodes receive a reference to this for the duration of one `process` call
/// and pass it through untouched; no node inspects it for control flow.  It
/// exists so the host can thread per-invocation state past this package
/// without the node contract changing when that state does.
#[derive(Debug, Default)]
pub struct ProcessingContext {
    _private: (),
}

impl ProcessingContext {
    /// Create a context for a single invocation.
    pub fn new() -> Self {
        Self::default()
    }
}
