//! Diagnostic messages.

/// Diagnostics sink interface.
pub trait DiagnosticsSink: Send + Sync {
    /// Emit a human-readable message, fire-and-forget.
    fn emit(&self, message: &str);
}

/// A sink forwarding messages to [`tracing`] at the `ERROR` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    #[inline]
    fn emit(&self, message: &str) {
        tracing::error!("{message}");
    }
}
