//! Write-only trace sinks for resolver stage decisions.
//!
//! The resolver describes every decision it takes (how many candidates survived a
//! stage, which route won a tie-break, why a request ended in a 405) as a human
//! readable line. Where those lines go is up to the host: nowhere, the `tracing`
//! pipeline, or an in-memory buffer for tests and operator tooling. Writing is
//! best-effort and never influences resolution.

use parking_lot::Mutex;

/// Prefix of every line emitted by the resolver.
pub const TRACE_PREFIX: &str = "[RouteResolver]";

/// Destination for trace lines.
pub trait TraceSink: Send + Sync {
    /// Lines are only formatted when this returns `true`.
    fn is_enabled(&self) -> bool {
        true
    }

    fn write_line(&self, line: String);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn is_enabled(&self) -> bool {
        false
    }

    fn write_line(&self, _line: String) {}
}

/// Forwards lines to `tracing` at TRACE level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTrace;

impl TraceSink for TracingTrace {
    fn is_enabled(&self) -> bool {
        tracing::enabled!(target: "brrtrouter_resolver::trace", tracing::Level::TRACE)
    }

    fn write_line(&self, line: String) {
        tracing::trace!(target: "brrtrouter_resolver::trace", "{line}");
    }
}

/// Keeps lines in memory.
#[derive(Debug, Default)]
pub struct BufferedTrace {
    lines: Mutex<Vec<String>>,
}

impl BufferedTrace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl TraceSink for BufferedTrace {
    fn write_line(&self, line: String) {
        self.lines.lock().push(line);
    }
}

/// Format and write a line only if the sink wants it.
pub(crate) fn write<F>(sink: &dyn TraceSink, line: F)
where
    F: FnOnce() -> String,
{
    if sink.is_enabled() {
        sink.write_line(format!("{TRACE_PREFIX} {}", line()));
    }
}
