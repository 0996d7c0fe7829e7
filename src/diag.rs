//! Diagnostics sink for archive construction.
//!
//! The archive builder reports an informational line per added entry and a
//! warning per skipped one. The sink is passed in as a capability rather than
//! reached through ambient global state, so tests can inject a capturing
//! implementation instead of real logging infrastructure.

/// A recipient for per-entry diagnostic lines emitted during a walk.
pub trait Diagnostics {
    /// Record an informational line (e.g. "adding dir1/a").
    fn info(&self, line: &str);
    /// Record a warning line (e.g. an ignored non-regular path).
    fn warn(&self, line: &str);
}

/// Forwards diagnostic lines to the `tracing` subscriber installed by the
/// binary.
pub struct TracingDiag;

impl Diagnostics for TracingDiag {
    fn info(&self, line: &str) {
        tracing::info!("{}", line);
    }

    fn warn(&self, line: &str) {
        tracing::warn!("{}", line);
    }
}
