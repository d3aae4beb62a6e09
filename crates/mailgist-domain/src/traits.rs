//! Trait definitions for cross-cutting capabilities
//!
//! These traits define the boundary between the processing pipeline and the
//! environment it runs in. Concrete implementations live in the CLI (or in
//! tests), never here.

/// Sink for user-facing pipeline diagnostics
///
/// The orchestrator reports degraded-but-recovered conditions (summarizer
/// fallback, skipped files) through this trait instead of logging directly,
/// so callers decide how the message surfaces: the CLI forwards to its
/// logger and console, tests inject a recording implementation.
pub trait Reporter {
    /// Report a degraded condition the pipeline recovered from
    fn warn(&self, message: &str);

    /// Report routine progress
    fn info(&self, message: &str);
}

/// Reporter that discards everything
///
/// The default for library callers that have no reporting channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn warn(&self, _message: &str) {}

    fn info(&self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_reporter_accepts_messages() {
        let reporter = NoopReporter;
        reporter.warn("degraded");
        reporter.info("progress");
    }

    #[test]
    fn test_reporter_is_object_safe() {
        let reporter: &dyn Reporter = &NoopReporter;
        reporter.info("dispatched through a trait object");
    }
}
