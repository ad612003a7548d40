//! Progress reporting abstraction for long-running operations.
//!
//! Decouples the smoothing loop from any particular frontend: the CLI
//! wires in a progress bar, tests and library callers use
//! `NoopProgressReporter`.

/// Reports progress for long-running operations.
///
/// Progress values are normalized: `current` goes from 0.0 to `total`.
/// Messages provide human-readable step descriptions.
pub trait ProgressReporter: Send + Sync {
    /// Report progress. Implementations should be fire-and-forget and
    /// never fail the caller.
    fn report(&self, current: f64, total: f64, message: Option<String>);

    /// Convenience: report a step out of N total steps.
    fn step(&self, step: usize, total_steps: usize, message: &str) {
        let current = step as f64 / total_steps.max(1) as f64;
        self.report(current, 1.0, Some(message.to_string()));
    }
}

/// No-op reporter for tests and library callers without progress support.
pub struct NoopProgressReporter;

impl ProgressReporter for NoopProgressReporter {
    fn report(&self, _current: f64, _total: f64, _message: Option<String>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Test reporter that counts calls.
    struct CountingReporter {
        count: AtomicUsize,
    }

    impl ProgressReporter for CountingReporter {
        fn report(&self, _current: f64, _total: f64, _message: Option<String>) {
            self.count.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_noop_reporter_does_nothing() {
        let reporter = NoopProgressReporter;
        reporter.report(0.5, 1.0, Some("test".into()));
        reporter.step(1, 3, "step one");
        // No panic, no side effects
    }

    #[test]
    fn test_counting_reporter() {
        let reporter = CountingReporter {
            count: AtomicUsize::new(0),
        };
        reporter.report(0.0, 1.0, None);
        reporter.report(1.0, 1.0, Some("done".into()));
        assert_eq!(reporter.count.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_step_convenience_with_zero_total() {
        let reporter = CountingReporter {
            count: AtomicUsize::new(0),
        };
        reporter.step(0, 0, "empty");
        assert_eq!(reporter.count.load(Ordering::Relaxed), 1);
    }
}
