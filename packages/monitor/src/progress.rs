//! Progress reporting for long-running search runs.

/// Receives human-readable status lines as a run advances.
///
/// Fire-and-forget: implementations must not block or fail. The engine
/// reports at rule start, on every page attempt (including retries of the
/// same page), on rate-limit waits, before exclusion filtering, and before
/// the final duplicate pass.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, message: &str);
}

/// Any thread-safe closure works as a reporter.
impl<F> ProgressReporter for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// Discards every message.
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn report(&self, _message: &str) {}
}

/// Forwards messages to the `tracing` log at info level. The scheduled
/// caller uses this so run progress lands in the service log.
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn report(&self, message: &str) {
        tracing::info!("search progress: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closures_are_reporters() {
        let seen = Mutex::new(Vec::new());
        let reporter = |message: &str| seen.lock().unwrap().push(message.to_string());

        fn run(reporter: &dyn ProgressReporter) {
            reporter.report("first");
            reporter.report("second");
        }
        run(&reporter);

        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }
}
