//! Failure Log and per-case Summary.
//!
//! A [`Summary`] is created when a case starts and consumed once its report
//! has been printed. It counts every assertion evaluated, keeps a
//! [`GrowableBuffer`] of [`Failure`] records, and stores the elapsed time.
//! `failure_count` always equals the length of that buffer.

use std::io;

use termcolor::WriteColor;
use tracing::error;

use crate::assertion::{Location, Severity};
use crate::buffer::GrowableBuffer;
use crate::case::TestCase;
use crate::errors::EngineError;
use crate::report::Reporter;

/// A single failed assertion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Failure {
    pub file: String,
    pub line: u32,
    pub severity: Severity,
    pub message: Option<String>,
    pub diagnostic: Option<String>,
}

impl Failure {
    pub fn new(
        location: Location<'_>,
        severity: Severity,
        message: Option<String>,
        diagnostic: Option<String>,
    ) -> Self {
        Self {
            file: location.file.to_string(),
            line: location.line,
            severity,
            message,
            diagnostic,
        }
    }
}

/// Per-case aggregate of assertion counts, failures, and elapsed time.
pub struct Summary<'c> {
    test_case: &'c dyn TestCase,
    test_count: usize,
    failure_count: usize,
    failures: GrowableBuffer<Failure>,
    elapsed: u64,
}

impl<'c> Summary<'c> {
    /// Starts an empty summary for `test_case`.
    pub fn initialize(test_case: &'c dyn TestCase) -> Result<Self, EngineError> {
        Self::from_buffer(test_case, GrowableBuffer::create(0))
    }

    /// Starts an empty summary that may hold at most `max_failures` failures.
    pub fn with_failure_limit(
        test_case: &'c dyn TestCase,
        max_failures: usize,
    ) -> Result<Self, EngineError> {
        Self::from_buffer(test_case, GrowableBuffer::with_max_capacity(0, max_failures))
    }

    fn from_buffer(
        test_case: &'c dyn TestCase,
        failures: Result<GrowableBuffer<Failure>, EngineError>,
    ) -> Result<Self, EngineError> {
        let failures = failures.map_err(|e| {
            error!(
                suite = test_case.suite_name(),
                case = test_case.name(),
                "failed to create the test failure array"
            );
            e
        })?;

        let summary = Self {
            test_case,
            test_count: 0,
            failure_count: failures.len(),
            failures,
            elapsed: 0,
        };
        debug_assert_eq!(summary.failure_count, 0);
        Ok(summary)
    }

    /// Counts one evaluated assertion, whatever its outcome.
    pub fn count_assertion(&mut self) {
        self.test_count += 1;
    }

    /// Appends a failure to the log.
    pub fn record(&mut self, failure: Failure) -> Result<(), EngineError> {
        self.check_invariant();

        let slot = self.failures.extend_back(1).map_err(|e| {
            error!(
                file = %failure.file,
                line = failure.line,
                "failed to extend the test failure array"
            );
            e
        })?;
        slot[0] = failure;
        self.failure_count = self.failures.len();
        Ok(())
    }

    pub fn set_elapsed(&mut self, nanos: u64) {
        self.elapsed = nanos;
    }

    pub fn test_case(&self) -> &'c dyn TestCase {
        self.test_case
    }

    pub fn suite_name(&self) -> &str {
        self.test_case.suite_name()
    }

    pub fn case_name(&self) -> &str {
        self.test_case.name()
    }

    pub fn test_count(&self) -> usize {
        self.test_count
    }

    pub fn failure_count(&self) -> usize {
        self.failure_count
    }

    pub fn failures(&self) -> &[Failure] {
        self.failures.as_slice()
    }

    pub fn elapsed_ns(&self) -> u64 {
        self.elapsed
    }

    pub fn passed(&self) -> bool {
        self.failure_count == 0
    }

    /// Renders the header and one entry per failure.
    pub fn print<W: WriteColor>(&self, reporter: &mut Reporter<W>) -> io::Result<()> {
        self.check_invariant();
        reporter.write_summary(self)
    }

    /// Releases every failure and then the log itself.
    pub fn terminate(self) {
        self.check_invariant();
        self.failures.destroy();
    }

    fn check_invariant(&self) {
        debug_assert_eq!(self.failure_count, self.failures.len());
    }
}

impl std::fmt::Debug for Summary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summary")
            .field("suite", &self.suite_name())
            .field("case", &self.case_name())
            .field("test_count", &self.test_count)
            .field("failure_count", &self.failure_count)
            .field("elapsed", &self.elapsed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::CaseDescriptor;
    use crate::checkpoint::Outcome;
    use crate::context::ExecutionContext;

    fn noop(_ctx: &mut ExecutionContext<'_, '_>) -> Outcome {
        Ok(())
    }

    fn failure(line: u32) -> Failure {
        Failure::new(
            Location::new("summary.rs", line),
            Severity::Nonfatal,
            Some("boom".to_string()),
            None,
        )
    }

    #[test]
    fn test_record_keeps_count_in_sync() {
        let case = CaseDescriptor::new("suite", "case", noop);
        let mut summary = Summary::initialize(&case).unwrap();
        assert!(summary.passed());

        summary.count_assertion();
        summary.record(failure(1)).unwrap();
        summary.count_assertion();
        summary.record(failure(2)).unwrap();

        assert_eq!(summary.test_count(), 2);
        assert_eq!(summary.failure_count(), 2);
        assert_eq!(summary.failures()[1].line, 2);
        assert!(!summary.passed());
        summary.terminate();
    }

    #[test]
    fn test_failure_limit_rejects_extra_records() {
        let case = CaseDescriptor::new("suite", "case", noop);
        let mut summary = Summary::with_failure_limit(&case, 1).unwrap();
        summary.record(failure(1)).unwrap();

        let err = summary.record(failure(2)).unwrap_err();
        assert_eq!(err, EngineError::MaxSizeExceeded { requested: 2, max: 1 });
        assert_eq!(summary.failure_count(), 1);
    }
}
