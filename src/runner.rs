//! Suite Runner
//!
//! Drives registered cases strictly in the order supplied. For each case:
//!
//! 1. initialize a fresh [`Summary`]
//! 2. build the fixture (an error here stops the whole run)
//! 3. read the clock, run the body inside an armed checkpoint, read the clock again
//!    (a panicking body counts as a fatal failure)
//! 4. tear the fixture down, however the body ended
//! 5. print the summary and release it
//!
//! Assertion failures never stop the runner. Only infrastructure errors do.

use std::ffi::OsString;
use std::panic::{self, AssertUnwindSafe};

use termcolor::{StandardStream, WriteColor};
use tracing::{debug, error, info, warn};

use crate::case::{Fixture, TestCase};
use crate::config::RunnerConfig;
use crate::context::ExecutionContext;
use crate::errors::{EngineError, Status};
use crate::logging;
use crate::report::Reporter;
use crate::summary::Summary;
use crate::timer::{elapsed_between, Clock, MonotonicClock};

pub struct SuiteRunner<W: WriteColor = StandardStream> {
    config: RunnerConfig,
    clock: Box<dyn Clock>,
    reporter: Reporter<W>,
}

impl SuiteRunner<StandardStream> {
    /// Creates a runner reporting to stderr.
    pub fn new(config: RunnerConfig) -> Self {
        let reporter = Reporter::stderr(config.color.color_choice());
        Self::with_reporter(config, reporter)
    }
}

impl<W: WriteColor> SuiteRunner<W> {
    /// Creates a runner reporting to `writer`.
    pub fn with_writer(config: RunnerConfig, writer: W) -> Self {
        Self::with_reporter(config, Reporter::new(writer))
    }

    pub fn with_reporter(config: RunnerConfig, reporter: Reporter<W>) -> Self {
        Self {
            config,
            clock: Box::new(MonotonicClock),
            reporter,
        }
    }

    /// Replaces the clock used to time case bodies.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn reporter(&self) -> &Reporter<W> {
        &self.reporter
    }

    pub fn into_reporter(self) -> Reporter<W> {
        self.reporter
    }

    /// Runs every case in order, stopping at the first infrastructure error.
    pub fn run(&mut self, cases: &[&dyn TestCase]) -> Result<(), EngineError> {
        if cases.is_empty() {
            info!("nothing to run");
            return Ok(());
        }

        for &case in cases {
            let mut summary = self.initialize_summary(case).map_err(|e| {
                error!(
                    suite = case.suite_name(),
                    case = case.name(),
                    "failed to initialize the summary"
                );
                e
            })?;

            self.run_case(&mut summary, case).map_err(|e| {
                error!(
                    suite = case.suite_name(),
                    case = case.name(),
                    "failed to run a test case"
                );
                e
            })?;

            if let Err(e) = summary.print(&mut self.reporter) {
                warn!(
                    suite = case.suite_name(),
                    case = case.name(),
                    error = %e,
                    "failed to print the test report"
                );
            }
            summary.terminate();
        }
        Ok(())
    }

    fn initialize_summary<'c>(&self, case: &'c dyn TestCase) -> Result<Summary<'c>, EngineError> {
        match self.config.max_failures {
            Some(max) => Summary::with_failure_limit(case, max),
            None => Summary::initialize(case),
        }
    }

    /// Executes one case against `summary`: set-up, timed body, tear-down.
    ///
    /// A panicking body is recorded as a fatal failure. A Failure Log error
    /// raised by the body is returned after tear-down.
    pub fn run_case(
        &self,
        summary: &mut Summary<'_>,
        case: &dyn TestCase,
    ) -> Result<(), EngineError> {
        let mut fixture: Fixture = case.set_up().map_err(|e| {
            error!(
                "failed to set-up the fixture (suite: \"{}\", case: \"{}\")",
                case.suite_name(),
                case.name()
            );
            e
        })?;

        let begin = self.clock.now();
        let concluded = {
            let mut ctx = ExecutionContext::establish(summary, &mut fixture);
            let outcome = match panic::catch_unwind(AssertUnwindSafe(|| case.run(&mut ctx))) {
                Ok(outcome) => outcome,
                Err(payload) => {
                    warn!(
                        suite = case.suite_name(),
                        case = case.name(),
                        "test body panicked"
                    );
                    ctx.record_panic(&*payload)
                }
            };
            ctx.conclude(outcome)
        };
        let end = self.clock.now();

        let elapsed = elapsed_between(begin, end).unwrap_or_else(|| {
            warn!(
                suite = case.suite_name(),
                case = case.name(),
                "failed to measure the time elapsed"
            );
            0
        });
        summary.set_elapsed(elapsed);

        case.tear_down(fixture);

        let state = concluded?;
        debug!(
            suite = case.suite_name(),
            case = case.name(),
            ?state,
            tests = summary.test_count(),
            failures = summary.failure_count(),
            "test case finished"
        );
        Ok(())
    }
}

/// Runs `cases` with a configuration parsed from process arguments.
///
/// Installs the stderr log subscriber at the requested `--log-level` unless
/// one is already in place. Returns the status of the first infrastructure
/// error, or success once every case has run, whatever its assertions
/// reported.
pub fn run<I, T>(cases: &[&dyn TestCase], args: I) -> Status
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let config = RunnerConfig::from_args(args);
    logging::init(config.log_level.as_deref());
    let result = SuiteRunner::new(config).run(cases);
    Status::from_result(&result)
}
