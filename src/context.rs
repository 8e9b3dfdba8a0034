//! Per-run execution context handed to a test body.
//!
//! The context binds the armed [`Checkpoint`], the active [`Summary`] and the
//! case's [`Fixture`] for exactly one `run` call. Every assertion goes through
//! [`ExecutionContext::evaluate`], which counts it, records a failure when it
//! does not hold, and aborts the checkpoint when a fatal one fails.
//!
//! The assertion methods are `#[track_caller]`: the reported file and line
//! are those of the call inside the test body.

use std::any::Any;

use tracing::{debug, error};

use crate::assertion::{
    assess, BoolCheck, Comparison, Condition, EqualityOperator, FuzzyComparison, IntComparison,
    Location, Operand, Operator, RealComparison, Severity, StrCase, StrComparison,
    UintComparison,
};
use crate::case::Fixture;
use crate::checkpoint::{Checkpoint, CheckpointState, Outcome};
use crate::errors::EngineError;
use crate::summary::{Failure, Summary};

/// File reported for failures raised by a panic rather than an assertion.
pub const PANIC_LOCATION: &str = "<panic>";

fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

pub struct ExecutionContext<'a, 'c> {
    checkpoint: Checkpoint,
    summary: &'a mut Summary<'c>,
    fixture: &'a mut Fixture,
    error: Option<EngineError>,
}

impl<'a, 'c> ExecutionContext<'a, 'c> {
    /// Arms a fresh checkpoint bound to `summary` and `fixture`.
    pub fn establish(summary: &'a mut Summary<'c>, fixture: &'a mut Fixture) -> Self {
        Self {
            checkpoint: Checkpoint::establish(),
            summary,
            fixture,
            error: None,
        }
    }

    /// Ends the run and reports how the body terminated.
    ///
    /// Returns the first Failure Log error raised during the run, if any.
    pub fn conclude(self, outcome: Outcome) -> Result<CheckpointState, EngineError> {
        let state = if outcome.is_err() {
            CheckpointState::Aborted
        } else {
            self.checkpoint.state()
        };
        if state == CheckpointState::Aborted {
            debug!(
                suite = self.summary.suite_name(),
                case = self.summary.case_name(),
                "test body aborted"
            );
        }
        match self.error {
            Some(e) => Err(e),
            None => Ok(state),
        }
    }

    pub fn fixture<T: 'static>(&self) -> Option<&T> {
        self.fixture.downcast_ref::<T>()
    }

    pub fn fixture_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.fixture.downcast_mut::<T>()
    }

    pub fn summary(&self) -> &Summary<'c> {
        self.summary
    }

    pub fn is_aborted(&self) -> bool {
        self.checkpoint.is_aborted()
    }

    // ========================================================================
    // REPORTING
    // ========================================================================

    /// Records the outcome of one assertion into the Failure Log.
    ///
    /// A passing assertion only bumps the assertion counter.
    pub fn handle_result(
        &mut self,
        passed: bool,
        location: Location<'_>,
        severity: Severity,
        message: Option<String>,
        diagnostic: Option<String>,
    ) -> Result<(), EngineError> {
        self.summary.count_assertion();
        if passed {
            return Ok(());
        }
        self.summary
            .record(Failure::new(location, severity, message, diagnostic))
    }

    /// Evaluates `comparison` at `location` with the given severity.
    ///
    /// After an abort the context accepts no further assertions: they are
    /// neither counted nor recorded.
    pub fn evaluate(
        &mut self,
        comparison: &dyn Comparison,
        location: Location<'_>,
        severity: Severity,
    ) -> Outcome {
        if self.checkpoint.is_aborted() {
            return self.checkpoint.abort();
        }

        let evaluation = assess(comparison, location);
        let passed = evaluation.passed;

        if let Err(e) = self.handle_result(
            passed,
            location,
            severity,
            evaluation.message,
            evaluation.diagnostic,
        ) {
            error!(
                file = location.file,
                line = location.line,
                "failed to handle the test result for the {} test",
                comparison.kind()
            );
            self.error.get_or_insert(e);
            return self.checkpoint.abort();
        }

        if !passed && severity == Severity::Fatal {
            return self.checkpoint.abort();
        }
        Ok(())
    }

    /// Records a panic that escaped the test body as a fatal failure.
    ///
    /// The panic is reported even when the body had already been aborted.
    pub fn record_panic(&mut self, payload: &(dyn Any + Send)) -> Outcome {
        let message = match panic_message(payload) {
            Some(reason) => format!("test body panicked: {}", reason),
            None => "test body panicked".to_string(),
        };
        if let Err(e) = self.summary.record(Failure::new(
            Location::new(PANIC_LOCATION, 0),
            Severity::Fatal,
            Some(message),
            None,
        )) {
            self.error.get_or_insert(e);
        }
        self.checkpoint.abort()
    }

    /// Evaluates `comparison` at the caller's location.
    #[track_caller]
    pub fn assert_that(&mut self, comparison: &dyn Comparison, severity: Severity) -> Outcome {
        self.evaluate(comparison, Location::caller(), severity)
    }

    // ========================================================================
    // CONDITIONS AND BOOLEANS
    // ========================================================================

    #[track_caller]
    pub fn check(&mut self, condition: bool, message: &str) -> Outcome {
        self.assert_that(&Condition::new(condition, message), Severity::Nonfatal)
    }

    #[track_caller]
    pub fn require(&mut self, condition: bool, message: &str) -> Outcome {
        self.assert_that(&Condition::new(condition, message), Severity::Fatal)
    }

    #[track_caller]
    pub fn check_true(&mut self, expr: &str, value: bool) -> Outcome {
        self.assert_that(&BoolCheck::new(Operand::new(expr, value), true), Severity::Nonfatal)
    }

    #[track_caller]
    pub fn require_true(&mut self, expr: &str, value: bool) -> Outcome {
        self.assert_that(&BoolCheck::new(Operand::new(expr, value), true), Severity::Fatal)
    }

    #[track_caller]
    pub fn check_false(&mut self, expr: &str, value: bool) -> Outcome {
        self.assert_that(&BoolCheck::new(Operand::new(expr, value), false), Severity::Nonfatal)
    }

    #[track_caller]
    pub fn require_false(&mut self, expr: &str, value: bool) -> Outcome {
        self.assert_that(&BoolCheck::new(Operand::new(expr, value), false), Severity::Fatal)
    }

    // ========================================================================
    // NUMERIC
    // ========================================================================

    #[track_caller]
    pub fn check_int(&mut self, lhs: Operand<'_, i64>, op: Operator, rhs: Operand<'_, i64>) -> Outcome {
        self.assert_that(&IntComparison::new(lhs, op, rhs), Severity::Nonfatal)
    }

    #[track_caller]
    pub fn require_int(&mut self, lhs: Operand<'_, i64>, op: Operator, rhs: Operand<'_, i64>) -> Outcome {
        self.assert_that(&IntComparison::new(lhs, op, rhs), Severity::Fatal)
    }

    #[track_caller]
    pub fn check_uint(&mut self, lhs: Operand<'_, u64>, op: Operator, rhs: Operand<'_, u64>) -> Outcome {
        self.assert_that(&UintComparison::new(lhs, op, rhs), Severity::Nonfatal)
    }

    #[track_caller]
    pub fn require_uint(&mut self, lhs: Operand<'_, u64>, op: Operator, rhs: Operand<'_, u64>) -> Outcome {
        self.assert_that(&UintComparison::new(lhs, op, rhs), Severity::Fatal)
    }

    #[track_caller]
    pub fn check_real(&mut self, lhs: Operand<'_, f64>, op: Operator, rhs: Operand<'_, f64>) -> Outcome {
        self.assert_that(&RealComparison::new(lhs, op, rhs), Severity::Nonfatal)
    }

    #[track_caller]
    pub fn require_real(&mut self, lhs: Operand<'_, f64>, op: Operator, rhs: Operand<'_, f64>) -> Outcome {
        self.assert_that(&RealComparison::new(lhs, op, rhs), Severity::Fatal)
    }

    #[track_caller]
    pub fn check_real_almost(
        &mut self,
        lhs: Operand<'_, f64>,
        op: EqualityOperator,
        rhs: Operand<'_, f64>,
        tolerance: f64,
    ) -> Outcome {
        self.assert_that(&FuzzyComparison::new(lhs, op, rhs, tolerance), Severity::Nonfatal)
    }

    #[track_caller]
    pub fn require_real_almost(
        &mut self,
        lhs: Operand<'_, f64>,
        op: EqualityOperator,
        rhs: Operand<'_, f64>,
        tolerance: f64,
    ) -> Outcome {
        self.assert_that(&FuzzyComparison::new(lhs, op, rhs, tolerance), Severity::Fatal)
    }

    // ========================================================================
    // STRINGS
    // ========================================================================

    #[track_caller]
    pub fn check_str(
        &mut self,
        lhs: Operand<'_, &str>,
        op: EqualityOperator,
        rhs: Operand<'_, &str>,
        case: StrCase,
    ) -> Outcome {
        self.assert_that(&StrComparison::new(lhs, op, rhs, case), Severity::Nonfatal)
    }

    #[track_caller]
    pub fn require_str(
        &mut self,
        lhs: Operand<'_, &str>,
        op: EqualityOperator,
        rhs: Operand<'_, &str>,
        case: StrCase,
    ) -> Outcome {
        self.assert_that(&StrComparison::new(lhs, op, rhs, case), Severity::Fatal)
    }
}
