//! Assertion Evaluator
//!
//! This module decides whether a typed comparison holds and, when it does not,
//! composes the two strings a failure carries:
//!
//! - a **failure message** that names the compared expressions, e.g.
//!   `‘x’ is expected to be equal to ‘y’`
//! - a **diagnostic** that dumps the operand values with the operator symbol,
//!   e.g. `2 == 3`
//!
//! ## Categories
//!
//! - **Condition**: a bare boolean with a caller-supplied message, no diagnostic
//! - **Boolean**: a value checked against an expected truth value
//! - **Numeric**: signed, unsigned and real comparisons under six operators
//! - **Fuzzy real**: absolute-or-relative tolerance, equality operators only
//! - **String**: case-obeying or case-insensitive, equality operators only
//!
//! Evaluation never fails. When a message cannot be composed it is dropped
//! and the failure is still recorded without it.

use std::fmt;

use tracing::trace;

pub mod compare;

pub use compare::{
    almost_equal, str_equal, BoolCheck, Condition, FuzzyComparison, IntComparison, Number,
    NumericComparison, RealComparison, StrComparison, UintComparison,
};

// ============================================================================
// CORE TYPES
// ============================================================================

/// How a failing assertion affects the rest of the test body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Recorded; the test body keeps running.
    #[default]
    Nonfatal,
    /// Recorded; the rest of the test body is skipped.
    Fatal,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Nonfatal => "nonfatal",
            Severity::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Comparison operator shared by the numeric categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equal,
    NotEqual,
    Greater,
    Lesser,
    GreaterOrEqual,
    LesserOrEqual,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::Greater,
        Operator::Lesser,
        Operator::GreaterOrEqual,
        Operator::LesserOrEqual,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::Greater => ">",
            Operator::Lesser => "<",
            Operator::GreaterOrEqual => ">=",
            Operator::LesserOrEqual => "<=",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operator::Equal => "equal to",
            Operator::NotEqual => "not equal to",
            Operator::Greater => "greater than",
            Operator::Lesser => "less than",
            Operator::GreaterOrEqual => "greater than or equal to",
            Operator::LesserOrEqual => "less than or equal to",
        }
    }

    /// Applies the operator through `PartialOrd`.
    ///
    /// Unordered operands (NaN) satisfy only `NotEqual`.
    pub fn apply<T: PartialOrd + ?Sized>(self, a: &T, b: &T) -> bool {
        match self {
            Operator::Equal => a == b,
            Operator::NotEqual => a != b,
            Operator::Greater => a > b,
            Operator::Lesser => a < b,
            Operator::GreaterOrEqual => a >= b,
            Operator::LesserOrEqual => a <= b,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The operator subset allowed for fuzzy and string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EqualityOperator {
    Equal,
    NotEqual,
}

impl EqualityOperator {
    /// Resolves the operator against an equality verdict.
    pub fn resolve(self, equal: bool) -> bool {
        match self {
            EqualityOperator::Equal => equal,
            EqualityOperator::NotEqual => !equal,
        }
    }
}

impl From<EqualityOperator> for Operator {
    fn from(op: EqualityOperator) -> Self {
        match op {
            EqualityOperator::Equal => Operator::Equal,
            EqualityOperator::NotEqual => Operator::NotEqual,
        }
    }
}

/// Case handling for string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrCase {
    Obey,
    Ignore,
}

impl StrCase {
    pub fn as_str(self) -> &'static str {
        match self {
            StrCase::Obey => "obey",
            StrCase::Ignore => "ignore",
        }
    }
}

/// Source position of an assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    pub file: &'a str,
    pub line: u32,
}

impl<'a> Location<'a> {
    pub fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }
}

impl Location<'static> {
    /// Captures the location of the outermost `#[track_caller]` frame.
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// An evaluated value paired with the source text that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operand<'a, T> {
    pub expr: &'a str,
    pub value: T,
}

impl<'a, T> Operand<'a, T> {
    pub fn new(expr: &'a str, value: T) -> Self {
        Self { expr, value }
    }
}

// ============================================================================
// EVALUATION PROTOCOL
// ============================================================================

/// A single typed comparison the evaluator can assess.
pub trait Comparison {
    /// Short description used in trace output, e.g. `"string comparison"`.
    fn kind(&self) -> &'static str;

    /// Whether the comparison passes.
    fn holds(&self) -> bool;

    /// Writes the human-readable failure message.
    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    /// Writes the operand dump. Categories without one return `Ok(false)`.
    fn diagnose(&self, out: &mut dyn fmt::Write) -> Result<bool, fmt::Error>;
}

/// Result of assessing a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Evaluation {
    pub passed: bool,
    pub message: Option<String>,
    pub diagnostic: Option<String>,
}

impl Evaluation {
    pub fn pass() -> Self {
        Self {
            passed: true,
            message: None,
            diagnostic: None,
        }
    }
}

/// Assesses a comparison and composes its messages when it fails.
pub fn assess(comparison: &dyn Comparison, location: Location<'_>) -> Evaluation {
    if comparison.holds() {
        return Evaluation::pass();
    }

    let mut message = String::new();
    let message = match comparison.describe(&mut message) {
        Ok(()) => Some(message),
        Err(_) => {
            trace!(
                file = location.file,
                line = location.line,
                "failed to create the failure message for the {} test",
                comparison.kind()
            );
            None
        }
    };

    let mut diagnostic = String::new();
    let diagnostic = match comparison.diagnose(&mut diagnostic) {
        Ok(true) => Some(diagnostic),
        Ok(false) => None,
        Err(_) => {
            trace!(
                file = location.file,
                line = location.line,
                "failed to create the diagnostic message for the {} test",
                comparison.kind()
            );
            None
        }
    };

    Evaluation {
        passed: false,
        message,
        diagnostic,
    }
}
