//! Concrete comparison categories.

use std::fmt;

use super::{Comparison, EqualityOperator, Operand, Operator, StrCase};

/// Fuzzy equality with an absolute-or-relative tolerance.
///
/// `a` and `b` are almost equal when `|a - b| <= tol` or
/// `|a - b| <= max(|a|, |b|) * tol`. The test is symmetric in `a` and `b`.
pub fn almost_equal(a: f64, b: f64, tol: f64) -> bool {
    let diff = (a - b).abs();
    if diff <= tol {
        return true;
    }
    diff <= a.abs().max(b.abs()) * tol
}

/// String equality, optionally folding ASCII case.
pub fn str_equal(a: &str, b: &str, case: StrCase) -> bool {
    match case {
        StrCase::Obey => a == b,
        StrCase::Ignore => a.eq_ignore_ascii_case(b),
    }
}

// ============================================================================
// CONDITION
// ============================================================================

/// A bare condition checked against an expected truth value.
#[derive(Debug, Clone, Copy)]
pub struct Condition<'a> {
    pub value: bool,
    pub expected: bool,
    pub message: &'a str,
}

impl<'a> Condition<'a> {
    pub fn new(value: bool, message: &'a str) -> Self {
        Self {
            value,
            expected: true,
            message,
        }
    }
}

impl Comparison for Condition<'_> {
    fn kind(&self) -> &'static str {
        "condition"
    }

    fn holds(&self) -> bool {
        self.value == self.expected
    }

    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str(self.message)
    }

    fn diagnose(&self, _out: &mut dyn fmt::Write) -> Result<bool, fmt::Error> {
        Ok(false)
    }
}

// ============================================================================
// BOOLEAN
// ============================================================================

/// A boolean expression expected to be `true` or `false`.
#[derive(Debug, Clone, Copy)]
pub struct BoolCheck<'a> {
    pub operand: Operand<'a, bool>,
    pub expected: bool,
}

impl<'a> BoolCheck<'a> {
    pub fn new(operand: Operand<'a, bool>, expected: bool) -> Self {
        Self { operand, expected }
    }
}

impl Comparison for BoolCheck<'_> {
    fn kind(&self) -> &'static str {
        "boolean"
    }

    fn holds(&self) -> bool {
        self.operand.value == self.expected
    }

    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(
            out,
            "‘{}’ is expected to be {}",
            self.operand.expr, self.expected
        )
    }

    fn diagnose(&self, out: &mut dyn fmt::Write) -> Result<bool, fmt::Error> {
        write!(
            out,
            "{} == {}",
            u8::from(self.operand.value),
            u8::from(self.expected)
        )?;
        Ok(true)
    }
}

// ============================================================================
// NUMERIC
// ============================================================================

/// Numeric operand types accepted by [`NumericComparison`].
pub trait Number: Copy + PartialOrd {
    const KIND: &'static str;

    fn compare(op: Operator, a: Self, b: Self) -> bool {
        op.apply(&a, &b)
    }

    fn render(self, out: &mut dyn fmt::Write) -> fmt::Result;
}

impl Number for i64 {
    const KIND: &'static str = "integer comparison";

    fn render(self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "{}", self)
    }
}

impl Number for u64 {
    const KIND: &'static str = "unsigned integer comparison";

    fn render(self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "{}", self)
    }
}

impl Number for f64 {
    const KIND: &'static str = "real comparison";

    // Exact equality is what a real comparison asserts.
    #[allow(clippy::float_cmp)]
    fn compare(op: Operator, a: Self, b: Self) -> bool {
        match op {
            Operator::Equal => a == b,
            Operator::NotEqual => a != b,
            _ => op.apply(&a, &b),
        }
    }

    fn render(self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "{:.6}", self)
    }
}

/// Two numbers compared under one of the six operators.
#[derive(Debug, Clone, Copy)]
pub struct NumericComparison<'a, T> {
    pub lhs: Operand<'a, T>,
    pub op: Operator,
    pub rhs: Operand<'a, T>,
}

pub type IntComparison<'a> = NumericComparison<'a, i64>;
pub type UintComparison<'a> = NumericComparison<'a, u64>;
pub type RealComparison<'a> = NumericComparison<'a, f64>;

impl<'a, T: Number> NumericComparison<'a, T> {
    pub fn new(lhs: Operand<'a, T>, op: Operator, rhs: Operand<'a, T>) -> Self {
        Self { lhs, op, rhs }
    }
}

impl<T: Number> Comparison for NumericComparison<'_, T> {
    fn kind(&self) -> &'static str {
        T::KIND
    }

    fn holds(&self) -> bool {
        T::compare(self.op, self.lhs.value, self.rhs.value)
    }

    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(
            out,
            "‘{}’ is expected to be {} ‘{}’",
            self.lhs.expr,
            self.op.name(),
            self.rhs.expr
        )
    }

    fn diagnose(&self, out: &mut dyn fmt::Write) -> Result<bool, fmt::Error> {
        self.lhs.value.render(out)?;
        write!(out, " {} ", self.op.symbol())?;
        self.rhs.value.render(out)?;
        Ok(true)
    }
}

// ============================================================================
// FUZZY REAL
// ============================================================================

/// Two reals compared for near-equality within a tolerance.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyComparison<'a> {
    pub lhs: Operand<'a, f64>,
    pub op: EqualityOperator,
    pub rhs: Operand<'a, f64>,
    pub tolerance: f64,
}

impl<'a> FuzzyComparison<'a> {
    pub fn new(
        lhs: Operand<'a, f64>,
        op: EqualityOperator,
        rhs: Operand<'a, f64>,
        tolerance: f64,
    ) -> Self {
        Self {
            lhs,
            op,
            rhs,
            tolerance,
        }
    }
}

impl Comparison for FuzzyComparison<'_> {
    fn kind(&self) -> &'static str {
        "real almost equal"
    }

    fn holds(&self) -> bool {
        self.op
            .resolve(almost_equal(self.lhs.value, self.rhs.value, self.tolerance))
    }

    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(
            out,
            "‘{}’ is expected to be almost {} ‘{}’ (tolerance: {:.6})",
            self.lhs.expr,
            Operator::from(self.op).name(),
            self.rhs.expr,
            self.tolerance
        )
    }

    fn diagnose(&self, out: &mut dyn fmt::Write) -> Result<bool, fmt::Error> {
        write!(
            out,
            "{:.6} {} {:.6}",
            self.lhs.value,
            Operator::from(self.op).symbol(),
            self.rhs.value
        )?;
        Ok(true)
    }
}

// ============================================================================
// STRING
// ============================================================================

/// Two strings compared for equality.
#[derive(Debug, Clone, Copy)]
pub struct StrComparison<'a> {
    pub lhs: Operand<'a, &'a str>,
    pub op: EqualityOperator,
    pub rhs: Operand<'a, &'a str>,
    pub case: StrCase,
}

impl<'a> StrComparison<'a> {
    pub fn new(
        lhs: Operand<'a, &'a str>,
        op: EqualityOperator,
        rhs: Operand<'a, &'a str>,
        case: StrCase,
    ) -> Self {
        Self { lhs, op, rhs, case }
    }
}

impl Comparison for StrComparison<'_> {
    fn kind(&self) -> &'static str {
        "string comparison"
    }

    fn holds(&self) -> bool {
        self.op
            .resolve(str_equal(self.lhs.value, self.rhs.value, self.case))
    }

    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(
            out,
            "‘{}’ is expected to be {} ‘{}’ (case: {})",
            self.lhs.expr,
            Operator::from(self.op).name(),
            self.rhs.expr,
            self.case.as_str()
        )
    }

    fn diagnose(&self, out: &mut dyn fmt::Write) -> Result<bool, fmt::Error> {
        write!(
            out,
            "\"{}\" {} \"{}\"",
            self.lhs.value,
            Operator::from(self.op).symbol(),
            self.rhs.value
        )?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::{assess, Location};

    fn here() -> Location<'static> {
        Location::new("compare.rs", 1)
    }

    #[test]
    fn test_int_failure_messages() {
        let cmp = IntComparison::new(Operand::new("2", 2), Operator::Equal, Operand::new("3", 3));
        let evaluation = assess(&cmp, here());
        assert!(!evaluation.passed);
        assert_eq!(
            evaluation.message.as_deref(),
            Some("‘2’ is expected to be equal to ‘3’")
        );
        assert_eq!(evaluation.diagnostic.as_deref(), Some("2 == 3"));
    }

    #[test]
    fn test_uint_renders_unsigned() {
        let cmp = UintComparison::new(
            Operand::new("big", u64::MAX),
            Operator::Lesser,
            Operand::new("one", 1),
        );
        let evaluation = assess(&cmp, here());
        assert_eq!(
            evaluation.diagnostic.as_deref(),
            Some("18446744073709551615 < 1")
        );
    }

    #[test]
    fn test_real_uses_six_decimals() {
        let cmp = RealComparison::new(
            Operand::new("a", 1.5),
            Operator::GreaterOrEqual,
            Operand::new("b", 2.25),
        );
        let evaluation = assess(&cmp, here());
        assert_eq!(
            evaluation.message.as_deref(),
            Some("‘a’ is expected to be greater than or equal to ‘b’")
        );
        assert_eq!(evaluation.diagnostic.as_deref(), Some("1.500000 >= 2.250000"));
    }

    #[test]
    fn test_bool_messages() {
        let cmp = BoolCheck::new(Operand::new("0", false), true);
        let evaluation = assess(&cmp, here());
        assert_eq!(
            evaluation.message.as_deref(),
            Some("‘0’ is expected to be true")
        );
        assert_eq!(evaluation.diagnostic.as_deref(), Some("0 == 1"));
    }

    #[test]
    fn test_condition_has_no_diagnostic() {
        let evaluation = assess(&Condition::new(false, "queue drained"), here());
        assert_eq!(evaluation.message.as_deref(), Some("queue drained"));
        assert_eq!(evaluation.diagnostic, None);
    }

    #[test]
    fn test_fuzzy_scenarios() {
        assert!(almost_equal(1.0, 1.0000001, 1e-5));
        assert!(!almost_equal(1.0, 2.0, 1e-5));

        let cmp = FuzzyComparison::new(
            Operand::new("1.0", 1.0),
            EqualityOperator::Equal,
            Operand::new("2.0", 2.0),
            1e-5,
        );
        let evaluation = assess(&cmp, here());
        assert_eq!(
            evaluation.message.as_deref(),
            Some("‘1.0’ is expected to be almost equal to ‘2.0’ (tolerance: 0.000010)")
        );
        assert_eq!(evaluation.diagnostic.as_deref(), Some("1.000000 == 2.000000"));
    }

    #[test]
    fn test_fuzzy_relative_branch() {
        // Absolute difference is 1000, but relative to 1e9 it is tiny.
        assert!(almost_equal(1e9, 1e9 + 1000.0, 1e-5));
        assert!(almost_equal(1e9 + 1000.0, 1e9, 1e-5));
    }

    #[test]
    fn test_str_messages() {
        let cmp = StrComparison::new(
            Operand::new("greeting", "Hello"),
            EqualityOperator::Equal,
            Operand::new("\"hello\"", "hello"),
            StrCase::Obey,
        );
        let evaluation = assess(&cmp, here());
        assert_eq!(
            evaluation.message.as_deref(),
            Some("‘greeting’ is expected to be equal to ‘\"hello\"’ (case: obey)")
        );
        assert_eq!(
            evaluation.diagnostic.as_deref(),
            Some("\"Hello\" == \"hello\"")
        );

        let ignoring = StrComparison { case: StrCase::Ignore, ..cmp };
        assert!(ignoring.holds());
    }

    #[test]
    fn test_str_not_equal_no_case() {
        let cmp = StrComparison::new(
            Operand::new("a", "ABC"),
            EqualityOperator::NotEqual,
            Operand::new("b", "abc"),
            StrCase::Ignore,
        );
        let evaluation = assess(&cmp, here());
        assert!(!evaluation.passed);
        assert_eq!(
            evaluation.message.as_deref(),
            Some("‘a’ is expected to be not equal to ‘b’ (case: ignore)")
        );
        assert_eq!(evaluation.diagnostic.as_deref(), Some("\"ABC\" != \"abc\""));
    }
}
