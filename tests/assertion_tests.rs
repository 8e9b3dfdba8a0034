// Comparison semantics across assertion categories.

use proptest::prelude::*;
use rstest::rstest;
use verdict::assertion::{
    almost_equal, assess, str_equal, Comparison, EqualityOperator, FuzzyComparison,
    IntComparison, Location, Operand, Operator, RealComparison, StrCase, StrComparison,
    UintComparison,
};

fn here() -> Location<'static> {
    Location::new("assertion_tests.rs", 1)
}

fn int(lhs: i64, op: Operator, rhs: i64) -> bool {
    IntComparison::new(Operand::new("a", lhs), op, Operand::new("b", rhs)).holds()
}

mod operators {
    use super::*;

    #[rstest]
    #[case(Operator::Equal, 3, 3, true)]
    #[case(Operator::Equal, 3, 4, false)]
    #[case(Operator::NotEqual, 3, 4, true)]
    #[case(Operator::Greater, 5, 4, true)]
    #[case(Operator::Greater, 4, 4, false)]
    #[case(Operator::Lesser, -1, 0, true)]
    #[case(Operator::GreaterOrEqual, 4, 4, true)]
    #[case(Operator::LesserOrEqual, 5, 4, false)]
    fn int_operator_table(
        #[case] op: Operator,
        #[case] lhs: i64,
        #[case] rhs: i64,
        #[case] expected: bool,
    ) {
        assert_eq!(int(lhs, op, rhs), expected);
    }

    #[rstest]
    #[case(Operator::Equal, "==", "equal to")]
    #[case(Operator::NotEqual, "!=", "not equal to")]
    #[case(Operator::Greater, ">", "greater than")]
    #[case(Operator::Lesser, "<", "less than")]
    #[case(Operator::GreaterOrEqual, ">=", "greater than or equal to")]
    #[case(Operator::LesserOrEqual, "<=", "less than or equal to")]
    fn operator_rendering(#[case] op: Operator, #[case] symbol: &str, #[case] name: &str) {
        assert_eq!(op.symbol(), symbol);
        assert_eq!(op.name(), name);
    }

    #[rstest]
    #[case(StrCase::Obey, "Abc", "Abc", true)]
    #[case(StrCase::Obey, "Abc", "abc", false)]
    #[case(StrCase::Ignore, "Abc", "aBC", true)]
    #[case(StrCase::Ignore, "Abc", "abd", false)]
    fn string_equality(
        #[case] case: StrCase,
        #[case] lhs: &str,
        #[case] rhs: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(str_equal(lhs, rhs, case), expected);
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn nonfatal_int_mismatch_message_and_diagnostic() {
        let cmp = IntComparison::new(Operand::new("2", 2), Operator::Equal, Operand::new("3", 3));
        let eval = assess(&cmp, here());
        assert!(!eval.passed);
        assert_eq!(
            eval.message.as_deref(),
            Some("‘2’ is expected to be equal to ‘3’")
        );
        assert_eq!(eval.diagnostic.as_deref(), Some("2 == 3"));
    }

    #[test]
    fn fuzzy_equality_scenarios() {
        assert!(almost_equal(1.0, 1.000_000_1, 1e-5));

        let cmp = FuzzyComparison::new(
            Operand::new("1.0", 1.0),
            EqualityOperator::Equal,
            Operand::new("2.0", 2.0),
            1e-5,
        );
        let eval = assess(&cmp, here());
        assert!(!eval.passed);
        assert_eq!(eval.diagnostic.as_deref(), Some("1.000000 == 2.000000"));
    }

    #[test]
    fn string_mismatch_mentions_case_mode() {
        let cmp = StrComparison::new(
            Operand::new("name", "Verdict"),
            EqualityOperator::Equal,
            Operand::new("\"other\"", "other"),
            StrCase::Ignore,
        );
        let eval = assess(&cmp, here());
        assert!(!eval.passed);
        assert_eq!(
            eval.message.as_deref(),
            Some("‘name’ is expected to be equal to ‘\"other\"’ (case: ignore)")
        );
        assert_eq!(eval.diagnostic.as_deref(), Some("\"Verdict\" == \"other\""));
    }
}

proptest! {
    #[test]
    fn int_equality_operators_are_complements(a in any::<i64>(), b in any::<i64>()) {
        prop_assert_ne!(int(a, Operator::Equal, b), int(a, Operator::NotEqual, b));
    }

    #[test]
    fn uint_equality_operators_are_complements(a in any::<u64>(), b in any::<u64>()) {
        let eq = UintComparison::new(Operand::new("a", a), Operator::Equal, Operand::new("b", b));
        let ne = UintComparison::new(Operand::new("a", a), Operator::NotEqual, Operand::new("b", b));
        prop_assert_ne!(eq.holds(), ne.holds());
    }

    #[test]
    fn real_equality_operators_are_complements(a in any::<f64>(), b in any::<f64>()) {
        let eq = RealComparison::new(Operand::new("a", a), Operator::Equal, Operand::new("b", b));
        let ne = RealComparison::new(Operand::new("a", a), Operator::NotEqual, Operand::new("b", b));
        prop_assert_ne!(eq.holds(), ne.holds());
    }

    #[test]
    fn fuzzy_equality_operators_are_complements(
        a in -1e6f64..1e6,
        b in -1e6f64..1e6,
        tol in 0f64..1.0,
    ) {
        let build = |op| FuzzyComparison::new(Operand::new("a", a), op, Operand::new("b", b), tol);
        prop_assert_ne!(
            build(EqualityOperator::Equal).holds(),
            build(EqualityOperator::NotEqual).holds()
        );
    }

    #[test]
    fn string_equality_operators_are_complements(a in "[a-zA-Z]{0,6}", b in "[a-zA-Z]{0,6}") {
        for case in [StrCase::Obey, StrCase::Ignore] {
            let build = |op| StrComparison::new(Operand::new("a", a.as_str()), op, Operand::new("b", b.as_str()), case);
            prop_assert_ne!(
                build(EqualityOperator::Equal).holds(),
                build(EqualityOperator::NotEqual).holds()
            );
        }
    }

    #[test]
    fn fuzzy_equality_is_symmetric(
        a in -1e9f64..1e9,
        b in -1e9f64..1e9,
        tol in 0f64..10.0,
    ) {
        prop_assert_eq!(almost_equal(a, b, tol), almost_equal(b, a, tol));
    }
}
