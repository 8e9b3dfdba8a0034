// Exact report text, rendered without color.

use pretty_assertions::assert_eq;
use verdict::assertion::{Location, Severity};
use verdict::prelude::*;
use verdict::report::Reporter;
use verdict::summary::{Failure, Summary};

fn noop(_ctx: &mut ExecutionContext<'_, '_>) -> Outcome {
    Ok(())
}

fn render(summary: &Summary<'_>) -> String {
    let mut reporter = Reporter::capture();
    summary.print(&mut reporter).unwrap();
    reporter.contents()
}

#[test]
fn passing_case_prints_only_the_header() {
    let case = CaseDescriptor::new("math", "adds", noop);
    let mut summary = Summary::initialize(&case).unwrap();
    summary.count_assertion();
    summary.set_elapsed(4_210);

    assert_eq!(render(&summary), "[PASSED] \"math\" / \"adds\" (0.004210 ms)\n");
}

#[test]
fn failures_follow_the_header_in_order() {
    let case = CaseDescriptor::new("math", "compares", noop);
    let mut summary = Summary::initialize(&case).unwrap();
    summary
        .record(Failure::new(
            Location::new("tests/math.rs", 12),
            Severity::Nonfatal,
            Some("‘2’ is expected to be equal to ‘3’".to_string()),
            Some("2 == 3".to_string()),
        ))
        .unwrap();
    summary
        .record(Failure::new(
            Location::new("tests/math.rs", 15),
            Severity::Fatal,
            None,
            None,
        ))
        .unwrap();
    summary.set_elapsed(1_500_000);

    let expected = concat!(
        "[FAILED] \"math\" / \"compares\" (1.500000 ms)\n",
        "tests/math.rs:12: nonfatal test failure: ‘2’ is expected to be equal to ‘3’\n",
        "2 == 3\n",
        "tests/math.rs:15: fatal test failure: \n",
    );
    assert_eq!(render(&summary), expected);
}

fn flags_body(ctx: &mut ExecutionContext<'_, '_>) -> Outcome {
    ctx.check_false("ready", true)?;
    ctx.require_str(
        Operand::new("name", "alpha"),
        EqualityOperator::Equal,
        Operand::new("\"beta\"", "beta"),
        StrCase::Obey,
    )?;
    ctx.check(false, "unreachable")
}

#[test]
fn context_failures_render_end_to_end() {
    let case = CaseDescriptor::new("flags", "ready", flags_body);
    let mut summary = Summary::initialize(&case).unwrap();
    let mut fixture = Fixture::none();
    {
        let mut ctx = ExecutionContext::establish(&mut summary, &mut fixture);
        let outcome = flags_body(&mut ctx);
        ctx.conclude(outcome).unwrap();
    }

    let rendered = render(&summary);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("[FAILED] \"flags\" / \"ready\" ("));
    assert!(lines[1].starts_with(file!()));
    assert!(lines[1].ends_with("nonfatal test failure: ‘ready’ is expected to be false"));
    assert_eq!(lines[2], "1 == 0");
    assert!(lines[3].ends_with(
        ": fatal test failure: ‘name’ is expected to be equal to ‘\"beta\"’ (case: obey)"
    ));
    assert_eq!(lines[4], "\"alpha\" == \"beta\"");
}
