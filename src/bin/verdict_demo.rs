// Demo suite for the verdict runner.
// Usage: cargo run --bin verdict-demo -- [--color auto|always|never] [--log-level <filter>]

use std::env;
use std::process::ExitCode;

use verdict::logging;
use verdict::prelude::*;

fn adds(ctx: &mut ExecutionContext<'_, '_>) -> Outcome {
    ctx.check_int(Operand::new("1 + 1", 1 + 1), Operator::Equal, Operand::new("2", 2))?;
    ctx.check_str(
        Operand::new("\"Verdict\"", "Verdict"),
        EqualityOperator::Equal,
        Operand::new("\"VERDICT\"", "VERDICT"),
        StrCase::Ignore,
    )?;
    ctx.check_real_almost(
        Operand::new("1.0", 1.0),
        EqualityOperator::Equal,
        Operand::new("1.0000001", 1.000_000_1),
        1e-5,
    )
}

fn mismatch(ctx: &mut ExecutionContext<'_, '_>) -> Outcome {
    ctx.check_int(Operand::new("2", 2), Operator::Equal, Operand::new("3", 3))?;
    ctx.check_uint(Operand::new("7", 7), Operator::Greater, Operand::new("5", 5))
}

fn stops_early(ctx: &mut ExecutionContext<'_, '_>) -> Outcome {
    ctx.require_true("0 != 0", false)?;
    ctx.check(false, "never evaluated")
}

fn make_primes() -> Result<Fixture, EngineError> {
    Ok(Fixture::new(vec![2_u64, 3, 5, 7]))
}

fn primes(ctx: &mut ExecutionContext<'_, '_>) -> Outcome {
    let count = ctx.fixture::<Vec<u64>>().map_or(0, Vec::len) as u64;
    ctx.require_uint(Operand::new("primes.len()", count), Operator::Equal, Operand::new("4", 4))?;
    let last = ctx.fixture::<Vec<u64>>().and_then(|p| p.last().copied()).unwrap_or(0);
    ctx.check_uint(Operand::new("primes.last()", last), Operator::LesserOrEqual, Operand::new("10", 10))
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let config = RunnerConfig::from_args(&args);
    logging::init(config.log_level.as_deref());

    let cases = [
        CaseDescriptor::new("demo", "adds", adds),
        CaseDescriptor::new("demo", "mismatch", mismatch),
        CaseDescriptor::new("demo", "stops early", stops_early),
        CaseDescriptor::new("demo", "primes", primes).with_set_up(make_primes),
    ];
    let registered: Vec<&dyn TestCase> = cases.iter().map(|c| c as &dyn TestCase).collect();

    match SuiteRunner::new(config).run(&registered) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let status = e.status();
            eprintln!("{:?}", miette::Report::new(e));
            eprintln!("runner finished with status {} ({})", status.code(), status);
            ExitCode::FAILURE
        }
    }
}
