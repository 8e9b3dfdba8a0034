//! Command-line arguments accepted by the runner entry point.
//!
//! Arguments only tune presentation and logging. They never change which
//! cases run or in what order.

use std::ffi::OsString;

use clap::Parser;
use tracing::debug;

use crate::config::{ColorMode, RunnerConfig};

/// Arguments recognized by [`run`](crate::runner::run).
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(
    name = "verdict",
    version,
    about = "Runs registered test cases one at a time and reports each verdict."
)]
pub struct RunnerArgs {
    /// When to color the PASSED/FAILED label.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Logging filter, overridden by the VERDICT_LOG environment variable.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Maximum number of failures recorded per case.
    #[arg(long)]
    pub max_failures: Option<usize>,
}

impl RunnerArgs {
    /// Parses `args`, falling back to defaults when they are not understood.
    pub fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(error = %e, "ignoring unrecognized runner arguments");
                Self::default()
            }
        }
    }

    pub fn into_config(self) -> RunnerConfig {
        RunnerConfig {
            color: self.color,
            log_level: self.log_level,
            max_failures: self.max_failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_arguments() {
        let args = RunnerArgs::parse_lenient(["suite"]);
        assert_eq!(args, RunnerArgs::default());
    }

    #[test]
    fn test_unknown_arguments_fall_back() {
        let args = RunnerArgs::parse_lenient(["suite", "--bogus", "--color", "always"]);
        assert_eq!(args, RunnerArgs::default());
    }

    #[test]
    fn test_log_level() {
        let args = RunnerArgs::parse_lenient(["suite", "--log-level", "verdict=trace"]);
        assert_eq!(args.log_level.as_deref(), Some("verdict=trace"));
    }
}
