//! Runner configuration.

use clap::ValueEnum;
use termcolor::ColorChoice;

use crate::cli::RunnerArgs;

/// When to style the verdict label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    /// Style only when stderr is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn color_choice(self) -> ColorChoice {
        match self {
            ColorMode::Auto if atty::is(atty::Stream::Stderr) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

/// Configuration for a suite run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    pub color: ColorMode,
    /// Filter directive for engine logging, e.g. `"warn"` or `"verdict=trace"`.
    pub log_level: Option<String>,
    /// Upper bound on the failures a single case may record.
    pub max_failures: Option<usize>,
}

impl RunnerConfig {
    /// Builds a configuration from process arguments (program name first).
    ///
    /// Unrecognized arguments leave the defaults in place.
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        RunnerArgs::parse_lenient(args).into_config()
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    pub fn with_max_failures(mut self, max_failures: usize) -> Self {
        self.max_failures = Some(max_failures);
        self
    }

    pub fn use_colors(&self) -> bool {
        self.color.color_choice() != ColorChoice::Never
    }
}
