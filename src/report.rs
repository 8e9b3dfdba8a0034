//! Report rendering.
//!
//! Each finished case produces one header line followed by one entry per
//! failure:
//!
//! ```text
//! [FAILED] "math" / "adds" (0.004210 ms)
//! tests/math.rs:12: nonfatal test failure: ‘2’ is expected to be equal to ‘3’
//! 2 == 3
//! ```
//!
//! Output goes to any `termcolor::WriteColor` sink: stderr in normal runs, an
//! in-memory `termcolor::Buffer` when capturing. Only the verdict label is
//! styled.

use std::io::{self, Write};

use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::summary::{Failure, Summary};
use crate::timer::nanos_to_millis;

pub struct Reporter<W: WriteColor = StandardStream> {
    out: W,
}

impl Reporter<StandardStream> {
    /// Reports to the diagnostic stream.
    pub fn stderr(choice: ColorChoice) -> Self {
        Self::new(StandardStream::stderr(choice))
    }
}

impl Reporter<Buffer> {
    /// Reports into an uncolored in-memory buffer.
    pub fn capture() -> Self {
        Self::new(Buffer::no_color())
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(self.out.as_slice()).into_owned()
    }
}

impl<W: WriteColor> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn write_summary(&mut self, summary: &Summary<'_>) -> io::Result<()> {
        self.write_header(summary)?;
        for failure in summary.failures() {
            self.write_failure(failure)?;
        }
        self.out.flush()
    }

    fn write_header(&mut self, summary: &Summary<'_>) -> io::Result<()> {
        let passed = summary.passed();
        let color = if passed { Color::Green } else { Color::Red };

        write!(self.out, "[")?;
        self.out
            .set_color(ColorSpec::new().set_fg(Some(color)).set_intense(true).set_bold(true))?;
        write!(self.out, "{}", verdict_label(passed))?;
        self.out.reset()?;
        writeln!(
            self.out,
            "] \"{}\" / \"{}\" ({:.6} ms)",
            summary.suite_name(),
            summary.case_name(),
            nanos_to_millis(summary.elapsed_ns())
        )
    }

    fn write_failure(&mut self, failure: &Failure) -> io::Result<()> {
        writeln!(self.out, "{}", failure_line(failure))?;
        if let Some(diagnostic) = &failure.diagnostic {
            writeln!(self.out, "{}", diagnostic)?;
        }
        Ok(())
    }
}

pub fn verdict_label(passed: bool) -> &'static str {
    if passed {
        "PASSED"
    } else {
        "FAILED"
    }
}

/// Formats the `<file>:<line>: <severity> test failure: <message>` line.
pub fn failure_line(failure: &Failure) -> String {
    format!(
        "{}:{}: {} test failure: {}",
        failure.file,
        failure.line,
        failure.severity.label(),
        failure.message.as_deref().unwrap_or("")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::{Location, Severity};

    #[test]
    fn test_failure_line_without_message() {
        let failure = Failure::new(Location::new("a.rs", 7), Severity::Fatal, None, None);
        assert_eq!(failure_line(&failure), "a.rs:7: fatal test failure: ");
    }

    #[test]
    fn test_verdict_labels() {
        assert_eq!(verdict_label(true), "PASSED");
        assert_eq!(verdict_label(false), "FAILED");
    }
}
