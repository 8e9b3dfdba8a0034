//! Verdict: a minimal, sequential test-execution engine.
//!
//! Cases are registered as an ordered slice of [`TestCase`](case::TestCase)
//! values and handed to [`runner::run`]. Each body receives an
//! [`ExecutionContext`](context::ExecutionContext) whose `check_*` methods
//! record nonfatal failures and whose `require_*` methods additionally stop
//! the body when they fail.

pub use crate::errors::{EngineError, Status};

pub mod assertion;
pub mod buffer;
pub mod case;
pub mod checkpoint;
pub mod cli;
pub mod config;
pub mod context;
pub mod errors;
pub mod logging;
pub mod report;
pub mod runner;
pub mod summary;
pub mod timer;

pub const MAJOR_VERSION: u32 = 0;
pub const MINOR_VERSION: u32 = 1;
pub const PATCH_VERSION: u32 = 0;

pub mod prelude {
    pub use crate::assertion::{EqualityOperator, Operand, Operator, Severity, StrCase};
    pub use crate::case::{CaseDescriptor, Fixture, TestCase};
    pub use crate::checkpoint::Outcome;
    pub use crate::config::{ColorMode, RunnerConfig};
    pub use crate::context::ExecutionContext;
    pub use crate::errors::{EngineError, Status};
    pub use crate::runner::{run, SuiteRunner};
}
