//! Verdict Error Handling
//!
//! Infrastructure failures of the engine live here. They are deliberately kept
//! apart from assertion failures: a failed assertion is test content and ends
//! up in a [`Summary`](crate::summary::Summary), while an [`EngineError`] means
//! the engine itself could not do its job (grow the failure log, read a clock,
//! build a fixture).
//!
//! Every error maps onto one of the four integer [`Status`] codes the runner
//! reports to its caller.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// STATUS CODES - Integer-level outcome of core operations
// ============================================================================

/// Outcome of a core operation, as reported to the caller of the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    GenericError,
    AllocationError,
    MaxSizeExceeded,
}

impl Status {
    /// Returns the integer code used at process boundaries.
    pub fn code(self) -> i32 {
        match self {
            Status::Success => 0,
            Status::GenericError => -1,
            Status::AllocationError => -2,
            Status::MaxSizeExceeded => -3,
        }
    }

    pub fn is_success(self) -> bool {
        self == Status::Success
    }

    /// Collapses a core result into its status code.
    pub fn from_result<T>(result: &Result<T, EngineError>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(e) => e.status(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::GenericError => "error",
            Status::AllocationError => "allocation error",
            Status::MaxSizeExceeded => "max size exceeded",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ENGINE ERRORS - Infrastructure failures with diagnostic codes
// ============================================================================

/// Infrastructure failure raised by the engine.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("engine error: {reason}")]
    #[diagnostic(code(verdict::generic))]
    Generic { reason: String },

    #[error("failed to allocate storage for {requested} elements")]
    #[diagnostic(
        code(verdict::buffer::allocation),
        help("the process ran out of memory while growing the failure log")
    )]
    Allocation { requested: usize },

    #[error("requested capacity {requested} exceeds the maximum of {max}")]
    #[diagnostic(
        code(verdict::buffer::max_size),
        help("a buffer can never hold more elements than its element size allows")
    )]
    MaxSizeExceeded { requested: usize, max: usize },

    #[error("failed to set-up the fixture (suite: \"{suite}\", case: \"{case}\"): {reason}")]
    #[diagnostic(code(verdict::runner::set_up))]
    SetUp {
        suite: String,
        case: String,
        reason: String,
        status: Status,
    },
}

impl EngineError {
    pub fn generic(reason: impl Into<String>) -> Self {
        EngineError::Generic {
            reason: reason.into(),
        }
    }

    /// Builds a set-up error that reports [`Status::GenericError`].
    pub fn set_up(
        suite: impl Into<String>,
        case: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EngineError::SetUp {
            suite: suite.into(),
            case: case.into(),
            reason: reason.into(),
            status: Status::GenericError,
        }
    }

    /// Maps the error onto the status code surfaced by the runner.
    pub fn status(&self) -> Status {
        match self {
            EngineError::Generic { .. } => Status::GenericError,
            EngineError::Allocation { .. } => Status::AllocationError,
            EngineError::MaxSizeExceeded { .. } => Status::MaxSizeExceeded,
            EngineError::SetUp { status, .. } => *status,
        }
    }
}
