//! Execution Checkpoint
//!
//! A checkpoint is established right before a test body runs. It starts out
//! *armed*; the first fatal assertion failure flips it to *aborted* and hands
//! the body an [`Aborted`] signal. Test bodies return [`Outcome`] and forward
//! the signal with `?`, so no statement after the failing assertion executes
//! and control lands back in the runner, which then runs tear-down.
//!
//! No cleanup is performed on the body's behalf beyond what ordinary scope
//! exit already does.

use std::fmt;

/// Result type of every assertion and of every test body.
pub type Outcome = Result<(), Aborted>;

/// Signal that a fatal assertion failed and the test body must stop.
///
/// Only a [`Checkpoint`] can produce one.
#[must_use = "a fatal failure must be propagated with `?` to stop the test body"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aborted {
    _private: (),
}

impl fmt::Display for Aborted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("test body aborted by a fatal assertion failure")
    }
}

impl std::error::Error for Aborted {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointState {
    Armed,
    Aborted,
}

#[derive(Debug)]
pub struct Checkpoint {
    state: CheckpointState,
}

impl Checkpoint {
    pub fn establish() -> Self {
        Self {
            state: CheckpointState::Armed,
        }
    }

    /// Moves to the aborted state and returns the signal to propagate.
    pub fn abort(&mut self) -> Outcome {
        self.state = CheckpointState::Aborted;
        Err(Aborted { _private: () })
    }

    pub fn state(&self) -> CheckpointState {
        self.state
    }

    pub fn is_aborted(&self) -> bool {
        self.state == CheckpointState::Aborted
    }
}
