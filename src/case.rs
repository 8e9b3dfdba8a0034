//! Test case registration.
//!
//! A test case is anything implementing [`TestCase`]: an identity, a required
//! body, and optional set-up/tear-down hooks with no-op defaults. Suites that
//! prefer plain functions can use [`CaseDescriptor`], which stores function
//! pointers for each hook.

use std::any::Any;
use std::fmt;

use crate::checkpoint::Outcome;
use crate::context::ExecutionContext;
use crate::errors::EngineError;

/// Opaque per-case state produced by set-up and handed back at tear-down.
#[derive(Default)]
pub struct Fixture(Option<Box<dyn Any>>);

impl Fixture {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn new<T: Any>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_ref().and_then(|b| b.downcast_ref::<T>())
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.0.as_mut().and_then(|b| b.downcast_mut::<T>())
    }

    /// Takes the fixture value out, leaving the fixture empty.
    ///
    /// On a type mismatch the value stays in place and `None` is returned.
    pub fn take<T: Any>(&mut self) -> Option<T> {
        match self.0.take()?.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(original) => {
                self.0 = Some(original);
                None
            }
        }
    }
}

impl fmt::Debug for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Fixture(..)"),
            None => f.write_str("Fixture(None)"),
        }
    }
}

/// A named, independently executable unit of verification.
pub trait TestCase {
    fn name(&self) -> &str;

    fn suite_name(&self) -> &str;

    /// Builds the fixture. An error here stops the whole run.
    fn set_up(&self) -> Result<Fixture, EngineError> {
        Ok(Fixture::none())
    }

    /// The test body.
    fn run(&self, ctx: &mut ExecutionContext<'_, '_>) -> Outcome;

    /// Releases the fixture. Runs even when the body was aborted.
    fn tear_down(&self, fixture: Fixture) {
        drop(fixture);
    }
}

pub type SetUpFn = fn() -> Result<Fixture, EngineError>;
pub type RunFn = fn(&mut ExecutionContext<'_, '_>) -> Outcome;
pub type TearDownFn = fn(Fixture);

/// A test case assembled from plain functions.
#[derive(Debug, Clone, Copy)]
pub struct CaseDescriptor {
    pub suite_name: &'static str,
    pub name: &'static str,
    pub set_up: Option<SetUpFn>,
    pub tear_down: Option<TearDownFn>,
    pub run: RunFn,
}

impl CaseDescriptor {
    pub const fn new(suite_name: &'static str, name: &'static str, run: RunFn) -> Self {
        Self {
            suite_name,
            name,
            set_up: None,
            tear_down: None,
            run,
        }
    }

    pub fn with_set_up(mut self, set_up: SetUpFn) -> Self {
        self.set_up = Some(set_up);
        self
    }

    pub fn with_tear_down(mut self, tear_down: TearDownFn) -> Self {
        self.tear_down = Some(tear_down);
        self
    }
}

impl TestCase for CaseDescriptor {
    fn name(&self) -> &str {
        self.name
    }

    fn suite_name(&self) -> &str {
        self.suite_name
    }

    fn set_up(&self) -> Result<Fixture, EngineError> {
        match self.set_up {
            Some(set_up) => set_up(),
            None => Ok(Fixture::none()),
        }
    }

    fn run(&self, ctx: &mut ExecutionContext<'_, '_>) -> Outcome {
        (self.run)(ctx)
    }

    fn tear_down(&self, fixture: Fixture) {
        if let Some(tear_down) = self.tear_down {
            tear_down(fixture);
        }
    }
}
