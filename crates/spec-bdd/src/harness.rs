//! Pluggable execution of one test method.
//!
//! [`Suite::run_test_with`](crate::Suite::run_test_with) hands the whole
//! method (set-up, body and tear-down) to a [`HarnessAdapter`]. The default
//! [`StdHarness`] calls it on the current thread; other harnesses can wrap it
//! in a runtime or instrument it without suite code changing.

use crate::assertion::SourceLocation;

/// Identifies the test method a harness is about to run.
///
/// # Examples
///
/// ```
/// use spec_bdd::{SourceLocation, TestMethod};
///
/// let method = TestMethod::new("WidgetSpec", "resizes", SourceLocation::new("tests/widget.rs", 12));
/// assert_eq!(method.suite_name(), "WidgetSpec");
/// assert_eq!(method.name(), "resizes");
/// assert_eq!(method.location().line(), 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestMethod {
    suite_name: &'static str,
    name: String,
    location: SourceLocation,
}

impl TestMethod {
    /// Describes the method `name` of suite type `suite_name`, started at
    /// `location`.
    #[must_use]
    pub fn new(suite_name: &'static str, name: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            suite_name,
            name: name.into(),
            location,
        }
    }

    /// Type name of the suite running the method.
    #[must_use]
    pub const fn suite_name(&self) -> &'static str {
        self.suite_name
    }

    /// The test method's name, as libtest reports it.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the run was started.
    #[must_use]
    pub const fn location(&self) -> SourceLocation {
        self.location
    }
}

/// Runs a test method inside a harness-specific environment.
///
/// The harness must call `method_body` exactly once and return its result.
pub trait HarnessAdapter {
    /// Executes `method_body` for `method`.
    fn run<T, F>(&self, method: &TestMethod, method_body: F) -> T
    where
        F: FnOnce() -> T;
}

/// Harness running the method directly on the calling thread.
///
/// # Examples
///
/// ```
/// use spec_bdd::{HarnessAdapter, SourceLocation, StdHarness, TestMethod};
///
/// let method = TestMethod::new("MathSpec", "doubles", SourceLocation::new("tests/math.rs", 4));
/// assert_eq!(StdHarness::new().run(&method, || 21 * 2), 42);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct StdHarness;

impl StdHarness {
    /// Creates the harness.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl HarnessAdapter for StdHarness {
    fn run<T, F>(&self, _method: &TestMethod, method_body: F) -> T
    where
        F: FnOnce() -> T,
    {
        method_body()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method() -> TestMethod {
        TestMethod::new("UnitSpec", "runs", SourceLocation::new("unit.rs", 1))
    }

    #[test]
    fn std_harness_runs_borrowing_bodies_once() {
        let mut calls = 0_u8;
        let result = StdHarness::new().run(&method(), || {
            calls += 1;
            "done"
        });
        assert_eq!(result, "done");
        assert_eq!(calls, 1);
    }

    #[test]
    #[should_panic(expected = "harness body panic")]
    fn std_harness_propagates_panics() {
        StdHarness::new().run(&method(), || panic!("harness body panic"));
    }
}
