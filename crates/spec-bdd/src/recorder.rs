//! Failure recording, the host side of the assertion redirector.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::SourceLocation;
use crate::reporting::{self, FailureRecord};

/// A failure captured during one test method.
///
/// # Examples
///
/// ```
/// use spec_bdd::{RecordedFailure, SourceLocation};
///
/// let failure = RecordedFailure::new(
///     "widget_spec",
///     " Widget it creates",
///     vec!["expected to equal <1>, got <0>".into()],
///     SourceLocation::new("tests/widget.rs", 12),
///     true,
/// );
/// assert_eq!(
///     failure.to_string(),
///     "tests/widget.rs:12: Widget it creates\n\texpected to equal <1>, got <0>"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedFailure {
    method: String,
    description: String,
    messages: Vec<String>,
    location: SourceLocation,
    expected: bool,
}

impl RecordedFailure {
    /// Creates a failure record.
    ///
    /// `expected` is `true` for failed assertions and `false` for panics
    /// that escaped a block.
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        description: impl Into<String>,
        messages: Vec<String>,
        location: SourceLocation,
        expected: bool,
    ) -> Self {
        Self {
            method: method.into(),
            description: description.into(),
            messages,
            location,
            expected,
        }
    }

    /// Name of the test method that was running.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The description stack rendered at failure time.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Failure messages in the order they were supplied.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Where the failure was raised.
    #[must_use]
    pub const fn location(&self) -> SourceLocation {
        self.location
    }

    /// Whether the failure came from an assertion rather than a panic.
    #[must_use]
    pub const fn expected(&self) -> bool {
        self.expected
    }
}

impl fmt::Display for RecordedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.location, self.description)?;
        for message in &self.messages {
            write!(f, "\n\t{message}")?;
        }
        Ok(())
    }
}

/// Receives every failure recorded by a suite.
pub trait FailureRecorder {
    /// Records one failure.
    fn record_failure(&mut self, failure: &RecordedFailure);
}

/// Default recorder: emits every failure through the `log` facade and keeps
/// nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingRecorder;

impl FailureRecorder for LoggingRecorder {
    fn record_failure(&mut self, failure: &RecordedFailure) {
        log::error!("{failure}");
    }
}

/// Logs failures like [`LoggingRecorder`] and also stores them in the
/// process-wide [`reporting`] collector.
///
/// Opt in with [`Spec::with_recorder`](crate::Spec::with_recorder) when a
/// report is wanted. The collector keeps every record until
/// [`reporting::drain`] is called, so whoever opts in owns draining it.
///
/// # Examples
///
/// ```
/// use spec_bdd::{ReportingRecorder, Spec, Suite, fail, reporting};
///
/// let mut spec = Spec::new()
///     .with_output(std::io::sink())
///     .with_recorder(ReportingRecorder);
/// let outcome = spec.try_run_test(|s| s.it("fails", |_| fail!("boom")));
/// assert!(outcome.is_err());
/// assert!(reporting::drain().iter().any(|record| record.messages() == ["boom"]));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ReportingRecorder;

impl FailureRecorder for ReportingRecorder {
    fn record_failure(&mut self, failure: &RecordedFailure) {
        LoggingRecorder.record_failure(failure);
        reporting::record(FailureRecord::from(failure));
    }
}

/// Recorder keeping failures in shared memory for later inspection.
///
/// Clones share the same storage, so one clone can be handed to a suite
/// while another is kept for assertions.
///
/// # Examples
///
/// ```
/// use spec_bdd::{CollectingRecorder, Spec, Suite, fail};
///
/// let recorder = CollectingRecorder::default();
/// let mut spec = Spec::new().with_recorder(recorder.clone());
/// let outcome = spec.try_run_test(|s| {
///     s.it("fails", |_| fail!("boom"));
/// });
/// assert!(outcome.is_err());
/// assert_eq!(recorder.failures().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CollectingRecorder {
    failures: Rc<RefCell<Vec<RecordedFailure>>>,
}

impl CollectingRecorder {
    /// Snapshot of everything recorded so far.
    #[must_use]
    pub fn failures(&self) -> Vec<RecordedFailure> {
        self.failures.borrow().clone()
    }

    /// Removes and returns everything recorded so far.
    #[must_use]
    pub fn drain(&self) -> Vec<RecordedFailure> {
        self.failures.borrow_mut().drain(..).collect()
    }
}

impl FailureRecorder for CollectingRecorder {
    fn record_failure(&mut self, failure: &RecordedFailure) {
        self.failures.borrow_mut().push(failure.clone());
    }
}
