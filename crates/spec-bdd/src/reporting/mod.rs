//! Failure reporting collector.
//!
//! The module stores every failure recorded through
//! [`ReportingRecorder`](crate::ReportingRecorder) in a global, thread-safe
//! collector. Reporters can read the collected entries to render summaries
//! without depending on individual suites. Suites only feed the collector
//! when they opt in to that recorder, and records stay until [`drain`] is
//! called.

use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::RecordedFailure;

/// JSON report writer for recorded failures.
#[cfg(feature = "diagnostics")]
pub mod json;

static REPORTS: OnceLock<Mutex<Vec<FailureRecord>>> = OnceLock::new();

fn reports_mutex() -> &'static Mutex<Vec<FailureRecord>> {
    REPORTS.get_or_init(|| Mutex::new(Vec::new()))
}

fn lock_reports() -> MutexGuard<'static, Vec<FailureRecord>> {
    match reports_mutex().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Owned, thread-safe copy of a [`RecordedFailure`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureRecord {
    method: String,
    description: String,
    messages: Vec<String>,
    file: String,
    line: u32,
    expected: bool,
}

impl FailureRecord {
    /// Construct a record.
    ///
    /// # Examples
    /// ```
    /// use spec_bdd::reporting::FailureRecord;
    ///
    /// let record = FailureRecord::new(
    ///     "widget_spec",
    ///     " Widget it creates",
    ///     vec!["boom".into()],
    ///     "tests/widget.rs",
    ///     12,
    ///     true,
    /// );
    /// assert_eq!(record.method(), "widget_spec");
    /// assert_eq!(record.kind(), "assertion");
    /// ```
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        description: impl Into<String>,
        messages: Vec<String>,
        file: impl Into<String>,
        line: u32,
        expected: bool,
    ) -> Self {
        Self {
            method: method.into(),
            description: description.into(),
            messages,
            file: file.into(),
            line,
            expected,
        }
    }

    /// Test method that recorded the failure.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Rendered description stack.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Failure messages.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Source file of the failure.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Source line of the failure.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Whether the failure was an assertion rather than a panic.
    #[must_use]
    pub const fn expected(&self) -> bool {
        self.expected
    }

    /// Lowercase label for the failure kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        if self.expected { "assertion" } else { "panic" }
    }
}

impl From<&RecordedFailure> for FailureRecord {
    fn from(failure: &RecordedFailure) -> Self {
        Self::new(
            failure.method(),
            failure.description(),
            failure.messages().to_vec(),
            failure.location().file(),
            failure.location().line(),
            failure.expected(),
        )
    }
}

/// Record a failure in the shared collector.
///
/// # Examples
/// ```
/// use spec_bdd::reporting::{drain, record, FailureRecord};
///
/// record(FailureRecord::new("m", " A", Vec::new(), "a.rs", 1, true));
/// assert_eq!(drain().len(), 1);
/// ```
pub fn record(record: FailureRecord) {
    lock_reports().push(record);
}

/// Retrieve a snapshot of the recorded failures without clearing them.
#[must_use]
pub fn snapshot() -> Vec<FailureRecord> {
    lock_reports().clone()
}

/// Remove and return all recorded failures.
#[must_use]
pub fn drain() -> Vec<FailureRecord> {
    lock_reports().drain(..).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceLocation;

    #[test]
    fn records_convert_from_recorded_failures() {
        let failure = RecordedFailure::new(
            "reporting_unit_conversion",
            " A it b",
            vec!["m".into()],
            SourceLocation::new("x.rs", 8),
            false,
        );
        let converted = FailureRecord::from(&failure);
        assert_eq!(converted.file(), "x.rs");
        assert_eq!(converted.line(), 8);
        assert_eq!(converted.kind(), "panic");
        assert_eq!(converted.messages(), ["m"]);
    }

    #[test]
    fn snapshot_keeps_records() {
        record(FailureRecord::new(
            "reporting_unit_snapshot",
            " A",
            Vec::new(),
            "a.rs",
            2,
            true,
        ));
        assert!(
            snapshot()
                .iter()
                .any(|entry| entry.method() == "reporting_unit_snapshot")
        );
    }
}
