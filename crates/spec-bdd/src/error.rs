//! Error type returned when a test method finishes with failures.

use thiserror::Error;

use crate::RecordedFailure;

/// Outcome of a test method that recorded at least one failure.
///
/// # Examples
///
/// ```
/// use spec_bdd::{RecordedFailure, SourceLocation, SpecError};
///
/// let error = SpecError::AssertionsFailed {
///     method: "widget_spec".into(),
///     failures: vec![RecordedFailure::new(
///         "widget_spec",
///         " Widget it creates",
///         vec!["boom".into()],
///         SourceLocation::new("tests/widget.rs", 3),
///         true,
///     )],
/// };
/// let text = error.to_string();
/// assert!(text.starts_with("widget_spec: 1 failure(s) recorded"));
/// assert!(text.contains("tests/widget.rs:3: Widget it creates\n\tboom"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SpecError {
    /// One or more assertions failed while the method ran.
    #[error("{method}: {} failure(s) recorded{}", .failures.len(), render(.failures))]
    AssertionsFailed {
        /// Name of the test method.
        method: String,
        /// Every failure, in the order it was recorded.
        failures: Vec<RecordedFailure>,
    },
}

impl SpecError {
    /// Failures carried by the error.
    #[must_use]
    pub fn failures(&self) -> &[RecordedFailure] {
        match self {
            Self::AssertionsFailed { failures, .. } => failures,
        }
    }
}

fn render(failures: &[RecordedFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("\n{failure}"))
        .collect()
}
