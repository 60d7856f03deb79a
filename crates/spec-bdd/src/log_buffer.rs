//! Line-tagged diagnostics collected during one test method.

use std::fmt;

const RULE: &str =
    "****************************************************************************";

/// One diagnostic message and the line that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    line: u32,
    message: String,
}

impl LogEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }

    /// Line the message was logged from.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// The logged text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} :{}\n\n", self.line, self.message)
    }
}

/// Append-only buffer of [`LogEntry`] values.
///
/// # Examples
///
/// ```
/// use spec_bdd::LogBuffer;
///
/// let mut buffer = LogBuffer::default();
/// buffer.push(7, "created widget");
/// assert_eq!(buffer.render(), "line 7 :created widget\n\n");
///
/// let summary = buffer.summary("tests/widget.rs", "widget_spec").unwrap_or_default();
/// assert!(summary.contains("Summary of call to widget_spec"));
/// assert!(summary.contains("line 7 :created widget"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogBuffer {
    entries: Vec<LogEntry>,
}

impl LogBuffer {
    /// Appends a message.
    pub fn push(&mut self, line: u32, message: impl Into<String>) {
        self.entries.push(LogEntry::new(line, message));
    }

    /// Entries in the order they were logged.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing was logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discards every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Concatenates the entries into one block of text.
    #[must_use]
    pub fn render(&self) -> String {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Renders the end-of-method summary, or `None` when the buffer is empty.
    #[must_use]
    pub fn summary(&self, file: &str, function: &str) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(format!(
            "\n\n{RULE}\n{file}\nSummary of call to {function}\n\n{}\n\
             End of summary for call to {function}\n{RULE}\n\n\n",
            self.render()
        ))
    }
}
