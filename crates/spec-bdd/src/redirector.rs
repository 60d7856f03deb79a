//! Per-suite mutable state and the handler that feeds failures into it.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Weak;

use crate::assertion::{AssertionHandler, FailureMessage, PanicHandler, SourceLocation};
use crate::description::DescriptionStack;
use crate::log_buffer::LogBuffer;
use crate::recorder::{FailureRecorder, RecordedFailure};

const UNKNOWN_METHOD: &str = "<unknown>";

/// Name of the running test method, as libtest names the test thread.
pub(crate) fn current_test_name() -> String {
    std::thread::current()
        .name()
        .unwrap_or(UNKNOWN_METHOD)
        .to_owned()
}

/// Test method and source file named in the log summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CurrentExample {
    pub(crate) function: String,
    pub(crate) file: &'static str,
}

impl CurrentExample {
    pub(crate) fn at(location: SourceLocation) -> Self {
        Self {
            function: current_test_name(),
            file: location.file(),
        }
    }
}

pub(crate) struct SpecState {
    pub(crate) stack: DescriptionStack,
    pub(crate) log: LogBuffer,
    pub(crate) example: Option<CurrentExample>,
    pub(crate) failures: Vec<RecordedFailure>,
    pub(crate) recorder: Box<dyn FailureRecorder>,
    pub(crate) verbose: bool,
    pub(crate) output: Box<dyn Write>,
}

impl SpecState {
    pub(crate) fn function(&self) -> String {
        self.example
            .as_ref()
            .map_or_else(current_test_name, |example| example.function.clone())
    }

    /// Records a failure against the current description and logs it.
    pub(crate) fn fail(&mut self, messages: Vec<String>, location: SourceLocation, expected: bool) {
        let description = self.stack.render();
        let all_messages: String = messages
            .iter()
            .map(|message| format!("\n\t{message}"))
            .collect();
        let failure =
            RecordedFailure::new(self.function(), &description, messages, location, expected);
        self.recorder.record_failure(&failure);
        self.failures.push(failure);
        self.append_log(
            &format!("{description}{all_messages}"),
            location.file(),
            location.line(),
        );
    }

    pub(crate) fn append_log(&mut self, message: &str, file: &str, line: u32) {
        self.log.push(line, message);
        if self.verbose {
            let echoed = writeln!(self.output, "****** {file} -- {line} : {message}");
            if let Err(error) = echoed {
                log::warn!("failed to echo log message: {error}");
            }
        }
    }

    /// Writes the summary when anything was logged, then empties the buffer.
    pub(crate) fn flush_summary(&mut self) {
        let file = self
            .example
            .as_ref()
            .map_or(UNKNOWN_METHOD, |example| example.file);
        if let Some(summary) = self.log.summary(file, &self.function()) {
            let written = self
                .output
                .write_all(summary.as_bytes())
                .and_then(|()| self.output.flush());
            if let Err(error) = written {
                log::warn!("failed to write log summary: {error}");
            }
        }
        self.log.clear();
    }
}

/// Assertion handler installed for the duration of one test method.
///
/// Holds a weak reference so the installed handler never keeps a dropped
/// suite alive; once the suite is gone failures fall back to panicking.
pub(crate) struct Redirector {
    state: Weak<RefCell<SpecState>>,
}

impl Redirector {
    pub(crate) fn new(state: Weak<RefCell<SpecState>>) -> Self {
        Self { state }
    }
}

impl AssertionHandler for Redirector {
    fn assert(&self, passed: bool, message: FailureMessage, location: SourceLocation) {
        if passed {
            return;
        }
        let Some(state) = self.state.upgrade() else {
            PanicHandler.assert(passed, message, location);
            return;
        };
        // A recorder asserting while recording cannot re-enter the state.
        match state.try_borrow_mut() {
            Ok(mut state) => state.fail(vec![message.string_value()], location, true),
            Err(_) => PanicHandler.assert(passed, message, location),
        }
    }
}
