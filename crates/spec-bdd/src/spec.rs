//! The ready-made suite type holding all per-suite state.

use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use crate::assertion::{AssertionHandler, HandlerGuard, SourceLocation, install_handler};
use crate::config;
use crate::description::DescriptionStack;
use crate::error::SpecError;
use crate::hooks::{HookKind, HookSlots};
use crate::log_buffer::LogBuffer;
use crate::panic::panic_message;
use crate::recorder::{FailureRecorder, LoggingRecorder, RecordedFailure};
use crate::redirector::{CurrentExample, Redirector, SpecState};
use crate::suite::Suite;

/// Per-suite state: description stack, log buffer, hooks and the installed
/// assertion redirector.
///
/// `Spec` implements [`Suite`] itself, so it can be used directly; larger
/// suites embed one and implement [`Suite`] to gain overridable
/// `before`/`after` methods.
///
/// # Examples
///
/// ```
/// use spec_bdd::{Spec, Suite, equal, expect};
///
/// let mut spec = Spec::new().with_output(std::io::sink());
/// spec.run_test(|s| {
///     s.describe("Vec", |s| {
///         s.it("starts empty", |_| {
///             expect(Vec::<u8>::new().len()).to(equal(0));
///         });
///     });
/// });
/// assert_eq!(spec.depth(), 0);
/// ```
pub struct Spec {
    state: Rc<RefCell<SpecState>>,
    hooks: HookSlots,
    redirector: Option<HandlerGuard>,
}

impl Spec {
    /// Creates a suite writing diagnostics to stderr and logging failures
    /// through [`LoggingRecorder`].
    #[must_use]
    pub fn new() -> Self {
        let state = SpecState {
            stack: DescriptionStack::default(),
            log: LogBuffer::default(),
            example: None,
            failures: Vec::new(),
            recorder: Box::new(LoggingRecorder),
            verbose: config::verbose_default(),
            output: Box::new(std::io::stderr()),
        };
        Self {
            state: Rc::new(RefCell::new(state)),
            hooks: HookSlots::default(),
            redirector: None,
        }
    }

    /// Sends verbose echoes and log summaries to `output`.
    #[must_use]
    pub fn with_output(self, output: impl Write + 'static) -> Self {
        self.state.borrow_mut().output = Box::new(output);
        self
    }

    /// Replaces the recorder receiving every failure.
    #[must_use]
    pub fn with_recorder(self, recorder: impl FailureRecorder + 'static) -> Self {
        self.state.borrow_mut().recorder = Box::new(recorder);
        self
    }

    /// Whether log messages are echoed as they are logged.
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.state.borrow().verbose
    }

    /// Enables or disables immediate echoing of log messages.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.state.borrow_mut().verbose = verbose;
    }

    /// Registers the hook run before the body of every `it` block.
    ///
    /// A later registration replaces this one. Hooks survive
    /// [`tear_down`](Self::tear_down) and apply to every later test method.
    pub fn before(&mut self, hook: impl FnMut(&mut Self) + 'static) {
        self.hooks.register(HookKind::Before, Box::new(hook));
    }

    /// Registers the hook run after the body of every `it` block.
    ///
    /// A later registration replaces this one.
    pub fn after(&mut self, hook: impl FnMut(&mut Self) + 'static) {
        self.hooks.register(HookKind::After, Box::new(hook));
    }

    /// Returns `true` when a hook of `kind` is registered.
    #[must_use]
    pub fn has_hook(&self, kind: HookKind) -> bool {
        self.hooks.is_set(kind)
    }

    /// Logs the message produced by `message`, tagged with the caller's line.
    #[track_caller]
    pub fn log(&self, message: impl FnOnce() -> String) {
        let location = SourceLocation::caller();
        self.log_at(message, location.file(), location.line());
    }

    /// Logs the message produced by `message` against an explicit location.
    ///
    /// `file` only appears in the verbose echo, so it may be built at run
    /// time.
    pub fn log_at(&self, message: impl FnOnce() -> String, file: &str, line: u32) {
        let text = message();
        self.state.borrow_mut().append_log(&text, file, line);
    }

    /// Starts a test method: resets per-method state and installs the
    /// assertion redirector, saving the handler it replaces.
    #[track_caller]
    pub fn set_up(&mut self) {
        self.set_up_at(SourceLocation::caller());
    }

    pub(crate) fn set_up_at(&mut self, location: SourceLocation) {
        // Restore first so a repeated set-up never saves our own redirector.
        drop(self.redirector.take());
        {
            let mut state = self.state.borrow_mut();
            state.stack.clear();
            state.log.clear();
            state.failures.clear();
            state.example = Some(CurrentExample::at(location));
        }
        let handler: Rc<dyn AssertionHandler> =
            Rc::new(Redirector::new(Rc::downgrade(&self.state)));
        self.redirector = Some(install_handler(handler));
    }

    /// Finishes a test method.
    ///
    /// Writes the log summary when anything was logged, clears the log
    /// buffer and description stack, and restores the saved assertion
    /// handler. Hooks are left registered.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::AssertionsFailed`] when the method recorded any
    /// failure.
    pub fn tear_down(&mut self) -> Result<(), SpecError> {
        let (method, failures) = {
            let mut state = self.state.borrow_mut();
            state.flush_summary();
            state.stack.clear();
            (state.function(), std::mem::take(&mut state.failures))
        };
        drop(self.redirector.take());
        if failures.is_empty() {
            Ok(())
        } else {
            Err(SpecError::AssertionsFailed { method, failures })
        }
    }

    /// Returns `true` between [`set_up`](Self::set_up) and
    /// [`tear_down`](Self::tear_down).
    #[must_use]
    pub fn is_set_up(&self) -> bool {
        self.redirector.is_some()
    }

    /// Number of `describe`/`it` labels in scope.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.state.borrow().stack.depth()
    }

    /// The description stack rendered as a failure description.
    #[must_use]
    pub fn description(&self) -> String {
        self.state.borrow().stack.render()
    }

    /// Failures recorded since the current test method started.
    #[must_use]
    pub fn failures(&self) -> Vec<RecordedFailure> {
        self.state.borrow().failures.clone()
    }

    /// Everything logged since the current test method started.
    #[must_use]
    pub fn log_contents(&self) -> String {
        self.state.borrow().log.render()
    }

    pub(crate) fn push_label(&mut self, label: String) {
        log::trace!("entering block {label:?}");
        self.state.borrow_mut().stack.push(label);
    }

    pub(crate) fn pop_label(&mut self) {
        let label = self.state.borrow_mut().stack.pop();
        log::trace!("leaving block {label:?}");
    }

    pub(crate) fn enter_example(&mut self, location: SourceLocation) {
        self.state.borrow_mut().example = Some(CurrentExample::at(location));
    }

    pub(crate) fn run_hook(&mut self, kind: HookKind) {
        let Some(mut hook) = self.hooks.take(kind) else {
            return;
        };
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| hook(self)));
        self.hooks.restore(kind, hook);
        if let Err(payload) = outcome {
            panic::resume_unwind(payload);
        }
    }

    /// Records a panic that escaped a block as an unexpected failure.
    pub(crate) fn record_panic(
        &mut self,
        payload: &(dyn std::any::Any + Send),
        location: SourceLocation,
    ) {
        let message = format!("panicked: {}", panic_message(payload));
        self.state.borrow_mut().fail(vec![message], location, false);
    }
}

impl Default for Spec {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Spec")
            .field("stack", &state.stack)
            .field("log_entries", &state.log.len())
            .field("failures", &state.failures.len())
            .field("verbose", &state.verbose)
            .field("hooks", &self.hooks)
            .field("set_up", &self.redirector.is_some())
            .finish()
    }
}

impl Suite for Spec {
    fn spec(&self) -> &Spec {
        self
    }

    fn spec_mut(&mut self) -> &mut Spec {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{clear_verbose_override, set_verbose_default};
    use serial_test::serial;

    #[test]
    #[serial]
    fn new_suites_take_the_configured_verbose_default() {
        set_verbose_default(true);
        assert!(Spec::new().verbose());
        set_verbose_default(false);
        assert!(!Spec::new().verbose());
        clear_verbose_override();
    }

    #[test]
    fn set_up_and_tear_down_bracket_the_redirector() {
        let mut spec = Spec::new().with_output(std::io::sink());
        assert!(!spec.is_set_up());
        spec.set_up();
        assert!(spec.is_set_up());
        assert!(spec.tear_down().is_ok());
        assert!(!spec.is_set_up());
    }

    #[test]
    fn debug_output_summarises_state() {
        let mut spec = Spec::new().with_output(std::io::sink());
        spec.before(|_| {});
        let rendered = format!("{spec:?}");
        assert!(rendered.contains("before: true"));
        assert!(rendered.contains("after: false"));
    }
}
