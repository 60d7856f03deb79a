//! Assertion handler contract and the "currently installed handler" slot.
//!
//! Every failure raised by the [`matchers`](crate::matchers) layer is handed
//! to whichever [`AssertionHandler`] is installed on the current thread. When
//! nothing is installed the [`PanicHandler`] fallback panics, so matchers
//! behave like plain `assert!` outside a suite.
//!
//! The slot is thread-local. libtest runs every test on its own thread, so
//! one test method installing a handler can never observe or clobber the
//! handler of another test running in parallel.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::marker::PhantomData;
use std::panic::Location;
use std::rc::Rc;

struct Installed {
    id: u64,
    handler: Rc<dyn AssertionHandler>,
}

thread_local! {
    // The last entry is the active handler.
    static HANDLERS: RefCell<Vec<Installed>> = const { RefCell::new(Vec::new()) };
    static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

/// Source position of an assertion.
///
/// # Examples
///
/// ```
/// use spec_bdd::SourceLocation;
///
/// let location = SourceLocation::new("tests/widget.rs", 42);
/// assert_eq!(location.file(), "tests/widget.rs");
/// assert_eq!(location.line(), 42);
/// assert_eq!(location.to_string(), "tests/widget.rs:42");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    file: &'static str,
    line: u32,
}

impl SourceLocation {
    /// Creates a location from a file path and one-based line.
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Captures the location of the nearest caller not marked
    /// `#[track_caller]`.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line())
    }

    /// Returns the source file.
    #[must_use]
    pub const fn file(self) -> &'static str {
        self.file
    }

    /// Returns the one-based line.
    #[must_use]
    pub const fn line(self) -> u32 {
        self.line
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Human-readable description of a failed assertion.
///
/// Matchers fill in what was expected and what was observed; free-form
/// failures only carry text.
///
/// # Examples
///
/// ```
/// use spec_bdd::FailureMessage;
///
/// let message = FailureMessage::expectation("to equal <5>", "<4>");
/// assert_eq!(message.string_value(), "expected to equal <5>, got <4>");
///
/// let described = FailureMessage::new("boom").with_description("widget size");
/// assert_eq!(described.string_value(), "widget size\nboom");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FailureMessage {
    expected: String,
    actual: Option<String>,
    user_description: Option<String>,
}

impl FailureMessage {
    /// Creates a free-form message.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            expected: text.into(),
            actual: None,
            user_description: None,
        }
    }

    /// Creates a message from an expectation and the observed value.
    #[must_use]
    pub fn expectation(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: Some(actual.into()),
            user_description: None,
        }
    }

    /// Prefixes the message with a caller-supplied description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.user_description = Some(description.into());
        self
    }

    /// Returns the observed value, when the message came from a matcher.
    #[must_use]
    pub fn actual(&self) -> Option<&str> {
        self.actual.as_deref()
    }

    /// Renders the full message text.
    #[must_use]
    pub fn string_value(&self) -> String {
        let body = self.actual.as_ref().map_or_else(
            || self.expected.clone(),
            |actual| format!("expected {}, got {actual}", self.expected),
        );
        match &self.user_description {
            Some(description) => format!("{description}\n{body}"),
            None => body,
        }
    }
}

impl fmt::Display for FailureMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string_value())
    }
}

/// Receives the outcome of every assertion raised by the matcher layer.
///
/// Passing assertions are delivered too, with an empty message; handlers
/// usually ignore them.
pub trait AssertionHandler {
    /// Handles one assertion outcome.
    fn assert(&self, passed: bool, message: FailureMessage, location: SourceLocation);
}

/// Fallback handler used while no other handler is installed.
///
/// # Examples
///
/// ```
/// use spec_bdd::{AssertionHandler, FailureMessage, PanicHandler, SourceLocation};
///
/// let outcome = std::panic::catch_unwind(|| {
///     PanicHandler.assert(false, FailureMessage::new("boom"), SourceLocation::new("a.rs", 1));
/// });
/// assert!(outcome.is_err());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PanicHandler;

impl AssertionHandler for PanicHandler {
    fn assert(&self, passed: bool, message: FailureMessage, location: SourceLocation) {
        if !passed {
            panic!("{location}: {message}");
        }
    }
}

/// Uninstalls the handler it was returned for when dropped.
///
/// Returned by [`install_handler`]. Dropping guards in reverse order of
/// installation restores each displaced handler in turn. A guard dropped out
/// of order removes only its own handler; whichever handler was installed
/// after it stays active.
#[must_use = "dropping the guard immediately uninstalls the handler"]
pub struct HandlerGuard {
    id: u64,
    _not_send: PhantomData<Rc<()>>,
}

impl fmt::Debug for HandlerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerGuard").field("id", &self.id).finish()
    }
}

impl Drop for HandlerGuard {
    fn drop(&mut self) {
        let id = self.id;
        // The slot may already be gone while the thread is shutting down.
        // The removed handler is dropped only after the borrow ends.
        let removed = HANDLERS.try_with(|handlers| {
            let mut handlers = handlers.borrow_mut();
            let position = handlers.iter().rposition(|entry| entry.id == id)?;
            if position + 1 == handlers.len() {
                log::debug!("restored previous assertion handler");
            } else {
                log::debug!("removed assertion handler {id} below a newer handler");
            }
            Some(handlers.remove(position))
        });
        drop(removed);
    }
}

/// Installs `handler` for the current thread on top of the active one.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use spec_bdd::{
///     AssertionHandler, FailureMessage, PanicHandler, SourceLocation, current_handler_is,
///     install_handler,
/// };
///
/// let handler: Rc<dyn AssertionHandler> = Rc::new(PanicHandler);
/// {
///     let _guard = install_handler(Rc::clone(&handler));
///     assert!(current_handler_is(&handler));
/// }
/// assert!(!current_handler_is(&handler));
/// ```
pub fn install_handler(handler: Rc<dyn AssertionHandler>) -> HandlerGuard {
    let id = NEXT_ID.with(|next| {
        let id = next.get();
        next.set(id.wrapping_add(1));
        id
    });
    HANDLERS.with(|handlers| handlers.borrow_mut().push(Installed { id, handler }));
    log::debug!("installed assertion handler {id}");
    HandlerGuard {
        id,
        _not_send: PhantomData,
    }
}

/// Returns the handler installed on the current thread, if any.
#[must_use]
pub fn current_handler() -> Option<Rc<dyn AssertionHandler>> {
    HANDLERS.with(|handlers| {
        handlers
            .borrow()
            .last()
            .map(|entry| Rc::clone(&entry.handler))
    })
}

/// Returns `true` when `handler` is the one installed on the current thread.
#[must_use]
pub fn current_handler_is(handler: &Rc<dyn AssertionHandler>) -> bool {
    current_handler().is_some_and(|current| Rc::ptr_eq(&current, handler))
}

/// Delivers one assertion outcome to the installed handler.
///
/// `message` is only evaluated when the assertion failed.
///
/// # Examples
///
/// ```
/// use spec_bdd::{FailureMessage, SourceLocation, dispatch};
///
/// // Passing assertions never reach the panic fallback.
/// dispatch(true, || FailureMessage::new("unused"), SourceLocation::new("a.rs", 1));
/// ```
pub fn dispatch(passed: bool, message: impl FnOnce() -> FailureMessage, location: SourceLocation) {
    let message = if passed {
        FailureMessage::default()
    } else {
        message()
    };
    // Clone out of the slot so the handler may install or restore handlers.
    match current_handler() {
        Some(handler) => handler.assert(passed, message, location),
        None => PanicHandler.assert(passed, message, location),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Capture {
        seen: RefCell<Vec<(bool, String, u32)>>,
    }

    impl AssertionHandler for Capture {
        fn assert(&self, passed: bool, message: FailureMessage, location: SourceLocation) {
            self.seen
                .borrow_mut()
                .push((passed, message.string_value(), location.line()));
        }
    }

    #[test]
    fn dispatch_reaches_installed_handler() {
        let capture = Rc::new(Capture::default());
        let handler: Rc<dyn AssertionHandler> = capture.clone();
        let guard = install_handler(handler);
        dispatch(false, || FailureMessage::new("boom"), SourceLocation::new("x.rs", 9));
        dispatch(true, || unreachable!("passing message is not built"), SourceLocation::new("x.rs", 10));
        drop(guard);
        assert_eq!(
            *capture.seen.borrow(),
            vec![(false, "boom".to_owned(), 9), (true, String::new(), 10)]
        );
    }

    #[test]
    fn nested_guards_restore_in_reverse_order() {
        let outer: Rc<dyn AssertionHandler> = Rc::new(Capture::default());
        let inner: Rc<dyn AssertionHandler> = Rc::new(Capture::default());
        assert!(current_handler().is_none());
        let outer_guard = install_handler(Rc::clone(&outer));
        let inner_guard = install_handler(Rc::clone(&inner));
        assert!(current_handler_is(&inner));
        drop(inner_guard);
        assert!(current_handler_is(&outer));
        drop(outer_guard);
        assert!(current_handler().is_none());
    }

    #[test]
    fn out_of_order_drop_keeps_the_newer_handler() {
        let outer: Rc<dyn AssertionHandler> = Rc::new(Capture::default());
        let inner: Rc<dyn AssertionHandler> = Rc::new(Capture::default());
        let outer_guard = install_handler(Rc::clone(&outer));
        let inner_guard = install_handler(Rc::clone(&inner));
        drop(outer_guard);
        assert!(current_handler_is(&inner));
        drop(inner_guard);
        assert!(current_handler().is_none());
    }

    #[test]
    fn reinstalling_the_same_handler_tracks_each_guard() {
        let handler: Rc<dyn AssertionHandler> = Rc::new(Capture::default());
        let first = install_handler(Rc::clone(&handler));
        let second = install_handler(Rc::clone(&handler));
        drop(first);
        assert!(current_handler_is(&handler));
        drop(second);
        assert!(current_handler().is_none());
    }

    #[test]
    #[should_panic(expected = "x.rs:3: nope")]
    fn dispatch_without_handler_panics_on_failure() {
        dispatch(false, || FailureMessage::new("nope"), SourceLocation::new("x.rs", 3));
    }

    #[test]
    fn caller_location_points_at_call_site() {
        let expected_line = line!() + 1;
        let location = SourceLocation::caller();
        assert_eq!(location.line(), expected_line);
        assert_eq!(location.file(), file!());
    }
}
