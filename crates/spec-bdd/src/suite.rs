//! The `describe` / `it` vocabulary shared by every suite type.

use std::panic::{self, AssertUnwindSafe};

use crate::assertion::SourceLocation;
use crate::description::IT_PREFIX;
use crate::error::SpecError;
use crate::harness::{HarnessAdapter, StdHarness, TestMethod};
use crate::hooks::HookKind;
use crate::redirector::current_test_name;
use crate::spec::Spec;

/// A behaviour-driven test suite.
///
/// Implementors hand out their embedded [`Spec`] and may override
/// [`before`](Self::before) and [`after`](Self::after), which run around
/// every `it` block in addition to the hooks registered with
/// [`Spec::before`] and [`Spec::after`].
///
/// For every `it` the order is: `Suite::before`, the registered before hook,
/// the body, the registered after hook, `Suite::after`.
///
/// # Examples
///
/// ```
/// use spec_bdd::{Spec, Suite, check_eq};
///
/// #[derive(Default)]
/// struct CounterSpec {
///     spec: Spec,
///     count: u32,
/// }
///
/// impl Suite for CounterSpec {
///     fn spec(&self) -> &Spec {
///         &self.spec
///     }
///
///     fn spec_mut(&mut self) -> &mut Spec {
///         &mut self.spec
///     }
///
///     fn before(&mut self) {
///         self.count = 0;
///     }
/// }
///
/// let mut suite = CounterSpec::default();
/// suite.run_test(|s| {
///     s.describe("counter", |s| {
///         s.it("starts at zero", |s| check_eq!(s.count, 0));
///         s.it("increments", |s| {
///             s.count += 1;
///             check_eq!(s.count, 1);
///         });
///     });
/// });
/// ```
pub trait Suite {
    /// The suite's state.
    fn spec(&self) -> &Spec;

    /// The suite's state, mutably.
    fn spec_mut(&mut self) -> &mut Spec;

    /// Runs before every `it` block, ahead of the registered before hook.
    fn before(&mut self) {}

    /// Runs after every `it` block, after the registered after hook.
    fn after(&mut self) {}

    /// Runs `block` with `label` pushed onto the description stack.
    ///
    /// The label is popped again however `block` ends; a panic escaping
    /// `block` is recorded as a failure instead of unwinding further.
    #[track_caller]
    fn describe<F>(&mut self, label: impl Into<String>, block: F)
    where
        Self: Sized,
        F: FnOnce(&mut Self),
    {
        let location = SourceLocation::caller();
        self.spec_mut().push_label(label.into());
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| block(self)));
        if let Err(payload) = outcome {
            self.spec_mut().record_panic(payload.as_ref(), location);
        }
        self.spec_mut().pop_label();
    }

    /// Runs one example: pushes `"it <label>"`, then runs the hooks and
    /// `block` in order.
    ///
    /// A panic anywhere in the sequence is recorded as a failure and skips
    /// the rest of the sequence.
    #[track_caller]
    fn it<F>(&mut self, label: impl Into<String>, block: F)
    where
        Self: Sized,
        F: FnOnce(&mut Self),
    {
        let location = SourceLocation::caller();
        let spec = self.spec_mut();
        spec.push_label(format!("{IT_PREFIX}{}", label.into()));
        spec.enter_example(location);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            Suite::before(self);
            self.spec_mut().run_hook(HookKind::Before);
            block(self);
            self.spec_mut().run_hook(HookKind::After);
            Suite::after(self);
        }));
        if let Err(payload) = outcome {
            self.spec_mut().record_panic(payload.as_ref(), location);
        }
        self.spec_mut().pop_label();
    }

    /// Logs the message produced by `message`, tagged with the caller's line.
    #[track_caller]
    fn log<M>(&self, message: M)
    where
        Self: Sized,
        M: FnOnce() -> String,
    {
        let location = SourceLocation::caller();
        self.spec().log_at(message, location.file(), location.line());
    }

    /// Runs `body` as one test method and panics when it recorded failures.
    ///
    /// # Panics
    ///
    /// Panics with the rendered [`SpecError`] when any failure was recorded,
    /// which is how the failure reaches the test harness.
    #[track_caller]
    fn run_test<F>(&mut self, body: F)
    where
        Self: Sized,
        F: FnOnce(&mut Self),
    {
        if let Err(error) = self.try_run_test(body) {
            panic!("{error}");
        }
    }

    /// Runs `body` as one test method on the [`StdHarness`].
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::AssertionsFailed`] when any failure was recorded.
    #[track_caller]
    fn try_run_test<F>(&mut self, body: F) -> Result<(), SpecError>
    where
        Self: Sized,
        F: FnOnce(&mut Self),
    {
        self.run_test_with(&StdHarness::new(), body)
    }

    /// Runs `body` as one test method inside `harness`.
    ///
    /// The harness receives one closure covering set-up, `body` and
    /// tear-down; the suite's handler is uninstalled before it returns.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::AssertionsFailed`] when any failure was recorded.
    #[track_caller]
    fn run_test_with<H, F>(&mut self, harness: &H, body: F) -> Result<(), SpecError>
    where
        Self: Sized,
        H: HarnessAdapter,
        F: FnOnce(&mut Self),
    {
        let location = SourceLocation::caller();
        let method = TestMethod::new(std::any::type_name::<Self>(), current_test_name(), location);
        harness.run(&method, || {
            self.spec_mut().set_up_at(location);
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(self)));
            if let Err(payload) = outcome {
                self.spec_mut().record_panic(payload.as_ref(), location);
            }
            self.spec_mut().tear_down()
        })
    }
}
