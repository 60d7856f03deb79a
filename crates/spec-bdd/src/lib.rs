//! Behaviour-driven `describe` / `it` suites on top of the Rust test
//! harness.
//!
//! A [`Spec`] tracks the labels of the blocks in scope, collects
//! line-tagged log messages and runs optional before/after hooks around
//! every `it` block. While a test method runs, the suite installs itself as
//! the thread's [`AssertionHandler`], so failed expectations
//! ([`expect`], [`check!`], [`check_eq!`], [`fail!`]) are recorded against
//! the nested description instead of aborting the test. The test method
//! fails at tear-down when anything was recorded.
//!
//! ```
//! use spec_bdd::{Spec, Suite, equal, expect};
//!
//! let mut spec = Spec::new().with_output(std::io::sink());
//! let outcome = spec.try_run_test(|s| {
//!     s.describe("Widget", |s| {
//!         s.it("creates", |_| expect(1 + 1).to(equal(3)));
//!     });
//! });
//! let error = outcome.expect_err("the expectation fails");
//! assert_eq!(error.failures()[0].description(), " Widget it creates");
//! ```

pub mod assertion;
pub mod config;
mod description;
mod error;
mod harness;
mod hooks;
mod log_buffer;
mod macros;
pub mod matchers;
mod panic;
mod recorder;
mod redirector;
pub mod reporting;
mod spec;
mod suite;

pub use assertion::{
    AssertionHandler, FailureMessage, HandlerGuard, PanicHandler, SourceLocation,
    current_handler, current_handler_is, dispatch, install_handler,
};
pub use description::{DescriptionStack, IT_PREFIX};
pub use error::SpecError;
pub use harness::{HarnessAdapter, StdHarness, TestMethod};
pub use hooks::{Hook, HookKind};
pub use log_buffer::{LogBuffer, LogEntry};
pub use matchers::{
    Expectation, Matcher, be_false, be_none, be_some, be_true, contain, equal, expect, satisfy,
};
pub use panic::panic_message;
pub use recorder::{
    CollectingRecorder, FailureRecorder, LoggingRecorder, RecordedFailure, ReportingRecorder,
};
pub use spec::Spec;
pub use suite::Suite;
