//! Behavioural tests for installing and restoring the assertion handler.

mod support;

use std::cell::Cell;
use std::panic;
use std::rc::Rc;

use spec_bdd::{
    AssertionHandler, FailureMessage, SourceLocation, Suite, current_handler, current_handler_is,
    expect, equal, fail, install_handler,
};
use support::quiet_spec;

#[derive(Default)]
struct CountingHandler {
    failures: Cell<u32>,
}

impl AssertionHandler for CountingHandler {
    fn assert(&self, passed: bool, _message: FailureMessage, _location: SourceLocation) {
        if !passed {
            self.failures.set(self.failures.get() + 1);
        }
    }
}

#[test]
fn previous_handler_is_restored_after_a_failing_method() {
    let counting = Rc::new(CountingHandler::default());
    let sentinel: Rc<dyn AssertionHandler> = counting.clone();
    let _guard = install_handler(Rc::clone(&sentinel));
    let (mut spec, _output, _recorder) = quiet_spec();

    let mut installed_during_method = true;
    let outcome = spec.try_run_test(|s| {
        installed_during_method = !current_handler_is(&sentinel);
        s.it("fails", |_| fail!("swallowed by the suite"));
    });

    assert!(outcome.is_err());
    assert!(installed_during_method);
    assert!(current_handler_is(&sentinel));
    assert_eq!(counting.failures.get(), 0);

    fail!("reaches the sentinel");
    assert_eq!(counting.failures.get(), 1);
}

#[test]
fn slot_is_empty_again_after_a_method_without_prior_handler() {
    let (mut spec, _output, _recorder) = quiet_spec();
    assert!(current_handler().is_none());
    let outcome = spec.try_run_test(|s| {
        s.it("panics", |_| panic!("escaped"));
    });
    assert!(outcome.is_err());
    assert!(current_handler().is_none());
}

#[test]
fn dropping_a_set_up_suite_restores_the_slot() {
    let (mut spec, _output, _recorder) = quiet_spec();
    spec.set_up();
    assert!(spec.is_set_up());
    assert!(current_handler().is_some());
    drop(spec);
    assert!(current_handler().is_none());
}

#[test]
fn repeated_set_up_does_not_leak_the_redirector() {
    let (mut spec, _output, _recorder) = quiet_spec();
    spec.set_up();
    spec.set_up();
    assert!(spec.tear_down().is_ok());
    assert!(!spec.is_set_up());
    assert!(current_handler().is_none());
}

#[test]
fn failures_outside_a_method_panic_again() {
    let (mut spec, _output, _recorder) = quiet_spec();
    spec.run_test(|s| s.it("passes", |_| expect(1).to(equal(1))));
    let outcome = panic::catch_unwind(|| expect(1).to(equal(2)));
    assert!(outcome.is_err());
}

#[test]
fn inner_suite_shadows_outer_suite_until_torn_down() {
    let (mut outer, _outer_output, outer_recorder) = quiet_spec();
    let (mut inner, _inner_output, inner_recorder) = quiet_spec();

    outer.set_up();
    inner.set_up();
    fail!("inner failure");
    assert!(inner.tear_down().is_err());
    fail!("outer failure");
    assert!(outer.tear_down().is_err());

    let inner_messages: Vec<_> = inner_recorder
        .failures()
        .iter()
        .flat_map(|failure| failure.messages().to_vec())
        .collect();
    let outer_messages: Vec<_> = outer_recorder
        .failures()
        .iter()
        .flat_map(|failure| failure.messages().to_vec())
        .collect();
    assert_eq!(inner_messages, ["inner failure"]);
    assert_eq!(outer_messages, ["outer failure"]);
    assert!(current_handler().is_none());
}

#[test]
fn suites_torn_down_out_of_order_leave_the_slot_empty() {
    let (mut outer, _outer_output, outer_recorder) = quiet_spec();
    let (mut inner, _inner_output, inner_recorder) = quiet_spec();

    outer.set_up();
    inner.set_up();
    assert!(outer.tear_down().is_ok());
    fail!("inner is still active");
    assert!(inner.tear_down().is_err());

    assert!(current_handler().is_none());
    let after_both = panic::catch_unwind(|| fail!("after all methods"));
    assert!(after_both.is_err());
    assert!(outer.failures().is_empty());
    assert!(outer_recorder.failures().is_empty());
    assert_eq!(inner_recorder.failures().len(), 1);
}

#[test]
fn panic_in_the_method_body_is_attributed_to_the_run_call() {
    let (mut spec, _output, _recorder) = quiet_spec();
    let run_line = line!() + 1;
    let outcome = spec.try_run_test(|_| panic!("outside any block"));
    let Err(error) = outcome else {
        panic!("the panic should be recorded");
    };
    let [failure] = error.failures() else {
        panic!("expected one failure, got {:?}", error.failures());
    };
    assert_eq!(failure.location().line(), run_line);
    assert_eq!(failure.description(), "");
    assert!(!failure.expected());
}
