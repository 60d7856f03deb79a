//! Behavioural tests for running suites through harness adapters.

mod support;

use std::cell::RefCell;

use rstest::{fixture, rstest};
use spec_bdd::{
    HarnessAdapter, SourceLocation, StdHarness, Suite, TestMethod, current_handler, fail,
};
use support::quiet_spec;

#[derive(Default)]
struct RecordingHarness {
    seen: RefCell<Vec<TestMethod>>,
}

impl HarnessAdapter for RecordingHarness {
    fn run<T, F>(&self, method: &TestMethod, method_body: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.seen.borrow_mut().push(method.clone());
        assert!(current_handler().is_none());
        let result = method_body();
        assert!(current_handler().is_none());
        result
    }
}

#[fixture]
fn harness() -> RecordingHarness {
    RecordingHarness::default()
}

#[rstest]
fn harness_receives_call_site_metadata(harness: RecordingHarness) {
    let (mut spec, _output, _recorder) = quiet_spec();
    let call_line = line!() + 1;
    let outcome = spec.run_test_with(&harness, |s| s.it("passes", |_| {}));
    assert!(outcome.is_ok());

    let seen = harness.seen.borrow();
    let [method] = seen.as_slice() else {
        panic!("expected one method, got {seen:?}");
    };
    assert_eq!(method.location(), SourceLocation::new(file!(), call_line));
    assert!(method.suite_name().ends_with("Spec"));
    assert!(method.name().contains("harness_receives_call_site_metadata"));
}

#[rstest]
fn harness_result_carries_recorded_failures(harness: RecordingHarness) {
    let (mut spec, _output, recorder) = quiet_spec();
    let outcome = spec.run_test_with(&harness, |s| {
        s.it("fails twice", |_| {
            fail!("first");
            fail!("second");
        });
    });

    let Err(error) = outcome else {
        panic!("failures should surface from the harness");
    };
    assert_eq!(error.failures().len(), 2);
    assert_eq!(recorder.failures().len(), 2);
    assert!(error.to_string().contains("2 failure(s) recorded"));
}

#[test]
fn std_harness_runs_the_method_on_the_calling_thread() {
    let (mut spec, _output, _recorder) = quiet_spec();
    let caller = std::thread::current().id();
    let mut body_thread = None;
    let outcome = spec.run_test_with(&StdHarness::new(), |_| {
        body_thread = Some(std::thread::current().id());
    });
    assert!(outcome.is_ok());
    assert_eq!(body_thread, Some(caller));
}
