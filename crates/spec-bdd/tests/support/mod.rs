//! Shared fixtures for the `spec-bdd` behavioural tests.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use spec_bdd::{CollectingRecorder, Spec};

/// In-memory diagnostic output shared between a suite and the test.
#[derive(Clone, Debug, Default)]
pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A non-verbose suite writing into memory and keeping its failures local.
pub fn quiet_spec() -> (Spec, SharedOutput, CollectingRecorder) {
    let output = SharedOutput::default();
    let recorder = CollectingRecorder::default();
    let mut spec = Spec::new()
        .with_output(output.clone())
        .with_recorder(recorder.clone());
    spec.set_verbose(false);
    (spec, output, recorder)
}
