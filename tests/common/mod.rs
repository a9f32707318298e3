//! Shared harness for the per-feature integration tests in this directory.
//!
//! Each test runs a snippet of source through a fresh [`Rocks`] driver and
//! inspects captured stdout/stderr plus the two diagnostic flags, rather
//! than reading fixture `.rocks` files off disk.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use rocks_lang::Rocks;

struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub struct RunResult {
    pub stdout: String,
    pub stderr: String,
    pub had_error: bool,
    pub had_runtime_error: bool,
}

/// Runs `source` as a whole script (the file-mode pipeline, not REPL
/// single-expression mode) and returns everything it produced.
#[allow(dead_code)]
pub fn run(source: &str) -> RunResult {
    let stdout = Rc::new(RefCell::new(Vec::new()));
    let stderr = Rc::new(RefCell::new(Vec::new()));

    let mut rocks = Rocks::with_writers(Box::new(SharedBuf(Rc::clone(&stdout))), Box::new(SharedBuf(Rc::clone(&stderr))));
    rocks.run(source, false);

    RunResult {
        stdout: String::from_utf8(stdout.borrow().clone()).unwrap(),
        stderr: String::from_utf8(stderr.borrow().clone()).unwrap(),
        had_error: rocks.had_error(),
        had_runtime_error: rocks.had_runtime_error(),
    }
}
