//! Non-local control flow.
//!
//! `return`, `break` and `continue` all need to unwind through an arbitrary
//! number of enclosing statements without being mistaken for a runtime
//! error. Every statement-execution function returns `Result<(), Signal>`
//! so `?` does the unwinding; the loop and function call sites are the only
//! places that catch a `Signal` rather than propagate it.

use crate::diagnostics::RuntimeError;
use crate::object::Object;
use crate::stmt::LoopKind;

#[derive(Debug, Clone)]
pub enum Signal {
    Error(RuntimeError),
    Return(Object),
    Break,
    Continue(LoopKind),
}

impl From<RuntimeError> for Signal {
    fn from(error: RuntimeError) -> Self {
        Signal::Error(error)
    }
}
