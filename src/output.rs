//! The shell's output sink.
//!
//! Messages from the shell and output from built-in commands go through a
//! [`Sink`]. Commands capture a clone at registration time, and
//! [`Sink::redirect`] swaps the writer for every clone at once.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// A shared writer.
pub type Output = Rc<RefCell<dyn Write>>;

/// Cloneable handle to the current output writer.
#[derive(Clone)]
pub struct Sink {
    slot: Rc<RefCell<Output>>,
}

impl Sink {
    pub fn new(out: Output) -> Self {
        Self {
            slot: Rc::new(RefCell::new(out)),
        }
    }

    /// A sink writing to the process's stdout.
    pub fn stdout() -> Self {
        Self::new(Rc::new(RefCell::new(io::stdout())))
    }

    /// Replaces the writer for this sink and all its clones.
    pub fn redirect(&self, out: Output) {
        *self.slot.borrow_mut() = out;
    }

    /// Writes `text` and flushes.
    pub fn write_str(&self, text: &str) -> io::Result<()> {
        let out = self.slot.borrow().clone();
        let mut out = out.borrow_mut();
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}
