//! Line editor abstraction.
//!
//! The shell never touches raw terminal input itself. It talks to a
//! [`LineEditor`], which owns key handling, history navigation and the
//! history file format.

pub mod readline;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crate::error::{Result, ShellError};

pub use readline::RustylineEditor;

/// Outcome of a blocking prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The user submitted a line.
    Line(String),
    /// The user pressed the interrupt key (Ctrl-C).
    Interrupted,
    /// Input ended (Ctrl-D or a closed stdin).
    Eof,
}

/// Completion callback registered with the editor.
pub type CompletionFn = Box<dyn Fn(&str) -> Vec<String>>;

/// The capabilities the shell needs from a line editor.
pub trait LineEditor {
    /// Shows `prompt` and blocks until the user submits a line or interrupts.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;

    /// Like [`LineEditor::read_line`] but masks the typed characters.
    fn read_password(&mut self, prompt: &str) -> Result<ReadOutcome>;

    /// Appends a line to the in-memory history.
    fn add_history(&mut self, line: &str);

    /// Loads history from `path`.
    fn load_history(&mut self, path: &Path) -> Result<()>;

    /// Writes history to `path`.
    fn save_history(&mut self, path: &Path) -> Result<()>;

    /// Installs the completion callback. Called once per shell run.
    fn set_completer(&mut self, completer: CompletionFn);
}

/// An editor shared between the shell loop and the commands it runs.
pub type SharedEditor = Rc<RefCell<dyn LineEditor>>;

/// Lets commands prompt the user while the shell is running.
///
/// Cloned into command closures at registration time; the shell attaches its
/// editor when a run starts and detaches it when the run ends.
#[derive(Clone, Default)]
pub struct Prompter {
    editor: Rc<RefCell<Option<SharedEditor>>>,
}

impl Prompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attach(&self, editor: SharedEditor) {
        *self.editor.borrow_mut() = Some(editor);
    }

    pub(crate) fn detach(&self) {
        self.editor.borrow_mut().take();
    }

    /// Returns true while a shell run has an editor attached.
    pub fn is_attached(&self) -> bool {
        self.editor.borrow().is_some()
    }

    /// Prompts for a line of text.
    pub fn read_line(&self, prompt: &str) -> Result<String> {
        self.prompt_with(|editor| editor.read_line(prompt))
    }

    /// Prompts for a secret without echoing it.
    pub fn read_password(&self, prompt: &str) -> Result<String> {
        self.prompt_with(|editor| editor.read_password(prompt))
    }

    fn prompt_with<F>(&self, read: F) -> Result<String>
    where
        F: FnOnce(&mut dyn LineEditor) -> Result<ReadOutcome>,
    {
        let editor = self.editor.borrow().clone().ok_or(ShellError::NotRunning)?;
        let mut editor = editor
            .try_borrow_mut()
            .map_err(|_| ShellError::editor("line editor is already reading"))?;
        match read(&mut *editor)? {
            ReadOutcome::Line(line) => Ok(line),
            ReadOutcome::Interrupted | ReadOutcome::Eof => Err(ShellError::Interrupted),
        }
    }
}

impl std::fmt::Debug for Prompter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prompter")
            .field("attached", &self.is_attached())
            .finish()
    }
}
