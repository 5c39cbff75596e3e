//! Common test utilities for shell tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use replkit::editor::{CompletionFn, SharedEditor};
use replkit::{LineEditor, ReadOutcome, Result, Shell};

/// A line editor that replays a fixed script of outcomes.
///
/// When the script runs out it reports end of input, so every run terminates.
#[derive(Default)]
pub struct ScriptedEditor {
    pub script: VecDeque<ReadOutcome>,
    pub prompts: Vec<String>,
    pub password_prompts: Vec<String>,
    pub history: Vec<String>,
    pub saved: Vec<PathBuf>,
    pub loaded: Vec<PathBuf>,
    pub completer: Option<CompletionFn>,
}

impl ScriptedEditor {
    pub fn new(script: impl IntoIterator<Item = ReadOutcome>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Runs the installed completer on `line`.
    pub fn complete(&self, line: &str) -> Vec<String> {
        self.completer
            .as_ref()
            .map(|complete| complete(line))
            .unwrap_or_default()
    }

    fn next(&mut self) -> ReadOutcome {
        self.script.pop_front().unwrap_or(ReadOutcome::Eof)
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        self.prompts.push(prompt.to_string());
        Ok(self.next())
    }

    fn read_password(&mut self, prompt: &str) -> Result<ReadOutcome> {
        self.password_prompts.push(prompt.to_string());
        Ok(self.next())
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    fn load_history(&mut self, path: &Path) -> Result<()> {
        self.loaded.push(path.to_path_buf());
        Ok(())
    }

    fn save_history(&mut self, path: &Path) -> Result<()> {
        self.saved.push(path.to_path_buf());
        Ok(())
    }

    fn set_completer(&mut self, completer: CompletionFn) {
        self.completer = Some(completer);
    }
}

/// Shorthand for a submitted line.
pub fn line(text: &str) -> ReadOutcome {
    ReadOutcome::Line(text.to_string())
}

/// Wraps an editor so both the shell and the test can reach it.
pub fn shared(editor: ScriptedEditor) -> (Rc<RefCell<ScriptedEditor>>, SharedEditor) {
    let editor = Rc::new(RefCell::new(editor));
    let shared: SharedEditor = editor.clone();
    (editor, shared)
}

/// Creates a shell whose messages go into a buffer.
pub fn quiet_shell() -> (Shell, Rc<RefCell<Vec<u8>>>) {
    let buf = Rc::new(RefCell::new(Vec::new()));
    let mut shell = Shell::new();
    shell.set_output(buf.clone());
    (shell, buf)
}

/// Everything the shell wrote to its output buffer.
pub fn output(buf: &Rc<RefCell<Vec<u8>>>) -> String {
    String::from_utf8(buf.borrow().clone()).expect("output should be utf-8")
}
