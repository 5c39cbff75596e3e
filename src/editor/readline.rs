//! rustyline-backed line editor.

use std::borrow::Cow;
use std::cell::Cell;
use std::io;
use std::path::Path;

use crossterm::tty::IsTty;
use rustyline::completion::Completer;
use rustyline::config::{ColorMode, Configurer};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing::debug;

use super::{CompletionFn, LineEditor, ReadOutcome};
use crate::error::{Result, ShellError};

/// Terminals rustyline cannot drive; it falls back to plain echoing input.
const UNSUPPORTED_TERMS: [&str; 3] = ["dumb", "cons25", "emacs"];

/// Bridges the shell's completion callback into rustyline and masks input
/// while a password is being read.
#[derive(Default)]
struct ShellHelper {
    completer: Option<CompletionFn>,
    masking: Cell<bool>,
}

impl Completer for ShellHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if self.masking.get() {
            return Ok((0, Vec::new()));
        }
        // Candidates are whole lines, so they replace everything up to the cursor.
        let candidates = self
            .completer
            .as_ref()
            .map(|complete| complete(&line[..pos]))
            .unwrap_or_default();
        Ok((0, candidates))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.masking.get() {
            Cow::Owned("*".repeat(line.chars().count()))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        self.masking.get()
    }
}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}

/// Line editor backed by rustyline with file history.
pub struct RustylineEditor {
    editor: Editor<ShellHelper, FileHistory>,
}

impl RustylineEditor {
    /// Creates an editor attached to the process's terminal.
    pub fn new() -> Result<Self> {
        let mut editor = Editor::<ShellHelper, FileHistory>::new()
            .map_err(|e| ShellError::editor(e.to_string()))?;
        editor.set_helper(Some(ShellHelper::default()));
        Ok(Self { editor })
    }

    fn read(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(ShellError::editor(e.to_string())),
        }
    }

    fn set_masking(&mut self, masking: bool) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.masking.set(masking);
        }
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        self.read(prompt)
    }

    fn read_password(&mut self, prompt: &str) -> Result<ReadOutcome> {
        let term = std::env::var("TERM").ok();
        if echoes_input(io::stdin().is_tty(), term.as_deref()) {
            return Err(ShellError::editor(
                "cannot read a password: terminal would echo it",
            ));
        }

        // The masking highlighter only runs with colors on.
        let color_mode = self.editor.config_mut().color_mode();
        self.editor.set_color_mode(ColorMode::Forced);
        self.set_masking(true);
        let outcome = self.read(prompt);
        self.set_masking(false);
        self.editor.set_color_mode(color_mode);
        outcome
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            debug!("Failed to add history entry: {e}");
        }
    }

    fn load_history(&mut self, path: &Path) -> Result<()> {
        self.editor
            .load_history(path)
            .map_err(|e| ShellError::editor(format!("Failed to load history: {e}")))
    }

    fn save_history(&mut self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ShellError::editor(format!("Failed to create history directory: {e}"))
            })?;
        }
        self.editor
            .save_history(path)
            .map_err(|e| ShellError::editor(format!("Failed to save history: {e}")))
    }

    fn set_completer(&mut self, completer: CompletionFn) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer = Some(completer);
        }
    }
}

/// Returns true when typed input would be shown in clear text: an
/// interactive terminal rustyline only supports by echoing.
fn echoes_input(stdin_tty: bool, term: Option<&str>) -> bool {
    stdin_tty
        && term.is_some_and(|term| {
            UNSUPPORTED_TERMS
                .iter()
                .any(|unsupported| term.eq_ignore_ascii_case(unsupported))
        })
}
