//! The interactive shell loop.
//!
//! Each submitted line goes through `Idle → Tokenized → Resolved → Dispatched`
//! and back to `Idle`. Hooks run synchronously on the loop's thread; a failing
//! hook is reported and the loop carries on.

use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::commands::context::{bind, CallContext};
use crate::commands::definitions::{Command, Hook};
use crate::commands::help::help_command;
use crate::commands::registry::{bundle_commands, CommandBundle, Registry};
use crate::commands::tokenizer::tokenize;
use crate::completion::Completion;
use crate::config::ShellConfig;
use crate::editor::{LineEditor, Prompter, ReadOutcome, RustylineEditor, SharedEditor};
use crate::error::{Result, ShellError};
use crate::layout;
use crate::output::{Output, Sink};
use crate::terminal::Terminal;

/// What the abort callback wants the loop to do after an interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortAction {
    /// Keep reading lines.
    Continue,
    /// Leave the loop.
    Exit,
}

/// Why [`Shell::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The abort callback asked to exit after this many consecutive interrupts.
    Aborted(u32),
    /// The editor reported end of input.
    EndOfInput,
}

/// Called with the consecutive-interrupt count after each interrupt.
pub type AbortCallback = Box<dyn FnMut(u32) -> AbortAction>;

/// How interrupts are answered.
enum AbortHandler {
    /// Warn below the threshold, exit at or above it.
    Default { threshold: u32 },
    Custom(AbortCallback),
    /// Only count interrupts.
    Disabled,
}

/// An interactive command shell.
pub struct Shell {
    registry: Rc<RefCell<Registry>>,
    history_file: Option<PathBuf>,
    prompt: String,
    abort_count: u32,
    on_abort: AbortHandler,
    prompter: Prompter,
    out: Sink,
    margin: usize,
    width_factor: f32,
    skip_blank_lines: bool,
}

impl Shell {
    /// Creates a shell with the built-in `help` command and the default abort
    /// behaviour: warn on the first interrupt, exit on the second.
    pub fn new() -> Self {
        Self::with_config(&ShellConfig::default())
    }

    /// Creates a shell from configuration.
    pub fn with_config(config: &ShellConfig) -> Self {
        let registry = Rc::new(RefCell::new(Registry::new()));
        let out = Sink::stdout();

        let mut shell = Self {
            registry: Rc::clone(&registry),
            history_file: config.history_file.clone(),
            prompt: config.prompt.clone(),
            abort_count: 0,
            on_abort: AbortHandler::Default {
                threshold: config.abort_threshold,
            },
            prompter: Prompter::new(),
            out: out.clone(),
            margin: config.margin,
            width_factor: config.width_factor,
            skip_blank_lines: config.skip_blank_lines,
        };
        shell.append_command(help_command(Rc::downgrade(&registry), out));
        shell
    }

    /// Appends a command to the registry.
    pub fn append_command(&mut self, command: Command) {
        self.registry.borrow_mut().append(command);
    }

    /// Registers one command per operation of `bundle`.
    pub fn add_bundle<B: CommandBundle>(&mut self, bundle: B) {
        let mut registry = self.registry.borrow_mut();
        for command in bundle_commands(bundle) {
            registry.append(command);
        }
    }

    /// Removes a command by primary name. See [`Registry::remove`].
    pub fn remove_command(&mut self, name: &str) -> Option<Rc<Command>> {
        self.registry.borrow_mut().remove(name)
    }

    /// Shared handle to the command registry.
    pub fn registry(&self) -> Rc<RefCell<Registry>> {
        Rc::clone(&self.registry)
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_history_file(&mut self, path: impl Into<PathBuf>) {
        self.history_file = Some(path.into());
    }

    pub fn history_file(&self) -> Option<&Path> {
        self.history_file.as_deref()
    }

    /// Replaces the abort callback.
    pub fn on_abort<F>(&mut self, callback: F)
    where
        F: FnMut(u32) -> AbortAction + 'static,
    {
        self.on_abort = AbortHandler::Custom(Box::new(callback));
    }

    /// Removes the abort callback. Interrupts then only bump the counter.
    pub fn clear_on_abort(&mut self) {
        self.on_abort = AbortHandler::Disabled;
    }

    /// Redirects the shell's output: its own messages (unknown command,
    /// faults, warnings), `help`, and the print helpers.
    pub fn set_output(&mut self, out: Output) {
        self.out.redirect(out);
    }

    /// Handle to the shell's output, for commands that print through it.
    pub fn output(&self) -> Sink {
        self.out.clone()
    }

    /// When set, blank lines are ignored instead of reported as unknown.
    pub fn set_skip_blank_lines(&mut self, skip: bool) {
        self.skip_blank_lines = skip;
    }

    /// Consecutive interrupts since the last successful read.
    pub fn abort_count(&self) -> u32 {
        self.abort_count
    }

    /// Handle for prompting the user from inside a command.
    pub fn prompter(&self) -> Prompter {
        self.prompter.clone()
    }

    /// Completion resolver over this shell's registry.
    pub fn completion(&self) -> Completion {
        Completion::new(Rc::clone(&self.registry))
    }

    /// Prompts for a line through the running editor.
    pub fn read_line(&self, prompt: &str) -> Result<String> {
        self.prompter.read_line(prompt)
    }

    /// Prompts for a secret through the running editor.
    pub fn read_password(&self, prompt: &str) -> Result<String> {
        self.prompter.read_password(prompt)
    }

    /// Prints a table, first row being the headers.
    pub fn print_tables<S: AsRef<str>>(&self, table: &[Vec<S>], margin: usize) {
        self.emit(&layout::format_table(table, margin));
    }

    /// Prints `cells` in as many columns as fit the terminal.
    pub fn print_columns<S: AsRef<str>, T: Terminal>(
        &self,
        terminal: &T,
        cells: &[S],
        margin: usize,
    ) -> Result<()> {
        let (columns, _) = terminal.size()?;
        let width = layout::available_width(columns, self.width_factor);
        self.emit(&layout::format_columns(cells, margin, width));
        Ok(())
    }

    /// Margin from configuration, for callers of the print helpers.
    pub fn margin(&self) -> usize {
        self.margin
    }

    pub fn clear_screen<T: Terminal>(&self, terminal: &mut T) -> Result<()> {
        terminal.clear_screen()?;
        Ok(())
    }

    /// Runs the shell on the process's terminal until it is aborted.
    ///
    /// Exits the process with status 0 when the abort callback asks to exit.
    /// Returns on end of input.
    pub fn run_as_shell(&mut self) -> Result<()> {
        let editor: SharedEditor = Rc::new(RefCell::new(RustylineEditor::new()?));
        match self.run(editor)? {
            LoopExit::Aborted(count) => {
                info!(interrupts = count, "shell aborted");
                std::process::exit(0);
            }
            LoopExit::EndOfInput => Ok(()),
        }
    }

    /// Runs the read-eval loop on `editor` until end of input or abort.
    pub fn run(&mut self, editor: SharedEditor) -> Result<LoopExit> {
        let completion = self.completion();
        editor
            .borrow_mut()
            .set_completer(Box::new(move |line: &str| completion.complete(line)));

        if let Some(path) = &self.history_file {
            if let Err(e) = editor.borrow_mut().load_history(path) {
                debug!("History not loaded from {}: {e}", path.display());
            }
        }

        self.prompter.attach(Rc::clone(&editor));
        info!(prompt = %self.prompt, "shell started");
        let exit = self.read_eval_loop(&editor);
        self.prompter.detach();
        info!(?exit, "shell stopped");
        exit
    }

    fn read_eval_loop(&mut self, editor: &SharedEditor) -> Result<LoopExit> {
        loop {
            let outcome = editor.borrow_mut().read_line(&self.prompt)?;
            match outcome {
                ReadOutcome::Line(line) => {
                    self.abort_count = 0;
                    let blank = line.trim().is_empty();
                    if blank && self.skip_blank_lines {
                        continue;
                    }
                    if !blank {
                        editor.borrow_mut().add_history(&line);
                    }
                    // Faults are reported by execute.
                    let _ = self.execute(&line);
                }
                ReadOutcome::Interrupted => {
                    self.abort_count += 1;
                    debug!(count = self.abort_count, "interrupt");
                    self.save_history(editor);
                    if self.abort() == AbortAction::Exit {
                        return Ok(LoopExit::Aborted(self.abort_count));
                    }
                }
                ReadOutcome::Eof => {
                    self.save_history(editor);
                    return Ok(LoopExit::EndOfInput);
                }
            }
        }
    }

    /// Tokenizes, resolves and dispatches one line.
    ///
    /// Returns the fault if a hook failed; the fault has already been
    /// reported to the shell's output. An unknown command is reported but is
    /// not an error.
    pub fn execute(&self, line: &str) -> Result<()> {
        let tokens = tokenize(line);
        let command = tokens
            .first()
            .and_then(|word| self.registry.borrow().resolve(word));

        let Some(command) = command else {
            debug!(line, "unknown command");
            self.emit("Unknown command\n");
            return Ok(());
        };

        let ctx = bind(&tokens);
        debug!(command = %command.name, flags = ?ctx.flags, positionals = ?ctx.positionals, "dispatch");

        if let Err(fault) = dispatch(&command, &ctx) {
            warn!("{fault}");
            self.emit(&format!("{fault}\n"));
            return Err(fault);
        }
        Ok(())
    }

    fn abort(&mut self) -> AbortAction {
        let count = self.abort_count;
        match &mut self.on_abort {
            AbortHandler::Default { threshold } => {
                let action = default_abort(*threshold, count);
                if action == AbortAction::Continue {
                    self.emit("press Ctrl-C again to exit\n");
                }
                action
            }
            AbortHandler::Custom(callback) => callback(count),
            AbortHandler::Disabled => AbortAction::Continue,
        }
    }

    fn save_history(&self, editor: &SharedEditor) {
        if let Some(path) = &self.history_file {
            if let Err(e) = editor.borrow_mut().save_history(path) {
                debug!("History not saved to {}: {e}", path.display());
            }
        }
    }

    fn emit(&self, text: &str) {
        if let Err(e) = self.out.write_str(text) {
            debug!("Output not written: {e}");
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs before, handler and after in order, stopping at the first fault.
fn dispatch(command: &Command, ctx: &CallContext) -> Result<()> {
    for hook in [&command.before, &command.handler, &command.after]
        .into_iter()
        .flatten()
    {
        invoke(&command.name, hook, ctx)?;
    }
    Ok(())
}

/// Calls a hook, turning both errors and panics into a handler fault.
fn invoke(name: &str, hook: &Hook, ctx: &CallContext) -> Result<()> {
    match panic::catch_unwind(AssertUnwindSafe(|| hook(ctx))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(ShellError::handler(name, format!("{e:#}"))),
        Err(payload) => Err(ShellError::handler(name, panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// The default answer to `count` consecutive interrupts.
pub fn default_abort(threshold: u32, count: u32) -> AbortAction {
    if count < threshold {
        AbortAction::Continue
    } else {
        AbortAction::Exit
    }
}
