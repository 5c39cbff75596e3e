//! replkit - An embeddable interactive command shell.
//!
//! Register commands with aliases, lifecycle hooks and completers, then hand
//! the shell a line editor and let it run the read-eval loop.

pub mod commands;
pub mod completion;
pub mod config;
pub mod editor;
pub mod error;
pub mod layout;
pub mod logging;
pub mod output;
pub mod shell;
pub mod terminal;

pub use commands::{CallContext, Command, CommandBundle, Operations};
pub use config::ShellConfig;
pub use editor::{LineEditor, Prompter, ReadOutcome};
pub use error::{Result, ShellError};
pub use output::{Output, Sink};
pub use shell::{AbortAction, LoopExit, Shell};
