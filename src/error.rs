//! Error types for replkit.
//!
//! Defines the main error enum used throughout the shell.

use thiserror::Error;

/// Main error type for shell operations.
#[derive(Error, Debug)]
pub enum ShellError {
    /// A command hook returned an error or panicked.
    #[error("error to handle command {command}: {detail}")]
    Handler {
        /// Name of the command whose hook failed.
        command: String,
        /// Error or panic message.
        detail: String,
    },

    /// The line editor failed for a reason other than interrupt or end of input.
    #[error("Line editor error: {0}")]
    Editor(String),

    /// Terminal size query or screen clearing failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Invalid or unreadable configuration file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A prompt was requested while no line editor is attached.
    #[error("No line editor is attached to the shell")]
    NotRunning,

    /// The user interrupted a prompt issued from inside a command.
    #[error("Prompt interrupted")]
    Interrupted,
}

impl ShellError {
    /// Creates a handler fault for the given command.
    pub fn handler(command: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Handler {
            command: command.into(),
            detail: detail.into(),
        }
    }

    /// Creates a line editor error with the given message.
    pub fn editor(msg: impl Into<String>) -> Self {
        Self::Editor(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Handler { .. } => "Handler Error",
            Self::Editor(_) => "Editor Error",
            Self::Terminal(_) => "Terminal Error",
            Self::Config(_) => "Configuration Error",
            Self::NotRunning | Self::Interrupted => "Prompt Error",
        }
    }
}

/// Result type alias using ShellError.
pub type Result<T> = std::result::Result<T, ShellError>;
