//! Command-line argument parsing for the demo shell.

use clap::Parser;
use replkit::ShellConfig;
use std::path::PathBuf;

/// An interactive command shell with aliases, history and tab-completion.
#[derive(Parser, Debug)]
#[command(name = "replkit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH", env = "REPLKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// History file path (overrides the config file)
    #[arg(long, value_name = "PATH", env = "REPLKIT_HISTORY")]
    pub history: Option<PathBuf>,

    /// Prompt string (overrides the config file)
    #[arg(long, value_name = "PROMPT")]
    pub prompt: Option<String>,

    /// Log to stderr instead of the log file
    #[arg(long)]
    pub log_stderr: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(ShellConfig::default_path)
    }

    /// Applies command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut ShellConfig) {
        if let Some(history) = &self.history {
            config.history_file = Some(history.clone());
        }
        if let Some(prompt) = &self.prompt {
            config.prompt = prompt.clone();
        }
        if config.history_file.is_none() {
            config.history_file = Some(config.history_path());
        }
    }
}
