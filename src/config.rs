//! Configuration management for replkit.
//!
//! Handles loading shell settings from a TOML file. Every field has a
//! default, so a missing file or an empty one yields a usable config.

use crate::error::{Result, ShellError};
use crate::layout::DEFAULT_WIDTH_FACTOR;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Shell settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Prompt shown before each line.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// History file. Defaults to the platform data directory.
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    /// Consecutive interrupts that end the shell.
    #[serde(default = "default_abort_threshold")]
    pub abort_threshold: u32,

    /// Spaces between columns in tables and column grids.
    #[serde(default = "default_margin")]
    pub margin: usize,

    /// Multiplier applied to the terminal width for column grids.
    #[serde(default = "default_width_factor")]
    pub width_factor: f32,

    /// Ignore blank lines instead of reporting them as unknown commands.
    #[serde(default)]
    pub skip_blank_lines: bool,
}

fn default_prompt() -> String {
    "> ".to_string()
}

fn default_abort_threshold() -> u32 {
    2
}

fn default_margin() -> usize {
    2
}

fn default_width_factor() -> f32 {
    DEFAULT_WIDTH_FACTOR
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            history_file: None,
            abort_threshold: default_abort_threshold(),
            margin: default_margin(),
            width_factor: default_width_factor(),
            skip_blank_lines: false,
        }
    }
}

impl ShellConfig {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("replkit")
            .join("config.toml")
    }

    /// Returns the default history file path for the current platform.
    pub fn default_history_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("replkit")
            .join("history")
    }

    /// Returns the configured history file, or the platform default.
    pub fn history_path(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(Self::default_history_path)
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ShellError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            ShellError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.abort_threshold == 0 {
            return Err(ShellError::config("abort_threshold must be at least 1"));
        }
        if self.width_factor.is_nan() || self.width_factor <= 0.0 {
            return Err(ShellError::config("width_factor must be positive"));
        }
        Ok(())
    }
}
