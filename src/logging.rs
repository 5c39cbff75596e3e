//! Tracing subscribers for the shell binary.
//!
//! The line editor owns the terminal while a prompt is up, and a log line
//! written to stderr mid-edit would land inside the prompt. Interactive runs
//! therefore log to a file; stderr is for piped or scripted sessions.

use std::fs::{self, File};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Sends log records to [`get_log_path`], replacing the previous session's log.
///
/// Failing to open the file leaves logging off; the shell still runs.
pub fn init_file_logging() {
    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("replkit: log directory unavailable, logging disabled: {e}");
            return;
        }
    }

    // One session per file.
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("replkit: log file unavailable, logging disabled: {e}");
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(log_file)
        .with_ansi(false)
        .try_init();
}

/// Sends log records to stderr. Only safe when no prompt is drawn.
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Session log location: `replkit/replkit.log` under the platform state
/// directory, falling back to the config directory and then the temp dir.
pub fn get_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("replkit").join("replkit.log"))
        .unwrap_or_else(|| std::env::temp_dir().join("replkit.log"))
}
