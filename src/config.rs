//! Run configuration: validated directories and the run-wide busy status.
//!
//! Interactive collection lives in [`crate::prompt`]; by the time a
//! [`RunConfig`] exists, its directories have been validated (input) or
//! created (output) and the core consumes it without further questions.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use crate::model::BusyStatus;

/// Default input directory for confirmation emails.
pub const DEFAULT_EMAILS_DIR: &str = "./emails";

/// Default output directory for generated calendar files.
pub const DEFAULT_ICS_DIR: &str = "./ics";

// ── Errors ──────────────────────────────────────────────────────────────

/// Errors from configuration validation (the non-interactive path; the
/// interactive path re-prompts instead of failing).
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("email directory does not exist: \"{path}\"")]
    #[diagnostic(
        code(seshat::config::missing_dir),
        help(
            "Pass an existing directory with --emails-dir, or run without the \
             flag to be prompted for one."
        )
    )]
    MissingDirectory { path: String },

    #[error("cannot create output directory \"{path}\": {message}")]
    #[diagnostic(
        code(seshat::config::create_dir),
        help("Check permissions on the parent directory.")
    )]
    CreateDirectory { path: String, message: String },
}

/// Convenience alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// ── RunConfig ───────────────────────────────────────────────────────────

/// Resolved configuration for one batch run. Read-only once built.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory holding the confirmation emails.
    pub emails_dir: PathBuf,
    /// Directory receiving the generated `.ics` files.
    pub ics_dir: PathBuf,
    /// Busy status stamped on every event of the run.
    pub busy_status: BusyStatus,
}

/// Validate that an input directory exists.
pub fn require_directory(path: &Path) -> ConfigResult<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ConfigError::MissingDirectory {
            path: path.display().to_string(),
        })
    }
}

/// Ensure the output directory exists, creating it (and parents) if needed.
pub fn ensure_output_directory(path: &Path) -> ConfigResult<()> {
    std::fs::create_dir_all(path).map_err(|e| ConfigError::CreateDirectory {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
