//! Command orchestration for CLI subcommands.
//!
//! Provides execute functions for:
//! - `convert` - Run the painter on every PAINT file
//! - `verify` - Compare generated PPM files with the references
//! - `run` - Convert then verify

pub mod convert;
pub mod run;
pub mod verify;

pub use convert::{execute_convert, ConversionSummary, Converted, FailedConversion};
pub use run::{execute_run, RunSummary};
pub use verify::{execute_verify, final_message};

use std::path::{Path, PathBuf};

use glob::Pattern;
use ppmcheck_fs::{Filesystem, FsError};
use ppmcheck_verify::VerifyError;
use thiserror::Error;

use crate::cli::{
    CliError, Command, DEFAULT_GENERATED_DIR, DEFAULT_PAINT_DIR, DEFAULT_REFERENCE_DIR,
};
use crate::logger::Logger;
use crate::painter::{Painter, PainterError};

/// Line printed between phases.
pub const SEPARATOR: &str = "-------------------------";

/// Errors from command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] CliError),

    #[error("filesystem error: {0}")]
    Filesystem(#[from] FsError),

    #[error("painter error: {0}")]
    Painter(#[from] PainterError),

    #[error("verification error: {0}")]
    Verify(#[from] VerifyError),

    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of command execution.
pub type CommandResult<T> = Result<T, CommandError>;

/// Directories and policies of one harness run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub paint_dir: PathBuf,
    pub generated_dir: PathBuf,
    pub reference_dir: PathBuf,
    /// Only PAINT files matching this pattern are converted.
    pub filter: Option<Pattern>,
    /// Record painter failures and continue instead of stopping.
    pub keep_going: bool,
}

impl HarnessConfig {
    pub fn new(paint_dir: PathBuf, generated_dir: PathBuf, reference_dir: PathBuf) -> Self {
        Self {
            paint_dir,
            generated_dir,
            reference_dir,
            filter: None,
            keep_going: false,
        }
    }

    pub fn with_filter(mut self, filter: Pattern) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::new(
            PathBuf::from(DEFAULT_PAINT_DIR),
            PathBuf::from(DEFAULT_GENERATED_DIR),
            PathBuf::from(DEFAULT_REFERENCE_DIR),
        )
    }
}

/// Execute `command` and collect what each phase did.
pub fn execute_command<F, P, L>(
    command: Command,
    config: &HarnessConfig,
    fs: &F,
    painter: &P,
    logger: &L,
) -> CommandResult<RunSummary>
where
    F: Filesystem,
    P: Painter,
    L: Logger,
{
    match command {
        Command::Run => execute_run(config, fs, painter, logger),
        Command::Convert => Ok(RunSummary {
            conversion: Some(execute_convert(config, fs, painter, logger)?),
            verification: None,
        }),
        Command::Verify => Ok(RunSummary {
            conversion: None,
            verification: Some(execute_verify(config, fs, logger)?),
        }),
    }
}

/// Fail with `DirectoryNotFound` unless `dir` is an existing directory.
fn require_dir<F: Filesystem>(fs: &F, dir: &Path) -> CommandResult<()> {
    if fs.is_dir(dir) {
        Ok(())
    } else {
        Err(CommandError::DirectoryNotFound(dir.to_path_buf()))
    }
}

/// Directory as shown in messages, with a trailing separator.
fn folder_label(dir: &Path) -> String {
    let label = dir.display().to_string();
    if label.ends_with('/') || label.ends_with(std::path::MAIN_SEPARATOR) {
        label
    } else {
        format!("{label}/")
    }
}
