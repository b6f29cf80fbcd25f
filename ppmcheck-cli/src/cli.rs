//! CLI argument parsing for ppm-check.
//!
//! Without a subcommand the full harness runs: convert every PAINT file,
//! then verify the generated PPM files.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use glob::Pattern;
use thiserror::Error;

use crate::commands::HarnessConfig;
use crate::painter::PainterConfig;

/// Default directory holding the PAINT inputs.
pub const DEFAULT_PAINT_DIR: &str = "ref_paint";

/// Default directory receiving the PPM files produced by the painter.
pub const DEFAULT_GENERATED_DIR: &str = "my_ppm";

/// Default directory holding the reference PPM files.
pub const DEFAULT_REFERENCE_DIR: &str = "ref_ppm";

/// Extension of painter inputs.
pub const PAINT_EXTENSION: &str = "paint";

/// Extension of painter outputs.
pub const PPM_EXTENSION: &str = "ppm";

/// Errors from CLI argument validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("invalid --filter pattern '{pattern}': {message}")]
    InvalidFilter { pattern: String, message: String },
}

/// ppm-check - Run the painter on every PAINT file and compare the PPM
/// outputs with the reference images.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "ppm-check")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub options: HarnessArgs,
}

impl Cli {
    /// The command to execute, `run` when none was given.
    pub fn effective_command(&self) -> Command {
        self.command.unwrap_or(Command::Run)
    }
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Convert every PAINT file, then verify the generated PPM files.
    Run,
    /// Only run the painter on every PAINT file.
    Convert,
    /// Only compare already generated PPM files with the references.
    Verify,
}

/// Output format for results.
#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable progress and summary
    #[default]
    Text,
    /// Progress on stderr, JSON summary on stdout
    Json,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct HarnessArgs {
    /// Directory containing the PAINT files.
    #[arg(long, global = true, default_value = DEFAULT_PAINT_DIR)]
    pub paint_dir: PathBuf,

    /// Directory receiving the PPM files produced by the painter.
    #[arg(long, global = true, default_value = DEFAULT_GENERATED_DIR)]
    pub generated_dir: PathBuf,

    /// Directory containing the reference PPM files.
    #[arg(long, global = true, default_value = DEFAULT_REFERENCE_DIR)]
    pub reference_dir: PathBuf,

    /// Painter executable. Defaults to the build location for this OS.
    #[arg(long, global = true)]
    pub painter: Option<PathBuf>,

    /// Only convert PAINT files whose name matches this glob.
    #[arg(long, global = true)]
    pub filter: Option<String>,

    /// Report painter failures and continue with the next file.
    #[arg(long, global = true, default_value_t = false)]
    pub keep_going: bool,

    /// Exit with a non-zero code when a file differs or a conversion failed.
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Increase verbosity (-v verbose, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl HarnessArgs {
    /// Compile the `--filter` glob, if any.
    pub fn filter_pattern(&self) -> Result<Option<Pattern>, CliError> {
        self.filter
            .as_deref()
            .map(|p| {
                Pattern::new(p).map_err(|e| CliError::InvalidFilter {
                    pattern: p.to_string(),
                    message: e.msg.to_string(),
                })
            })
            .transpose()
    }

    /// Build the harness configuration handed to the commands.
    pub fn to_config(&self) -> Result<HarnessConfig, CliError> {
        let config = HarnessConfig::new(
            self.paint_dir.clone(),
            self.generated_dir.clone(),
            self.reference_dir.clone(),
        )
        .with_keep_going(self.keep_going);

        Ok(match self.filter_pattern()? {
            Some(pattern) => config.with_filter(pattern),
            None => config,
        })
    }

    /// Painter configuration for this host, with `--painter` applied.
    pub fn painter_config(&self) -> PainterConfig {
        let config = PainterConfig::for_host();
        match &self.painter {
            Some(path) => config.with_executable(path.clone()),
            None => config,
        }
    }
}

/// Parse CLI arguments from an iterator of strings.
/// Useful for testing.
pub fn parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
