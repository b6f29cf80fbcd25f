//! ppm-check harness.
//!
//! This crate provides the command-line interface that runs the `painter`
//! program on every PAINT file and compares the PPM images it produces with
//! a directory of reference images.

pub mod cli;
pub mod commands;
pub mod exit;
pub mod logger;
pub mod painter;

pub use cli::{
    parse_from, Cli, CliError, Command, HarnessArgs, OutputFormat, DEFAULT_GENERATED_DIR,
    DEFAULT_PAINT_DIR, DEFAULT_REFERENCE_DIR, PAINT_EXTENSION, PPM_EXTENSION,
};
pub use commands::{
    execute_command, execute_convert, execute_run, execute_verify, final_message, CommandError,
    CommandResult, ConversionSummary, Converted, FailedConversion, HarnessConfig, RunSummary,
    SEPARATOR,
};
pub use logger::{ConsoleLogger, Logger, MockLogger, NullLogger, Verbosity};
pub use painter::{
    HostFamily, MockPainter, PaintedArtifact, Painter, PainterConfig, PainterError,
    ProcessPainter,
};
