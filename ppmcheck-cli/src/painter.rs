//! Painter invocation.
//!
//! This module provides:
//! - `HostFamily` and `PainterConfig`: which executable to run, chosen once
//!   at startup from the host OS
//! - `Painter` trait: run the painter on one PAINT file and hand back the
//!   PPM it produced (with a mock implementation for testing)
//! - `ProcessPainter`: the real implementation spawning the executable

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::{Arc, RwLock};

use ppmcheck_fs::{Filesystem, FsError, MockFilesystem};
use thiserror::Error;

use crate::cli::PPM_EXTENSION;

/// Painter location relative to the harness directory on Windows.
pub const WINDOWS_PAINTER: &str = "../bin/painter.exe";

/// Painter location relative to the harness directory elsewhere.
pub const UNIX_PAINTER: &str = "./../bin/painter";

/// Operating system family, which decides the default painter path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostFamily {
    Windows,
    Unix,
}

impl HostFamily {
    /// Family of the host this binary was built for.
    pub fn detect() -> Self {
        if cfg!(windows) {
            HostFamily::Windows
        } else {
            HostFamily::Unix
        }
    }

    pub fn default_painter(self) -> &'static str {
        match self {
            HostFamily::Windows => WINDOWS_PAINTER,
            HostFamily::Unix => UNIX_PAINTER,
        }
    }
}

/// Which painter executable to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PainterConfig {
    pub executable: PathBuf,
}

impl PainterConfig {
    pub fn for_family(family: HostFamily) -> Self {
        Self {
            executable: PathBuf::from(family.default_painter()),
        }
    }

    pub fn for_host() -> Self {
        Self::for_family(HostFamily::detect())
    }

    pub fn with_executable(mut self, executable: PathBuf) -> Self {
        self.executable = executable;
        self
    }
}

/// Errors from a painter invocation.
#[derive(Debug, Error)]
pub enum PainterError {
    #[error("failed to start painter {}: {source}", .executable.display())]
    Spawn {
        executable: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot remove leftover {} before painting: {source}", .path.display())]
    StaleArtifact {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    #[error("painter produced no {} from {} ({status})", .expected.display(), .input.display())]
    MissingArtifact {
        input: PathBuf,
        expected: PathBuf,
        status: String,
    },
}

/// A PPM file the painter left next to its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintedArtifact {
    pub path: PathBuf,
    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Bytes the painter wrote to its (captured) stdout.
    pub stdout_bytes: usize,
}

/// Path where the painter is expected to write the output for `input`.
pub fn expected_artifact(input: &Path) -> PathBuf {
    input.with_extension(PPM_EXTENSION)
}

/// Trait for running the painter on one input file.
pub trait Painter {
    /// Executable being run, for display.
    fn executable(&self) -> &Path;

    /// Run the painter on `input` and wait for it to exit.
    ///
    /// Succeeds only if this run wrote the expected PPM file. A file left
    /// at that path by an earlier run is removed first. The exit code alone
    /// does not decide success.
    fn paint(&self, input: &Path) -> Result<PaintedArtifact, PainterError>;
}

/// Delete a leftover artifact so only a fresh one can satisfy the check.
fn clear_stale<F: Filesystem>(fs: &F, expected: &Path) -> Result<(), PainterError> {
    if !fs.exists(expected) {
        return Ok(());
    }
    fs.remove_file(expected)
        .map_err(|source| PainterError::StaleArtifact {
            path: expected.to_path_buf(),
            source,
        })
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Painter running the real executable as a child process.
pub struct ProcessPainter<'a, F: Filesystem> {
    config: PainterConfig,
    fs: &'a F,
}

impl<'a, F: Filesystem> ProcessPainter<'a, F> {
    pub fn new(config: PainterConfig, fs: &'a F) -> Self {
        Self { config, fs }
    }
}

impl<F: Filesystem> Painter for ProcessPainter<'_, F> {
    fn executable(&self) -> &Path {
        &self.config.executable
    }

    fn paint(&self, input: &Path) -> Result<PaintedArtifact, PainterError> {
        let expected = expected_artifact(input);
        clear_stale(self.fs, &expected)?;

        // stdin closed and stdout captured so nothing interleaves with the
        // harness output; stderr stays visible.
        let output = Command::new(&self.config.executable)
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| PainterError::Spawn {
                executable: self.config.executable.clone(),
                source,
            })?;

        if !self.fs.exists(&expected) {
            return Err(PainterError::MissingArtifact {
                input: input.to_path_buf(),
                expected,
                status: describe_status(output.status),
            });
        }

        Ok(PaintedArtifact {
            path: expected,
            exit_code: output.status.code(),
            stdout_bytes: output.stdout.len(),
        })
    }
}

/// Mock painter for testing.
///
/// Writes a configured payload next to each known input in a shared
/// [`MockFilesystem`]; unknown inputs behave like a painter that exits
/// with code 1 without writing anything.
#[derive(Debug, Clone, Default)]
pub struct MockPainter {
    fs: MockFilesystem,
    outputs: HashMap<String, Vec<u8>>,
    exit_codes: HashMap<String, i32>,
    calls: Arc<RwLock<Vec<PathBuf>>>,
}

impl MockPainter {
    pub fn new(fs: MockFilesystem) -> Self {
        Self {
            fs,
            ..Self::default()
        }
    }

    /// Produce `data` when painting the input named `input_name`.
    pub fn with_output(mut self, input_name: &str, data: impl Into<Vec<u8>>) -> Self {
        self.outputs.insert(input_name.to_string(), data.into());
        self
    }

    /// Report `code` as exit code for `input_name`.
    pub fn with_exit_code(mut self, input_name: &str, code: i32) -> Self {
        self.exit_codes.insert(input_name.to_string(), code);
        self
    }

    /// Inputs painted so far, in call order.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.read().unwrap().clone()
    }
}

impl Painter for MockPainter {
    fn executable(&self) -> &Path {
        Path::new("mock-painter")
    }

    fn paint(&self, input: &Path) -> Result<PaintedArtifact, PainterError> {
        self.calls.write().unwrap().push(input.to_path_buf());

        let name = input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let expected = expected_artifact(input);
        clear_stale(&self.fs, &expected)?;

        match self.outputs.get(name) {
            Some(data) => {
                self.fs.add_file(expected.clone(), data.clone());
                Ok(PaintedArtifact {
                    path: expected,
                    exit_code: Some(self.exit_codes.get(name).copied().unwrap_or(0)),
                    stdout_bytes: 0,
                })
            }
            None => Err(PainterError::MissingArtifact {
                input: input.to_path_buf(),
                expected,
                status: "exit code 1".to_string(),
            }),
        }
    }
}
