//! Exit codes for ppm-check.
//!
//! Differences between generated and reference files are expected (floating
//! point drift in the painter), so a completed run exits with `SUCCESS`
//! unless `--strict` is given.

use crate::commands::{CommandError, RunSummary};

/// Exit code constants.
pub mod codes {
    /// Completed run.
    pub const SUCCESS: u8 = 0;
    /// Invalid arguments.
    pub const INVALID_ARGS: u8 = 1;
    /// IO error.
    pub const IO_ERROR: u8 = 2;
    /// A required directory does not exist.
    pub const DIRECTORY_NOT_FOUND: u8 = 3;
    /// The painter could not be started or produced no output.
    pub const PAINTER_FAILED: u8 = 4;
    /// Files differ from the references (`--strict` only).
    pub const FILES_DIFFER: u8 = 5;
}

/// Map a CommandError to an exit code.
pub fn exit_code(error: &CommandError) -> u8 {
    match error {
        CommandError::InvalidArgument(_) => codes::INVALID_ARGS,
        CommandError::Filesystem(_) => codes::IO_ERROR,
        CommandError::Verify(_) => codes::IO_ERROR,
        CommandError::Json(_) => codes::IO_ERROR,
        CommandError::DirectoryNotFound(_) => codes::DIRECTORY_NOT_FOUND,
        CommandError::Painter(_) => codes::PAINTER_FAILED,
    }
}

/// Exit code of a run that completed.
pub fn summary_exit_code(summary: &RunSummary, strict: bool) -> u8 {
    if !strict {
        return codes::SUCCESS;
    }
    if summary.failed_conversions() > 0 {
        codes::PAINTER_FAILED
    } else if summary.mismatches() > 0 {
        codes::FILES_DIFFER
    } else {
        codes::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliError;
    use crate::commands::{ConversionSummary, FailedConversion};
    use crate::painter::PainterError;
    use ppmcheck_fs::FsError;
    use ppmcheck_verify::{ByteDiff, Comparison, VerificationSummary, VerifyError};
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_invalid_argument() {
        let error = CommandError::InvalidArgument(CliError::InvalidFilter {
            pattern: "[".to_string(),
            message: "invalid range pattern".to_string(),
        });
        assert_eq!(exit_code(&error), codes::INVALID_ARGS);
    }

    #[test]
    fn test_exit_code_filesystem() {
        let error = CommandError::Filesystem(FsError::NotFound(PathBuf::from("ref_paint/a.ppm")));
        assert_eq!(exit_code(&error), codes::IO_ERROR);
    }

    #[test]
    fn test_exit_code_verify() {
        let error = CommandError::Verify(VerifyError::Read {
            path: PathBuf::from("my_ppm/a.ppm"),
            source: FsError::NotFound(PathBuf::from("my_ppm/a.ppm")),
        });
        assert_eq!(exit_code(&error), codes::IO_ERROR);
    }

    #[test]
    fn test_exit_code_directory_not_found() {
        let error = CommandError::DirectoryNotFound(PathBuf::from("ref_paint"));
        assert_eq!(exit_code(&error), codes::DIRECTORY_NOT_FOUND);
    }

    #[test]
    fn test_exit_code_painter() {
        let error = CommandError::Painter(PainterError::MissingArtifact {
            input: PathBuf::from("ref_paint/a.paint"),
            expected: PathBuf::from("ref_paint/a.ppm"),
            status: "exit code 1".to_string(),
        });
        assert_eq!(exit_code(&error), codes::PAINTER_FAILED);
    }

    fn summary_with(mismatches: usize, failures: usize) -> RunSummary {
        let mut verification = VerificationSummary::default();
        verification.push(Comparison::matched("ok.ppm"));
        for i in 0..mismatches {
            verification.push(Comparison::mismatched(
                &format!("bad{i}.ppm"),
                ByteDiff::new(b"a", b"b").expect("diff"),
            ));
        }
        let mut conversion = ConversionSummary::default();
        for i in 0..failures {
            conversion.failed.push(FailedConversion {
                input: format!("bad{i}.paint"),
                reason: "no output".to_string(),
            });
        }
        RunSummary {
            conversion: Some(conversion),
            verification: Some(verification),
        }
    }

    #[test]
    fn test_summary_exit_code_lenient() {
        assert_eq!(summary_exit_code(&summary_with(3, 1), false), codes::SUCCESS);
    }

    #[test]
    fn test_summary_exit_code_strict_clean() {
        assert_eq!(summary_exit_code(&summary_with(0, 0), true), codes::SUCCESS);
    }

    #[test]
    fn test_summary_exit_code_strict_mismatch() {
        assert_eq!(summary_exit_code(&summary_with(1, 0), true), codes::FILES_DIFFER);
    }

    #[test]
    fn test_summary_exit_code_strict_failure_wins() {
        assert_eq!(summary_exit_code(&summary_with(1, 1), true), codes::PAINTER_FAILED);
    }

    #[test]
    fn test_exit_codes_constants() {
        assert_eq!(codes::SUCCESS, 0);
        assert_eq!(codes::INVALID_ARGS, 1);
        assert_eq!(codes::IO_ERROR, 2);
        assert_eq!(codes::DIRECTORY_NOT_FOUND, 3);
        assert_eq!(codes::PAINTER_FAILED, 4);
        assert_eq!(codes::FILES_DIFFER, 5);
    }
}
