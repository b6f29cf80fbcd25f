//! Run command orchestration: convert, then verify.

use ppmcheck_fs::Filesystem;
use ppmcheck_verify::VerificationSummary;
use serde::Serialize;

use crate::logger::Logger;
use crate::painter::Painter;

use super::{execute_convert, execute_verify, CommandResult, ConversionSummary, HarnessConfig};

/// What a harness invocation did. Phases that did not run are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion: Option<ConversionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<VerificationSummary>,
}

impl RunSummary {
    /// The mismatch tally of the verification phase.
    pub fn mismatches(&self) -> usize {
        self.verification
            .as_ref()
            .map_or(0, VerificationSummary::mismatched)
    }

    pub fn failed_conversions(&self) -> usize {
        self.conversion.as_ref().map_or(0, |c| c.failed.len())
    }
}

/// Execute the run command.
///
/// Verification runs even when no PAINT file was found, so previously
/// generated files are still checked.
pub fn execute_run<F, P, L>(
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
    let conversion = execute_convert(config, fs, painter, logger)?;
    let verification = execute_verify(config, fs, logger)?;

    Ok(RunSummary {
        conversion: Some(conversion),
        verification: Some(verification),
    })
}
