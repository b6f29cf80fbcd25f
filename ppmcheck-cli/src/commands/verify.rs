//! Verify command orchestration.
//!
//! Compares each generated PPM file with the same-named reference and
//! prints one status line per file followed by the final report.

use ppmcheck_fs::Filesystem;
use ppmcheck_verify::{Comparison, VerificationSummary, Verdict, Verifier};

use crate::cli::PPM_EXTENSION;
use crate::logger::Logger;

use super::{folder_label, require_dir, CommandResult, HarnessConfig, SEPARATOR};

/// Execute the verify command.
pub fn execute_verify<F, L>(
    config: &HarnessConfig,
    fs: &F,
    logger: &L,
) -> CommandResult<VerificationSummary>
where
    F: Filesystem,
    L: Logger,
{
    logger.info(SEPARATOR);
    logger.info("Searching for created PPM files");

    require_dir(fs, &config.generated_dir)?;
    require_dir(fs, &config.reference_dir)?;

    let verifier = Verifier::new(fs, &config.generated_dir, &config.reference_dir);
    let generated = verifier.generated_files(PPM_EXTENSION)?;
    let references = verifier.reference_names()?;

    let mut summary = VerificationSummary::default();

    if generated.is_empty() {
        logger.info("No PPM files found");
        logger.info(SEPARATOR);
        return Ok(summary);
    }

    logger.info(&format!("{} PPM file(s) found", generated.len()));
    logger.info("PPM file(s) will be compared with reference PPMs");
    logger.info(SEPARATOR);

    let label = folder_label(&config.reference_dir);
    for file in &generated {
        let comparison = verifier.compare(file, &references)?;
        report(logger, &comparison, &label);
        summary.push(comparison);
    }

    logger.info(SEPARATOR);
    for line in final_message(&summary, &label) {
        logger.info(&line);
    }
    logger.info(SEPARATOR);

    Ok(summary)
}

fn report<L: Logger>(logger: &L, comparison: &Comparison, label: &str) {
    let file = &comparison.file;
    match comparison.verdict {
        Verdict::Match => logger.info(&format!("{file}... OK")),
        Verdict::Mismatch => {
            logger.info(&format!("{file}... NOT OK"));
            if let Some(diff) = &comparison.diff {
                logger.verbose(&format!(
                    "{file}: first difference at byte {} (generated {} bytes, reference {} bytes)",
                    diff.first_diff_offset, diff.actual_len, diff.expected_len
                ));
            }
        }
        Verdict::MissingReference => {
            logger.info(&format!("{file}... NOT FOUND IN {label} FOLDER"))
        }
    }
}

/// Closing report lines for `summary`. `label` is the reference folder as
/// shown to the user.
pub fn final_message(summary: &VerificationSummary, label: &str) -> Vec<String> {
    if summary.all_identical() {
        return vec![format!(
            "Comparison finished : all files found in {label} folder are identical, nice job !"
        )];
    }
    vec![
        format!(
            "Comparison finished : you have {} different file(s).",
            summary.mismatched()
        ),
        "Don't panic ! Some differences are simply due to inaccuracies because of operations on double.".to_string(),
        "These differences are not penalizing.".to_string(),
    ]
}
