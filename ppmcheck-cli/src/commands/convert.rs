//! Convert command orchestration.
//!
//! Runs the painter once per PAINT file, in filename order, and moves each
//! produced PPM into the generated directory.

use std::path::{Path, PathBuf};

use ppmcheck_fs::{discover, replace_extension, Filesystem};
use serde::Serialize;

use crate::cli::{PAINT_EXTENSION, PPM_EXTENSION};
use crate::logger::Logger;
use crate::painter::{PaintedArtifact, Painter};

use super::{require_dir, CommandResult, HarnessConfig, SEPARATOR};

/// A PAINT file turned into a PPM file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Converted {
    pub input: String,
    pub output: PathBuf,
}

/// A PAINT file the painter failed on (`--keep-going` only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedConversion {
    pub input: String,
    pub reason: String,
}

/// Result of convert command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    /// PAINT files found in the input directory.
    pub discovered: usize,
    /// PAINT files skipped because they did not match `--filter`.
    pub filtered_out: usize,
    pub converted: Vec<Converted>,
    pub failed: Vec<FailedConversion>,
}

/// Execute the convert command.
///
/// A painter failure stops the command unless `config.keep_going` is set.
pub fn execute_convert<F, P, L>(
    config: &HarnessConfig,
    fs: &F,
    painter: &P,
    logger: &L,
) -> CommandResult<ConversionSummary>
where
    F: Filesystem,
    P: Painter,
    L: Logger,
{
    logger.info(SEPARATOR);
    logger.info("Searching for PAINT files");

    require_dir(fs, &config.paint_dir)?;
    let discovered = discover(fs, &config.paint_dir, PAINT_EXTENSION)?;

    let mut summary = ConversionSummary {
        discovered: discovered.len(),
        ..ConversionSummary::default()
    };

    let inputs: Vec<String> = match &config.filter {
        Some(pattern) => discovered
            .into_iter()
            .filter(|name| pattern.matches(name))
            .collect(),
        None => discovered,
    };
    summary.filtered_out = summary.discovered - inputs.len();

    if summary.filtered_out > 0 {
        logger.verbose(&format!(
            "{} PAINT file(s) skipped by filter",
            summary.filtered_out
        ));
    }

    if inputs.is_empty() {
        logger.info("No PAINT file found");
        logger.info(SEPARATOR);
        return Ok(summary);
    }

    logger.info(&format!("{} PAINT file(s) found", inputs.len()));
    logger.info(&format!(
        "All PAINT files will be converted to PPM files with your 'painter' program (OS : {})",
        std::env::consts::OS
    ));
    logger.info(SEPARATOR);

    fs.create_dir_all(&config.generated_dir)?;

    for name in inputs {
        let input = config.paint_dir.join(&name);
        logger.verbose(&format!(
            "running {} {}",
            painter.executable().display(),
            input.display()
        ));

        // The input name is on screen while the painter runs.
        logger.info_start(&format!("Creating PPM file from {name}... "));

        match convert_one(config, fs, painter, &input, &name) {
            Ok((output, artifact)) => {
                logger.info("DONE");
                if let Some(code) = artifact.exit_code.filter(|code| *code != 0) {
                    logger.verbose(&format!("painter exited with code {code} on {name}"));
                }
                logger.debug(&format!(
                    "painter wrote {} byte(s) to stdout for {name}",
                    artifact.stdout_bytes
                ));
                summary.converted.push(Converted {
                    input: name,
                    output,
                });
            }
            Err(err) => {
                logger.info(&format!("FAILED: {err}"));
                if !config.keep_going {
                    return Err(err);
                }
                summary.failed.push(FailedConversion {
                    input: name,
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(summary)
}

/// Paint one input and move the result into the generated directory.
fn convert_one<F, P>(
    config: &HarnessConfig,
    fs: &F,
    painter: &P,
    input: &Path,
    name: &str,
) -> CommandResult<(PathBuf, PaintedArtifact)>
where
    F: Filesystem,
    P: Painter,
{
    let artifact = painter.paint(input)?;

    let output = config
        .generated_dir
        .join(replace_extension(name, PPM_EXTENSION));
    fs.rename(&artifact.path, &output)?;

    Ok((output, artifact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandError;
    use crate::logger::{MockLogger, Verbosity};
    use crate::painter::{MockPainter, PainterError};
    use glob::Pattern;
    use ppmcheck_fs::MockFilesystem;
    use std::sync::{Arc, RwLock};

    // ===========================================
    // Conversion
    // ===========================================

    fn fixture() -> (MockFilesystem, MockPainter) {
        let fs = MockFilesystem::new();
        fs.add_file("ref_paint/b.paint", "square");
        fs.add_file("ref_paint/a.paint", "circle");
        fs.add_file("ref_paint/notes.txt", "ignored");
        let painter = MockPainter::new(fs.clone())
            .with_output("a.paint", "P3 circle\n")
            .with_output("b.paint", "P3 square\n");
        (fs, painter)
    }

    #[test]
    fn test_convert_all_inputs_in_order() {
        let (fs, painter) = fixture();
        let logger = MockLogger::new();

        let summary =
            execute_convert(&HarnessConfig::default(), &fs, &painter, &logger).expect("convert");

        assert_eq!(summary.discovered, 2);
        assert_eq!(
            painter.calls(),
            vec![
                PathBuf::from("ref_paint/a.paint"),
                PathBuf::from("ref_paint/b.paint")
            ]
        );
        assert_eq!(
            summary.converted,
            vec![
                Converted {
                    input: "a.paint".to_string(),
                    output: PathBuf::from("my_ppm/a.ppm"),
                },
                Converted {
                    input: "b.paint".to_string(),
                    output: PathBuf::from("my_ppm/b.ppm"),
                },
            ]
        );
        assert!(summary.failed.is_empty());
    }

    #[test]
    fn test_convert_moves_artifacts() {
        let (fs, painter) = fixture();

        execute_convert(&HarnessConfig::default(), &fs, &painter, &MockLogger::new())
            .expect("convert");

        assert!(!fs.exists(Path::new("ref_paint/a.ppm")));
        assert!(!fs.exists(Path::new("ref_paint/b.ppm")));
        assert_eq!(
            fs.get_file(Path::new("my_ppm/a.ppm")),
            Some(b"P3 circle\n".to_vec())
        );
        // Inputs are left alone.
        assert_eq!(
            fs.get_file(Path::new("ref_paint/a.paint")),
            Some(b"circle".to_vec())
        );
    }

    #[test]
    fn test_convert_console_output() {
        let (fs, painter) = fixture();
        let logger = MockLogger::new();

        execute_convert(&HarnessConfig::default(), &fs, &painter, &logger).expect("convert");

        let lines = logger.lines();
        assert_eq!(lines[0], SEPARATOR);
        assert_eq!(lines[1], "Searching for PAINT files");
        assert_eq!(lines[2], "2 PAINT file(s) found");
        assert!(lines[3].starts_with("All PAINT files will be converted"));
        assert!(lines[3].contains(std::env::consts::OS));
        assert_eq!(lines[4], SEPARATOR);
        assert_eq!(lines[5], "Creating PPM file from a.paint... DONE");
        assert_eq!(lines[6], "Creating PPM file from b.paint... DONE");
    }

    #[test]
    fn test_convert_logs_invocation_when_verbose() {
        let (fs, painter) = fixture();
        let painter = painter.with_exit_code("b.paint", 3);
        let logger = MockLogger::new();

        execute_convert(&HarnessConfig::default(), &fs, &painter, &logger).expect("convert");

        let verbose = logger.visible_at(Verbosity::Verbose);
        assert!(verbose.contains(&"running mock-painter ref_paint/a.paint".to_string()));
        assert!(verbose.contains(&"painter exited with code 3 on b.paint".to_string()));
        assert!(!logger.lines().iter().any(|l| l.starts_with("running")));
    }

    #[test]
    fn test_convert_creates_generated_dir() {
        let (fs, painter) = fixture();
        assert!(!fs.is_dir(Path::new("my_ppm")));

        execute_convert(&HarnessConfig::default(), &fs, &painter, &MockLogger::new())
            .expect("convert");

        assert!(fs.is_dir(Path::new("my_ppm")));
    }

    // ===========================================
    // Empty input
    // ===========================================

    #[test]
    fn test_convert_no_paint_files() {
        let fs = MockFilesystem::new();
        fs.add_dir("ref_paint");
        let painter = MockPainter::new(fs.clone());
        let logger = MockLogger::new();

        let summary =
            execute_convert(&HarnessConfig::default(), &fs, &painter, &logger).expect("convert");

        assert_eq!(summary, ConversionSummary::default());
        assert!(painter.calls().is_empty());
        assert!(logger.lines().contains(&"No PAINT file found".to_string()));
    }

    #[test]
    fn test_convert_missing_paint_dir() {
        let fs = MockFilesystem::new();
        let painter = MockPainter::new(fs.clone());

        let err = execute_convert(&HarnessConfig::default(), &fs, &painter, &MockLogger::new())
            .unwrap_err();
        assert!(matches!(err, CommandError::DirectoryNotFound(p) if p == Path::new("ref_paint")));
    }

    // ===========================================
    // Filter
    // ===========================================

    #[test]
    fn test_convert_filter() {
        let (fs, painter) = fixture();
        let config = HarnessConfig::default().with_filter(Pattern::new("b*").expect("pattern"));
        let logger = MockLogger::new();

        let summary = execute_convert(&config, &fs, &painter, &logger).expect("convert");

        assert_eq!(summary.discovered, 2);
        assert_eq!(summary.filtered_out, 1);
        assert_eq!(painter.calls(), vec![PathBuf::from("ref_paint/b.paint")]);
        assert!(logger.contains("1 PAINT file(s) skipped by filter"));
    }

    #[test]
    fn test_convert_filter_excludes_everything() {
        let (fs, painter) = fixture();
        let config = HarnessConfig::default().with_filter(Pattern::new("z*").expect("pattern"));
        let logger = MockLogger::new();

        let summary = execute_convert(&config, &fs, &painter, &logger).expect("convert");

        assert!(summary.converted.is_empty());
        assert!(painter.calls().is_empty());
        assert!(logger.contains("No PAINT file found"));
    }

    // ===========================================
    // Painter failures
    // ===========================================

    fn failing_fixture() -> (MockFilesystem, MockPainter) {
        let fs = MockFilesystem::new();
        fs.add_file("ref_paint/a.paint", "ok");
        fs.add_file("ref_paint/b.paint", "broken");
        fs.add_file("ref_paint/c.paint", "ok");
        let painter = MockPainter::new(fs.clone())
            .with_output("a.paint", "P3 a\n")
            .with_output("c.paint", "P3 c\n");
        (fs, painter)
    }

    #[test]
    fn test_convert_failure_stops_by_default() {
        let (fs, painter) = failing_fixture();

        let err = execute_convert(&HarnessConfig::default(), &fs, &painter, &MockLogger::new())
            .unwrap_err();

        assert!(matches!(
            err,
            CommandError::Painter(PainterError::MissingArtifact { .. })
        ));
        // c.paint is never reached.
        assert_eq!(painter.calls().len(), 2);
        assert!(fs.exists(Path::new("my_ppm/a.ppm")));
        assert!(!fs.exists(Path::new("my_ppm/c.ppm")));
    }

    #[test]
    fn test_convert_keep_going_records_failure() {
        let (fs, painter) = failing_fixture();
        let config = HarnessConfig::default().with_keep_going(true);
        let logger = MockLogger::new();

        let summary = execute_convert(&config, &fs, &painter, &logger).expect("convert");

        assert_eq!(summary.converted.len(), 2);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].input, "b.paint");
        assert!(summary.failed[0].reason.contains("ref_paint/b.ppm"));
        assert!(logger
            .lines()
            .iter()
            .any(|l| l.starts_with("Creating PPM file from b.paint... FAILED")));
        assert!(fs.exists(Path::new("my_ppm/c.ppm")));
    }

    #[test]
    fn test_convert_failure_names_input() {
        let (fs, painter) = failing_fixture();
        let logger = MockLogger::new();

        execute_convert(&HarnessConfig::default(), &fs, &painter, &logger).unwrap_err();

        let lines = logger.lines();
        let last = lines.last().expect("status line");
        assert!(last.starts_with("Creating PPM file from b.paint... FAILED: painter produced no"));
    }

    #[test]
    fn test_convert_leftover_artifact_is_not_success() {
        let (fs, painter) = failing_fixture();
        fs.add_file("ref_paint/b.ppm", "STALE");

        let err = execute_convert(&HarnessConfig::default(), &fs, &painter, &MockLogger::new())
            .unwrap_err();

        assert!(matches!(
            err,
            CommandError::Painter(PainterError::MissingArtifact { .. })
        ));
        assert!(!fs.exists(Path::new("my_ppm/b.ppm")));
    }

    /// Painter that records which line was started when it ran.
    struct ObservedPainter {
        inner: MockPainter,
        logger: MockLogger,
        started: Arc<RwLock<Vec<String>>>,
    }

    impl Painter for ObservedPainter {
        fn executable(&self) -> &Path {
            self.inner.executable()
        }

        fn paint(&self, input: &Path) -> Result<PaintedArtifact, PainterError> {
            self.started.write().unwrap().push(self.logger.pending());
            self.inner.paint(input)
        }
    }

    #[test]
    fn test_convert_names_input_before_painting() {
        let (fs, inner) = fixture();
        let logger = MockLogger::new();
        let painter = ObservedPainter {
            inner,
            logger: logger.clone(),
            started: Arc::default(),
        };

        execute_convert(&HarnessConfig::default(), &fs, &painter, &logger).expect("convert");

        assert_eq!(
            *painter.started.read().unwrap(),
            vec![
                "Creating PPM file from a.paint... ".to_string(),
                "Creating PPM file from b.paint... ".to_string(),
            ]
        );
    }
}
