//! ppm-check binary.
//!
//! Entry point for the `ppm-check` command-line tool.

use std::process::ExitCode;

use clap::Parser;
use ppmcheck_cli::exit::{codes, exit_code, summary_exit_code};
use ppmcheck_cli::{
    execute_command, Cli, CommandError, ConsoleLogger, OutputFormat, ProcessPainter, Verbosity,
};
use ppmcheck_fs::RealFilesystem;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(codes::INVALID_ARGS)
            } else {
                // --help / --version
                ExitCode::from(codes::SUCCESS)
            };
        }
    };

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Run the selected command and return the exit code of a completed run.
fn run(cli: &Cli) -> Result<u8, CommandError> {
    let options = &cli.options;
    let config = options.to_config()?;
    let verbosity = Verbosity::from_count(options.verbose);

    // JSON mode keeps stdout for the summary document.
    let logger = match options.output {
        OutputFormat::Text => ConsoleLogger::stdout(verbosity),
        OutputFormat::Json => ConsoleLogger::stderr(verbosity),
    };

    let fs = RealFilesystem;
    let painter = ProcessPainter::new(options.painter_config(), &fs);

    let summary = execute_command(cli.effective_command(), &config, &fs, &painter, &logger)?;

    if options.output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(summary_exit_code(&summary, options.strict))
}
