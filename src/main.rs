//! csv-store - Parse CSV files into records and serialize them back
//!
//! Reads a CSV file, loads its records, and writes them out as JSON or as
//! re-serialized CSV. `--validate` only reports rows that had to be discarded
//! because of malformed quoting.
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Configuration/argument error |
//! | 3 | File I/O error or validation failure |

use clap::Parser;
use std::fs;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use csv_store::cli::{Args, OutputFormat};
use csv_store::error::CsvStoreError;
use csv_store::store::{CsvStore, ParseReport};

/// Exit code for success
const EXIT_SUCCESS: u8 = 0;
/// Exit code for configuration/argument errors
const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for file I/O errors
const EXIT_IO_ERROR: u8 = 3;
/// Exit code for validation failure (same as IO error)
const EXIT_VALIDATION_FAILURE: u8 = 3;

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("Error: Configuration error: {}", e);
        eprintln!("  Hint: Use --help for usage information");
        return ExitCode::from(EXIT_CONFIG_ERROR);
    }

    match run(&args) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}

/// Logs go to stderr so they never mix with converted output on stdout.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: &Args) -> Result<(), CsvStoreError> {
    let file_path = args
        .file
        .as_ref()
        .ok_or_else(|| CsvStoreError::InvalidArgument("--file is required".to_string()))?;

    let config = args.to_config()?;
    let input = fs::read_to_string(file_path)?;

    let (store, report) = CsvStore::from_csv(&input, config)?;

    if args.validate {
        return report_validation(&report);
    }

    if !report.is_clean() {
        eprintln!(
            "Warning: {} rows discarded because of malformed quoting",
            report.discarded.len()
        );
    }

    let rendered = render(&store, args)?;
    match &args.output {
        Some(path) => fs::write(path, rendered)?,
        None => std::io::stdout().write_all(rendered.as_bytes())?,
    }

    Ok(())
}

fn report_validation(report: &ParseReport) -> Result<(), CsvStoreError> {
    println!("{}", report);

    if report.is_clean() {
        eprintln!("Validation complete. All {} records parsed.", report.records);
        Ok(())
    } else {
        Err(CsvStoreError::ValidationFailed(format!(
            "{} rows discarded",
            report.discarded.len()
        )))
    }
}

/// Renders the store in the requested output format.
fn render(store: &CsvStore, args: &Args) -> Result<String, CsvStoreError> {
    match args.format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(store.data())?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Csv => Ok(store.to_csv(&args.serialize_options())),
    }
}

/// Converts an error into the process exit code.
fn error_to_exit_code(error: &CsvStoreError) -> u8 {
    match error {
        CsvStoreError::InvalidArgument(_) => EXIT_CONFIG_ERROR,
        CsvStoreError::InvalidConfig(_) => EXIT_CONFIG_ERROR,
        CsvStoreError::ValidationFailed(_) => EXIT_VALIDATION_FAILURE,
        CsvStoreError::Io(_) => EXIT_IO_ERROR,
        CsvStoreError::Json(_) => EXIT_IO_ERROR,
    }
}
