//! CLI argument parsing module
//!
//! Handles command-line argument parsing using `clap` derive macros and turns
//! the parsed arguments into a [`CsvConfig`] and [`SerializeOptions`].
//!
//! Configuration is layered: defaults, then the optional `--config` JSON
//! file, then individual flags.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

use crate::csv_handler::{CsvConfig, SerializeOptions};
use crate::error::CsvStoreError;

/// Output format for converted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A JSON array of records
    Json,
    /// CSV text re-serialized from the parsed records
    Csv,
}

/// Newline sequence used to split input and join output rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NewlineArg {
    /// "\r\n"
    Crlf,
    /// "\n"
    Lf,
    /// "\r"
    Cr,
}

impl NewlineArg {
    pub fn as_str(self) -> &'static str {
        match self {
            NewlineArg::Crlf => "\r\n",
            NewlineArg::Lf => "\n",
            NewlineArg::Cr => "\r",
        }
    }
}

/// Command-line arguments for csv-store.
///
/// Use the `validate()` method after parsing to ensure argument combinations are valid.
///
/// # Example
///
/// ```rust,ignore
/// use clap::Parser;
/// use csv_store::cli::Args;
///
/// let args = Args::parse();
/// args.validate()?;
/// let config = args.to_config()?;
/// ```
#[derive(Parser, Debug)]
#[command(name = "csv-store")]
#[command(about = "Parse CSV files into records and serialize them back")]
#[command(version)]
pub struct Args {
    /// CSV file to read
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// JSON configuration file (delimiter, newline, trim, fieldNames, idProperty)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Field delimiter character
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Newline sequence: crlf, lf, or cr
    #[arg(long, value_enum)]
    pub newline: Option<NewlineArg>,

    /// Trim leading/trailing whitespace from unquoted values (true or false;
    /// overrides the configuration file)
    #[arg(long, action = ArgAction::Set)]
    pub trim: Option<bool>,

    /// Comma-separated field names; when omitted the first line is the header row
    #[arg(long, value_delimiter = ',')]
    pub field_names: Option<Vec<String>>,

    /// Field holding each record's identity (empty string = auto-generated ids)
    #[arg(long)]
    pub id_property: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Quote every value in CSV output (false = quote only where needed)
    #[arg(long, default_value = "true", action = ArgAction::Set)]
    pub always_quote: bool,

    /// Append a newline after the last CSV row
    #[arg(long, default_value = "false")]
    pub trailing_newline: bool,

    /// Write output to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Only report discarded rows; exit with code 3 if any were found
    #[arg(long, default_value = "false")]
    pub validate: bool,
}

impl Args {
    /// Validate argument combinations.
    ///
    /// - `--file` is required
    /// - `--validate` cannot be combined with `--output`
    /// - `--delimiter` cannot be a double quote
    pub fn validate(&self) -> Result<(), String> {
        if self.file.is_none() {
            return Err("--file is required".to_string());
        }

        if self.validate && self.output.is_some() {
            return Err("--validate cannot be used with --output".to_string());
        }

        if self.delimiter == Some('"') {
            return Err("--delimiter cannot be a double quote".to_string());
        }

        Ok(())
    }

    /// Builds the parser configuration from `--config` and the individual flags.
    ///
    /// Flags override values from the configuration file.
    pub fn to_config(&self) -> Result<CsvConfig, CsvStoreError> {
        let mut config = match &self.config {
            Some(path) => CsvConfig::from_json_file(path)?,
            None => CsvConfig::default(),
        };

        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(newline) = self.newline {
            config.newline = newline.as_str().to_string();
        }
        if let Some(trim) = self.trim {
            config.trim = trim;
        }
        if let Some(field_names) = &self.field_names {
            config.field_names = Some(field_names.clone());
        }
        if let Some(id_property) = &self.id_property {
            config.id_property = id_property.as_str().into();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            always_quote: self.always_quote,
            trailing_newline: self.trailing_newline,
        }
    }
}
