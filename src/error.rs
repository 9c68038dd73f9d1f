//! Error module
//!
//! Defines the error type shared by the library and the `csv-store` binary.
//! Malformed quoting inside CSV input is deliberately absent from this enum:
//! the parser recovers from it by dropping the row and reporting a
//! [`DiscardedRow`](crate::csv_handler::DiscardedRow) instead.

use thiserror::Error;

/// The main error type for csv-store.
///
/// # Error Categories
///
/// - **File I/O errors**: reading CSV input or configuration files, writing output
/// - **Configuration errors**: invalid delimiter/newline combinations or CLI arguments
/// - **Validation failures**: `--validate` found rows that had to be discarded
///
/// # Example
///
/// ```rust,ignore
/// use csv_store::error::CsvStoreError;
///
/// fn example() -> Result<(), CsvStoreError> {
///     let text = std::fs::read_to_string("people.csv")?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum CsvStoreError {
    /// General I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error, raised while loading a configuration document or
    /// writing records as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The delimiter/newline configuration cannot be used to tokenize input.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid command-line argument error.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// CSV validation failure error.
    ///
    /// The validation report has already been printed; this error signals
    /// that the process should exit with code 3.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}
