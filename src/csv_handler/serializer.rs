//! CSV serializer.
//!
//! Writes a header row built from the field names followed by one row per
//! record, using the delimiter and newline from [`CsvConfig`].

use super::config::{CsvConfig, SerializeOptions};
use super::quoting::{needs_quotes, quote};
use super::record::Record;

/// Serializes records to CSV text.
///
/// Columns follow `field_names` order. Each value (header names included) is
/// quoted when `options.always_quote` is set or when it contains the delimiter,
/// a double quote, or the newline sequence. Absent values are written as empty
/// strings. Rows are separated by `config.newline`, and one more newline is
/// appended only when `options.trailing_newline` is set.
///
/// # Example
///
/// ```
/// use csv_store::csv_handler::{parse, serialize, CsvConfig, SerializeOptions};
///
/// let config = CsvConfig::default();
/// let input = "name,motto\r\nAda,\"count, then \"\"compute\"\"\"";
/// let output = parse(input, &config);
///
/// let text = serialize(
///     &output.field_names,
///     &output.records,
///     &config,
///     &SerializeOptions::minimal(),
/// );
/// assert_eq!(text, input);
/// ```
pub fn serialize(
    field_names: &[String],
    records: &[Record],
    config: &CsvConfig,
    options: &SerializeOptions,
) -> String {
    let delimiter = config.delimiter;
    let mut output = String::new();

    write_row(
        &mut output,
        field_names.iter().map(String::as_str),
        delimiter,
        &config.newline,
        options.always_quote,
    );

    for record in records {
        output.push_str(&config.newline);
        write_row(
            &mut output,
            field_names
                .iter()
                .map(|name| record.get(name).unwrap_or_default()),
            delimiter,
            &config.newline,
            options.always_quote,
        );
    }

    if options.trailing_newline {
        output.push_str(&config.newline);
    }

    output
}

fn write_row<'v>(
    output: &mut String,
    values: impl Iterator<Item = &'v str>,
    delimiter: char,
    newline: &str,
    always_quote: bool,
) {
    for (index, value) in values.enumerate() {
        if index > 0 {
            output.push(delimiter);
        }
        if needs_quotes(value, delimiter, newline, always_quote) {
            output.push_str(&quote(value));
        } else {
            output.push_str(value);
        }
    }
}
