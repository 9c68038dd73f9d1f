//! CSV parser.
//!
//! Converts CSV text into [`Record`]s with a single forward pass. The input is
//! split into physical lines on the configured newline and each line into
//! parts on the configured delimiter. A quoted value may contain both, so the
//! parser carries a small amount of state across parts and lines:
//!
//! - `value`: the field currently being assembled
//! - `prefix`: a delimiter or newline to re-insert before the next part, because
//!   the split that removed it happened inside a quoted value
//! - `quote_count`: quote characters seen in the current field
//!
//! A field closes once its quote count is even. A row closes at the end of a
//! physical line with no field left open.
//!
//! # Malformed rows
//!
//! A closed field containing quotes that do not form one clean `"..."` wrapper
//! (e.g. `ab"c"`) invalidates its whole row. The row is dropped, a warning is
//! logged, and parsing resumes with the next physical line. Dropped rows are
//! reported in [`ParseOutput::discarded`]; they are never an error.

use std::fmt;
use std::mem;

use tracing::{trace, warn};

use super::config::{CsvConfig, IdProperty};
use super::quoting::{count_quotes, unwrap_quoted};
use super::record::Record;

/// A row dropped because of malformed quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardedRow {
    /// 1-based physical line number on which the row started.
    pub line: usize,
    /// The field text that failed to parse.
    pub value: String,
}

impl fmt::Display for DiscardedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: invalid value {:?}", self.line, self.value)
    }
}

/// Result of parsing one CSV document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutput {
    /// Data records in source order (the header row is not included).
    pub records: Vec<Record>,
    /// The resolved field names, either configured or read from the header row.
    pub field_names: Vec<String>,
    /// Rows dropped because of malformed quoting, in source order.
    pub discarded: Vec<DiscardedRow>,
}

impl ParseOutput {
    /// Returns true when no row was discarded.
    pub fn is_clean(&self) -> bool {
        self.discarded.is_empty()
    }
}

/// What happened to the current row after one physical line was scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOutcome {
    /// Blank line outside any quoted value.
    Skipped,
    /// The row ended on this line and was emitted (as header or record).
    Completed,
    /// A quoted value is still open; the row continues on the next line.
    Continued,
    /// The row contained an invalid value and was dropped.
    Discarded,
}

/// Scanner state threaded through the line loop.
struct ParserState<'a> {
    config: &'a CsvConfig,
    delimiter: String,
    value: String,
    prefix: String,
    quote_count: usize,
    values: Vec<String>,
    row_start: usize,
    field_names: Option<Vec<String>>,
    records: Vec<Record>,
    discarded: Vec<DiscardedRow>,
}

impl<'a> ParserState<'a> {
    fn new(config: &'a CsvConfig) -> Self {
        Self {
            config,
            delimiter: config.delimiter.to_string(),
            value: String::new(),
            prefix: String::new(),
            quote_count: 0,
            values: Vec::new(),
            row_start: 0,
            field_names: config.field_names.clone(),
            records: Vec::new(),
            discarded: Vec::new(),
        }
    }

    fn in_quoted_value(&self) -> bool {
        self.quote_count != 0
    }

    /// Scans one physical line.
    fn parse_line(&mut self, line_number: usize, line: &str) -> LineOutcome {
        if !self.in_quoted_value() {
            if line.trim().is_empty() {
                return LineOutcome::Skipped;
            }
            self.row_start = line_number;
        }

        for part in line.split(self.config.delimiter) {
            self.value.push_str(&self.prefix);
            self.value.push_str(part);
            self.prefix.clear();
            self.quote_count += count_quotes(part);

            if self.quote_count % 2 == 1 {
                // The delimiter that ended this part was inside quotes
                self.prefix.clone_from(&self.delimiter);
                continue;
            }

            if self.quote_count == 0 {
                let value = mem::take(&mut self.value);
                let value = if self.config.trim || self.field_names.is_none() {
                    value.trim().to_string()
                } else {
                    value
                };
                self.values.push(value);
            } else {
                match unwrap_quoted(&self.value) {
                    Some(unquoted) => self.values.push(unquoted),
                    None => return self.discard_row(),
                }
            }
            self.value.clear();
            self.quote_count = 0;
        }

        if self.in_quoted_value() {
            self.prefix.clone_from(&self.config.newline);
            return LineOutcome::Continued;
        }

        self.complete_row();
        LineOutcome::Completed
    }

    /// Emits the assembled values as the header row or as a record.
    fn complete_row(&mut self) {
        let values = mem::take(&mut self.values);
        let Some(field_names) = self.field_names.as_deref() else {
            self.field_names = Some(values);
            return;
        };

        let mut record = Record::from_row(field_names, values);
        if self.config.id_property == IdProperty::Auto {
            record.set_auto_id(self.records.len() as u64 + 1);
        }
        self.records.push(record);
    }

    /// Drops the current row and resets all row-scoped state.
    fn discard_row(&mut self) -> LineOutcome {
        let row = DiscardedRow {
            line: self.row_start,
            value: mem::take(&mut self.value),
        };
        warn!("Csv: discarding row with invalid value ({})", row);
        self.discarded.push(row);
        self.values.clear();
        self.prefix.clear();
        self.quote_count = 0;
        LineOutcome::Discarded
    }

    fn finish(mut self) -> ParseOutput {
        if self.in_quoted_value() {
            let row = DiscardedRow {
                line: self.row_start,
                value: mem::take(&mut self.value),
            };
            warn!("Csv: discarding row with unterminated quoted value ({})", row);
            self.discarded.push(row);
        }

        ParseOutput {
            records: self.records,
            field_names: self.field_names.unwrap_or_default(),
            discarded: self.discarded,
        }
    }
}

/// Parses CSV text into records.
///
/// When `config.field_names` is `None` the first non-blank line is read as
/// the header row; its values are trimmed regardless of `config.trim`. With
/// [`IdProperty::Auto`] every record receives a 1-based sequential identity,
/// counted from the first data row. A leading byte order mark is ignored.
///
/// # Example
///
/// ```
/// use csv_store::csv_handler::{parse, CsvConfig};
///
/// let output = parse("a,b\r\n1,2\r\n3,4\r\n", &CsvConfig::default());
///
/// assert_eq!(output.field_names, vec!["a", "b"]);
/// assert_eq!(output.records.len(), 2);
/// assert_eq!(output.records[1].get("b"), Some("4"));
/// ```
pub fn parse(input: &str, config: &CsvConfig) -> ParseOutput {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut state = ParserState::new(config);

    for (index, line) in input.split(config.newline.as_str()).enumerate() {
        let outcome = state.parse_line(index + 1, line);
        trace!(line = index + 1, ?outcome, "scanned line");
    }

    state.finish()
}
