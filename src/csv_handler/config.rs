//! Parser and serializer configuration.
//!
//! A [`CsvConfig`] is shared by [`parse`](super::parse) and
//! [`serialize`](super::serialize) and is never mutated by either of them.
//! It can be built in code or loaded from a JSON document:
//!
//! ```json
//! {
//!     "delimiter": ";",
//!     "newline": "\n",
//!     "trim": true,
//!     "fieldNames": ["id", "name"],
//!     "idProperty": ""
//! }
//! ```
//!
//! Every key is optional; missing keys take the defaults of
//! [`CsvConfig::default`].

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::CsvStoreError;

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// Default newline sequence (CRLF, as in RFC 4180).
pub const DEFAULT_NEWLINE: &str = "\r\n";

/// Default name of the field holding a record's identity.
pub const DEFAULT_ID_PROPERTY: &str = "id";

/// Where a record's identity comes from when it is loaded into a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdProperty {
    /// The identity is the value of the named field.
    Field(String),
    /// Identities are generated as 1-based integers in record order.
    Auto,
}

impl Default for IdProperty {
    fn default() -> Self {
        IdProperty::Field(DEFAULT_ID_PROPERTY.to_string())
    }
}

impl From<String> for IdProperty {
    /// An empty name selects auto-generated identities.
    fn from(name: String) -> Self {
        if name.is_empty() {
            IdProperty::Auto
        } else {
            IdProperty::Field(name)
        }
    }
}

impl From<&str> for IdProperty {
    fn from(name: &str) -> Self {
        IdProperty::from(name.to_string())
    }
}

impl From<IdProperty> for String {
    fn from(id: IdProperty) -> Self {
        match id {
            IdProperty::Field(name) => name,
            IdProperty::Auto => String::new(),
        }
    }
}

/// Shared configuration for parsing and serializing CSV text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CsvConfig {
    /// Delimiter between fields.
    pub delimiter: char,
    /// Character sequence treated as a line break.
    pub newline: String,
    /// Strip leading/trailing whitespace from unquoted values.
    ///
    /// Header-row values are always trimmed, whatever this is set to.
    pub trim: bool,
    /// Field names in column order. When `None`, the first non-blank line
    /// of the input is read as a header row.
    pub field_names: Option<Vec<String>>,
    /// Source of each record's identity.
    pub id_property: IdProperty,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            newline: DEFAULT_NEWLINE.to_string(),
            trim: false,
            field_names: None,
            id_property: IdProperty::default(),
        }
    }
}

impl CsvConfig {
    /// Creates a configuration with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_field_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_id_property(mut self, id_property: impl Into<IdProperty>) -> Self {
        self.id_property = id_property.into();
        self
    }

    /// Checks that the delimiter and newline can tokenize input unambiguously.
    ///
    /// # Errors
    ///
    /// Returns [`CsvStoreError::InvalidConfig`] when the newline is empty, the
    /// delimiter is a double quote, or the delimiter occurs in the newline.
    pub fn validate(&self) -> Result<(), CsvStoreError> {
        if self.newline.is_empty() {
            return Err(CsvStoreError::InvalidConfig(
                "newline must not be empty".to_string(),
            ));
        }
        if self.delimiter == '"' {
            return Err(CsvStoreError::InvalidConfig(
                "delimiter must not be a double quote".to_string(),
            ));
        }
        if self.newline.contains(self.delimiter) {
            return Err(CsvStoreError::InvalidConfig(format!(
                "delimiter {:?} must not occur in newline {:?}",
                self.delimiter, self.newline
            )));
        }
        Ok(())
    }

    /// Parses a configuration from a JSON string and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, CsvStoreError> {
        let config: CsvConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file and validates it.
    pub fn from_json_file(path: &Path) -> Result<Self, CsvStoreError> {
        let reader = BufReader::new(File::open(path)?);
        let config: CsvConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

/// Options affecting [`serialize`](super::serialize) output only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SerializeOptions {
    /// Quote every value. When false, values are quoted only if they contain
    /// the delimiter or a double quote.
    pub always_quote: bool,
    /// Append one newline sequence after the last row.
    pub trailing_newline: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            always_quote: true,
            trailing_newline: false,
        }
    }
}

impl SerializeOptions {
    /// Options that quote only where needed; the form that round-trips
    /// through [`parse`](super::parse) byte for byte.
    pub fn minimal() -> Self {
        Self {
            always_quote: false,
            trailing_newline: false,
        }
    }
}
