//! Record store module
//!
//! Holds parsed records in memory, indexed by identity.
//!
//! # Overview
//!
//! - [`RecordStore`]: the bulk-load/lookup interface parsed records are fed into
//! - [`MemoryStore`]: an identity-indexed in-memory implementation
//! - [`CsvStore`]: a [`MemoryStore`] populated from CSV text and able to
//!   export its contents back to CSV
//!
//! # Example
//!
//! ```
//! use csv_store::csv_handler::{CsvConfig, SerializeOptions};
//! use csv_store::store::CsvStore;
//!
//! let mut store = CsvStore::new(CsvConfig::default()).unwrap();
//! let report = store.set_data("id,name\r\n7,Ada\r\n9,Grace");
//!
//! assert!(report.is_clean());
//! assert_eq!(store.get("9").and_then(|r| r.get("name")), Some("Grace"));
//! assert_eq!(
//!     store.to_csv(&SerializeOptions::minimal()),
//!     "id,name\r\n7,Ada\r\n9,Grace"
//! );
//! ```

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::csv_handler::{
    parse, serialize, CsvConfig, DiscardedRow, IdProperty, Record, SerializeOptions,
};
use crate::error::CsvStoreError;

/// Bulk-load and lookup interface for records.
pub trait RecordStore {
    /// Replaces the store's contents with `records`, keeping their order.
    fn load(&mut self, records: Vec<Record>);

    /// Looks up a record by identity.
    fn get(&self, id: &str) -> Option<&Record>;
}

/// In-memory record store indexed by identity.
///
/// A record's identity is its auto-generated id under [`IdProperty::Auto`],
/// or the value of the configured id field otherwise. Records without an
/// identity are kept in [`data`](MemoryStore::data) but cannot be looked up.
/// When two records share an identity, the later one wins the lookup.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    id_property: IdProperty,
    data: Vec<Record>,
    index: HashMap<String, usize>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new(id_property: IdProperty) -> Self {
        Self {
            id_property,
            data: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the identity of `record` under this store's id property.
    pub fn get_identity(&self, record: &Record) -> Option<String> {
        match &self.id_property {
            IdProperty::Auto => record.auto_id().map(|id| id.to_string()),
            IdProperty::Field(name) => record.get(name).map(str::to_string),
        }
    }

    /// All records in load order.
    pub fn data(&self) -> &[Record] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn id_property(&self) -> &IdProperty {
        &self.id_property
    }
}

impl RecordStore for MemoryStore {
    fn load(&mut self, records: Vec<Record>) {
        self.index.clear();
        for (position, record) in records.iter().enumerate() {
            match self.get_identity(record) {
                Some(id) => {
                    self.index.insert(id, position);
                }
                None => debug!("Record at position {} has no identity; not indexed", position),
            }
        }
        self.data = records;
        debug!(
            "Loaded {} records ({} indexed)",
            self.data.len(),
            self.index.len()
        );
    }

    fn get(&self, id: &str) -> Option<&Record> {
        self.index.get(id).map(|&position| &self.data[position])
    }
}

/// Outcome of loading CSV text into a [`CsvStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Number of records loaded into the store.
    pub records: usize,
    /// Rows dropped because of malformed quoting.
    pub discarded: Vec<DiscardedRow>,
}

impl ParseReport {
    /// Returns true when no row was discarded.
    pub fn is_clean(&self) -> bool {
        self.discarded.is_empty()
    }
}

impl fmt::Display for ParseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CSV Parse Report")?;
        writeln!(f, "================")?;
        writeln!(
            f,
            "Status: {}",
            if self.is_clean() { "PASSED" } else { "FAILED" }
        )?;
        writeln!(f)?;
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Records loaded:    {:>10}", self.records)?;
        writeln!(f, "  Rows discarded:    {:>10}", self.discarded.len())?;

        if !self.discarded.is_empty() {
            writeln!(f)?;
            writeln!(f, "Discarded rows:")?;
            for row in &self.discarded {
                writeln!(f, "  {}", row)?;
            }
        }

        Ok(())
    }
}

/// A [`MemoryStore`] backed by CSV text.
///
/// The field names resolved by the first [`set_data`](CsvStore::set_data)
/// call (configured, or read from the header row) stay fixed for the
/// lifetime of the store, so a later call treats every non-blank line as data.
#[derive(Debug, Clone)]
pub struct CsvStore {
    config: CsvConfig,
    store: MemoryStore,
}

impl CsvStore {
    /// Creates an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`CsvStoreError::InvalidConfig`] when `config` fails
    /// [`CsvConfig::validate`].
    pub fn new(config: CsvConfig) -> Result<Self, CsvStoreError> {
        config.validate()?;
        let store = MemoryStore::new(config.id_property.clone());
        Ok(Self { config, store })
    }

    /// Creates a store and populates it from `input`.
    pub fn from_csv(input: &str, config: CsvConfig) -> Result<(Self, ParseReport), CsvStoreError> {
        let mut store = Self::new(config)?;
        let report = store.set_data(input);
        Ok((store, report))
    }

    /// Replaces the store's contents with the records parsed from `input`.
    pub fn set_data(&mut self, input: &str) -> ParseReport {
        let output = parse(input, &self.config);

        if self.config.field_names.is_none() && !output.field_names.is_empty() {
            self.config.field_names = Some(output.field_names);
        }

        let report = ParseReport {
            records: output.records.len(),
            discarded: output.discarded,
        };
        self.store.load(output.records);
        report
    }

    /// Exports the store's contents as CSV text.
    pub fn to_csv(&self, options: &SerializeOptions) -> String {
        serialize(self.field_names(), self.store.data(), &self.config, options)
    }

    /// The resolved field names, empty until a header row has been read.
    pub fn field_names(&self) -> &[String] {
        self.config.field_names.as_deref().unwrap_or(&[])
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// All records in source order.
    pub fn data(&self) -> &[Record] {
        self.store.data()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
