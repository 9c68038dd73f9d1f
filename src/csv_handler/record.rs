//! Parsed record type.
//!
//! Defines [`Record`], one data row keyed by the resolved field-name list.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Key under which an auto-generated identity is emitted when a record is
/// serialized with serde.
pub const AUTO_ID_KEY: &str = "__id";

/// A single parsed CSV row.
///
/// A record holds exactly one entry per field name, in column order. All
/// values are strings; no type inference is applied. A row that ended before
/// reaching the last field names keeps those names with an absent (`None`)
/// value, which is distinct from an empty string.
///
/// # Example
///
/// ```
/// use csv_store::csv_handler::Record;
///
/// let names = vec!["id".to_string(), "name".to_string(), "note".to_string()];
/// let record = Record::from_row(&names, vec!["1".to_string(), "Ada".to_string()]);
///
/// assert_eq!(record.get("name"), Some("Ada"));
/// assert_eq!(record.get("note"), None);
/// assert!(record.contains_field("note"));
/// assert_eq!(record.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Field name/value pairs in column order.
    fields: Vec<(String, Option<String>)>,
    /// 1-based sequential identity, set only when identities are auto-generated.
    auto_id: Option<u64>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zips `field_names` with `values`.
    ///
    /// Values beyond the last field name are dropped; field names beyond the
    /// last value are kept with an absent value. A repeated field name keeps
    /// its first position and takes the later value.
    pub fn from_row(field_names: &[String], values: Vec<String>) -> Self {
        let mut record = Record::new();
        let mut values = values.into_iter();
        for name in field_names {
            record.set(name, values.next());
        }
        record
    }

    /// Sets the value of `name`, appending the field if it is not present.
    pub fn set(&mut self, name: &str, value: Option<String>) {
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Returns the value of `name`, or `None` when the field is unknown or absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Returns true when `name` is one of this record's fields, even if its
    /// value is absent.
    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| field == name)
    }

    /// Field names in column order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(field, _)| field.as_str())
    }

    /// Field name/value pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_deref()))
    }

    /// Number of fields, including those with absent values.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The auto-generated identity, if one was assigned.
    pub fn auto_id(&self) -> Option<u64> {
        self.auto_id
    }

    pub(crate) fn set_auto_id(&mut self, id: u64) {
        self.auto_id = Some(id);
    }
}

impl Serialize for Record {
    /// Serializes as a map in column order; absent values become `null`.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = self.fields.len() + usize::from(self.auto_id.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        if let Some(id) = self.auto_id {
            map.serialize_entry(AUTO_ID_KEY, &id)?;
        }
        map.end()
    }
}
