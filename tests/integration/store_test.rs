//! Integration tests for loading CSV fixtures into a CsvStore
//!
//! The fixtures under tests/data contain deliberate inconsistencies (extra
//! whitespace, blank values, blank lines, multi-line quoted values) to check
//! how the parser responds to CSV found in the wild.

use std::fs;
use std::path::PathBuf;

use csv_store::csv_handler::{CsvConfig, SerializeOptions};
use csv_store::store::CsvStore;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {}", path, e))
}

fn load(name: &str, config: CsvConfig) -> CsvStore {
    let (store, report) = CsvStore::from_csv(&fixture(name), config).expect("valid config");
    assert!(report.is_clean(), "unexpected discarded rows: {}", report);
    store
}

fn field<'a>(store: &'a CsvStore, id: &str, name: &str) -> Option<&'a str> {
    store.get(id).and_then(|record| record.get(name))
}

fn noquote_field_names() -> CsvConfig {
    CsvConfig::default().with_field_names(["id", "last", "first", "born", "died"])
}

#[test]
fn test_data_without_quotes_header_vs_field_names() {
    let no_header = load("noquote.csv", noquote_field_names());
    let with_header = load("noquote.csv", CsvConfig::default());

    assert_eq!(no_header.len(), 4, "configured field names make line 1 a record");
    assert_eq!(with_header.len(), 3, "header row is not a record");
    assert!(no_header.get("id").is_some());
    assert!(
        field(&with_header, "1", "first").is_some(),
        "field names from the header row are trimmed"
    );
    assert_eq!(
        field(&no_header, "1", "last"),
        field(&with_header, "1", "last")
    );
    assert_eq!(
        with_header.field_names(),
        &["id", "last", "first", "middle", "born", "died"]
    );
}

#[test]
fn test_data_without_quotes_trim() {
    let untrimmed = load("noquote.csv", CsvConfig::default());
    let trimmed = load("noquote.csv", CsvConfig::default().with_trim(true));

    assert_eq!(field(&untrimmed, "2", "first"), Some(" Nikola "));
    assert_eq!(field(&trimmed, "2", "first"), Some("Nikola"));
    assert_eq!(field(&untrimmed, "2", "middle"), Some(" "));
    assert_eq!(field(&trimmed, "2", "middle"), Some(""));
}

#[test]
fn test_data_without_quotes_integrity() {
    let store = load("noquote.csv", CsvConfig::default());

    assert_eq!(field(&store, "1", "middle"), Some(""), "blank value");
    assert_eq!(field(&store, "1", "born"), Some("1879-03-14"), "value after blank value");
    assert_eq!(field(&store, "3", "died"), Some(""), "blank value at end of line");
}

#[test]
fn test_data_with_quotes_header_vs_field_names() {
    let no_header = load(
        "quote.csv",
        CsvConfig::default().with_field_names(["id", "name", "quote"]),
    );
    let with_header = load("quote.csv", CsvConfig::default());

    assert_eq!(no_header.len(), 5);
    assert_eq!(with_header.len(), 4);
    assert!(no_header.get("id").is_some());
    assert_eq!(
        field(&no_header, "1", "name"),
        field(&with_header, "1", "name")
    );
}

#[test]
fn test_data_with_quotes_integrity() {
    let store = load("quote.csv", CsvConfig::default());

    assert_eq!(
        field(&store, "3", "quote"),
        Some("\"\""),
        "value consisting of two double quotes"
    );
    assert_eq!(
        field(&store, "4", "quote"),
        Some(" S, P, ...ace! "),
        "whitespace inside quotes is preserved"
    );

    let multiline = field(&store, "2", "quote").unwrap();
    assert!(multiline.starts_with("Then"));
    assert!(multiline.ends_with("\"Nevermore.\""));
    assert!(
        multiline.contains("smiling,\r\n"),
        "multi-line value keeps the input newline sequence"
    );
    assert!(
        multiline.contains("craven,\r\n\r\nQuoth"),
        "blank line inside a quoted value is kept"
    );
}

#[test]
fn test_auto_incrementing_ids() {
    let no_header = load(
        "noquote.csv",
        noquote_field_names().with_trim(true).with_id_property(""),
    );
    let with_header = load(
        "noquote.csv",
        CsvConfig::default().with_trim(true).with_id_property(""),
    );

    assert_eq!(field(&no_header, "1", "last"), Some("last"));
    assert_eq!(field(&no_header, "2", "last"), Some("Hawking"));
    assert_eq!(field(&no_header, "3", "last"), Some("Einstein"));
    assert_eq!(field(&no_header, "4", "last"), Some("Tesla"));

    assert_eq!(field(&with_header, "1", "last"), Some("Hawking"));
    assert_eq!(field(&with_header, "2", "last"), Some("Einstein"));
    assert_eq!(field(&with_header, "3", "last"), Some("Tesla"));
}

#[test]
fn test_import_export() {
    let input = fixture("contributors.csv");
    let store = load("contributors.csv", CsvConfig::default());

    assert_eq!(store.to_csv(&SerializeOptions::minimal()), input);
}

#[test]
fn test_quoted_export_reimports_identically() {
    let original = load("quote.csv", CsvConfig::default());
    let exported = original.to_csv(&SerializeOptions::default());

    let reimported = load_text(&exported);
    assert_eq!(reimported.field_names(), original.field_names());
    assert_eq!(reimported.data(), original.data());
}

fn load_text(text: &str) -> CsvStore {
    let (store, report) = CsvStore::from_csv(text, CsvConfig::default()).unwrap();
    assert!(report.is_clean());
    store
}

#[test]
fn test_malformed_rows_are_discarded() {
    let (store, report) =
        CsvStore::from_csv(&fixture("malformed.csv"), CsvConfig::default()).unwrap();

    assert_eq!(report.records, 3);
    assert_eq!(
        report.discarded.iter().map(|row| row.line).collect::<Vec<_>>(),
        vec![3, 5]
    );
    assert_eq!(field(&store, "1", "value"), Some("good"));
    assert_eq!(field(&store, "3", "value"), Some("also good"));
    assert_eq!(field(&store, "5", "value"), Some("fine"));
    assert!(store.get("2").is_none());
    assert!(store.get("4").is_none());
}

#[test]
fn test_config_file_drives_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("csv-store.json");
    fs::write(
        &config_path,
        r#"{ "delimiter": ";", "newline": "\n", "trim": true, "idProperty": "" }"#,
    )
    .unwrap();

    let config = CsvConfig::from_json_file(&config_path).unwrap();
    let (store, report) = CsvStore::from_csv("a;b\n x ;\"y;z\"\n", config).unwrap();

    assert!(report.is_clean());
    assert_eq!(field(&store, "1", "a"), Some("x"));
    assert_eq!(field(&store, "1", "b"), Some("y;z"));
}
