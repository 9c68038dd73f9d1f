//! csv-store library
//!
//! Parses CSV text into string-valued records, loads them into an
//! identity-indexed in-memory store, and serializes them back to CSV.
//! It includes modules for the CSV parser and serializer, the record store,
//! CLI argument parsing, and error handling.

pub mod cli;
pub mod csv_handler;
pub mod error;
pub mod store;
