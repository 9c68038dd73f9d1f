//! CSV handler module
//!
//! Converts CSV text into [`Record`]s and back.

pub mod config;
pub mod parser;
pub mod quoting;
pub mod record;
pub mod serializer;

pub use config::{CsvConfig, IdProperty, SerializeOptions};
pub use parser::{parse, DiscardedRow, ParseOutput};
pub use record::Record;
pub use serializer::serialize;
