//! Reference table input: raw records and the CSV/JSON reader.

mod reader;
mod source;

pub use reader::{ReaderConfig, TableReader, EMBEDDED_TABLE};
pub use source::{RawRecord, RawTable, SourceMetadata, TableFormat};
