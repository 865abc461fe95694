//! Error types for the atomdb library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for atomdb operations.
///
/// Every variant aborts the load attempt that produced it. Lookups for keys
/// that do not exist are not errors; they return `None`.
#[derive(Debug, Error)]
pub enum AtomdbError {
    /// Error reading or accessing a table file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field could not be parsed.
    #[error("Parse error at row {row}, column '{column}': {message}")]
    Parse {
        row: usize,
        column: &'static str,
        message: String,
    },

    /// A required field is empty.
    #[error("Missing required field '{column}' at row {row}")]
    MissingField { row: usize, column: &'static str },

    /// The source does not declare how many elements it describes.
    #[error("Table does not declare an element count")]
    MissingElementCount,

    /// Distinct elements found differ from the declared count.
    #[error("Element count mismatch: table declares {declared}, found {found}")]
    ElementCountMismatch { declared: u32, found: u32 },

    /// An atomic number outside `[1, declared]`.
    #[error("Atomic number {atomic_number} at row {row} is outside [1, {declared}]")]
    AtomicNumberOutOfRange {
        row: usize,
        atomic_number: u32,
        declared: u32,
    },

    /// The same (atomic number, mass number) pair appears twice.
    #[error("Duplicate isotope Z={atomic_number}, A={mass_number} at row {row}")]
    DuplicateIsotope {
        row: usize,
        atomic_number: u32,
        mass_number: u32,
    },

    /// A mass number smaller than its atomic number.
    #[error("Invalid nuclide Z={atomic_number}, A={mass_number} at row {row}")]
    InvalidNuclide {
        row: usize,
        atomic_number: u32,
        mass_number: u32,
    },

    /// A record disagrees with the first-seen data for its element.
    #[error("Inconsistent data for element {atomic_number} at row {row}: {message}")]
    InconsistentElement {
        row: usize,
        atomic_number: u32,
        message: String,
    },

    /// Table format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Any failure while reading or loading a table is a load error.
pub type LoadError = AtomdbError;

/// Result type alias for atomdb operations.
pub type Result<T> = std::result::Result<T, AtomdbError>;
