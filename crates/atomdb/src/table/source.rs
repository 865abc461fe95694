//! Raw table records and source metadata.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Serialized form of a reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    Csv,
    Json,
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Metadata about where a raw table came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Human-readable source label (file path, `embedded`, `inline`).
    pub source: String,
    /// SHA-256 hash of the source bytes, when read from bytes.
    pub hash: Option<String>,
    /// Source size in bytes.
    pub size_bytes: u64,
    /// Format the table was read as.
    pub format: Option<TableFormat>,
    /// Number of isotope records.
    pub record_count: usize,
    /// When the table was read.
    pub read_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Metadata for a table read from serialized bytes.
    pub fn new(
        source: String,
        hash: String,
        size_bytes: u64,
        format: TableFormat,
        record_count: usize,
    ) -> Self {
        Self {
            source,
            hash: Some(hash),
            size_bytes,
            format: Some(format),
            record_count,
            read_at: Utc::now(),
        }
    }

    /// Metadata for a table built directly in memory.
    pub fn in_memory(record_count: usize) -> Self {
        Self {
            source: "in-memory".to_string(),
            hash: None,
            size_bytes: 0,
            format: None,
            record_count,
            read_at: Utc::now(),
        }
    }
}

/// One isotope row of the reference table, as text.
///
/// Values keep their source notation (e.g. `1.00794(7)`); the loader parses
/// them. Empty strings mean the field is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub atomic_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub symbol: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mass_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub relative_atomic_mass: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub isotopic_composition: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub standard_atomic_weight: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: String,
}

impl RawRecord {
    /// Build a record from its fields.
    pub fn new(
        atomic_number: impl Into<String>,
        symbol: impl Into<String>,
        mass_number: impl Into<String>,
        relative_atomic_mass: impl Into<String>,
        isotopic_composition: impl Into<String>,
        standard_atomic_weight: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            atomic_number: atomic_number.into(),
            symbol: symbol.into(),
            mass_number: mass_number.into(),
            relative_atomic_mass: relative_atomic_mass.into(),
            isotopic_composition: isotopic_composition.into(),
            standard_atomic_weight: standard_atomic_weight.into(),
            notes: notes.into(),
        }
    }
}

/// An ordered sequence of isotope records plus the declared element count.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Number of distinct elements the table claims to describe.
    pub element_count: u32,
    /// Records in source order.
    pub records: Vec<RawRecord>,
    /// Where the records came from.
    pub metadata: SourceMetadata,
}

impl RawTable {
    /// Build a table in memory.
    pub fn new(element_count: u32, records: Vec<RawRecord>) -> Self {
        let metadata = SourceMetadata::in_memory(records.len());
        Self {
            element_count,
            records,
            metadata,
        }
    }

    /// Number of records.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// Accept strings, numbers or null for a text field.
///
/// JSON tables may write `"atomic_number": 1` instead of `"1"`.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientString;

    impl<'de> Visitor<'de> for LenientString {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, a number or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<String, D::Error> {
            d.deserialize_any(LenientString)
        }
    }

    deserializer.deserialize_any(LenientString)
}
