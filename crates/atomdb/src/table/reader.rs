//! CSV/JSON table reader with format detection.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::source::{RawRecord, RawTable, SourceMetadata, TableFormat};
use crate::error::{AtomdbError, Result};

/// The reference table compiled into the library.
pub const EMBEDDED_TABLE: &str = include_str!("../../data/nist_isotopes.csv");

/// Directive that declares the element count in a CSV preamble.
const ELEMENT_COUNT_DIRECTIVE: &str = "element_count";

/// Reader configuration.
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Format to read (None = auto-detect).
    pub format: Option<TableFormat>,
}

/// JSON layout of a table.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    Table {
        element_count: Option<u32>,
        records: Vec<RawRecord>,
    },
    Records(Vec<RawRecord>),
}

/// Reads reference tables into [`RawTable`]s.
pub struct TableReader {
    config: ReaderConfig,
}

impl TableReader {
    /// Create a new reader with default configuration.
    pub fn new() -> Self {
        Self {
            config: ReaderConfig::default(),
        }
    }

    /// Create a reader with custom configuration.
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read the table compiled into the library.
    pub fn read_embedded(&self) -> Result<RawTable> {
        self.read_bytes(EMBEDDED_TABLE.as_bytes(), "embedded".to_string())
    }

    /// Read a table file.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<RawTable> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| AtomdbError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.read_bytes(&contents, path.display().to_string())
    }

    /// Read a table held in a string.
    pub fn read_str(&self, text: &str) -> Result<RawTable> {
        self.read_bytes(text.as_bytes(), "inline".to_string())
    }

    fn read_bytes(&self, bytes: &[u8], source: String) -> Result<RawTable> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            AtomdbError::UnsupportedFormat(format!("{} is not UTF-8: {}", source, e))
        })?;

        let format = match self.config.format {
            Some(f) => f,
            None => detect_format(text)?,
        };
        debug!("reading {} table from {} ({} bytes)", format, source, bytes.len());

        let (element_count, records) = match format {
            TableFormat::Csv => read_csv(text)?,
            TableFormat::Json => read_json(text)?,
        };

        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let metadata = SourceMetadata::new(
            source,
            hash,
            bytes.len() as u64,
            format,
            records.len(),
        );

        Ok(RawTable {
            element_count,
            records,
            metadata,
        })
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the format from the first non-blank character.
fn detect_format(text: &str) -> Result<TableFormat> {
    match text.trim_start().chars().next() {
        None => Err(AtomdbError::UnsupportedFormat("empty table".to_string())),
        Some('{') | Some('[') => Ok(TableFormat::Json),
        Some(_) => Ok(TableFormat::Csv),
    }
}

fn read_csv(text: &str) -> Result<(u32, Vec<RawRecord>)> {
    let element_count = parse_preamble(text)?.ok_or(AtomdbError::MissingElementCount)?;

    let mut reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for result in reader.deserialize::<RawRecord>() {
        records.push(result?);
    }

    Ok((element_count, records))
}

fn read_json(text: &str) -> Result<(u32, Vec<RawRecord>)> {
    match serde_json::from_str::<JsonDocument>(text)? {
        JsonDocument::Table {
            element_count: Some(count),
            records,
        } => Ok((count, records)),
        JsonDocument::Table {
            element_count: None,
            ..
        }
        | JsonDocument::Records(_) => Err(AtomdbError::MissingElementCount),
    }
}

/// Find the `# element_count: N` directive among the comment lines.
fn parse_preamble(text: &str) -> Result<Option<u32>> {
    for (line_idx, line) in text.lines().enumerate() {
        let Some(comment) = line.trim_start().strip_prefix('#') else {
            continue;
        };
        let Some((key, value)) = comment.split_once([':', '=']) else {
            continue;
        };
        if key.trim() != ELEMENT_COUNT_DIRECTIVE {
            continue;
        }

        let count = value.trim().parse::<u32>().map_err(|e| AtomdbError::Parse {
            row: line_idx + 1,
            column: ELEMENT_COUNT_DIRECTIVE,
            message: format!("'{}': {}", value.trim(), e),
        })?;
        return Ok(Some(count));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_CSV: &str = "# element_count: 2\n\
        atomic_number,symbol,mass_number,relative_atomic_mass,\
        isotopic_composition,standard_atomic_weight,notes\n\
        1,H,1,1.00782503207(10),0.999885(70),1.00794(7),\"g,m,r\"\n\
        1,H,3,3.0160492777(25),,1.00794(7),\"g,m,r\"\n\
        2,He,4,4.00260325415(6),0.99999866(3),4.002602(2),\n";

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format("  {\"a\": 1}").unwrap(), TableFormat::Json);
        assert_eq!(detect_format("[]").unwrap(), TableFormat::Json);
        assert_eq!(detect_format("# x\na,b").unwrap(), TableFormat::Csv);
        assert!(detect_format("   \n").is_err());
    }

    #[test]
    fn test_preamble() {
        assert_eq!(parse_preamble("# element_count: 118\n").unwrap(), Some(118));
        assert_eq!(parse_preamble("#element_count=3\n").unwrap(), Some(3));
        assert_eq!(parse_preamble("# comment\na,b\n").unwrap(), None);
        assert!(parse_preamble("# element_count: many\n").is_err());
    }

    #[test]
    fn test_read_csv() {
        let table = TableReader::new().read_str(SMALL_CSV).unwrap();

        assert_eq!(table.element_count, 2);
        assert_eq!(table.record_count(), 3);
        assert_eq!(table.records[0].symbol, "H");
        assert_eq!(table.records[0].relative_atomic_mass, "1.00782503207(10)");
        assert_eq!(table.records[0].notes, "g,m,r");
        assert_eq!(table.records[1].isotopic_composition, "");
        assert_eq!(table.metadata.format, Some(TableFormat::Csv));
        assert!(table.metadata.hash.as_deref().unwrap().starts_with("sha256:"));
    }

    #[test]
    fn test_read_csv_without_count() {
        let text = "atomic_number,symbol,mass_number\n1,H,1\n";
        assert!(matches!(
            TableReader::new().read_str(text),
            Err(AtomdbError::MissingElementCount)
        ));
    }

    #[test]
    fn test_read_json() {
        let text = r#"{
            "element_count": 1,
            "records": [
                {"atomic_number": 1, "symbol": "H", "mass_number": 1,
                 "relative_atomic_mass": "1.00782503207(10)",
                 "isotopic_composition": null,
                 "standard_atomic_weight": "1.00794(7)"}
            ]
        }"#;
        let table = TableReader::new().read_str(text).unwrap();

        assert_eq!(table.element_count, 1);
        assert_eq!(table.records[0].atomic_number, "1");
        assert_eq!(table.records[0].mass_number, "1");
        assert_eq!(table.records[0].isotopic_composition, "");
        assert_eq!(table.records[0].notes, "");
        assert_eq!(table.metadata.format, Some(TableFormat::Json));
    }

    #[test]
    fn test_read_json_bare_array_has_no_count() {
        let text = r#"[{"atomic_number": 1, "symbol": "H", "mass_number": 1}]"#;
        assert!(matches!(
            TableReader::new().read_str(text),
            Err(AtomdbError::MissingElementCount)
        ));
    }

    #[test]
    fn test_forced_format() {
        let reader = TableReader::with_config(ReaderConfig {
            format: Some(TableFormat::Json),
        });
        assert!(matches!(reader.read_str(SMALL_CSV), Err(AtomdbError::Json(_))));
    }

    #[test]
    fn test_read_embedded() {
        let table = TableReader::new().read_embedded().unwrap();
        assert_eq!(table.element_count, 118);
        assert!(table.record_count() >= 118);
        assert_eq!(table.metadata.source, "embedded");
    }
}
