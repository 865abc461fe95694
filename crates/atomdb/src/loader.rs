//! Builds a [`Catalog`] from a raw reference table.
//!
//! The loader walks the records in source order. The first record seen for an
//! atomic number defines that element's symbol and standard atomic weight;
//! every record becomes one isotope. Once all records are consumed the element
//! count is checked against the count the table declares, and the catalog
//! generates the metastates. Any failure discards everything built so far.

use std::path::PathBuf;

use indexmap::IndexMap;
use indexmap::map::Entry;
use log::{debug, warn};

use crate::catalog::Catalog;
use crate::error::{AtomdbError, Result};
use crate::model::{Element, Isotope, IsotopeKey, Measured, StandardAtomicWeight};
use crate::table::{RawRecord, RawTable, ReaderConfig, TableReader};

/// Where the loader gets its table from.
#[derive(Debug, Clone, Default)]
pub enum TableSource {
    /// The table compiled into the library.
    #[default]
    Embedded,
    /// A CSV or JSON file.
    File(PathBuf),
    /// A CSV or JSON document held in memory.
    Inline(String),
}

/// What to do when a record disagrees with the first-seen data for its element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MismatchPolicy {
    /// Keep the first-seen symbol and weight and log a warning.
    #[default]
    Warn,
    /// Abort the load.
    Reject,
}

/// Loader configuration.
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Table to load.
    pub source: TableSource,
    /// Reader configuration.
    pub reader: ReaderConfig,
    /// Handling of diverging element data.
    pub on_mismatch: MismatchPolicy,
}

/// Parses raw tables into catalogs.
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a new loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// The loader's configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Read the configured source and build a catalog from it.
    pub fn load(&self) -> Result<Catalog> {
        let reader = TableReader::with_config(self.config.reader.clone());
        let table = match &self.config.source {
            TableSource::Embedded => reader.read_embedded()?,
            TableSource::File(path) => reader.read_file(path)?,
            TableSource::Inline(text) => reader.read_str(text)?,
        };
        self.load_table(&table)
    }

    /// Build a catalog from an already-read table.
    pub fn load_table(&self, table: &RawTable) -> Result<Catalog> {
        let declared = table.element_count;
        debug!(
            "loading {} records from {} (declared elements: {})",
            table.record_count(),
            table.metadata.source,
            declared
        );

        let mut elements: IndexMap<u32, Element> = IndexMap::new();
        let mut isotopes: IndexMap<IsotopeKey, Isotope> = IndexMap::new();

        for (idx, record) in table.records.iter().enumerate() {
            let row = idx + 1;
            let parsed = ParsedRecord::parse(record, row)?;

            if parsed.atomic_number == 0 || parsed.atomic_number > declared {
                return Err(AtomdbError::AtomicNumberOutOfRange {
                    row,
                    atomic_number: parsed.atomic_number,
                    declared,
                });
            }
            if parsed.mass_number < parsed.atomic_number {
                return Err(AtomdbError::InvalidNuclide {
                    row,
                    atomic_number: parsed.atomic_number,
                    mass_number: parsed.mass_number,
                });
            }

            let element = match elements.entry(parsed.atomic_number) {
                Entry::Occupied(entry) => {
                    let element = entry.into_mut();
                    self.check_consistency(element, &parsed, row)?;
                    element
                }
                Entry::Vacant(entry) => entry.insert(Element::new(
                    parsed.atomic_number,
                    parsed.symbol.clone(),
                    parsed.standard_atomic_weight,
                )),
            };

            let key = (parsed.atomic_number, parsed.mass_number);
            if isotopes.contains_key(&key) {
                return Err(AtomdbError::DuplicateIsotope {
                    row,
                    atomic_number: parsed.atomic_number,
                    mass_number: parsed.mass_number,
                });
            }

            element
                .composition
                .insert(parsed.mass_number, parsed.isotopic_composition);
            isotopes.insert(
                key,
                Isotope {
                    atomic_number: parsed.atomic_number,
                    mass_number: parsed.mass_number,
                    symbol: element.symbol.clone(),
                    relative_atomic_mass: parsed.relative_atomic_mass,
                    isotopic_composition: parsed.isotopic_composition,
                    note_codes: parsed.notes,
                },
            );
        }

        let found = elements.len() as u32;
        if found != declared {
            return Err(AtomdbError::ElementCountMismatch { declared, found });
        }

        // Every atomic number is in [1, declared] and there are `declared`
        // distinct ones, so position Z-1 holds element Z after sorting.
        let mut elements: Vec<Element> = elements.into_values().collect();
        elements.sort_by_key(|e| e.atomic_number);

        Ok(Catalog::assemble(elements, isotopes, table.metadata.clone()))
    }

    /// Compare a record against the first-seen data for its element.
    fn check_consistency(
        &self,
        element: &Element,
        parsed: &ParsedRecord,
        row: usize,
    ) -> Result<()> {
        let mut problems = Vec::new();
        if element.symbol != parsed.symbol {
            problems.push(format!(
                "symbol '{}' differs from first-seen '{}'",
                parsed.symbol, element.symbol
            ));
        }
        if element.standard_atomic_weight != parsed.standard_atomic_weight {
            problems.push(format!(
                "standard atomic weight {} differs from first-seen {}",
                parsed.standard_atomic_weight.value(),
                element.standard_atomic_weight.value()
            ));
        }
        if problems.is_empty() {
            return Ok(());
        }

        let message = problems.join("; ");
        match self.config.on_mismatch {
            MismatchPolicy::Reject => Err(AtomdbError::InconsistentElement {
                row,
                atomic_number: element.atomic_number,
                message,
            }),
            MismatchPolicy::Warn => {
                warn!(
                    "row {}: element {}: {}; keeping first-seen data",
                    row, element.atomic_number, message
                );
                Ok(())
            }
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// A raw record with every field parsed.
struct ParsedRecord {
    atomic_number: u32,
    symbol: String,
    mass_number: u32,
    relative_atomic_mass: Option<Measured>,
    isotopic_composition: Option<Measured>,
    standard_atomic_weight: StandardAtomicWeight,
    notes: String,
}

impl ParsedRecord {
    fn parse(record: &RawRecord, row: usize) -> Result<Self> {
        let atomic_number = parse_count(&record.atomic_number, "atomic_number", row)?;
        let symbol = required(&record.symbol, "symbol", row)?.to_string();
        let mass_number = parse_count(&record.mass_number, "mass_number", row)?;

        let weight = required(&record.standard_atomic_weight, "standard_atomic_weight", row)?;
        let standard_atomic_weight = weight
            .parse::<StandardAtomicWeight>()
            .map_err(|message| AtomdbError::Parse {
                row,
                column: "standard_atomic_weight",
                message,
            })?;

        let relative_atomic_mass =
            parse_optional(&record.relative_atomic_mass, "relative_atomic_mass", row)?;
        let isotopic_composition =
            parse_optional(&record.isotopic_composition, "isotopic_composition", row)?;

        if let Some(fraction) = isotopic_composition {
            if !(0.0..=1.0).contains(&fraction.value) {
                return Err(AtomdbError::Parse {
                    row,
                    column: "isotopic_composition",
                    message: format!("fraction {} is outside [0, 1]", fraction.value),
                });
            }
        }

        Ok(Self {
            atomic_number,
            symbol,
            mass_number,
            relative_atomic_mass,
            isotopic_composition,
            standard_atomic_weight,
            notes: record.notes.trim().to_string(),
        })
    }
}

fn required<'a>(value: &'a str, column: &'static str, row: usize) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AtomdbError::MissingField { row, column })
    } else {
        Ok(trimmed)
    }
}

fn parse_count(value: &str, column: &'static str, row: usize) -> Result<u32> {
    required(value, column, row)?
        .parse::<u32>()
        .map_err(|e| AtomdbError::Parse {
            row,
            column,
            message: format!("'{}': {}", value.trim(), e),
        })
}

fn parse_optional(value: &str, column: &'static str, row: usize) -> Result<Option<Measured>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<Measured>()
        .map(Some)
        .map_err(|message| AtomdbError::Parse {
            row,
            column,
            message,
        })
}
