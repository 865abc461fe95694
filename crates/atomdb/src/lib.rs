//! atomdb: in-memory lookup tables for elements, isotopes and isotope metastates.
//!
//! atomdb parses a flat reference table of isotope records, modeled on the
//! NIST atomic weights and isotopic compositions dataset, into a typed entity
//! graph (element → isotope → metastate) and answers point queries by atomic
//! number, mass number and metastate level.
//!
//! # Core Principles
//!
//! - **Load once**: the table is parsed and validated in one pass; a table
//!   that breaks an invariant never produces a partial catalog
//! - **Explicit unknowns**: missing masses and abundances are `None`, never `0`
//! - **Immutable**: a loaded [`Catalog`] never changes and is freely shared
//!
//! # Example
//!
//! ```no_run
//! use atomdb::{Loader, METASTATE_LEVELS};
//!
//! let catalog = Loader::new().load().unwrap();
//!
//! let iron = catalog.element(26).unwrap();
//! println!("{} weighs {}", iron.symbol, iron.standard_atomic_weight.value());
//!
//! let fe56 = catalog.isotope(26, 56).unwrap();
//! println!("{}: {:?}", fe56.label(), fe56.relative_atomic_mass);
//!
//! assert_eq!(catalog.metastates_of(26, 56).len(), METASTATE_LEVELS as usize);
//! ```
//!
//! The [`store`] module keeps one lazily loaded catalog for the whole process
//! behind [`get_element`], [`get_isotope`] and [`get_isotope_metastate`].

pub mod error;
pub mod model;
pub mod store;
pub mod table;

mod catalog;
mod loader;

pub use catalog::{Catalog, CatalogStats};
pub use error::{AtomdbError, LoadError, Result};
pub use loader::{Loader, LoaderConfig, MismatchPolicy, TableSource};
pub use model::{
    Element, Isotope, IsotopeKey, IsotopeMetaState, Measured, Note, StandardAtomicWeight,
    METASTATE_LEVELS,
};
pub use store::{get_element, get_isotope, get_isotope_metastate, StoreState};
pub use table::{
    RawRecord, RawTable, ReaderConfig, SourceMetadata, TableFormat, TableReader, EMBEDDED_TABLE,
};
