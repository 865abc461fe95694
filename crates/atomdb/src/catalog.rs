//! The entity store: elements, isotopes and metastates with point lookups.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{Element, Isotope, IsotopeKey, IsotopeMetaState, METASTATE_LEVELS};
use crate::table::SourceMetadata;

/// Counts describing a loaded catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Number of elements.
    pub element_count: usize,
    /// Number of isotopes.
    pub isotope_count: usize,
    /// Number of generated metastates.
    pub metastate_count: usize,
    /// Isotopes with a known relative atomic mass.
    pub isotopes_with_mass: usize,
    /// Isotopes with a known natural abundance.
    pub isotopes_with_composition: usize,
    /// Data source description.
    pub source: String,
    /// When the catalog was built.
    pub loaded_at: DateTime<Utc>,
}

/// Immutable store of every element, isotope and metastate.
///
/// The catalog is the single owner of all entities. Isotopes refer to their
/// element and metastates to their isotope by key; [`Catalog::element_of`]
/// and [`Catalog::isotope_of`] resolve those back-references.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Element Z at position Z-1.
    elements: Vec<Element>,
    /// Isotopes in source order.
    isotopes: IndexMap<IsotopeKey, Isotope>,
    /// `METASTATE_LEVELS` entries per isotope, in isotope order.
    metastates: Vec<IsotopeMetaState>,
    source: SourceMetadata,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Assemble a catalog from validated parts and generate its metastates.
    ///
    /// `elements` must be sorted and contiguous from atomic number 1, and every
    /// isotope's element must be present.
    pub(crate) fn assemble(
        elements: Vec<Element>,
        isotopes: IndexMap<IsotopeKey, Isotope>,
        source: SourceMetadata,
    ) -> Self {
        let metastates = isotopes
            .keys()
            .flat_map(|&(atomic_number, mass_number)| {
                (1..=METASTATE_LEVELS).map(move |level| IsotopeMetaState {
                    atomic_number,
                    mass_number,
                    level,
                })
            })
            .collect();

        Self {
            elements,
            isotopes,
            metastates,
            source,
            loaded_at: Utc::now(),
        }
    }

    /// Element with the given atomic number.
    pub fn element(&self, atomic_number: u32) -> Option<&Element> {
        let index = (atomic_number as usize).checked_sub(1)?;
        self.elements.get(index)
    }

    /// Element with the given symbol, ignoring ASCII case.
    pub fn element_by_symbol(&self, symbol: &str) -> Option<&Element> {
        let symbol = symbol.trim();
        self.elements
            .iter()
            .find(|e| e.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Isotope with the given atomic and mass numbers.
    pub fn isotope(&self, atomic_number: u32, mass_number: u32) -> Option<&Isotope> {
        let element = self.element(atomic_number)?;
        if !element.has_isotope(mass_number) {
            return None;
        }
        self.isotopes.get(&(atomic_number, mass_number))
    }

    /// Metastate of an isotope at the given level.
    ///
    /// `None` when the isotope does not exist or `level` is outside
    /// `[1, METASTATE_LEVELS]`.
    pub fn metastate(
        &self,
        atomic_number: u32,
        mass_number: u32,
        level: u32,
    ) -> Option<&IsotopeMetaState> {
        if !IsotopeMetaState::is_valid_level(level) {
            return None;
        }
        self.element(atomic_number)?;
        let index = self.isotopes.get_index_of(&(atomic_number, mass_number))?;
        self.metastates
            .get(index * METASTATE_LEVELS as usize + (level as usize - 1))
    }

    /// All metastates of an isotope, ground state first.
    pub fn metastates_of(&self, atomic_number: u32, mass_number: u32) -> &[IsotopeMetaState] {
        let levels = METASTATE_LEVELS as usize;
        match self.isotopes.get_index_of(&(atomic_number, mass_number)) {
            Some(index) => &self.metastates[index * levels..(index + 1) * levels],
            None => &[],
        }
    }

    /// The element an isotope belongs to.
    pub fn element_of(&self, isotope: &Isotope) -> Option<&Element> {
        self.element(isotope.atomic_number)
    }

    /// The isotope a metastate belongs to.
    pub fn isotope_of(&self, metastate: &IsotopeMetaState) -> Option<&Isotope> {
        self.isotope(metastate.atomic_number, metastate.mass_number)
    }

    /// Isotopes of an element in source order.
    pub fn isotopes_of(&self, atomic_number: u32) -> impl Iterator<Item = &Isotope> + '_ {
        self.element(atomic_number)
            .into_iter()
            .flat_map(move |element| {
                element
                    .mass_numbers()
                    .filter_map(move |a| self.isotopes.get(&(atomic_number, a)))
            })
    }

    /// The isotope with the highest known natural abundance.
    pub fn most_abundant_isotope(&self, atomic_number: u32) -> Option<&Isotope> {
        self.isotopes_of(atomic_number)
            .filter_map(|iso| iso.isotopic_composition.map(|c| (iso, c.value)))
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(iso, _)| iso)
    }

    /// All elements ordered by atomic number.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// All isotopes in source order.
    pub fn isotopes(&self) -> impl Iterator<Item = &Isotope> {
        self.isotopes.values()
    }

    /// All metastates, grouped by isotope.
    pub fn metastates(&self) -> impl Iterator<Item = &IsotopeMetaState> {
        self.metastates.iter()
    }

    /// Number of elements.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of isotopes.
    pub fn isotope_count(&self) -> usize {
        self.isotopes.len()
    }

    /// Number of metastates.
    pub fn metastate_count(&self) -> usize {
        self.metastates.len()
    }

    /// Where the table came from.
    pub fn source(&self) -> &SourceMetadata {
        &self.source
    }

    /// Summary statistics.
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            element_count: self.element_count(),
            isotope_count: self.isotope_count(),
            metastate_count: self.metastate_count(),
            isotopes_with_mass: self
                .isotopes()
                .filter(|i| i.relative_atomic_mass.is_some())
                .count(),
            isotopes_with_composition: self
                .isotopes()
                .filter(|i| i.isotopic_composition.is_some())
                .count(),
            source: self.source.source.clone(),
            loaded_at: self.loaded_at,
        }
    }
}
