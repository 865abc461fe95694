//! Isotopes and their synthetic metastates.

use serde::{Deserialize, Serialize};

use super::measured::Measured;

/// Number of metastate levels generated per isotope.
///
/// Level 1 is the ground state; levels 2 and 3 are the first and second
/// isomeric states.
pub const METASTATE_LEVELS: u32 = 3;

/// Key of an isotope: (atomic number, mass number).
pub type IsotopeKey = (u32, u32);

/// Footnote code attached to a reference table record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Note {
    /// `g`: geological specimens with exceptional composition are known.
    Geological,
    /// `m`: modified composition in commercially available material.
    Modified,
    /// `r`: range in isotopic composition limits the precision.
    Range,
    /// Any other single-letter code.
    Other(char),
}

impl Note {
    /// Map a footnote letter to its meaning.
    pub fn from_code(code: char) -> Self {
        match code {
            'g' => Self::Geological,
            'm' => Self::Modified,
            'r' => Self::Range,
            other => Self::Other(other),
        }
    }

    /// The footnote letter.
    pub fn code(&self) -> char {
        match self {
            Self::Geological => 'g',
            Self::Modified => 'm',
            Self::Range => 'r',
            Self::Other(c) => *c,
        }
    }
}

/// A nuclide of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Isotope {
    /// Atomic number of the owning element.
    pub atomic_number: u32,
    /// Mass number (protons + neutrons).
    pub mass_number: u32,
    /// Symbol of the owning element.
    pub symbol: String,
    /// Relative atomic mass; `None` when unknown.
    pub relative_atomic_mass: Option<Measured>,
    /// Natural abundance within the element; `None` when unknown.
    pub isotopic_composition: Option<Measured>,
    /// Footnote codes exactly as they appear in the source, e.g. `g,m,r`.
    pub note_codes: String,
}

impl Isotope {
    /// The (atomic number, mass number) key.
    pub fn key(&self) -> IsotopeKey {
        (self.atomic_number, self.mass_number)
    }

    /// Neutron count.
    pub fn neutron_count(&self) -> u32 {
        self.mass_number.saturating_sub(self.atomic_number)
    }

    /// Parsed footnote codes.
    pub fn notes(&self) -> Vec<Note> {
        self.note_codes
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter_map(|code| code.chars().next())
            .map(Note::from_code)
            .collect()
    }

    /// Whether the isotope carries the given footnote.
    pub fn has_note(&self, note: Note) -> bool {
        self.notes().contains(&note)
    }

    /// Label such as `Fe-56`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.symbol, self.mass_number)
    }
}

/// A nuclear excitation level of an isotope.
///
/// Not part of the reference table: the loader generates
/// [`METASTATE_LEVELS`] of these for every isotope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IsotopeMetaState {
    /// Atomic number of the owning isotope.
    pub atomic_number: u32,
    /// Mass number of the owning isotope.
    pub mass_number: u32,
    /// Level in `[1, METASTATE_LEVELS]`.
    pub level: u32,
}

impl IsotopeMetaState {
    /// Key of the owning isotope.
    pub fn isotope_key(&self) -> IsotopeKey {
        (self.atomic_number, self.mass_number)
    }

    /// Whether this is the ground state.
    pub fn is_ground(&self) -> bool {
        self.level == 1
    }

    /// Whether `level` is a valid metastate level.
    pub fn is_valid_level(level: u32) -> bool {
        (1..=METASTATE_LEVELS).contains(&level)
    }
}
