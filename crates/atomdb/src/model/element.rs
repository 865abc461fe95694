//! Chemical elements and their standard atomic weights.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::measured::Measured;

/// Standard atomic weight of an element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StandardAtomicWeight {
    /// Conventional value, e.g. `1.00794(7)`.
    Value(Measured),
    /// Interval reflecting natural variation, e.g. `[1.00784,1.00811]`.
    Interval { lower: f64, upper: f64 },
    /// Mass number of the longest-lived isotope, e.g. `[98]`, for elements
    /// without stable isotopes.
    MassNumber(u32),
}

impl StandardAtomicWeight {
    /// Representative decimal weight.
    ///
    /// The conventional value, the midpoint of an interval, or the mass
    /// number placeholder.
    pub fn value(&self) -> f64 {
        match self {
            Self::Value(m) => m.value,
            Self::Interval { lower, upper } => (lower + upper) / 2.0,
            Self::MassNumber(a) => f64::from(*a),
        }
    }

    /// Whether this is a mass-number placeholder rather than a measured weight.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::MassNumber(_))
    }
}

impl FromStr for StandardAtomicWeight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let Some(inner) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        else {
            return trimmed.parse::<Measured>().map(Self::Value);
        };

        match inner.split_once(',') {
            Some((lower, upper)) => {
                let lower = parse_bound(lower)?;
                let upper = parse_bound(upper)?;
                if lower > upper {
                    return Err(format!("interval '{}' has lower bound above upper", trimmed));
                }
                Ok(Self::Interval { lower, upper })
            }
            None => inner
                .trim()
                .parse::<u32>()
                .map(Self::MassNumber)
                .map_err(|e| format!("'{}': {}", trimmed, e)),
        }
    }
}

fn parse_bound(s: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .map_err(|e| format!("interval bound '{}': {}", s.trim(), e))
}

/// A chemical element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Atomic number (proton count).
    pub atomic_number: u32,
    /// Atomic symbol, e.g. `Fe`.
    pub symbol: String,
    /// Standard atomic weight.
    pub standard_atomic_weight: StandardAtomicWeight,
    /// Isotopic composition keyed by mass number, in source order.
    ///
    /// Every isotope of the element has an entry; `None` means the
    /// composition is unknown (not zero).
    pub composition: IndexMap<u32, Option<Measured>>,
}

impl Element {
    pub(crate) fn new(
        atomic_number: u32,
        symbol: String,
        standard_atomic_weight: StandardAtomicWeight,
    ) -> Self {
        Self {
            atomic_number,
            symbol,
            standard_atomic_weight,
            composition: IndexMap::new(),
        }
    }

    /// Whether the element has an isotope with this mass number.
    pub fn has_isotope(&self, mass_number: u32) -> bool {
        self.composition.contains_key(&mass_number)
    }

    /// Natural abundance of an isotope, if both the isotope and its
    /// composition are known.
    pub fn composition_of(&self, mass_number: u32) -> Option<Measured> {
        self.composition.get(&mass_number).copied().flatten()
    }

    /// Mass numbers of all isotopes, in source order.
    pub fn mass_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.composition.keys().copied()
    }

    /// Number of isotopes.
    pub fn isotope_count(&self) -> usize {
        self.composition.len()
    }

    /// Whether any isotope occurs naturally with a known abundance.
    pub fn has_natural_abundance(&self) -> bool {
        self.composition.values().any(Option::is_some)
    }
}
