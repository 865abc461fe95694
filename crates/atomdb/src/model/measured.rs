//! Measured values in NIST notation.
//!
//! Reference tables quote a value followed by its standard uncertainty in the
//! last quoted digits, e.g. `1.00794(7)` is `1.00794 ± 0.00007`. A trailing
//! `#` marks a value estimated from systematic trends rather than measured.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<value>\d+(?:\.(?P<frac>\d+))?)(?:\((?P<unc>\d+)\))?(?P<est>#)?$")
        .expect("valid notation regex")
});

/// A decimal value with its optional standard uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measured {
    /// Central value.
    pub value: f64,
    /// Standard uncertainty, in the same unit as `value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<f64>,
    /// Whether the value was estimated from systematics.
    #[serde(default)]
    pub estimated: bool,
}

impl Measured {
    /// An exact value without uncertainty.
    pub fn exact(value: f64) -> Self {
        Self {
            value,
            uncertainty: None,
            estimated: false,
        }
    }

    /// A value with a known uncertainty.
    pub fn with_uncertainty(value: f64, uncertainty: f64) -> Self {
        Self {
            value,
            uncertainty: Some(uncertainty),
            estimated: false,
        }
    }
}

impl FromStr for Measured {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let caps = NOTATION
            .captures(trimmed)
            .ok_or_else(|| {
                format!("'{}' is not a number in value(uncertainty) notation", trimmed)
            })?;

        let value = caps["value"]
            .parse::<f64>()
            .map_err(|e| format!("'{}': {}", trimmed, e))?;

        let decimals = caps.name("frac").map_or(0, |m| m.as_str().len());
        let uncertainty = match caps.name("unc") {
            Some(unc) => Some(
                format!("{}e-{}", unc.as_str(), decimals)
                    .parse::<f64>()
                    .map_err(|e| format!("'{}': {}", trimmed, e))?,
            ),
            None => None,
        };

        Ok(Self {
            value,
            uncertainty,
            estimated: caps.name("est").is_some(),
        })
    }
}

impl fmt::Display for Measured {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.uncertainty {
            Some(u) => write!(f, "{} ± {}", self.value, u)?,
            None => write!(f, "{}", self.value)?,
        }
        if self.estimated {
            write!(f, " (estimated)")?;
        }
        Ok(())
    }
}
