//! Unit conversion utilities
//!
//! Converts operator-facing lengths into millimetres, the single internal
//! unit used by all joint geometry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MM_PER_INCH: f64 = 25.4;
const PX_PER_INCH: f64 = 96.0;
const PT_PER_INCH: f64 = 72.0;

/// Length unit accepted on input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Millimetres (internal unit)
    Mm,
    /// Centimetres
    Cm,
    /// Inches
    In,
    /// Typographic points, 72 per inch
    Pt,
    /// CSS pixels, 96 per inch
    Px,
}

impl Default for LengthUnit {
    fn default() -> Self {
        Self::Mm
    }
}

impl LengthUnit {
    /// Millimetres per one of this unit
    pub fn mm_per_unit(self) -> f64 {
        match self {
            Self::Mm => 1.0,
            Self::Cm => 10.0,
            Self::In => MM_PER_INCH,
            Self::Pt => MM_PER_INCH / PT_PER_INCH,
            Self::Px => MM_PER_INCH / PX_PER_INCH,
        }
    }

    /// Convert a value in this unit to millimetres
    pub fn to_mm(self, value: f64) -> f64 {
        value * self.mm_per_unit()
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mm => write!(f, "mm"),
            Self::Cm => write!(f, "cm"),
            Self::In => write!(f, "in"),
            Self::Pt => write!(f, "pt"),
            Self::Px => write!(f, "px"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" => Ok(Self::Mm),
            "cm" => Ok(Self::Cm),
            "in" | "inch" => Ok(Self::In),
            "pt" => Ok(Self::Pt),
            "px" => Ok(Self::Px),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}
