//! Unit conversion and normalization module
//!
//! Calculators work in SI-style units internally (cm, kg, ml). Form inputs
//! that arrive in other units are converted once at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Millilitres in one glass of water (8 oz)
pub const ML_PER_GLASS: f64 = 250.0;

// ============================================================================
// Length Units
// ============================================================================

/// Length unit for heights and body circumferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Cm,
    Meters,
    Inches,
}

impl LengthUnit {
    /// Convert from this unit to centimeters
    pub fn to_cm(&self, value: f64) -> f64 {
        match self {
            LengthUnit::Cm => value,
            LengthUnit::Meters => value * 100.0,
            LengthUnit::Inches => value * 2.54,
        }
    }

    /// Convert from centimeters to this unit
    pub fn from_cm(&self, cm: f64) -> f64 {
        match self {
            LengthUnit::Cm => cm,
            LengthUnit::Meters => cm / 100.0,
            LengthUnit::Inches => cm / 2.54,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            LengthUnit::Cm => "cm",
            LengthUnit::Meters => "m",
            LengthUnit::Inches => "in",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Ok(LengthUnit::Cm),
            "m" | "meter" | "meters" => Ok(LengthUnit::Meters),
            "in" | "inch" | "inches" => Ok(LengthUnit::Inches),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume unit for water intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VolumeUnit {
    #[default]
    Ml,
    Litres,
    Glasses,
}

impl VolumeUnit {
    /// Convert from this unit to millilitres
    pub fn to_ml(&self, value: f64) -> f64 {
        match self {
            VolumeUnit::Ml => value,
            VolumeUnit::Litres => value * 1000.0,
            VolumeUnit::Glasses => value * ML_PER_GLASS,
        }
    }

    /// Convert from millilitres to this unit
    pub fn from_ml(&self, ml: f64) -> f64 {
        match self {
            VolumeUnit::Ml => ml,
            VolumeUnit::Litres => ml / 1000.0,
            VolumeUnit::Glasses => ml / ML_PER_GLASS,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            VolumeUnit::Ml => "ml",
            VolumeUnit::Litres => "L",
            VolumeUnit::Glasses => "glasses",
        }
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for VolumeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ml" | "millilitre" | "milliliter" | "millilitres" | "milliliters" => Ok(VolumeUnit::Ml),
            "l" | "litre" | "liter" | "litres" | "liters" => Ok(VolumeUnit::Litres),
            "glass" | "glasses" => Ok(VolumeUnit::Glasses),
            _ => Err(format!("Unknown volume unit: {}", s)),
        }
    }
}
