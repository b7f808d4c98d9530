//! # Unit Types
//!
//! Type-safe wrappers for the units the engine works in. These are simple
//! `f64` newtypes that serialize as bare numbers.
//!
//! ## Canonical Units
//!
//! Every engine function takes and returns these units:
//! - Pressure: atmospheres (atm)
//! - Volume: liters (L)
//! - Temperature: kelvin (K)
//! - Mass: grams (g)
//! - Amount of substance: moles (mol)
//! - Molar mass: g/mol
//!
//! Alternative units exist only so front ends can convert user input into
//! the canonical ones before calling the engine.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::units::{Atm, Celsius, Kelvin, KiloPascal};
//!
//! let t: Kelvin = Celsius(25.0).into();
//! assert!((t.0 - 298.15).abs() < 1e-9);
//!
//! let p: Atm = KiloPascal(101.325).into();
//! assert!((p.0 - 1.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Pressure Units
// ============================================================================

/// Pressure in standard atmospheres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Atm(pub f64);

/// Pressure in kilopascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloPascal(pub f64);

/// Pressure in millimeters of mercury (torr)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MmHg(pub f64);

/// kPa per atm
pub const KPA_PER_ATM: f64 = 101.325;

/// mmHg per atm
pub const MMHG_PER_ATM: f64 = 760.0;

impl From<KiloPascal> for Atm {
    fn from(kpa: KiloPascal) -> Self {
        Atm(kpa.0 / KPA_PER_ATM)
    }
}

impl From<MmHg> for Atm {
    fn from(mmhg: MmHg) -> Self {
        Atm(mmhg.0 / MMHG_PER_ATM)
    }
}

// ============================================================================
// Temperature Units
// ============================================================================

/// Absolute temperature in kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Offset between the Celsius and Kelvin scales
pub const CELSIUS_OFFSET: f64 = 273.15;

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(c.0 + CELSIUS_OFFSET)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in liters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

/// Volume in milliliters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Milliliters(pub f64);

impl From<Milliliters> for Liters {
    fn from(ml: Milliliters) -> Self {
        Liters(ml.0 / 1000.0)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in grams
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grams(pub f64);

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

impl From<Kilograms> for Grams {
    fn from(kg: Kilograms) -> Self {
        Grams(kg.0 * 1000.0)
    }
}

// ============================================================================
// Raw Values
// ============================================================================

macro_rules! impl_value {
    ($($type:ty),*) => {
        $(
            impl $type {
                /// Get the raw f64 value
                pub fn value(self) -> f64 {
                    self.0
                }
            }
        )*
    };
}

impl_value!(Atm, Kelvin, Liters, Grams);
