//! # Gas Equations of State
//!
//! Closed-form ideal-gas and Van der Waals relations.
//!
//! ## Notation
//!
//! - `P` = Pressure (atm)
//! - `V` = Volume (L)
//! - `n` = Amount of substance (mol)
//! - `T` = Absolute temperature (K)
//! - `a` = Attraction constant (L²·atm/mol²)
//! - `b` = Excluded volume per mole (L/mol)
//! - `R` = Gas constant, 0.08206 L·atm/(mol·K)
//!
//! ## Van der Waals Equation
//!
//! ```text
//! [P + a(n/V)²](V − nb) = nRT
//! ```
//!
//! Only defined for `V > nb`. These functions do not check that; callers
//! validate the domain first.

/// Universal gas constant in L·atm/(mol·K)
pub const R_L_ATM: f64 = 0.08206;

/// P = nRT/V
#[inline]
pub fn ideal_pressure(v: f64, n: f64, t: f64) -> f64 {
    n * R_L_ATM * t / v
}

/// V = nRT/P
#[inline]
pub fn ideal_volume(p: f64, n: f64, t: f64) -> f64 {
    n * R_L_ATM * t / p
}

/// n = PV/(RT)
#[inline]
pub fn ideal_moles(p: f64, v: f64, t: f64) -> f64 {
    p * v / (R_L_ATM * t)
}

/// T = PV/(nR)
#[inline]
pub fn ideal_temperature(p: f64, v: f64, n: f64) -> f64 {
    p * v / (n * R_L_ATM)
}

/// Van der Waals pressure
///
/// # Formula
/// - P = nRT/(V − nb) − a(n/V)²
#[inline]
pub fn vdw_pressure(v: f64, n: f64, t: f64, a: f64, b: f64) -> f64 {
    n * R_L_ATM * t / (v - n * b) - a * (n / v).powi(2)
}

/// Van der Waals temperature
///
/// # Formula
/// - T = [P + a(n/V)²](V − nb)/(nR)
#[inline]
pub fn vdw_temperature(p: f64, v: f64, n: f64, a: f64, b: f64) -> f64 {
    (p + a * (n / v).powi(2)) * (v - n * b) / (n * R_L_ATM)
}

/// Excluded volume nb (L)
#[inline]
pub fn excluded_volume(n: f64, b: f64) -> f64 {
    n * b
}

/// Compressibility factor Z = PV/(nRT). Z = 1 for an ideal gas.
#[inline]
pub fn compressibility_factor(p: f64, v: f64, n: f64, t: f64) -> f64 {
    p * v / (n * R_L_ATM * t)
}
