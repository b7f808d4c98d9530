//! # Combustion Stoichiometry
//!
//! Coefficients for the complete combustion of a fuel CₓHᵧO_z:
//!
//! ```text
//! CₓHᵧO_z + (2x + y/2 − z)/2 O₂ → x CO₂ + y/2 H₂O
//! ```
//!
//! All per-mole values scale linearly with the amount of fuel.

/// CO₂ produced per mole of fuel: x
#[inline]
pub fn co2_per_mole(x: u32) -> f64 {
    x as f64
}

/// H₂O produced per mole of fuel: y/2
#[inline]
pub fn h2o_per_mole(y: u32) -> f64 {
    y as f64 / 2.0
}

/// O₂ consumed per mole of fuel: (2x + y/2 − z)/2
///
/// Negative or zero when the fuel already carries enough oxygen.
#[inline]
pub fn o2_per_mole(x: u32, y: u32, z: u32) -> f64 {
    (2.0 * x as f64 + y as f64 / 2.0 - z as f64) / 2.0
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Smallest whole-number coefficients `[fuel, O₂, CO₂, H₂O]`.
///
/// Scales the equation by 4 (giving 4, 4x + y − 2z, 4x, 2y) and divides by
/// the common divisor. Returns `None` when the fuel consumes no oxygen.
///
/// # Example
/// - C₂H₆: `[2, 7, 4, 6]`
pub fn whole_number_coefficients(x: u32, y: u32, z: u32) -> Option<[u64; 4]> {
    let (x, y, z) = (x as u64, y as u64, z as u64);
    let o2 = (4 * x + y).checked_sub(2 * z).filter(|&o2| o2 > 0)?;
    let mut coefficients = [4, o2, 4 * x, 2 * y];
    let divisor = coefficients.iter().fold(0, |acc, &c| gcd(acc, c));
    for c in coefficients.iter_mut() {
        *c /= divisor;
    }
    Some(coefficients)
}
