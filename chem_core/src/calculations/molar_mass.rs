//! # Molar Mass & Stoichiometry
//!
//! Molar mass of a parsed formula and the linear mass ↔ mole conversions
//! built on it. Masses come from the shared [`elements`](crate::elements)
//! table, the same one the parser validates symbols against.
//!
//! ## Units
//!
//! - Molar mass: g/mol
//! - Mass: g
//! - Amount of substance: mol
//!
//! ## Example
//!
//! ```rust
//! use chem_core::formula::parse;
//! use chem_core::calculations::molar_mass::{molar_mass, mass_to_moles};
//!
//! let water = parse("H2O").unwrap();
//! let m = molar_mass(&water).unwrap();
//! assert!((m - 18.02).abs() < 0.01);
//!
//! let n = mass_to_moles(36.03, &water).unwrap();
//! assert!((n - 2.0).abs() < 0.01);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::elements;
use crate::errors::{require_positive, ChemError, ChemResult};
use crate::formula::{self, ElementCount};

/// Molar mass in g/mol: Σ count × atomic mass.
///
/// # Errors
///
/// `UnknownElement` if a symbol has no mass entry, `InvalidQuantity` if the
/// table is empty.
pub fn molar_mass(table: &ElementCount) -> ChemResult<f64> {
    if table.is_empty() {
        return Err(ChemError::invalid_quantity(
            "formula",
            "",
            "Formula contains no elements",
        ));
    }
    let mut total = 0.0;
    for (symbol, count) in table.iter() {
        total += elements::atomic_mass(symbol)? * count as f64;
    }
    Ok(total)
}

/// Moles (mol) contained in `mass_g` grams of the compound.
pub fn mass_to_moles(mass_g: f64, table: &ElementCount) -> ChemResult<f64> {
    let mass_g = require_positive("mass_g", mass_g)?;
    Ok(mass_g / molar_mass(table)?)
}

/// Mass (g) of `moles` mol of the compound.
pub fn moles_to_mass(moles: f64, table: &ElementCount) -> ChemResult<f64> {
    let moles = require_positive("moles", moles)?;
    Ok(moles * molar_mass(table)?)
}

/// Contribution of one element to a compound's molar mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementContribution {
    pub symbol: String,
    pub count: u32,
    /// count × atomic mass (g/mol)
    pub mass_g_per_mol: f64,
    /// Share of the molar mass, 0-100
    pub mass_percent: f64,
}

/// Per-element mass breakdown in formula order. Percentages sum to 100.
pub fn composition(table: &ElementCount) -> ChemResult<Vec<ElementContribution>> {
    let total = molar_mass(table)?;
    table
        .iter()
        .map(|(symbol, count)| {
            let mass = elements::atomic_mass(symbol)? * count as f64;
            Ok(ElementContribution {
                symbol: symbol.to_string(),
                count,
                mass_g_per_mol: mass,
                mass_percent: mass / total * 100.0,
            })
        })
        .collect()
}

/// Input parameters for a molar mass lookup.
///
/// At most one of `mass_g` and `moles` may be given; it is converted to the
/// other.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Glucose",
///   "formula": "C6H12O6",
///   "mass_g": 90.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MolarMassInput {
    /// User label for this calculation
    #[serde(default)]
    pub label: String,

    /// Molecular formula (ASCII or subscript digits)
    pub formula: String,

    /// Sample mass in grams, converted to moles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_g: Option<f64>,

    /// Amount in moles, converted to grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moles: Option<f64>,
}

impl MolarMassInput {
    /// Validate input parameters.
    pub fn validate(&self) -> ChemResult<()> {
        if self.mass_g.is_some() && self.moles.is_some() {
            return Err(ChemError::invalid_input(
                "moles",
                format!("{:?}", self.moles),
                "Give either mass_g or moles, not both",
            ));
        }
        Ok(())
    }
}

/// Results from a molar mass lookup.
///
/// ## JSON Example
///
/// ```json
/// {
///   "formula": "H2O",
///   "display_formula": "H₂O",
///   "elements": [{ "symbol": "H", "count": 2 }, { "symbol": "O", "count": 1 }],
///   "molar_mass_g_per_mol": 18.016,
///   "composition": [ ... ],
///   "moles": 2.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MolarMassResult {
    /// Normalized ASCII formula
    pub formula: String,
    /// Formula with subscript digits
    pub display_formula: String,
    pub elements: ElementCount,
    pub molar_mass_g_per_mol: f64,
    pub composition: Vec<ElementContribution>,
    /// Moles in the supplied mass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moles: Option<f64>,
    /// Mass of the supplied moles (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_g: Option<f64>,
}

/// Calculate molar mass, composition and optional conversion.
pub fn calculate(input: &MolarMassInput) -> ChemResult<MolarMassResult> {
    input.validate()?;

    let table = formula::parse(&input.formula)?;
    let mm = molar_mass(&table)?;
    let moles = input.mass_g.map(|m| mass_to_moles(m, &table)).transpose()?;
    let mass_g = input.moles.map(|n| moles_to_mass(n, &table)).transpose()?;
    debug!("molar mass of {} = {:.4} g/mol", table, mm);

    Ok(MolarMassResult {
        formula: table.to_formula(),
        display_formula: table.to_subscript_formula(),
        composition: composition(&table)?,
        elements: table,
        molar_mass_g_per_mol: mm,
        moles,
        mass_g,
    })
}
