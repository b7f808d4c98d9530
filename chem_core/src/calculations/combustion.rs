//! # Combustion Balancer
//!
//! Balances the combustion of a CₓHᵧO_z fuel in closed form and classifies
//! a given oxygen supply as enough for complete combustion or not.
//!
//! ## Classification Heuristic
//!
//! With `required` the O₂ needed for complete combustion:
//!
//! | available O₂                          | class            |
//! |---------------------------------------|------------------|
//! | `available >= required`               | `Complete`       |
//! | `0.5·required <= available < required`| `IncompleteCO`   |
//! | `available < 0.5·required`            | `IncompleteSoot` |
//!
//! The incomplete classes are a qualitative approximation. No CO/CO₂/soot
//! split is computed for them; only the class and the O₂ reference value
//! are reported.
//!
//! ## Units
//!
//! All amounts in mol, masses in g, enthalpy in kJ/mol.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::formula::parse;
//! use chem_core::calculations::combustion::{balance_combustion, CombustionClass};
//!
//! let methane = parse("CH4").unwrap();
//! let result = balance_combustion(&methane, 1.0).unwrap();
//! assert_eq!(result.classification, CombustionClass::Complete);
//! assert_eq!(result.oxygen_required, 2.0);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculations::molar_mass;
use crate::equations::combustion::{
    co2_per_mole, h2o_per_mole, o2_per_mole, whole_number_coefficients,
};
use crate::errors::{require_positive, ChemError, ChemResult};
use crate::formula::{self, ElementCount};

const FUEL_ELEMENTS: [&str; 3] = ["C", "H", "O"];

/// Fraction of the required O₂ below which soot formation is assumed.
pub const SOOT_THRESHOLD: f64 = 0.5;

/// Outcome class of a combustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombustionClass {
    /// Enough oxygen: only CO₂ and H₂O are formed
    Complete,
    /// Oxygen-limited: CO forms alongside CO₂ (heuristic)
    IncompleteCO,
    /// Severely oxygen-limited: soot and CO form (heuristic)
    IncompleteSoot,
}

impl CombustionClass {
    pub fn description(&self) -> &'static str {
        match self {
            CombustionClass::Complete => "Complete combustion",
            CombustionClass::IncompleteCO => {
                "Incomplete combustion - CO produced (approximate)"
            }
            CombustionClass::IncompleteSoot => {
                "Incomplete combustion - soot produced (approximate)"
            }
        }
    }

    /// Classify `available` moles of O₂ against `required`.
    pub fn from_supply(available: f64, required: f64) -> Self {
        if available >= required {
            CombustionClass::Complete
        } else if available >= SOOT_THRESHOLD * required {
            CombustionClass::IncompleteCO
        } else {
            CombustionClass::IncompleteSoot
        }
    }
}

/// Reaction amounts (mol) for complete combustion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombustionCoefficients {
    pub fuel: f64,
    pub oxygen: f64,
    pub carbon_dioxide: f64,
    pub water: f64,
}

/// Smallest whole-number form of the complete combustion equation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancedEquation {
    pub fuel: u64,
    pub oxygen: u64,
    pub carbon_dioxide: u64,
    pub water: u64,
    /// Rendered equation, e.g. `2 C₂H₆ + 7 O₂ → 4 CO₂ + 6 H₂O`
    pub text: String,
}

impl BalancedEquation {
    /// Balance `fuel`, which must already be validated as a CₓHᵧO_z fuel.
    fn for_fuel(fuel: &ElementCount) -> Option<Self> {
        let (x, y, z) = fuel_counts(fuel);
        let [f, o2, co2, h2o] = whole_number_coefficients(x, y, z)?;

        let term = |coefficient: u64, species: &str| {
            if coefficient == 1 {
                species.to_string()
            } else {
                format!("{} {}", coefficient, species)
            }
        };
        let mut products = Vec::new();
        if co2 > 0 {
            products.push(term(co2, "CO₂"));
        }
        if h2o > 0 {
            products.push(term(h2o, "H₂O"));
        }
        let text = format!(
            "{} + {} → {}",
            term(f, &fuel.to_subscript_formula()),
            term(o2, "O₂"),
            products.join(" + ")
        );

        Some(BalancedEquation {
            fuel: f,
            oxygen: o2,
            carbon_dioxide: co2,
            water: h2o,
            text,
        })
    }
}

/// Result of balancing or classifying a combustion.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fuel": "CH4",
///   "fuel_moles": 1.0,
///   "classification": "IncompleteCO",
///   "description": "Incomplete combustion - CO produced (approximate)",
///   "oxygen_required": 2.0,
///   "oxygen_available": 1.0,
///   "coefficients": null,
///   "equation": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombustionResult {
    /// Fuel formula (ASCII)
    pub fuel: String,
    /// Amount of fuel burned (mol)
    pub fuel_moles: f64,
    pub classification: CombustionClass,
    pub description: String,
    /// O₂ needed for complete combustion of `fuel_moles` (mol)
    pub oxygen_required: f64,
    /// O₂ supplied (mol), when classifying a supply
    pub oxygen_available: Option<f64>,
    /// Complete-combustion amounts; `None` for the incomplete classes
    pub coefficients: Option<CombustionCoefficients>,
    /// Whole-number equation; `None` for the incomplete classes
    pub equation: Option<BalancedEquation>,
}

fn fuel_counts(fuel: &ElementCount) -> (u32, u32, u32) {
    (
        fuel.get("C").unwrap_or(0),
        fuel.get("H").unwrap_or(0),
        fuel.get("O").unwrap_or(0),
    )
}

/// Check that `fuel` is a burnable CₓHᵧO_z compound and return O₂ per mole.
fn validate_fuel(fuel: &ElementCount) -> ChemResult<f64> {
    if let Some(symbol) = fuel.first_outside(&FUEL_ELEMENTS) {
        return Err(ChemError::unsupported_element(symbol, "combustion (C, H, O only)"));
    }
    let (x, y, z) = fuel_counts(fuel);
    if x == 0 && y == 0 {
        return Err(ChemError::domain(
            "fuel contains no carbon or hydrogen",
            format!("{} has nothing to oxidize", fuel),
        ));
    }
    let o2 = o2_per_mole(x, y, z);
    if o2 <= 0.0 {
        return Err(ChemError::domain(
            "fuel must consume oxygen",
            format!("{} needs {} mol O₂ per mol", fuel, o2),
        ));
    }
    Ok(o2)
}

fn complete_coefficients(
    fuel: &ElementCount,
    fuel_moles: f64,
    o2_per_fuel: f64,
) -> CombustionCoefficients {
    let (x, y, _) = fuel_counts(fuel);
    CombustionCoefficients {
        fuel: fuel_moles,
        oxygen: o2_per_fuel * fuel_moles,
        carbon_dioxide: co2_per_mole(x) * fuel_moles,
        water: h2o_per_mole(y) * fuel_moles,
    }
}

/// Balance the complete combustion of `fuel_moles` mol of `fuel`.
///
/// # Errors
///
/// - `UnsupportedElement` if the fuel has elements other than C, H, O
/// - `InvalidQuantity` if `fuel_moles` is not positive
/// - `Domain` if the fuel has nothing to burn
pub fn balance_combustion(fuel: &ElementCount, fuel_moles: f64) -> ChemResult<CombustionResult> {
    let o2_per_fuel = validate_fuel(fuel)?;
    let fuel_moles = require_positive("fuel_moles", fuel_moles)?;
    let coefficients = complete_coefficients(fuel, fuel_moles, o2_per_fuel);
    debug!("balanced {} mol {}: {:?}", fuel_moles, fuel, coefficients);

    Ok(CombustionResult {
        fuel: fuel.to_formula(),
        fuel_moles,
        classification: CombustionClass::Complete,
        description: CombustionClass::Complete.description().to_string(),
        oxygen_required: coefficients.oxygen,
        oxygen_available: None,
        coefficients: Some(coefficients),
        equation: BalancedEquation::for_fuel(fuel),
    })
}

/// Classify `oxidant_moles` mol of O₂ against one mole of `fuel`.
pub fn classify_available_oxidant(
    fuel: &ElementCount,
    oxidant_moles: f64,
) -> ChemResult<CombustionResult> {
    classify_oxidant_for(fuel, 1.0, oxidant_moles)
}

/// Classify `oxidant_moles` mol of O₂ against `fuel_moles` mol of `fuel`.
///
/// # Errors
///
/// As [`balance_combustion`], plus `InvalidQuantity` for a non-positive
/// oxidant amount.
pub fn classify_oxidant_for(
    fuel: &ElementCount,
    fuel_moles: f64,
    oxidant_moles: f64,
) -> ChemResult<CombustionResult> {
    let o2_per_fuel = validate_fuel(fuel)?;
    let fuel_moles = require_positive("fuel_moles", fuel_moles)?;
    let oxidant_moles = require_positive("oxidant_moles", oxidant_moles)?;

    let required = o2_per_fuel * fuel_moles;
    let classification = CombustionClass::from_supply(oxidant_moles, required);
    debug!(
        "{} mol O₂ for {} mol {} (requires {}): {:?}",
        oxidant_moles, fuel_moles, fuel, required, classification
    );

    let (coefficients, equation) = match classification {
        CombustionClass::Complete => (
            Some(complete_coefficients(fuel, fuel_moles, o2_per_fuel)),
            BalancedEquation::for_fuel(fuel),
        ),
        CombustionClass::IncompleteCO | CombustionClass::IncompleteSoot => (None, None),
    };

    Ok(CombustionResult {
        fuel: fuel.to_formula(),
        fuel_moles,
        classification,
        description: classification.description().to_string(),
        oxygen_required: required,
        oxygen_available: Some(oxidant_moles),
        coefficients,
        equation,
    })
}

/// Heat released by burning a mass of fuel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombustionEnergyResult {
    pub fuel: String,
    pub molar_mass_g_per_mol: f64,
    /// Fuel burned (mol)
    pub fuel_moles: f64,
    /// |n·ΔH_c| (kJ)
    pub energy_released_kj: f64,
    pub coefficients: CombustionCoefficients,
}

/// Energy released by the complete combustion of `mass_g` grams of `fuel`
/// with molar enthalpy of combustion `enthalpy_kj_per_mol`.
///
/// The sign of the enthalpy is ignored; the released energy is reported as
/// a positive number.
pub fn combustion_energy(
    fuel: &ElementCount,
    mass_g: f64,
    enthalpy_kj_per_mol: f64,
) -> ChemResult<CombustionEnergyResult> {
    let o2_per_fuel = validate_fuel(fuel)?;
    if !enthalpy_kj_per_mol.is_finite() || enthalpy_kj_per_mol == 0.0 {
        return Err(ChemError::invalid_input(
            "enthalpy_kj_per_mol",
            enthalpy_kj_per_mol.to_string(),
            "Enthalpy of combustion must be a non-zero number",
        ));
    }
    let mm = molar_mass::molar_mass(fuel)?;
    let fuel_moles = molar_mass::mass_to_moles(mass_g, fuel)?;

    Ok(CombustionEnergyResult {
        fuel: fuel.to_formula(),
        molar_mass_g_per_mol: mm,
        fuel_moles,
        energy_released_kj: (fuel_moles * enthalpy_kj_per_mol).abs(),
        coefficients: complete_coefficients(fuel, fuel_moles, o2_per_fuel),
    })
}

/// Input parameters for balancing a complete combustion.
///
/// ## JSON Example
///
/// ```json
/// { "label": "Propane burner", "fuel": "C3H8", "fuel_moles": 2.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombustionInput {
    #[serde(default)]
    pub label: String,
    /// Fuel formula
    pub fuel: String,
    /// Fuel burned (mol)
    pub fuel_moles: f64,
}

/// Input parameters for classifying an oxygen supply.
///
/// ## JSON Example
///
/// ```json
/// { "fuel": "CH4", "oxidant_moles": 1.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OxidantCheckInput {
    #[serde(default)]
    pub label: String,
    pub fuel: String,
    /// O₂ available (mol)
    pub oxidant_moles: f64,
    /// Fuel burned (mol), 1 when omitted
    #[serde(default = "one_mole")]
    pub fuel_moles: f64,
}

/// Input parameters for the energy released by a mass of fuel.
///
/// ## JSON Example
///
/// ```json
/// { "fuel": "CH4", "mass_g": 16.04, "enthalpy_kj_per_mol": -890.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombustionEnergyInput {
    #[serde(default)]
    pub label: String,
    pub fuel: String,
    pub mass_g: f64,
    /// Molar enthalpy of combustion ΔH_c (kJ/mol, usually negative)
    pub enthalpy_kj_per_mol: f64,
}

fn one_mole() -> f64 {
    1.0
}

/// Parse and balance.
pub fn calculate_complete(input: &CombustionInput) -> ChemResult<CombustionResult> {
    balance_combustion(&formula::parse(&input.fuel)?, input.fuel_moles)
}

/// Parse and classify.
pub fn calculate_oxidant_check(input: &OxidantCheckInput) -> ChemResult<CombustionResult> {
    classify_oxidant_for(&formula::parse(&input.fuel)?, input.fuel_moles, input.oxidant_moles)
}

/// Parse and compute released energy.
pub fn calculate_energy(input: &CombustionEnergyInput) -> ChemResult<CombustionEnergyResult> {
    combustion_energy(&formula::parse(&input.fuel)?, input.mass_g, input.enthalpy_kj_per_mol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::parse;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_methane_complete() {
        let result = balance_combustion(&parse("CH4").unwrap(), 1.0).unwrap();
        assert_eq!(result.classification, CombustionClass::Complete);
        let c = result.coefficients.unwrap();
        assert_eq!(c.fuel, 1.0);
        assert_eq!(c.oxygen, 2.0);
        assert_eq!(c.carbon_dioxide, 1.0);
        assert_eq!(c.water, 2.0);
        assert_eq!(result.equation.unwrap().text, "CH₄ + 2 O₂ → CO₂ + 2 H₂O");
    }

    #[test]
    fn test_coefficients_scale_with_fuel() {
        let result = balance_combustion(&parse("C3H8").unwrap(), 2.5).unwrap();
        let c = result.coefficients.unwrap();
        assert!(approx_eq(c.oxygen, 12.5));
        assert!(approx_eq(c.carbon_dioxide, 7.5));
        assert!(approx_eq(c.water, 10.0));
        assert!(approx_eq(result.oxygen_required, 12.5));
    }

    #[test]
    fn test_fractional_coefficients() {
        let result = balance_combustion(&parse("C2H6").unwrap(), 1.0).unwrap();
        assert!(approx_eq(result.coefficients.unwrap().oxygen, 3.5));
        let eq = result.equation.unwrap();
        assert_eq!([eq.fuel, eq.oxygen, eq.carbon_dioxide, eq.water], [2, 7, 4, 6]);
        assert_eq!(eq.text, "2 C₂H₆ + 7 O₂ → 4 CO₂ + 6 H₂O");
    }

    #[test]
    fn test_oxygenated_fuels() {
        let ethanol = balance_combustion(&parse("C2H5OH").unwrap(), 1.0).unwrap();
        assert!(approx_eq(ethanol.oxygen_required, 3.0));

        let glucose = balance_combustion(&parse("C₆H₁₂O₆").unwrap(), 1.0).unwrap();
        let c = glucose.coefficients.unwrap();
        assert!(approx_eq(c.oxygen, 6.0));
        assert!(approx_eq(c.carbon_dioxide, 6.0));
        assert!(approx_eq(c.water, 6.0));
    }

    #[test]
    fn test_hydrogen_has_no_co2_term() {
        let result = balance_combustion(&parse("H2").unwrap(), 1.0).unwrap();
        assert_eq!(result.equation.unwrap().text, "2 H₂ + O₂ → 2 H₂O");
    }

    #[test]
    fn test_classification_boundaries() {
        let methane = parse("CH4").unwrap();
        let class = |o2: f64| classify_available_oxidant(&methane, o2).unwrap().classification;
        assert_eq!(class(2.0), CombustionClass::Complete);
        assert_eq!(class(3.0), CombustionClass::Complete);
        assert_eq!(class(1.99), CombustionClass::IncompleteCO);
        assert_eq!(class(1.0), CombustionClass::IncompleteCO);
        assert_eq!(class(0.99), CombustionClass::IncompleteSoot);
    }

    #[test]
    fn test_insufficient_oxygen_is_not_complete() {
        let result = classify_available_oxidant(&parse("CH4").unwrap(), 1.0).unwrap();
        assert_ne!(result.classification, CombustionClass::Complete);
        assert!(approx_eq(result.oxygen_required, 2.0));
        assert_eq!(result.oxygen_available, Some(1.0));
        assert!(result.coefficients.is_none());
        assert!(result.equation.is_none());
        assert!(result.description.contains("approximate"));
    }

    #[test]
    fn test_sufficient_oxygen_reports_coefficients() {
        let result = classify_oxidant_for(&parse("C3H8").unwrap(), 2.0, 10.0).unwrap();
        assert_eq!(result.classification, CombustionClass::Complete);
        assert!(approx_eq(result.coefficients.unwrap().carbon_dioxide, 6.0));
    }

    #[test]
    fn test_unsupported_elements() {
        match balance_combustion(&parse("CH3SH").unwrap(), 1.0) {
            Err(ChemError::UnsupportedElement { symbol, .. }) => assert_eq!(symbol, "S"),
            other => panic!("expected unsupported element, got {:?}", other),
        }
        assert!(matches!(
            classify_available_oxidant(&parse("NH3").unwrap(), 1.0),
            Err(ChemError::UnsupportedElement { .. })
        ));
    }

    #[test]
    fn test_non_positive_quantities() {
        let methane = parse("CH4").unwrap();
        for bad in [0.0, -1.0] {
            assert!(matches!(
                balance_combustion(&methane, bad),
                Err(ChemError::InvalidQuantity { .. })
            ));
            assert!(matches!(
                classify_available_oxidant(&methane, bad),
                Err(ChemError::InvalidQuantity { .. })
            ));
        }
    }

    #[test]
    fn test_non_fuels() {
        for formula in ["CO2", "O2", "H2O2"] {
            let fuel = parse(formula).unwrap();
            assert!(
                matches!(balance_combustion(&fuel, 1.0), Err(ChemError::Domain { .. })),
                "{} should not burn",
                formula
            );
        }
    }

    #[test]
    fn test_combustion_energy() {
        // 16.042 g of methane is one mole
        let result = combustion_energy(&parse("CH4").unwrap(), 16.042, -890.0).unwrap();
        assert!(approx_eq(result.fuel_moles, 1.0));
        assert!(approx_eq(result.energy_released_kj, 890.0));
        assert!(approx_eq(result.coefficients.oxygen, 2.0));
        assert!(matches!(
            combustion_energy(&parse("CH4").unwrap(), 16.0, 0.0),
            Err(ChemError::InvalidInput { .. })
        ));
        assert!(matches!(
            combustion_energy(&parse("CH4").unwrap(), -16.0, -890.0),
            Err(ChemError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_calculate_from_inputs() {
        let input: OxidantCheckInput =
            serde_json::from_str(r#"{"fuel": "CH₄", "oxidant_moles": 0.5}"#).unwrap();
        assert_eq!(input.fuel_moles, 1.0);
        let result = calculate_oxidant_check(&input).unwrap();
        assert_eq!(result.classification, CombustionClass::IncompleteSoot);

        let input = CombustionInput {
            label: "Bad fuel".to_string(),
            fuel: "Xx2".to_string(),
            fuel_moles: 1.0,
        };
        assert_eq!(calculate_complete(&input).unwrap_err().error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_class_serialization() {
        let json = serde_json::to_string(&CombustionClass::IncompleteCO).unwrap();
        assert_eq!(json, "\"IncompleteCO\"");
        let roundtrip: CombustionClass = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, CombustionClass::IncompleteCO);
    }
}
