//! # Chemical Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - a pure function from input to `ChemResult<*Result>`
//!
//! [`CalculationItem`] wraps every input in one tagged enum so a front end
//! can decode any request from JSON and [`run`](CalculationItem::run) it.
//!
//! ## Available Calculations
//!
//! - [`molar_mass`] - Molar mass, composition, mass ↔ mole conversion
//! - [`combustion`] - Combustion balance, oxidant check, released energy
//! - [`van_der_waals`] - Real-gas state solve
//!
//! ## JSON Example
//!
//! ```json
//! { "type": "OxidantCheck", "label": "Lean burn", "fuel": "CH4", "oxidant_moles": 1.0 }
//! ```

pub mod combustion;
pub mod molar_mass;
pub mod van_der_waals;

use serde::{Deserialize, Serialize};

use crate::errors::ChemResult;

pub use combustion::{
    CombustionClass, CombustionEnergyInput, CombustionEnergyResult, CombustionInput,
    CombustionResult, OxidantCheckInput,
};
pub use molar_mass::{MolarMassInput, MolarMassResult};
pub use van_der_waals::{GasConstants, GasState, StateVariable, VanDerWaalsInput, VanDerWaalsResult};

/// Enum wrapper for all calculation requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Molar mass of a formula
    MolarMass(MolarMassInput),
    /// Complete combustion balance
    Combustion(CombustionInput),
    /// Classify an oxygen supply
    OxidantCheck(OxidantCheckInput),
    /// Heat released by burning a mass of fuel
    CombustionEnergy(CombustionEnergyInput),
    /// Van der Waals state solve
    VanDerWaals(VanDerWaalsInput),
}

/// Result of [`CalculationItem::run`], tagged like the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    MolarMass(MolarMassResult),
    Combustion(CombustionResult),
    OxidantCheck(CombustionResult),
    CombustionEnergy(CombustionEnergyResult),
    VanDerWaals(VanDerWaalsResult),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::MolarMass(i) => &i.label,
            CalculationItem::Combustion(i) => &i.label,
            CalculationItem::OxidantCheck(i) => &i.label,
            CalculationItem::CombustionEnergy(i) => &i.label,
            CalculationItem::VanDerWaals(i) => &i.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::MolarMass(_) => "MolarMass",
            CalculationItem::Combustion(_) => "Combustion",
            CalculationItem::OxidantCheck(_) => "OxidantCheck",
            CalculationItem::CombustionEnergy(_) => "CombustionEnergy",
            CalculationItem::VanDerWaals(_) => "VanDerWaals",
        }
    }

    /// Run the calculation.
    pub fn run(&self) -> ChemResult<CalculationOutput> {
        Ok(match self {
            CalculationItem::MolarMass(i) => {
                CalculationOutput::MolarMass(molar_mass::calculate(i)?)
            }
            CalculationItem::Combustion(i) => {
                CalculationOutput::Combustion(combustion::calculate_complete(i)?)
            }
            CalculationItem::OxidantCheck(i) => {
                CalculationOutput::OxidantCheck(combustion::calculate_oxidant_check(i)?)
            }
            CalculationItem::CombustionEnergy(i) => {
                CalculationOutput::CombustionEnergy(combustion::calculate_energy(i)?)
            }
            CalculationItem::VanDerWaals(i) => {
                CalculationOutput::VanDerWaals(van_der_waals::solve(i)?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ChemError;

    #[test]
    fn test_decode_and_run() {
        let item: CalculationItem =
            serde_json::from_str(r#"{"type": "MolarMass", "label": "Water", "formula": "H2O"}"#)
                .unwrap();
        assert_eq!(item.label(), "Water");
        assert_eq!(item.calc_type(), "MolarMass");
        match item.run().unwrap() {
            CalculationOutput::MolarMass(r) => {
                assert!((r.molar_mass_g_per_mol - 18.016).abs() < 1e-9)
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_output_is_tagged() {
        let item: CalculationItem = serde_json::from_str(
            r#"{"type": "OxidantCheck", "fuel": "CH4", "oxidant_moles": 1.0}"#,
        )
        .unwrap();
        let json = serde_json::to_value(item.run().unwrap()).unwrap();
        assert_eq!(json["type"], "OxidantCheck");
        assert_eq!(json["classification"], "IncompleteCO");
    }

    #[test]
    fn test_van_der_waals_request() {
        let item: CalculationItem = serde_json::from_str(
            r#"{"type": "VanDerWaals", "pressure_atm": 1.0, "moles": 1.0, "temperature_k": 273.15,
                "a": 0.0346, "b": 0.0238, "settings": {"tolerance": 1e-8}}"#,
        )
        .unwrap();
        match item.run().unwrap() {
            CalculationOutput::VanDerWaals(r) => {
                assert_eq!(r.solved_for, StateVariable::Volume);
                assert!(r.converged);
                // Helium is nearly ideal at STP
                assert!(r.deviation_percent.abs() < 0.2);
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_errors_propagate() {
        let item: CalculationItem =
            serde_json::from_str(r#"{"type": "Combustion", "fuel": "NH3", "fuel_moles": 1.0}"#)
                .unwrap();
        assert!(matches!(item.run(), Err(ChemError::UnsupportedElement { .. })));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: Result<CalculationItem, _> =
            serde_json::from_str(r#"{"type": "Titration", "label": "x"}"#);
        assert!(result.is_err());
    }
}
