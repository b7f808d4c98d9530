//! # chem_core - Chemical Computation Engine
//!
//! `chem_core` is the computational heart of Stoich: formula parsing, molar
//! mass and stoichiometry, combustion balancing, and a Van der Waals real-gas
//! solver. All inputs and outputs are JSON-serializable, so any front end can
//! drive it with plain requests.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All request and result types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use chem_core::{balance_combustion, molar_mass, parse};
//!
//! let propane = parse("C3H8").unwrap();
//! let mm = molar_mass(&propane).unwrap();
//! assert!((mm - 44.094).abs() < 1e-6);
//!
//! let burn = balance_combustion(&propane, 1.0).unwrap();
//! assert_eq!(burn.oxygen_required, 5.0);
//! ```
//!
//! ## Modules
//!
//! - [`formula`] - Formula parsing into element counts
//! - [`elements`] - Static atomic mass table
//! - [`calculations`] - Molar mass, combustion and Van der Waals calculations
//! - [`solver`] - Bounded Newton-Raphson root finder
//! - [`equations`] - Closed-form chemistry and gas relations
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod elements;
pub mod equations;
pub mod errors;
pub mod formula;
pub mod solver;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::combustion::{
    balance_combustion, classify_available_oxidant, classify_oxidant_for, combustion_energy,
};
pub use calculations::molar_mass::{composition, mass_to_moles, molar_mass, moles_to_mass};
pub use calculations::van_der_waals::{solve_van_der_waals, GasState};
pub use calculations::{CalculationItem, CalculationOutput};
pub use errors::{ChemError, ChemResult};
pub use formula::{parse, ElementCount};
pub use solver::SolverSettings;
