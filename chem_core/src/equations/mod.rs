//! # Chemistry Equations
//!
//! Closed-form relations used by the calculations, kept in one place so
//! each formula can be checked against its textbook form.
//!
//! ## Modules
//!
//! - [`gas`] - Ideal gas and Van der Waals equations of state
//! - [`combustion`] - Stoichiometric coefficients for CₓHᵧO_z combustion
//!
//! ## Units
//!
//! - Pressure: atm
//! - Volume: L
//! - Temperature: K
//! - Amount: mol

pub mod combustion;
pub mod gas;

pub use gas::{
    compressibility_factor,
    excluded_volume,
    ideal_moles,
    ideal_pressure,
    ideal_temperature,
    ideal_volume,
    vdw_pressure,
    vdw_temperature,
    R_L_ATM,
};

pub use combustion::{co2_per_mole, h2o_per_mole, o2_per_mole, whole_number_coefficients};
