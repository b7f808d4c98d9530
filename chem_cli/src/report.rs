//! Plain-text reports for calculation results.

use std::fmt::Write;

use chem_core::calculations::combustion::{CombustionEnergyResult, CombustionResult};
use chem_core::calculations::molar_mass::MolarMassResult;
use chem_core::calculations::van_der_waals::VanDerWaalsResult;
use chem_core::calculations::CalculationOutput;

const RULE: &str = "═══════════════════════════════════════";

pub fn render(output: &CalculationOutput) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    match output {
        CalculationOutput::MolarMass(r) => molar_mass(&mut out, r)?,
        CalculationOutput::Combustion(r) | CalculationOutput::OxidantCheck(r) => {
            combustion(&mut out, r)?
        }
        CalculationOutput::CombustionEnergy(r) => energy(&mut out, r)?,
        CalculationOutput::VanDerWaals(r) => van_der_waals(&mut out, r)?,
    }
    Ok(out)
}

fn header(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  {}", title)?;
    writeln!(out, "{}", RULE)
}

fn molar_mass(out: &mut String, r: &MolarMassResult) -> std::fmt::Result {
    header(out, &format!("MOLAR MASS: {}", r.display_formula))?;
    writeln!(out, "  M = {:.3} g/mol", r.molar_mass_g_per_mol)?;
    writeln!(out)?;
    writeln!(out, "Composition:")?;
    for c in &r.composition {
        writeln!(
            out,
            "  {:<3} × {:<3} {:>10.3} g/mol  {:>6.2} %",
            c.symbol, c.count, c.mass_g_per_mol, c.mass_percent
        )?;
    }
    if let Some(n) = r.moles {
        writeln!(out)?;
        writeln!(out, "  Moles:  {:.4} mol", n)?;
    }
    if let Some(m) = r.mass_g {
        writeln!(out)?;
        writeln!(out, "  Mass:   {:.4} g", m)?;
    }
    Ok(())
}

fn combustion(out: &mut String, r: &CombustionResult) -> std::fmt::Result {
    header(out, &format!("COMBUSTION: {} mol {}", r.fuel_moles, r.fuel))?;
    writeln!(out, "  {}", r.description)?;
    writeln!(out, "  O₂ required:  {:.4} mol", r.oxygen_required)?;
    if let Some(available) = r.oxygen_available {
        writeln!(out, "  O₂ available: {:.4} mol", available)?;
    }
    if let Some(eq) = &r.equation {
        writeln!(out)?;
        writeln!(out, "  {}", eq.text)?;
    }
    if let Some(c) = &r.coefficients {
        writeln!(out)?;
        writeln!(out, "Amounts (mol):")?;
        writeln!(
            out,
            "  Fuel {:.4}  O₂ {:.4}  CO₂ {:.4}  H₂O {:.4}",
            c.fuel, c.oxygen, c.carbon_dioxide, c.water
        )?;
    }
    Ok(())
}

fn energy(out: &mut String, r: &CombustionEnergyResult) -> std::fmt::Result {
    header(out, &format!("COMBUSTION ENERGY: {}", r.fuel))?;
    writeln!(out, "  M = {:.3} g/mol", r.molar_mass_g_per_mol)?;
    writeln!(out, "  Fuel burned:     {:.4} mol", r.fuel_moles)?;
    writeln!(out, "  Energy released: {:.2} kJ", r.energy_released_kj)?;
    writeln!(out, "  O₂ consumed:     {:.4} mol", r.coefficients.oxygen)?;
    writeln!(out, "  CO₂ produced:    {:.4} mol", r.coefficients.carbon_dioxide)?;
    writeln!(out, "  H₂O produced:    {:.4} mol", r.coefficients.water)
}

fn van_der_waals(out: &mut String, r: &VanDerWaalsResult) -> std::fmt::Result {
    let symbol = r.solved_for.symbol();
    let unit = r.solved_for.unit();
    header(out, &format!("VAN DER WAALS: solved for {}", symbol))?;
    writeln!(out, "  {} (real)  = {:.4} {}", symbol, r.value, unit)?;
    writeln!(out, "  {} (ideal) = {:.4} {}", symbol, r.ideal_gas_value, unit)?;
    writeln!(out, "  Deviation  = {:+.2} %", r.deviation_percent)?;
    writeln!(out, "  Z          = {:.4}", r.compressibility_factor)?;
    if r.iterations > 0 {
        writeln!(out, "  Iterations = {}", r.iterations)?;
    }
    if !r.converged {
        writeln!(out)?;
        writeln!(out, "  [WARN] not converged (residual {:.2e} atm)", r.residual)?;
    }
    Ok(())
}
