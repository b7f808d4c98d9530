//! # Stoich CLI
//!
//! Terminal front end for chem_core.
//!
//! Usage:
//!   chem_cli                      Interactive menu
//!   chem_cli --json '<request>'   Run one JSON request, print the JSON result
//!   chem_cli --json -             Same, reading the request from stdin
//!   chem_cli --help
//!
//! Request example:
//!   chem_cli --json '{"type": "MolarMass", "formula": "C6H12O6", "mass_g": 90}'
//!
//! Set `STOICH_LOG` (error, warn, info, debug, trace) to control logging on
//! stderr; the default is `warn`.

mod prompt;
mod report;

use std::env;
use std::io::{self, Read};
use std::process;

use chem_core::calculations::combustion::{
    CombustionEnergyInput, CombustionInput, OxidantCheckInput,
};
use chem_core::calculations::molar_mass::MolarMassInput;
use chem_core::calculations::van_der_waals::{GasConstants, VanDerWaalsInput};
use chem_core::{CalculationItem, ChemError, ChemResult, GasState, SolverSettings};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use prompt::{prompt_f64, prompt_quantity, prompt_text, read_line, Quantity};

fn init_logging() {
    let level = env::var("STOICH_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);
    let mode = TerminalMode::Stderr;
    if TermLogger::init(level, Config::default(), mode, ColorChoice::Auto).is_err() {
        eprintln!("warning: logger already initialized");
    }
}

fn main() {
    init_logging();
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        None => run_interactive_menu(),
        Some("--help") | Some("-h") => print_usage(),
        Some("--json") => {
            let request = match args.get(2).map(String::as_str) {
                Some("-") => {
                    let mut buffer = String::new();
                    if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                        eprintln!("Error: cannot read stdin: {}", e);
                        process::exit(1);
                    }
                    buffer
                }
                Some(request) => request.to_string(),
                None => {
                    eprintln!("Error: --json needs a request or '-'");
                    print_usage();
                    process::exit(1);
                }
            };
            match run_json(&request) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    print_error(&e);
                    process::exit(1);
                }
            }
        }
        Some(other) => {
            eprintln!("Unknown option: {}", other);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Stoich - chemical calculations");
    println!();
    println!("Usage:");
    println!("  chem_cli                      Interactive menu");
    println!("  chem_cli --json '<request>'   Run a JSON request");
    println!("  chem_cli --json -             Read the JSON request from stdin");
    println!();
    println!("Request types: MolarMass, Combustion, OxidantCheck, CombustionEnergy, VanDerWaals");
    println!("Example:");
    println!("  chem_cli --json '{{\"type\": \"Combustion\", \"fuel\": \"C3H8\", \"fuel_moles\": 2}}'");
    println!();
    println!("Environment:");
    println!("  STOICH_LOG   error | warn | info | debug | trace (default: warn)");
}

/// Decode a `CalculationItem`, run it, and return the pretty JSON result.
fn run_json(request: &str) -> ChemResult<String> {
    let item: CalculationItem = serde_json::from_str(request)?;
    info!("running {} '{}'", item.calc_type(), item.label());
    let output = item.run()?;
    Ok(serde_json::to_string_pretty(&output)?)
}

fn print_error(e: &ChemError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn run_interactive_menu() {
    loop {
        show_main_menu();
        let Some(choice) = read_line("Enter your choice: ") else {
            break;
        };
        let item = match choice.as_str() {
            "1" => molar_mass_item(),
            "2" => combustion_item(),
            "3" => oxidant_check_item(),
            "4" => energy_item(),
            "5" => van_der_waals_item(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => {
                println!("Invalid choice. Please try again.");
                continue;
            }
        };
        println!();
        match item.and_then(|item| item.run()) {
            Ok(output) => match report::render(&output) {
                Ok(text) => print!("{}", text),
                Err(e) => eprintln!("Error: cannot format report: {}", e),
            },
            Err(e) => print_error(&e),
        }
    }
}

fn show_main_menu() {
    println!();
    println!("Stoich - chemical calculations");
    println!("1. Molar mass");
    println!("2. Combustion balance");
    println!("3. Oxidant check");
    println!("4. Combustion energy");
    println!("5. Van der Waals gas");
    println!("0. Exit");
}

fn molar_mass_item() -> ChemResult<CalculationItem> {
    let formula = prompt_text("Formula [H2O]: ", "H2O");
    let mass_g = prompt_quantity(
        "Sample mass, e.g. 10 g or 1.5 kg (blank to skip): ",
        Quantity::Mass,
    );
    let moles = match mass_g {
        Some(_) => None,
        None => prompt_quantity("Amount in mol (blank to skip): ", Quantity::Amount),
    };
    Ok(CalculationItem::MolarMass(MolarMassInput {
        label: formula.clone(),
        formula,
        mass_g,
        moles,
    }))
}

fn combustion_item() -> ChemResult<CalculationItem> {
    let fuel = prompt_text("Fuel formula [CH4]: ", "CH4");
    let fuel_moles = prompt_f64("Fuel amount (mol) [1.0]: ", 1.0);
    Ok(CalculationItem::Combustion(CombustionInput {
        label: fuel.clone(),
        fuel,
        fuel_moles,
    }))
}

fn oxidant_check_item() -> ChemResult<CalculationItem> {
    let fuel = prompt_text("Fuel formula [CH4]: ", "CH4");
    let fuel_moles = prompt_f64("Fuel amount (mol) [1.0]: ", 1.0);
    let oxidant_moles = prompt_f64("O₂ available (mol) [2.0]: ", 2.0);
    Ok(CalculationItem::OxidantCheck(OxidantCheckInput {
        label: fuel.clone(),
        fuel,
        oxidant_moles,
        fuel_moles,
    }))
}

fn energy_item() -> ChemResult<CalculationItem> {
    let fuel = prompt_text("Fuel formula [CH4]: ", "CH4");
    let mass_g = prompt_quantity("Fuel mass, e.g. 16 g: ", Quantity::Mass)
        .ok_or_else(|| ChemError::missing_field("mass_g"))?;
    let enthalpy_kj_per_mol = prompt_f64("Enthalpy of combustion (kJ/mol) [-890.0]: ", -890.0);
    Ok(CalculationItem::CombustionEnergy(CombustionEnergyInput {
        label: fuel.clone(),
        fuel,
        mass_g,
        enthalpy_kj_per_mol,
    }))
}

fn van_der_waals_item() -> ChemResult<CalculationItem> {
    let names: Vec<&str> = GasConstants::presets().iter().map(|g| g.name).collect();
    let gas = prompt_text(&format!("Gas ({}, or 'custom') [N2]: ", names.join(", ")), "N2");
    let (label, a, b) = match GasConstants::preset(&gas) {
        Some(preset) => (preset.name.to_string(), preset.a, preset.b),
        None => {
            let a = prompt_f64("a (L²·atm/mol²) [0.0]: ", 0.0);
            let b = prompt_f64("b (L/mol) [0.0]: ", 0.0);
            (gas, a, b)
        }
    };

    println!("Leave exactly one value blank to solve for it.");
    let state = GasState {
        pressure_atm: prompt_quantity("Pressure (atm, kPa, mmHg): ", Quantity::Pressure),
        volume_l: prompt_quantity("Volume (L, mL): ", Quantity::Volume),
        moles: prompt_quantity("Amount (mol): ", Quantity::Amount),
        temperature_k: prompt_quantity("Temperature (K, C): ", Quantity::Temperature),
    };

    Ok(CalculationItem::VanDerWaals(VanDerWaalsInput {
        label,
        state,
        a,
        b,
        settings: SolverSettings::default(),
    }))
}
