//! Line-based prompting and unit-suffixed number parsing.
//!
//! Quantities may carry a unit suffix (`25 C`, `101.325 kPa`, `500 mL`) and
//! are converted to the engine's canonical units. A bare number is taken to
//! be in the canonical unit already.

use std::io::{self, BufRead, Write};

use chem_core::units::{
    Atm, Celsius, Grams, Kelvin, KiloPascal, Kilograms, Liters, Milliliters, MmHg,
};

/// Kind of physical quantity being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Pressure,
    Temperature,
    Volume,
    Mass,
    Amount,
}

impl Quantity {
    fn accepted_units(&self) -> &'static str {
        match self {
            Quantity::Pressure => "atm, kPa, mmHg, torr",
            Quantity::Temperature => "K, C",
            Quantity::Volume => "L, mL",
            Quantity::Mass => "g, kg",
            Quantity::Amount => "mol",
        }
    }

    /// Convert `value` in `unit` to the canonical unit.
    fn to_canonical(self, value: f64, unit: &str) -> Option<f64> {
        let unit = unit.to_ascii_lowercase();
        let converted = match (self, unit.as_str()) {
            (_, "") => value,
            (Quantity::Pressure, "atm") => value,
            (Quantity::Pressure, "kpa") => Atm::from(KiloPascal(value)).value(),
            (Quantity::Pressure, "mmhg" | "torr") => Atm::from(MmHg(value)).value(),
            (Quantity::Temperature, "k") => value,
            (Quantity::Temperature, "c" | "°c") => Kelvin::from(Celsius(value)).value(),
            (Quantity::Volume, "l") => value,
            (Quantity::Volume, "ml") => Liters::from(Milliliters(value)).value(),
            (Quantity::Mass, "g") => value,
            (Quantity::Mass, "kg") => Grams::from(Kilograms(value)).value(),
            (Quantity::Amount, "mol") => value,
            _ => return None,
        };
        Some(converted)
    }
}

/// Parse `"<number> [unit]"` into the canonical unit of `kind`.
pub fn parse_quantity(text: &str, kind: Quantity) -> Result<f64, String> {
    let text = text.trim();
    if let Ok(value) = text.parse::<f64>() {
        return Ok(value);
    }
    let (number, unit) = match text.split_once(char::is_whitespace) {
        Some((number, unit)) => (number, unit.trim()),
        None => match text.find(|c: char| c.is_alphabetic() || c == '°') {
            Some(i) if text[..i].parse::<f64>().is_ok() => (&text[..i], &text[i..]),
            _ => (text, ""),
        },
    };
    let value: f64 = number
        .parse()
        .map_err(|_| format!("'{}' is not a number", number))?;
    kind.to_canonical(value, unit).ok_or_else(|| {
        format!("unknown unit '{}' (use {})", unit, kind.accepted_units())
    })
}

/// Print `prompt` and read one trimmed line. `None` on end of input.
pub fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

pub fn prompt_text(prompt: &str, default: &str) -> String {
    match read_line(prompt) {
        Some(line) if !line.is_empty() => line,
        _ => default.to_string(),
    }
}

pub fn prompt_f64(prompt: &str, default: f64) -> f64 {
    loop {
        match read_line(prompt) {
            Some(line) if !line.is_empty() => match line.parse() {
                Ok(value) => return value,
                Err(_) => println!("  '{}' is not a number", line),
            },
            _ => return default,
        }
    }
}

/// Read a quantity with an optional unit suffix; blank input gives `None`.
pub fn prompt_quantity(prompt: &str, kind: Quantity) -> Option<f64> {
    loop {
        let line = read_line(prompt)?;
        if line.is_empty() {
            return None;
        }
        match parse_quantity(&line, kind) {
            Ok(value) => return Some(value),
            Err(message) => println!("  {}", message),
        }
    }
}
