//! # Element Database
//!
//! The periodic table from hydrogen (Z = 1) through curium (Z = 96) with
//! standard atomic masses in g/mol.
//!
//! This table is the single source of truth for element symbols: the
//! formula parser uses it to recognize tokens and the molar mass engine uses
//! it to look up masses, so the two can never disagree about what an element
//! is.
//!
//! The lookup map is built lazily on first use and is never written after
//! that, so any number of threads can read it without locking.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::elements;
//!
//! assert!(elements::is_element("Na"));
//! assert!(!elements::is_element("Xx"));
//! assert_eq!(elements::atomic_mass("O").unwrap(), 16.00);
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::errors::{ChemError, ChemResult};

/// A single periodic table entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Element {
    /// Case-sensitive symbol, one uppercase letter optionally followed by one lowercase letter
    pub symbol: &'static str,
    /// English name
    pub name: &'static str,
    /// Atomic number Z
    pub atomic_number: u8,
    /// Standard atomic mass (g/mol)
    pub atomic_mass: f64,
}

const fn el(
    atomic_number: u8,
    symbol: &'static str,
    name: &'static str,
    atomic_mass: f64,
) -> Element {
    Element {
        symbol,
        name,
        atomic_number,
        atomic_mass,
    }
}

/// Periodic table in atomic-number order.
pub const ELEMENTS: &[Element] = &[
    el(1, "H", "Hydrogen", 1.008),
    el(2, "He", "Helium", 4.003),
    el(3, "Li", "Lithium", 6.941),
    el(4, "Be", "Beryllium", 9.012),
    el(5, "B", "Boron", 10.81),
    el(6, "C", "Carbon", 12.01),
    el(7, "N", "Nitrogen", 14.01),
    el(8, "O", "Oxygen", 16.00),
    el(9, "F", "Fluorine", 19.00),
    el(10, "Ne", "Neon", 20.18),
    el(11, "Na", "Sodium", 22.99),
    el(12, "Mg", "Magnesium", 24.31),
    el(13, "Al", "Aluminium", 26.98),
    el(14, "Si", "Silicon", 28.09),
    el(15, "P", "Phosphorus", 30.97),
    el(16, "S", "Sulfur", 32.07),
    el(17, "Cl", "Chlorine", 35.45),
    el(18, "Ar", "Argon", 39.95),
    el(19, "K", "Potassium", 39.10),
    el(20, "Ca", "Calcium", 40.08),
    el(21, "Sc", "Scandium", 44.96),
    el(22, "Ti", "Titanium", 47.87),
    el(23, "V", "Vanadium", 50.94),
    el(24, "Cr", "Chromium", 52.00),
    el(25, "Mn", "Manganese", 54.94),
    el(26, "Fe", "Iron", 55.85),
    el(27, "Co", "Cobalt", 58.93),
    el(28, "Ni", "Nickel", 58.69),
    el(29, "Cu", "Copper", 63.55),
    el(30, "Zn", "Zinc", 65.39),
    el(31, "Ga", "Gallium", 69.72),
    el(32, "Ge", "Germanium", 72.64),
    el(33, "As", "Arsenic", 74.92),
    el(34, "Se", "Selenium", 78.96),
    el(35, "Br", "Bromine", 79.90),
    el(36, "Kr", "Krypton", 83.80),
    el(37, "Rb", "Rubidium", 85.47),
    el(38, "Sr", "Strontium", 87.62),
    el(39, "Y", "Yttrium", 88.91),
    el(40, "Zr", "Zirconium", 91.22),
    el(41, "Nb", "Niobium", 92.91),
    el(42, "Mo", "Molybdenum", 95.94),
    el(43, "Tc", "Technetium", 98.00),
    el(44, "Ru", "Ruthenium", 101.1),
    el(45, "Rh", "Rhodium", 102.9),
    el(46, "Pd", "Palladium", 106.4),
    el(47, "Ag", "Silver", 107.9),
    el(48, "Cd", "Cadmium", 112.4),
    el(49, "In", "Indium", 114.8),
    el(50, "Sn", "Tin", 118.7),
    el(51, "Sb", "Antimony", 121.8),
    el(52, "Te", "Tellurium", 127.6),
    el(53, "I", "Iodine", 126.9),
    el(54, "Xe", "Xenon", 131.3),
    el(55, "Cs", "Caesium", 132.9),
    el(56, "Ba", "Barium", 137.3),
    el(57, "La", "Lanthanum", 138.9),
    el(58, "Ce", "Cerium", 140.1),
    el(59, "Pr", "Praseodymium", 140.9),
    el(60, "Nd", "Neodymium", 144.2),
    el(61, "Pm", "Promethium", 145.0),
    el(62, "Sm", "Samarium", 150.4),
    el(63, "Eu", "Europium", 152.0),
    el(64, "Gd", "Gadolinium", 157.3),
    el(65, "Tb", "Terbium", 158.9),
    el(66, "Dy", "Dysprosium", 162.5),
    el(67, "Ho", "Holmium", 164.9),
    el(68, "Er", "Erbium", 167.3),
    el(69, "Tm", "Thulium", 168.9),
    el(70, "Yb", "Ytterbium", 173.0),
    el(71, "Lu", "Lutetium", 175.0),
    el(72, "Hf", "Hafnium", 178.5),
    el(73, "Ta", "Tantalum", 180.9),
    el(74, "W", "Tungsten", 183.8),
    el(75, "Re", "Rhenium", 186.2),
    el(76, "Os", "Osmium", 190.2),
    el(77, "Ir", "Iridium", 192.2),
    el(78, "Pt", "Platinum", 195.1),
    el(79, "Au", "Gold", 197.0),
    el(80, "Hg", "Mercury", 200.6),
    el(81, "Tl", "Thallium", 204.4),
    el(82, "Pb", "Lead", 207.2),
    el(83, "Bi", "Bismuth", 209.0),
    el(84, "Po", "Polonium", 209.0),
    el(85, "At", "Astatine", 210.0),
    el(86, "Rn", "Radon", 222.0),
    el(87, "Fr", "Francium", 223.0),
    el(88, "Ra", "Radium", 226.0),
    el(89, "Ac", "Actinium", 227.0),
    el(90, "Th", "Thorium", 232.0),
    el(91, "Pa", "Protactinium", 231.0),
    el(92, "U", "Uranium", 238.0),
    el(93, "Np", "Neptunium", 237.0),
    el(94, "Pu", "Plutonium", 244.0),
    el(95, "Am", "Americium", 243.0),
    el(96, "Cm", "Curium", 247.0),
];

static BY_SYMBOL: Lazy<HashMap<&'static str, &'static Element>> =
    Lazy::new(|| ELEMENTS.iter().map(|e| (e.symbol, e)).collect());

/// Look up an element by its case-sensitive symbol.
pub fn lookup(symbol: &str) -> Option<&'static Element> {
    BY_SYMBOL.get(symbol).copied()
}

/// Whether `symbol` names a known element.
pub fn is_element(symbol: &str) -> bool {
    BY_SYMBOL.contains_key(symbol)
}

/// Atomic mass in g/mol.
///
/// # Errors
///
/// `UnknownElement` when the symbol is not in the table.
pub fn atomic_mass(symbol: &str) -> ChemResult<f64> {
    lookup(symbol)
        .map(|e| e.atomic_mass)
        .ok_or_else(|| ChemError::unknown_element(symbol))
}

/// All elements in atomic-number order.
pub fn all() -> &'static [Element] {
    ELEMENTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ordered_and_complete() {
        assert_eq!(ELEMENTS.len(), 96);
        for (i, e) in all().iter().enumerate() {
            assert_eq!(e.atomic_number as usize, i + 1, "{} out of order", e.symbol);
            assert!(e.atomic_mass > 0.0);
        }
    }

    #[test]
    fn test_symbols_are_well_formed_and_unique() {
        for e in ELEMENTS {
            let mut chars = e.symbol.chars();
            assert!(chars.next().unwrap().is_ascii_uppercase(), "{}", e.symbol);
            match chars.next() {
                None => {}
                Some(c) => assert!(c.is_ascii_lowercase(), "{}", e.symbol),
            }
            assert!(chars.next().is_none(), "{}", e.symbol);
        }
        assert_eq!(BY_SYMBOL.len(), ELEMENTS.len());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(lookup("Co").unwrap().name, "Cobalt");
        assert!(lookup("CO").is_none());
        assert!(lookup("co").is_none());
    }

    #[test]
    fn test_atomic_mass() {
        assert_eq!(atomic_mass("H").unwrap(), 1.008);
        assert_eq!(atomic_mass("Cl").unwrap(), 35.45);
        assert_eq!(atomic_mass("Xx").unwrap_err(), ChemError::unknown_element("Xx"));
    }
}
