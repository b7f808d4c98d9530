//! # Formula Parser
//!
//! Turns a molecular formula string into an ordered element→count table.
//!
//! ## Grammar
//!
//! ```text
//! formula := item+
//! item    := symbol count? | "(" item+ ")" count?
//! symbol  := [A-Z][a-z]?          (must exist in the element table)
//! count   := digit+               (ASCII or Unicode subscript ₀-₉, >= 1)
//! ```
//!
//! Subscript digits are normalized to ASCII before scanning, so `H₂O` and
//! `H2O` parse to the same table. Whitespace between items is ignored.
//! Repeated symbols are summed (`CH3COOH` → C2 H4 O2) and group counts are
//! multiplied through (`Ca(OH)2` → Ca1 O2 H2).
//!
//! The parser is syntactic only: it checks that every symbol is a real
//! element, not that the compound makes chemical sense.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::formula::parse;
//!
//! let water = parse("H₂O").unwrap();
//! assert_eq!(water.get("H"), Some(2));
//! assert_eq!(water.get("O"), Some(1));
//! assert_eq!(water, parse("H2O").unwrap());
//! ```

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::elements;
use crate::errors::{ChemError, ChemResult};

const SUBSCRIPT_ZERO: u32 = '₀' as u32;

/// One row of an [`ElementCount`] table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementEntry {
    /// Element symbol (case-sensitive)
    pub symbol: String,
    /// Number of atoms, always >= 1
    pub count: u32,
}

/// Ordered element→count table produced by [`parse`].
///
/// Entries keep the order in which each symbol first appeared in the
/// formula. Every symbol is a known element and every count is at least 1.
///
/// ## JSON Example
///
/// ```json
/// [
///   { "symbol": "C", "count": 3 },
///   { "symbol": "H", "count": 8 }
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ElementEntry>", into = "Vec<ElementEntry>")]
pub struct ElementCount {
    entries: Vec<ElementEntry>,
}

impl ElementCount {
    /// Count for `symbol`, or `None` if the element is absent.
    pub fn get(&self, symbol: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.symbol == symbol).map(|e| e.count)
    }

    /// Iterate over `(symbol, count)` in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.entries.iter().map(|e| (e.symbol.as_str(), e.count))
    }

    /// Number of distinct elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Element symbols in first-appearance order.
    pub fn symbols(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.symbol.as_str()).collect()
    }

    /// First symbol not contained in `allowed`, if any.
    pub fn first_outside<'a>(&'a self, allowed: &[&str]) -> Option<&'a str> {
        self.entries
            .iter()
            .map(|e| e.symbol.as_str())
            .find(|s| !allowed.contains(s))
    }

    /// True when every symbol is in `allowed`.
    pub fn contains_only(&self, allowed: &[&str]) -> bool {
        self.first_outside(allowed).is_none()
    }

    /// Compact ASCII formula with counts of 1 omitted, e.g. `C2H6O`.
    pub fn to_formula(&self) -> String {
        let mut out = String::new();
        for e in &self.entries {
            out.push_str(&e.symbol);
            if e.count != 1 {
                out.push_str(&e.count.to_string());
            }
        }
        out
    }

    /// Display formula with Unicode subscripts, e.g. `C₂H₆O`.
    pub fn to_subscript_formula(&self) -> String {
        to_subscripts(&self.to_formula())
    }

    fn add(&mut self, symbol: &str, count: u32) -> Option<()> {
        match self.entries.iter_mut().find(|e| e.symbol == symbol) {
            Some(entry) => entry.count = entry.count.checked_add(count)?,
            None => self.entries.push(ElementEntry {
                symbol: symbol.to_string(),
                count,
            }),
        }
        Some(())
    }

    fn merge_scaled(&mut self, other: &ElementCount, factor: u32) -> Option<()> {
        for e in &other.entries {
            self.add(&e.symbol, e.count.checked_mul(factor)?)?;
        }
        Some(())
    }
}

impl fmt::Display for ElementCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_formula())
    }
}

impl TryFrom<Vec<ElementEntry>> for ElementCount {
    type Error = ChemError;

    fn try_from(entries: Vec<ElementEntry>) -> Result<Self, Self::Error> {
        let mut table = ElementCount::default();
        for entry in entries {
            if !elements::is_element(&entry.symbol) {
                return Err(ChemError::unknown_element(entry.symbol));
            }
            if entry.count == 0 {
                return Err(ChemError::invalid_quantity(
                    entry.symbol,
                    "0",
                    "Element counts must be at least 1",
                ));
            }
            table.add(&entry.symbol, entry.count).ok_or_else(|| {
                let count = entry.count.to_string();
                ChemError::invalid_quantity(&entry.symbol, count, "Count overflow")
            })?;
        }
        Ok(table)
    }
}

impl From<ElementCount> for Vec<ElementEntry> {
    fn from(table: ElementCount) -> Self {
        table.entries
    }
}

/// Replace subscript digits `₀`-`₉` with ASCII digits.
pub fn normalize_subscripts(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '₀'..='₉' => char::from_digit(c as u32 - SUBSCRIPT_ZERO, 10).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Replace ASCII digits with subscript digits (display only).
pub fn to_subscripts(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(SUBSCRIPT_ZERO + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// Parse a molecular formula into an element count table.
///
/// # Errors
///
/// `ChemError::Parse` with the offending token and its character position
/// when the formula is empty, contains an unknown symbol or stray
/// character, has unbalanced or empty parentheses, or carries a zero or
/// overflowing count.
pub fn parse(formula: &str) -> ChemResult<ElementCount> {
    let normalized = normalize_subscripts(formula);
    let table = Scanner::new(formula, &normalized).run()?;
    debug!("parsed formula '{}' -> {}", formula, table);
    Ok(table)
}

struct Scanner<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str, normalized: &str) -> Self {
        Scanner {
            source,
            chars: normalized.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, token: impl Into<String>, position: usize, reason: &str) -> ChemError {
        ChemError::parse(self.source, token, position, reason)
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.chars.len() && self.chars[self.pos].is_whitespace() {
            self.pos += 1;
        }
    }

    fn run(mut self) -> ChemResult<ElementCount> {
        let mut root = ElementCount::default();
        // Open groups: (position of '(', accumulated contents)
        let mut groups: Vec<(usize, ElementCount)> = Vec::new();

        self.skip_whitespace();
        if self.pos >= self.chars.len() {
            return Err(self.error("", 0, "empty formula"));
        }

        loop {
            self.skip_whitespace();
            if self.pos >= self.chars.len() {
                break;
            }
            let start = self.pos;
            match self.chars[start] {
                '(' => {
                    groups.push((start, ElementCount::default()));
                    self.pos += 1;
                }
                ')' => {
                    let (open, group) = groups
                        .pop()
                        .ok_or_else(|| self.error(")", start, "unmatched closing parenthesis"))?;
                    if group.is_empty() {
                        return Err(self.error("()", open, "empty group"));
                    }
                    self.pos += 1;
                    let multiplier = self.read_count(start)?;
                    let target = match groups.last_mut() {
                        Some((_, parent)) => parent,
                        None => &mut root,
                    };
                    target
                        .merge_scaled(&group, multiplier)
                        .ok_or_else(|| self.error(")", start, "count too large"))?;
                }
                c if c.is_ascii_uppercase() => {
                    self.pos += 1;
                    if self.pos < self.chars.len() && self.chars[self.pos].is_ascii_lowercase() {
                        self.pos += 1;
                    }
                    let symbol: String = self.chars[start..self.pos].iter().collect();
                    if !elements::is_element(&symbol) {
                        return Err(self.error(symbol, start, "unrecognized element symbol"));
                    }
                    let count = self.read_count(start)?;
                    let target = match groups.last_mut() {
                        Some((_, parent)) => parent,
                        None => &mut root,
                    };
                    target
                        .add(&symbol, count)
                        .ok_or_else(|| self.error(symbol.as_str(), start, "count too large"))?;
                }
                _ => {
                    while self.pos < self.chars.len() {
                        let c = self.chars[self.pos];
                        if c.is_ascii_uppercase() || c == '(' || c == ')' || c.is_whitespace() {
                            break;
                        }
                        self.pos += 1;
                    }
                    let token: String = self.chars[start..self.pos].iter().collect();
                    return Err(self.error(token, start, "unexpected token"));
                }
            }
        }

        if let Some((open, _)) = groups.last() {
            return Err(self.error("(", *open, "unmatched opening parenthesis"));
        }
        Ok(root)
    }

    /// Read the digit run at the cursor; an absent run means 1.
    fn read_count(&mut self, owner: usize) -> ChemResult<u32> {
        let start = self.pos;
        while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if start == self.pos {
            return Ok(1);
        }
        let digits: String = self.chars[start..self.pos].iter().collect();
        let count: u32 = digits
            .parse()
            .map_err(|_| self.error(digits.as_str(), start, "count too large"))?;
        if count == 0 {
            let token: String = self.chars[owner..self.pos].iter().collect();
            return Err(self.error(token, owner, "zero count"));
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(table: &ElementCount) -> Vec<(&str, u32)> {
        table.iter().collect()
    }

    #[test]
    fn test_simple_formulas() {
        let water = parse("H2O").unwrap();
        assert_eq!(pairs(&water), vec![("H", 2), ("O", 1)]);

        let vitamin_c = parse("C6H8O6").unwrap();
        assert_eq!(pairs(&vitamin_c), vec![("C", 6), ("H", 8), ("O", 6)]);

        let salt = parse("NaCl").unwrap();
        assert_eq!(pairs(&salt), vec![("Na", 1), ("Cl", 1)]);
    }

    #[test]
    fn test_subscript_and_ascii_digits_agree() {
        assert_eq!(parse("H2O").unwrap(), parse("H₂O").unwrap());
        assert_eq!(parse("C₆H₁₂O₆").unwrap(), parse("C6H12O6").unwrap());
        assert_eq!(parse("C₆H₁₂O₆").unwrap().get("H"), Some(12));
    }

    #[test]
    fn test_parse_is_deterministic() {
        for f in ["H2O", "C8H10N4O2", "Ca(OH)2", "CH3COOH"] {
            assert_eq!(parse(f).unwrap(), parse(f).unwrap(), "{}", f);
        }
    }

    #[test]
    fn test_repeated_symbols_are_summed() {
        let acid = parse("C5H6OOH").unwrap();
        assert_eq!(pairs(&acid), vec![("C", 5), ("H", 7), ("O", 2)]);

        let ethanol = parse("C2H5OH").unwrap();
        assert_eq!(pairs(&ethanol), vec![("C", 2), ("H", 6), ("O", 1)]);
    }

    #[test]
    fn test_groups() {
        let nitrate = parse("Ca(NO3)2").unwrap();
        assert_eq!(pairs(&nitrate), vec![("Ca", 1), ("N", 2), ("O", 6)]);

        let sulfate = parse("Al2(SO4)3").unwrap();
        assert_eq!(pairs(&sulfate), vec![("Al", 2), ("S", 3), ("O", 12)]);

        let nested = parse("K4(Fe(CN)6)").unwrap();
        assert_eq!(pairs(&nested), vec![("K", 4), ("Fe", 1), ("C", 6), ("N", 6)]);
    }

    #[test]
    fn test_whitespace_is_ignored() {
        assert_eq!(parse("  H2 O ").unwrap(), parse("H2O").unwrap());
    }

    #[test]
    fn test_unknown_symbol_reports_token_and_position() {
        match parse("Xx2") {
            Err(ChemError::Parse { token, position, .. }) => {
                assert_eq!(token, "Xx");
                assert_eq!(position, 0);
            }
            other => panic!("expected parse error, got {:?}", other),
        }

        match parse("H₂Qz") {
            Err(ChemError::Parse { token, position, .. }) => {
                assert_eq!(token, "Qz");
                assert_eq!(position, 2);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_lowercase_and_stray_tokens() {
        match parse("h2o") {
            Err(ChemError::Parse { token, position, .. }) => {
                assert_eq!(token, "h2o");
                assert_eq!(position, 0);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
        match parse("2H2O") {
            Err(ChemError::Parse { token, .. }) => assert_eq!(token, "2"),
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(parse("H2O+").is_err());
    }

    #[test]
    fn test_empty_and_zero_counts() {
        assert!(matches!(parse(""), Err(ChemError::Parse { .. })));
        assert!(matches!(parse("   "), Err(ChemError::Parse { .. })));
        match parse("H0") {
            Err(ChemError::Parse { token, reason, .. }) => {
                assert_eq!(token, "H0");
                assert_eq!(reason, "zero count");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(parse("(OH)0").is_err());
        assert!(parse("H99999999999").is_err());
    }

    #[test]
    fn test_unbalanced_groups() {
        match parse("Ca(OH2") {
            Err(ChemError::Parse { token, position, .. }) => {
                assert_eq!(token, "(");
                assert_eq!(position, 2);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(parse("CaOH)2").is_err());
        assert!(parse("Ca()2").is_err());
    }

    #[test]
    fn test_formula_rendering() {
        let propane = parse("C3H8").unwrap();
        assert_eq!(propane.to_formula(), "C3H8");
        assert_eq!(propane.to_subscript_formula(), "C₃H₈");
        assert_eq!(parse("Ca(OH)2").unwrap().to_string(), "CaO2H2");
        assert_eq!(normalize_subscripts("C₁₀H₈"), "C10H8");
        assert_eq!(to_subscripts("CO2"), "CO₂");
    }

    #[test]
    fn test_contains_only() {
        let ethanol = parse("C2H5OH").unwrap();
        assert!(ethanol.contains_only(&["C", "H", "O"]));
        let thiol = parse("CH3SH").unwrap();
        assert_eq!(thiol.first_outside(&["C", "H", "O"]), Some("S"));
    }

    #[test]
    fn test_serialization_validates() {
        let table = parse("CH4").unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"symbol":"C","count":1},{"symbol":"H","count":4}]"#);
        let roundtrip: ElementCount = serde_json::from_str(&json).unwrap();
        assert_eq!(table, roundtrip);

        assert!(serde_json::from_str::<ElementCount>(r#"[{"symbol":"Xx","count":1}]"#).is_err());
        assert!(serde_json::from_str::<ElementCount>(r#"[{"symbol":"H","count":0}]"#).is_err());
    }
}
