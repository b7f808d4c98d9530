//! # Van der Waals Gas
//!
//! Solves `[P + a(n/V)²](V − nb) = nRT` for whichever of P, V, n, T is
//! unknown.
//!
//! ## Method
//!
//! - P and T are explicit and evaluated directly.
//! - V and n are implicit and found with [`newton_raphson`] on the
//!   pressure residual `P_vdw(x) − P`, seeded from the ideal-gas value.
//! - When Newton stalls on V (steep subcritical isotherms), the root is
//!   bracketed in (nb, ∞) and found by [`bisection`].
//!
//! Every path requires `V > nb`. The ideal-gas value of the same unknown is
//! reported next to the real-gas one.
//!
//! ## Units
//!
//! - Pressure: atm
//! - Volume: L
//! - Amount: mol
//! - Temperature: K
//! - a: L²·atm/mol²
//! - b: L/mol
//!
//! ## Example
//!
//! ```rust
//! use chem_core::calculations::van_der_waals::{solve_van_der_waals, GasConstants, GasState};
//!
//! let n2 = GasConstants::preset("N2").unwrap();
//! let known = GasState {
//!     pressure_atm: None,
//!     volume_l: Some(1.0),
//!     moles: Some(1.0),
//!     temperature_k: Some(300.0),
//! };
//! let result = solve_van_der_waals(known, n2.a, n2.b).unwrap();
//! assert!((result.value - 24.239).abs() < 1e-2);
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::equations::gas::{
    compressibility_factor, excluded_volume, ideal_moles, ideal_pressure, ideal_temperature,
    ideal_volume, vdw_pressure, vdw_temperature,
};
use crate::errors::{require_positive, ChemError, ChemResult};
use crate::solver::{bisection, newton_raphson, Domain, RootSolution, SolverSettings};

/// Shrink factor applied to the ideal mole seed until it fits below V/b.
const MOLE_SEED_SHRINK: f64 = 0.9;

/// Upper-bracket doublings tried before giving up on bisection.
const BRACKET_DOUBLINGS: usize = 64;

/// One of the four state variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateVariable {
    Pressure,
    Volume,
    Moles,
    Temperature,
}

impl StateVariable {
    pub fn symbol(&self) -> &'static str {
        match self {
            StateVariable::Pressure => "P",
            StateVariable::Volume => "V",
            StateVariable::Moles => "n",
            StateVariable::Temperature => "T",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            StateVariable::Pressure => "atm",
            StateVariable::Volume => "L",
            StateVariable::Moles => "mol",
            StateVariable::Temperature => "K",
        }
    }

    fn field(&self) -> &'static str {
        match self {
            StateVariable::Pressure => "pressure_atm",
            StateVariable::Volume => "volume_l",
            StateVariable::Moles => "moles",
            StateVariable::Temperature => "temperature_k",
        }
    }
}

/// Known state of a gas; exactly one field is left `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GasState {
    #[serde(default)]
    pub pressure_atm: Option<f64>,
    #[serde(default)]
    pub volume_l: Option<f64>,
    #[serde(default)]
    pub moles: Option<f64>,
    #[serde(default)]
    pub temperature_k: Option<f64>,
}

/// Fully validated state with the unknown identified.
struct KnownState {
    unknown: StateVariable,
    p: f64,
    v: f64,
    n: f64,
    t: f64,
}

impl GasState {
    fn slots(&self) -> [(StateVariable, Option<f64>); 4] {
        [
            (StateVariable::Pressure, self.pressure_atm),
            (StateVariable::Volume, self.volume_l),
            (StateVariable::Moles, self.moles),
            (StateVariable::Temperature, self.temperature_k),
        ]
    }

    /// The single missing variable.
    ///
    /// # Errors
    ///
    /// `MissingField` naming the first missing variable when more than one
    /// is missing, `InvalidInput` when none is.
    pub fn unknown(&self) -> ChemResult<StateVariable> {
        let missing: Vec<StateVariable> = self
            .slots()
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(var, _)| *var)
            .collect();
        match missing.as_slice() {
            [one] => Ok(*one),
            [] => Err(ChemError::invalid_input(
                "state",
                "P, V, n, T",
                "Leave exactly one of pressure, volume, moles, temperature empty",
            )),
            [first, ..] => Err(ChemError::missing_field(first.field())),
        }
    }

    fn resolve(&self) -> ChemResult<KnownState> {
        let unknown = self.unknown()?;
        let mut values = [0.0; 4];
        for (slot, (var, value)) in values.iter_mut().zip(self.slots()) {
            if let Some(value) = value {
                *slot = require_positive(var.field(), value)?;
            }
        }
        let [p, v, n, t] = values;
        Ok(KnownState { unknown, p, v, n, t })
    }
}

/// Van der Waals constants of a gas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GasConstants {
    pub name: &'static str,
    /// L²·atm/mol²
    pub a: f64,
    /// L/mol
    pub b: f64,
}

const PRESETS: [GasConstants; 6] = [
    GasConstants { name: "He", a: 0.0346, b: 0.0238 },
    GasConstants { name: "H2", a: 0.2452, b: 0.0265 },
    GasConstants { name: "N2", a: 1.370, b: 0.0387 },
    GasConstants { name: "O2", a: 1.382, b: 0.0319 },
    GasConstants { name: "CO2", a: 3.658, b: 0.0429 },
    GasConstants { name: "H2O", a: 5.537, b: 0.0305 },
];

impl GasConstants {
    /// Look up a preset by formula, ignoring case.
    pub fn preset(name: &str) -> Option<GasConstants> {
        PRESETS.iter().find(|g| g.name.eq_ignore_ascii_case(name.trim())).copied()
    }

    pub fn presets() -> &'static [GasConstants] {
        &PRESETS
    }
}

/// Input parameters for a Van der Waals solve.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "N2 cylinder",
///   "pressure_atm": 24.24,
///   "moles": 1.0,
///   "temperature_k": 300.0,
///   "a": 1.370,
///   "b": 0.0387,
///   "settings": { "max_iterations": 50 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VanDerWaalsInput {
    /// User label for this calculation
    #[serde(default)]
    pub label: String,

    #[serde(flatten)]
    pub state: GasState,

    /// Attraction constant (L²·atm/mol²)
    pub a: f64,

    /// Excluded volume per mole (L/mol)
    pub b: f64,

    #[serde(default)]
    pub settings: SolverSettings,
}

impl VanDerWaalsInput {
    /// Validate the gas constants.
    pub fn validate(&self) -> ChemResult<()> {
        for (field, value) in [("a", self.a), ("b", self.b)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ChemError::invalid_input(
                    field,
                    value.to_string(),
                    "Van der Waals constants must be non-negative",
                ));
            }
        }
        Ok(())
    }
}

/// Results from a Van der Waals solve.
///
/// ## JSON Example
///
/// ```json
/// {
///   "solved_for": "Volume",
///   "value": 0.99996,
///   "ideal_gas_value": 1.0156,
///   "deviation_percent": -1.54,
///   "compressibility_factor": 0.9846,
///   "converged": true,
///   "iterations": 3,
///   "residual": 0.00000021
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VanDerWaalsResult {
    pub solved_for: StateVariable,
    /// Real-gas value, in the unit of `solved_for`
    pub value: f64,
    /// Ideal-gas value of the same unknown
    pub ideal_gas_value: f64,
    /// (value − ideal) / ideal × 100
    pub deviation_percent: f64,
    /// Z = PV/(nRT) of the solved state
    pub compressibility_factor: f64,
    /// False when the iteration budget ran out first
    pub converged: bool,
    /// 0 for the explicit P and T paths
    pub iterations: usize,
    /// Pressure residual at `value` (atm)
    pub residual: f64,
}

fn require_above_excluded_volume(v: f64, n: f64, b: f64) -> ChemResult<()> {
    let nb = excluded_volume(n, b);
    if v <= nb {
        return Err(ChemError::domain(
            "volume below excluded volume",
            format!("V = {} L must exceed nb = {} L", v, nb),
        ));
    }
    Ok(())
}

/// Newton on V over (nb, ∞), falling back to bisection when Newton stalls
/// or cannot stay above nb. Bisection iterations are added to the count.
fn solve_volume(
    s: &KnownState,
    a: f64,
    b: f64,
    settings: &SolverSettings,
) -> ChemResult<RootSolution> {
    let ideal = ideal_volume(s.p, s.n, s.t);
    let nb = excluded_volume(s.n, b);
    let seed = if ideal > nb { ideal } else { ideal + nb };
    let residual = |v: f64| vdw_pressure(v, s.n, s.t, a, b) - s.p;

    let newton = newton_raphson(&residual, seed, Domain::above(nb), settings);
    if matches!(newton, Ok(ref root) if root.converged) {
        return newton;
    }
    let Some((lower, upper)) = volume_bracket(&residual, nb, seed) else {
        return newton;
    };
    let spent = newton.as_ref().map_or(settings.max_iterations, |root| root.iterations);
    match bisection(&residual, lower, upper, settings) {
        Ok(root) if root.converged => {
            warn!(
                "Newton stalled after {} iterations, bisection found V = {} L",
                spent, root.value
            );
            Ok(RootSolution {
                iterations: spent + root.iterations,
                ..root
            })
        }
        _ => newton,
    }
}

/// Bracket (lower, upper) with P_vdw − P positive just above nb and
/// negative at `upper`. `None` when b = 0 or no sign change is found.
fn volume_bracket<F>(residual: F, nb: f64, seed: f64) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let lower = nb * (1.0 + 1e-9);
    let f_lower = residual(lower);
    if !(lower > nb && f_lower.is_finite() && f_lower > 0.0) {
        return None;
    }
    let mut upper = seed.max(lower);
    for _ in 0..BRACKET_DOUBLINGS {
        let f_upper = residual(upper);
        if !f_upper.is_finite() {
            return None;
        }
        if f_upper < 0.0 {
            return Some((lower, upper));
        }
        upper *= 2.0;
    }
    None
}

/// Ideal amount, shrunk by 0.9 until it lies in (0, V/b). At most
/// `max_iterations` shrinks are tried.
fn mole_seed(ideal: f64, upper: f64, settings: &SolverSettings) -> ChemResult<f64> {
    let mut seed = ideal;
    for _ in 0..=settings.max_iterations {
        if seed.is_finite() && seed > 0.0 && seed < upper {
            return Ok(seed);
        }
        seed *= MOLE_SEED_SHRINK;
    }
    Err(ChemError::domain(
        "amount below V/b",
        format!("no seed in (0, {}) mol reachable from the ideal amount {} mol", upper, ideal),
    ))
}

/// Solve with default solver settings.
pub fn solve_van_der_waals(known: GasState, a: f64, b: f64) -> ChemResult<VanDerWaalsResult> {
    solve(&VanDerWaalsInput {
        label: String::new(),
        state: known,
        a,
        b,
        settings: SolverSettings::default(),
    })
}

/// Solve for the unknown state variable.
///
/// # Errors
///
/// - `MissingField` / `InvalidInput` if not exactly one variable is unknown
/// - `InvalidInput` for negative or non-finite a, b
/// - `InvalidQuantity` for a non-positive known variable
/// - `Domain` if V ≤ nb, or the solver cannot stay above it
pub fn solve(input: &VanDerWaalsInput) -> ChemResult<VanDerWaalsResult> {
    input.validate()?;
    input.settings.validate()?;
    let s = input.state.resolve()?;
    let (a, b) = (input.a, input.b);
    debug!("solving Van der Waals for {:?} (a = {}, b = {})", s.unknown, a, b);

    let (value, ideal, iterations, residual, converged) = match s.unknown {
        StateVariable::Pressure => {
            require_above_excluded_volume(s.v, s.n, b)?;
            (vdw_pressure(s.v, s.n, s.t, a, b), ideal_pressure(s.v, s.n, s.t), 0, 0.0, true)
        }
        StateVariable::Temperature => {
            require_above_excluded_volume(s.v, s.n, b)?;
            (vdw_temperature(s.p, s.v, s.n, a, b), ideal_temperature(s.p, s.v, s.n), 0, 0.0, true)
        }
        StateVariable::Volume => {
            let root = solve_volume(&s, a, b, &input.settings)?;
            let ideal = ideal_volume(s.p, s.n, s.t);
            (root.value, ideal, root.iterations, root.residual, root.converged)
        }
        StateVariable::Moles => {
            let ideal = ideal_moles(s.p, s.v, s.t);
            let upper = if b > 0.0 { s.v / b } else { f64::INFINITY };
            let seed = mole_seed(ideal, upper, &input.settings)?;
            let root = newton_raphson(
                |n| vdw_pressure(s.v, n, s.t, a, b) - s.p,
                seed,
                Domain::new(0.0, upper),
                &input.settings,
            )?;
            (root.value, ideal, root.iterations, root.residual, root.converged)
        }
    };

    debug!(
        "{} = {} {} (ideal {}, converged: {})",
        s.unknown.symbol(),
        value,
        s.unknown.unit(),
        ideal,
        converged
    );

    let (p, v, n, t) = match s.unknown {
        StateVariable::Pressure => (value, s.v, s.n, s.t),
        StateVariable::Volume => (s.p, value, s.n, s.t),
        StateVariable::Moles => (s.p, s.v, value, s.t),
        StateVariable::Temperature => (s.p, s.v, s.n, value),
    };

    Ok(VanDerWaalsResult {
        solved_for: s.unknown,
        value,
        ideal_gas_value: ideal,
        deviation_percent: (value - ideal) / ideal * 100.0,
        compressibility_factor: compressibility_factor(p, v, n, t),
        converged,
        iterations,
        residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const N2_A: f64 = 1.370;
    const N2_B: f64 = 0.0387;
    const CO2_A: f64 = 3.658;
    const CO2_B: f64 = 0.0429;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn state(p: Option<f64>, v: Option<f64>, n: Option<f64>, t: Option<f64>) -> GasState {
        GasState {
            pressure_atm: p,
            volume_l: v,
            moles: n,
            temperature_k: t,
        }
    }

    fn n2(known: GasState) -> ChemResult<VanDerWaalsResult> {
        solve_van_der_waals(known, N2_A, N2_B)
    }

    #[test]
    fn test_explicit_pressure() {
        let result = n2(state(None, Some(1.0), Some(1.0), Some(300.0))).unwrap();
        assert_eq!(result.solved_for, StateVariable::Pressure);
        // 24.618 / 0.9613 - 1.370 = 24.239
        assert!(approx_eq(result.value, 24.239, 1e-3), "P = {}", result.value);
        assert!(approx_eq(result.ideal_gas_value, 24.618, 1e-3));
        assert!(result.converged);
        assert_eq!(result.iterations, 0);
        assert!(result.deviation_percent < 0.0);
        // Attraction dominates for N2 at 300 K, 1 L
        assert!(approx_eq(result.compressibility_factor, 24.239 / 24.618, 1e-4));
    }

    #[test]
    fn test_volume_recovers_pressure() {
        let p = n2(state(None, Some(1.0), Some(1.0), Some(300.0))).unwrap().value;
        let v = n2(state(Some(p), None, Some(1.0), Some(300.0))).unwrap();
        assert!(v.converged);
        assert!(approx_eq(v.value, 1.0, 1e-4), "V = {}", v.value);

        let back = n2(state(None, Some(v.value), Some(1.0), Some(300.0))).unwrap();
        assert!(approx_eq(back.value, p, 1e-3));
    }

    #[test]
    fn test_moles_solve() {
        let p = vdw_pressure(2.0, 1.5, 350.0, N2_A, N2_B);
        let result = n2(state(Some(p), Some(2.0), None, Some(350.0))).unwrap();
        assert_eq!(result.solved_for, StateVariable::Moles);
        assert!(result.converged);
        assert!(approx_eq(result.value, 1.5, 1e-4), "n = {}", result.value);
    }

    #[test]
    fn test_moles_seed_shrinks_below_excluded_limit() {
        // Ideal n = 40.6 mol, but V/b caps n at 23.3 mol.
        let known = state(Some(1000.0), Some(1.0), None, Some(300.0));
        let result = solve_van_der_waals(known, CO2_A, CO2_B).unwrap();
        assert!(result.ideal_gas_value >= 1.0 / CO2_B);
        assert!(result.converged);
        assert!(result.value > 0.0 && result.value < 1.0 / CO2_B, "n = {}", result.value);
        assert!(approx_eq(result.value, 18.599, 1e-2), "n = {}", result.value);
        let p = vdw_pressure(1.0, result.value, 300.0, CO2_A, CO2_B);
        assert!(approx_eq(p, 1000.0, 1e-3));
    }

    #[test]
    fn test_moles_without_reachable_seed() {
        // Ideal n overflows to infinity.
        let huge = state(Some(1e200), Some(1e200), None, Some(1.0));
        assert!(matches!(n2(huge), Err(ChemError::Domain { .. })));
        assert!(matches!(
            solve_van_der_waals(huge, 0.0, 0.0),
            Err(ChemError::Domain { .. })
        ));

        // V/b underflows to zero.
        let tiny = state(Some(1.0), Some(1e-300), None, Some(300.0));
        assert!(matches!(
            solve_van_der_waals(tiny, 0.0, 1e30),
            Err(ChemError::Domain { .. })
        ));
    }

    #[test]
    fn test_temperature_inverts_pressure() {
        let p = vdw_pressure(0.5, 1.0, 400.0, CO2_A, CO2_B);
        let known = state(Some(p), Some(0.5), Some(1.0), None);
        let result = solve_van_der_waals(known, CO2_A, CO2_B).unwrap();
        assert!(approx_eq(result.value, 400.0, 1e-6));
        assert!(result.ideal_gas_value < result.value);
    }

    #[test]
    fn test_volume_below_excluded_volume() {
        // nb = 0.0387 L for one mole of N2
        let p = n2(state(None, Some(0.03), Some(1.0), Some(300.0)));
        assert!(matches!(p, Err(ChemError::Domain { .. })));
        let t = n2(state(Some(1.0), Some(0.0387), Some(1.0), None));
        assert!(matches!(t, Err(ChemError::Domain { .. })));
    }

    #[test]
    fn test_ideal_constants_match_ideal_gas() {
        let known = state(Some(2.0), None, Some(0.5), Some(298.0));
        let result = solve_van_der_waals(known, 0.0, 0.0).unwrap();
        assert!(approx_eq(result.value, result.ideal_gas_value, 1e-4));
        assert!(result.deviation_percent.abs() < 1e-2);
        assert!(approx_eq(result.compressibility_factor, 1.0, 1e-6));
    }

    #[test]
    fn test_high_pressure_seed_above_excluded_volume() {
        // Ideal volume 0.0246 L is below nb = 0.0429 L.
        let known = state(Some(1000.0), None, Some(1.0), Some(300.0));
        let result = solve_van_der_waals(known, CO2_A, CO2_B).unwrap();
        assert!(result.value > CO2_B);
        assert!(result.converged);
    }

    #[test]
    fn test_subcritical_volume_falls_back_to_bisection() {
        // Newton alone stalls near 0.0611 L on this CO2 isotherm.
        let p = vdw_pressure(0.06, 1.0, 250.0, CO2_A, CO2_B);
        let known = state(Some(p), None, Some(1.0), Some(250.0));
        let result = solve_van_der_waals(known, CO2_A, CO2_B).unwrap();
        assert!(result.converged);
        assert!(approx_eq(result.value, 0.06, 1e-5), "V = {}", result.value);
        assert!(result.residual.abs() < SolverSettings::default().tolerance);

        // Newton backs off out of the domain for O2 at 150 K.
        let p = vdw_pressure(0.05, 1.0, 150.0, 1.382, 0.0319);
        let known = state(Some(p), None, Some(1.0), Some(150.0));
        let result = solve_van_der_waals(known, 1.382, 0.0319).unwrap();
        assert!(result.converged);
        assert!(result.value > 0.0319);
        let back = vdw_pressure(result.value, 1.0, 150.0, 1.382, 0.0319);
        assert!(approx_eq(back, p, 1e-3));
    }

    #[test]
    fn test_unconverged_is_flagged() {
        let input = VanDerWaalsInput {
            label: String::new(),
            state: state(Some(24.239), None, Some(1.0), Some(300.0)),
            a: N2_A,
            b: N2_B,
            settings: SolverSettings {
                max_iterations: 1,
                tolerance: 1e-12,
                ..SolverSettings::default()
            },
        };
        let result = solve(&input).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 1);
        assert!(result.residual.abs() > 1e-12);
    }

    #[test]
    fn test_unknown_selection() {
        match n2(state(None, None, Some(1.0), Some(300.0))) {
            Err(ChemError::MissingField { field }) => assert_eq!(field, "pressure_atm"),
            other => panic!("expected missing field, got {:?}", other),
        }
        let all = n2(state(Some(1.0), Some(1.0), Some(1.0), Some(300.0)));
        assert!(matches!(all, Err(ChemError::InvalidInput { .. })));
    }

    #[test]
    fn test_invalid_constants_and_quantities() {
        let known = state(None, Some(1.0), Some(1.0), Some(300.0));
        assert!(matches!(
            solve_van_der_waals(known, -1.0, N2_B),
            Err(ChemError::InvalidInput { .. })
        ));
        assert!(matches!(
            solve_van_der_waals(known, N2_A, f64::NAN),
            Err(ChemError::InvalidInput { .. })
        ));

        let zero_t = state(None, Some(1.0), Some(1.0), Some(0.0));
        assert!(matches!(n2(zero_t), Err(ChemError::InvalidQuantity { .. })));
    }

    #[test]
    fn test_presets() {
        let co2 = GasConstants::preset("co2").unwrap();
        assert_eq!(co2.a, CO2_A);
        assert_eq!(co2.b, CO2_B);
        assert!(GasConstants::preset("Ar").is_none());
        assert_eq!(GasConstants::presets().len(), 6);
    }

    #[test]
    fn test_input_from_json() {
        let input: VanDerWaalsInput = serde_json::from_str(
            r#"{"label": "N2", "volume_l": 1.0, "moles": 1.0, "temperature_k": 300.0,
                "a": 1.370, "b": 0.0387}"#,
        )
        .unwrap();
        assert_eq!(input.state.unknown().unwrap(), StateVariable::Pressure);
        assert_eq!(input.settings, SolverSettings::default());
        assert!(solve(&input).unwrap().converged);
    }
}
