//! # Scalar Root Finder
//!
//! Newton-Raphson iteration with a finite-difference derivative, confined
//! to an open interval `(lower, upper)` of physically valid values.
//!
//! ## Algorithm
//!
//! 1. Start from a caller-supplied seed inside the domain.
//! 2. Evaluate the residual f(x); stop when |f(x)| < `tolerance`.
//! 3. Estimate f'(x) with a forward difference of width `derivative_step`
//!    (backward if x + h leaves the domain).
//! 4. Take the step Δ = −f(x)/f'(x). While x + Δ leaves the domain, scale Δ
//!    by `backoff_factor`; each back-off consumes one iteration.
//! 5. Repeat until converged or `max_iterations` is spent.
//!
//! Running out of iterations is not an error: the last iterate is returned
//! with `converged: false`. Leaving the domain with no budget left to back
//! off, or a non-finite residual, is a `Domain` error.
//!
//! [`bisection`] is the bracketed alternative: slower, but it cannot leave
//! a bracket whose ends have opposite signs.
//!
//! All iteration state lives on the stack of a single call.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{ChemError, ChemResult};

/// Solver configuration.
///
/// ## JSON Example
///
/// ```json
/// {
///   "tolerance": 0.0001,
///   "max_iterations": 100,
///   "derivative_step": 0.0001,
///   "backoff_factor": 0.5
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Absolute residual below which the iterate is accepted
    pub tolerance: f64,
    /// Iteration budget, back-off steps included
    pub max_iterations: usize,
    /// Finite-difference width, in the iterate's units
    pub derivative_step: f64,
    /// Step shrink factor applied when a step leaves the domain (0 < f < 1)
    pub backoff_factor: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            tolerance: 1e-4,
            max_iterations: 100,
            derivative_step: 1e-4,
            backoff_factor: 0.5,
        }
    }
}

impl SolverSettings {
    /// Validate settings.
    pub fn validate(&self) -> ChemResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ChemError::invalid_input(
                "tolerance",
                self.tolerance.to_string(),
                "Tolerance must be positive",
            ));
        }
        if self.max_iterations == 0 {
            return Err(ChemError::invalid_input(
                "max_iterations",
                "0",
                "At least one iteration is required",
            ));
        }
        if !(self.derivative_step.is_finite() && self.derivative_step > 0.0) {
            return Err(ChemError::invalid_input(
                "derivative_step",
                self.derivative_step.to_string(),
                "Derivative step must be positive",
            ));
        }
        if !(self.backoff_factor > 0.0 && self.backoff_factor < 1.0) {
            return Err(ChemError::invalid_input(
                "backoff_factor",
                self.backoff_factor.to_string(),
                "Back-off factor must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

/// Open interval of admissible iterates. Either bound may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub lower: f64,
    pub upper: f64,
}

impl Domain {
    pub fn new(lower: f64, upper: f64) -> Self {
        Domain { lower, upper }
    }

    /// (lower, +∞)
    pub fn above(lower: f64) -> Self {
        Domain::new(lower, f64::INFINITY)
    }

    /// Strict containment; NaN is never contained.
    pub fn contains(&self, x: f64) -> bool {
        x > self.lower && x < self.upper
    }
}

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootSolution {
    /// Final iterate
    pub value: f64,
    /// f(value)
    pub residual: f64,
    /// Iterations consumed, back-offs included
    pub iterations: usize,
    /// |residual| < tolerance
    pub converged: bool,
}

/// Per-call iteration state.
struct SolverState {
    x: f64,
    residual: f64,
    iteration: usize,
}

/// Find x in `domain` with `residual(x) ≈ 0`.
///
/// # Errors
///
/// `Domain` when the seed lies outside the domain, when the residual is
/// not finite at an iterate, or when a step cannot be backed off into the
/// domain within the iteration budget. `InvalidInput` for bad settings.
pub fn newton_raphson<F>(
    residual: F,
    seed: f64,
    domain: Domain,
    settings: &SolverSettings,
) -> ChemResult<RootSolution>
where
    F: Fn(f64) -> f64,
{
    settings.validate()?;
    if !domain.contains(seed) {
        return Err(ChemError::domain(
            "seed inside domain",
            format!("seed {} is outside ({}, {})", seed, domain.lower, domain.upper),
        ));
    }

    let evaluate = |x: f64| -> ChemResult<f64> {
        let f = residual(x);
        if f.is_finite() {
            Ok(f)
        } else {
            Err(ChemError::domain("finite residual", format!("residual is {} at x = {}", f, x)))
        }
    };

    let mut state = SolverState {
        x: seed,
        residual: evaluate(seed)?,
        iteration: 0,
    };

    while state.iteration < settings.max_iterations {
        trace!("iteration {}: x = {}, f(x) = {}", state.iteration, state.x, state.residual);
        if state.residual.abs() < settings.tolerance {
            break;
        }

        let h = settings.derivative_step;
        let slope = if domain.contains(state.x + h) {
            (evaluate(state.x + h)? - state.residual) / h
        } else {
            (state.residual - evaluate(state.x - h)?) / h
        };
        if slope == 0.0 || !slope.is_finite() {
            warn!("derivative vanished at x = {}, stopping early", state.x);
            break;
        }

        let mut step = -state.residual / slope;
        state.iteration += 1;
        while !domain.contains(state.x + step) {
            if state.iteration >= settings.max_iterations {
                return Err(ChemError::domain(
                    "iterate inside domain",
                    format!(
                        "step from x = {} left ({}, {}) and back-off exhausted {} iterations",
                        state.x, domain.lower, domain.upper, settings.max_iterations
                    ),
                ));
            }
            step *= settings.backoff_factor;
            state.iteration += 1;
            warn!("step left domain at x = {}, backing off to {}", state.x, step);
        }

        state.x += step;
        state.residual = evaluate(state.x)?;
    }

    let converged = state.residual.abs() < settings.tolerance;
    if converged {
        debug!("converged to {} after {} iterations", state.x, state.iteration);
    } else {
        warn!(
            "returning unconverged iterate {} (residual {}) after {} iterations",
            state.x, state.residual, state.iteration
        );
    }

    Ok(RootSolution {
        value: state.x,
        residual: state.residual,
        iterations: state.iteration,
        converged,
    })
}

/// Find a root of `residual` between `lower` and `upper` by halving.
///
/// Stops when `|residual| < tolerance` or after `max_iterations` halvings;
/// `derivative_step` and `backoff_factor` are unused.
///
/// # Errors
///
/// `Domain` when the residual is non-finite at either end or has the same
/// sign at both. `InvalidInput` for bad settings.
pub fn bisection<F>(
    residual: F,
    lower: f64,
    upper: f64,
    settings: &SolverSettings,
) -> ChemResult<RootSolution>
where
    F: Fn(f64) -> f64,
{
    settings.validate()?;
    let (mut lo, mut hi) = (lower, upper);
    let f_lo = residual(lo);
    let f_hi = residual(hi);
    if !(f_lo.is_finite() && f_hi.is_finite()) || f_lo.signum() == f_hi.signum() {
        return Err(ChemError::domain(
            "sign change across bracket",
            format!("f({}) = {}, f({}) = {}", lo, f_lo, hi, f_hi),
        ));
    }
    let lower_positive = f_lo > 0.0;

    let mut state = SolverState {
        x: lo,
        residual: f_lo,
        iteration: 0,
    };
    while state.iteration < settings.max_iterations {
        state.x = 0.5 * (lo + hi);
        state.residual = residual(state.x);
        state.iteration += 1;
        trace!("bisection {}: x = {}, f(x) = {}", state.iteration, state.x, state.residual);
        if state.residual.abs() < settings.tolerance {
            break;
        }
        if (state.residual > 0.0) == lower_positive {
            lo = state.x;
        } else {
            hi = state.x;
        }
    }

    let converged = state.residual.abs() < settings.tolerance;
    debug!(
        "bisection stopped at {} after {} iterations (converged: {})",
        state.x, state.iteration, converged
    );
    Ok(RootSolution {
        value: state.x,
        residual: state.residual,
        iterations: state.iteration,
        converged,
    })
}
