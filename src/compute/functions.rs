//! Benchmark objective functions.
//!
//! Classic 2-D (and N-D for Rosenbrock) optimization test surfaces. All are
//! pure and deterministic.

use std::f64::consts::PI;

use crate::schema::TestFunction;

/// Booth function: (x + 2y - 7)^2 + (2x + y - 5)^2
///
/// Global minimum 0 at (1, 3).
#[inline]
pub fn booth(x: f64, y: f64) -> f64 {
    (x + 2.0 * y - 7.0).powi(2) + (2.0 * x + y - 5.0).powi(2)
}

/// Easom function: -cos(x) cos(y) exp(-((x - pi)^2 + (y - pi)^2))
///
/// Global minimum -1 at (pi, pi); flat almost everywhere else.
#[inline]
pub fn easom(x: f64, y: f64) -> f64 {
    -x.cos() * y.cos() * (-((x - PI).powi(2) + (y - PI).powi(2))).exp()
}

/// Bukin function N.6: 100 sqrt(|y - 0.01 x^2|) + 0.01 |x + 10|
///
/// Global minimum 0 at (-10, 1).
#[inline]
pub fn bukin(x: f64, y: f64) -> f64 {
    100.0 * (y - 0.01 * x * x).abs().sqrt() + 0.01 * (x + 10.0).abs()
}

/// Rosenbrock function over consecutive pairs:
/// sum (1 - x_i)^2 + 100 (x_{i+1} - x_i^2)^2
///
/// Global minimum 0 at (1, ..., 1). Fewer than two values give 0.
pub fn rosenbrock(values: &[f64]) -> f64 {
    values
        .windows(2)
        .map(|w| (1.0 - w[0]).powi(2) + 100.0 * (w[1] - w[0] * w[0]).powi(2))
        .sum()
}

/// Goldstein-Price function.
///
/// Global minimum 3 at (0, -1).
pub fn goldstein_price(x: f64, y: f64) -> f64 {
    let a = 1.0
        + (x + y + 1.0).powi(2)
            * (19.0 - 14.0 * x + 3.0 * x * x - 14.0 * y + 6.0 * x * y + 3.0 * y * y);
    let b = 30.0
        + (2.0 * x - 3.0 * y).powi(2)
            * (18.0 - 32.0 * x + 12.0 * x * x + 48.0 * y - 36.0 * x * y + 27.0 * y * y);
    a * b
}

impl TestFunction {
    /// Evaluate on a phenotype. Returns `None` if the argument count does not
    /// match the function's arity.
    pub fn compute(&self, values: &[f64]) -> Option<f64> {
        if !self.arity().accepts(values.len()) {
            return None;
        }
        Some(match self {
            Self::Booth => booth(values[0], values[1]),
            Self::Easom => easom(values[0], values[1]),
            Self::Bukin => bukin(values[0], values[1]),
            Self::Rosenbrock => rosenbrock(values),
            Self::GoldsteinPrice => goldstein_price(values[0], values[1]),
        })
    }
}
