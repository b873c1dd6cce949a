//! Declarative names for the built-in objective functions and fitness transforms.
//!
//! The math lives in [`crate::compute`]; these types only describe which
//! function a configuration asks for.

use serde::{Deserialize, Serialize};

/// Built-in benchmark objective functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TestFunction {
    /// `(x + 2y - 7)^2 + (2x + y - 5)^2`, minimum 0 at (1, 3).
    #[default]
    #[serde(alias = "booth")]
    Booth,
    /// `-cos(x) cos(y) exp(-((x - pi)^2 + (y - pi)^2))`, minimum -1 at (pi, pi).
    #[serde(alias = "easom")]
    Easom,
    /// Bukin function N.6, minimum 0 at (-10, 1).
    #[serde(alias = "bukin")]
    Bukin,
    /// N-dimensional Rosenbrock valley, minimum 0 at (1, ..., 1).
    #[serde(alias = "rosenbrock")]
    Rosenbrock,
    /// Goldstein-Price function, minimum 3 at (0, -1).
    #[serde(alias = "goldstein_price", alias = "gp")]
    GoldsteinPrice,
}

/// Number of positional arguments an objective accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

impl TestFunction {
    pub fn arity(&self) -> Arity {
        match self {
            Self::Rosenbrock => Arity::AtLeast(2),
            Self::Booth | Self::Easom | Self::Bukin | Self::GoldsteinPrice => Arity::Exactly(2),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Booth => "Booth",
            Self::Easom => "Easom",
            Self::Bukin => "Bukin",
            Self::Rosenbrock => "Rosenbrock",
            Self::GoldsteinPrice => "GoldsteinPrice",
        }
    }
}

/// Monotonic transform from raw objective output to an ascending-sortable score.
///
/// Lower scores are always better; the transform encodes the optimization
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(tag = "type")]
pub enum FitnessSpec {
    /// Identity: minimize the objective.
    #[default]
    Minimize,
    /// Negation: maximize the objective.
    Maximize,
    /// Squared distance of the objective from `target`.
    SquaredError { target: f64 },
    /// Absolute distance of the objective from `target`.
    AbsoluteError { target: f64 },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum FitnessSpecTagged {
    Minimize,
    Maximize,
    #[serde(alias = "MSE")]
    SquaredError {
        target: f64,
    },
    #[serde(alias = "L1")]
    AbsoluteError {
        target: f64,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FitnessSpecRepr {
    String(String),
    Tagged(FitnessSpecTagged),
}

impl<'de> Deserialize<'de> for FitnessSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = FitnessSpecRepr::deserialize(deserializer)?;
        match repr {
            FitnessSpecRepr::String(value) => match value.as_str() {
                "Minimize" | "minimize" => Ok(FitnessSpec::Minimize),
                "Maximize" | "maximize" => Ok(FitnessSpec::Maximize),
                other => Err(serde::de::Error::custom(format!(
                    "Unknown fitness function string: {other} (targeted transforms need an object with a target)"
                ))),
            },
            FitnessSpecRepr::Tagged(tagged) => Ok(match tagged {
                FitnessSpecTagged::Minimize => FitnessSpec::Minimize,
                FitnessSpecTagged::Maximize => FitnessSpec::Maximize,
                FitnessSpecTagged::SquaredError { target } => FitnessSpec::SquaredError { target },
                FitnessSpecTagged::AbsoluteError { target } => {
                    FitnessSpec::AbsoluteError { target }
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitness_spec_string_and_tagged() {
        let plain: FitnessSpec = serde_json::from_str(r#""Maximize""#).unwrap();
        assert_eq!(plain, FitnessSpec::Maximize);

        let tagged: FitnessSpec =
            serde_json::from_str(r#"{"type": "SquaredError", "target": 3.0}"#).unwrap();
        assert_eq!(tagged, FitnessSpec::SquaredError { target: 3.0 });

        let alias: FitnessSpec = serde_json::from_str(r#"{"type": "L1", "target": -1}"#).unwrap();
        assert_eq!(alias, FitnessSpec::AbsoluteError { target: -1.0 });
    }

    #[test]
    fn test_fitness_spec_rejects_unknown_string() {
        assert!(serde_json::from_str::<FitnessSpec>(r#""SquaredError""#).is_err());
        assert!(serde_json::from_str::<FitnessSpec>(r#""Sideways""#).is_err());
    }

    #[test]
    fn test_arity() {
        assert!(TestFunction::Booth.arity().accepts(2));
        assert!(!TestFunction::Booth.arity().accepts(3));
        assert!(TestFunction::Rosenbrock.arity().accepts(5));
        assert!(!TestFunction::Rosenbrock.arity().accepts(1));
    }

    #[test]
    fn test_objective_alias() {
        let f: TestFunction = serde_json::from_str(r#""gp""#).unwrap();
        assert_eq!(f, TestFunction::GoldsteinPrice);
    }
}
