//! Genotype schema types: the named, bounded scalar variables that span the search space.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A configuration value that is either one of the known variants or an
/// unrecognized declaration kept verbatim for reporting.
///
/// Unrecognized values are not a parse failure: callers resolve them to a
/// fallback and surface a [`ConfigWarning`](super::ConfigWarning).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Declared<T> {
    /// A recognized value.
    Known(T),
    /// A value that matched none of the known variants.
    Unrecognized(String),
}

impl<T: Copy> Declared<T> {
    /// The recognized value, if any.
    pub fn known(&self) -> Option<T> {
        match self {
            Self::Known(value) => Some(*value),
            Self::Unrecognized(_) => None,
        }
    }

    /// Resolve to the recognized value or `fallback`.
    pub fn resolve_or(&self, fallback: T) -> T {
        self.known().unwrap_or(fallback)
    }
}

impl<T> From<T> for Declared<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

/// Scalar type of a gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GeneType {
    /// Whole-number gene; perturbations are rounded to the nearest integer.
    #[serde(alias = "Int", alias = "int", alias = "integer")]
    Integer,
    /// Floating-point gene.
    #[default]
    #[serde(alias = "Float", alias = "float", alias = "real")]
    Real,
}

/// Boundary handling applied when a gene is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConstraintMode {
    /// Mutations leaving the open interval `(minimum, maximum)` are rejected.
    Hard,
    /// Mutations are always applied; values may drift outside the bounds.
    #[default]
    Soft,
}

/// Concrete value of a gene. The variant always matches the gene's [`GeneType`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Allele {
    Integer(i64),
    Real(f64),
}

impl Allele {
    pub fn gene_type(&self) -> GeneType {
        match self {
            Self::Integer(_) => GeneType::Integer,
            Self::Real(_) => GeneType::Real,
        }
    }

    /// Value as passed to objective functions.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Integer(v) => v as f64,
            Self::Real(v) => v,
        }
    }
}

impl std::fmt::Display for Allele {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
        }
    }
}

/// Declaration of a single gene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneSpec {
    /// Gene name, unique within the genotype.
    pub name: String,
    /// Declared scalar type.
    #[serde(rename = "type")]
    pub kind: Declared<GeneType>,
    /// Initialization bounds `[minimum, maximum]`.
    pub bounds: (f64, f64),
}

impl GeneSpec {
    /// Declare a real-valued gene.
    pub fn real(name: impl Into<String>, minimum: f64, maximum: f64) -> Self {
        Self {
            name: name.into(),
            kind: Declared::Known(GeneType::Real),
            bounds: (minimum, maximum),
        }
    }

    /// Declare an integer gene.
    pub fn integer(name: impl Into<String>, minimum: i64, maximum: i64) -> Self {
        Self {
            name: name.into(),
            kind: Declared::Known(GeneType::Integer),
            bounds: (minimum as f64, maximum as f64),
        }
    }

    /// Resolved gene type. Unrecognized declarations fall back to [`GeneType::Real`].
    pub fn gene_type(&self) -> GeneType {
        self.kind.resolve_or(GeneType::Real)
    }

    #[inline]
    pub fn minimum(&self) -> f64 {
        self.bounds.0
    }

    #[inline]
    pub fn maximum(&self) -> f64 {
        self.bounds.1
    }

    /// Midpoint of the bounds, computed without overflowing.
    #[inline]
    pub fn midpoint(&self) -> f64 {
        self.minimum() / 2.0 + self.maximum() / 2.0
    }

    /// Whether some float lies strictly between the bounds. The rounded
    /// midpoint is interior whenever any float is.
    pub fn has_interior(&self) -> bool {
        let mid = self.midpoint();
        self.minimum() < mid && mid < self.maximum()
    }

    /// Half-open range of integer values an integer gene may be initialized to.
    ///
    /// Under [`ConstraintMode::Soft`] this covers `[minimum, maximum)`; under
    /// [`ConstraintMode::Hard`] it covers the open interval `(minimum, maximum)`.
    pub fn integer_range(&self, constraint: ConstraintMode) -> Range<i64> {
        let start = match constraint {
            ConstraintMode::Soft => self.minimum().ceil(),
            ConstraintMode::Hard => self.minimum().floor() + 1.0,
        };
        start as i64..self.maximum().ceil() as i64
    }
}

/// Ordered genotype declaration. Order is the positional argument order of
/// the objective function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenotypeSchema(Vec<GeneSpec>);

impl GenotypeSchema {
    pub fn new(genes: Vec<GeneSpec>) -> Self {
        Self(genes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeneSpec> {
        self.0.iter()
    }

    /// Gene names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|g| g.name.as_str())
    }
}

impl Default for GenotypeSchema {
    fn default() -> Self {
        Self(vec![
            GeneSpec::real("x", -10.0, 10.0),
            GeneSpec::real("y", -10.0, 10.0),
        ])
    }
}

impl From<Vec<GeneSpec>> for GenotypeSchema {
    fn from(genes: Vec<GeneSpec>) -> Self {
        Self(genes)
    }
}

impl<'a> IntoIterator for &'a GenotypeSchema {
    type Item = &'a GeneSpec;
    type IntoIter = std::slice::Iter<'a, GeneSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gene_type_aliases() {
        let spec: GeneSpec =
            serde_json::from_str(r#"{"name": "n", "type": "int", "bounds": [0, 5]}"#).unwrap();
        assert_eq!(spec.gene_type(), GeneType::Integer);

        let spec: GeneSpec =
            serde_json::from_str(r#"{"name": "x", "type": "float", "bounds": [0, 5]}"#).unwrap();
        assert_eq!(spec.gene_type(), GeneType::Real);
    }

    #[test]
    fn test_unrecognized_gene_type_falls_back_to_real() {
        let spec: GeneSpec =
            serde_json::from_str(r#"{"name": "z", "type": "complex", "bounds": [0, 1]}"#).unwrap();
        assert_eq!(spec.kind, Declared::Unrecognized("complex".to_string()));
        assert_eq!(spec.gene_type(), GeneType::Real);
    }

    #[test]
    fn test_integer_range() {
        let spec = GeneSpec::integer("n", -10, 10);
        assert_eq!(spec.integer_range(ConstraintMode::Soft), -10..10);
        assert_eq!(spec.integer_range(ConstraintMode::Hard), -9..10);

        let fractional = GeneSpec::real("f", -2.5, 3.5);
        assert_eq!(fractional.integer_range(ConstraintMode::Soft), -2..4);
        assert_eq!(fractional.integer_range(ConstraintMode::Hard), -2..4);
    }

    #[test]
    fn test_schema_preserves_order() {
        let json = r#"[
            {"name": "b", "type": "Real", "bounds": [0, 1]},
            {"name": "a", "type": "Real", "bounds": [0, 1]}
        ]"#;
        let schema: GenotypeSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
