//! Linguistic variables: named sets of terms over a shared universe.
//!
//! A [`LinguisticVariable`] plays one of two roles inside a [`crate::RuleBase`]:
//!
//! - **Antecedent** (input): crisp values are fuzzified into one degree per term
//! - **Consequent** (output): aggregated per-term strengths are reconstructed into
//!   a sampled membership function and then defuzzified

use crate::defuzz::AggregatedOutput;
use crate::error::ConfigError;
use crate::membership::Triangle;

// ============================================================================
// Universe
// ============================================================================

/// Bounded numeric domain shared by all terms of a variable.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Universe {
    min: f64,
    max: f64,
}

impl Universe {
    /// Creates a universe; bounds must be finite with `min < max`.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return Err(ConfigError::InvalidUniverse { min, max });
        }
        Ok(Self { min, max })
    }

    /// The `[0, 100]` percentage universe used by every weapon variable.
    pub const fn percent() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }

    #[inline]
    pub const fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Returns true if `x` lies within the closed bounds.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }

    /// Samples the universe at `min, min + step, ...` up to `max`.
    ///
    /// Points are computed from their index, so no error accumulates across the
    /// grid. When `step` does not divide the range evenly, `max` is appended as
    /// a final sample. `step` must already be validated against this universe
    /// (see [`crate::EngineConfig::validate_for`]).
    pub fn samples(&self, step: f64) -> Vec<f64> {
        let span = self.max - self.min;
        let count = (span / step + 1e-9).floor() as usize;

        let mut points: Vec<f64> = (0..=count)
            .map(|i| (self.min + i as f64 * step).min(self.max))
            .collect();

        if let Some(&last) = points.last()
            && self.max - last > step * 1e-6
        {
            points.push(self.max);
        }

        points
    }
}

// ============================================================================
// Term
// ============================================================================

/// A labelled membership shape.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Term {
    pub label: String,
    pub shape: Triangle,
}

impl Term {
    pub fn new(label: impl Into<String>, shape: Triangle) -> Self {
        Self {
            label: label.into(),
            shape,
        }
    }
}

// ============================================================================
// Linguistic Variable
// ============================================================================

/// Named, ordered collection of terms sharing one universe.
///
/// Term labels are unique and every shape's support lies inside the universe.
/// Immutable once built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LinguisticVariable {
    name: String,
    universe: Universe,
    terms: Vec<Term>,
}

impl LinguisticVariable {
    /// Validates and builds a variable from already-constructed terms.
    pub fn new(
        name: impl Into<String>,
        universe: Universe,
        terms: Vec<Term>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();

        if terms.is_empty() {
            return Err(ConfigError::EmptyVariable(name));
        }

        for (i, term) in terms.iter().enumerate() {
            if terms[..i].iter().any(|t| t.label == term.label) {
                return Err(ConfigError::DuplicateTerm {
                    variable: name,
                    label: term.label.clone(),
                });
            }

            let (a, c) = term.shape.support();
            if !universe.contains(a) || !universe.contains(c) {
                return Err(ConfigError::ShapeOutsideUniverse {
                    variable: name,
                    label: term.label.clone(),
                    min: universe.min(),
                    max: universe.max(),
                });
            }
        }

        Ok(Self {
            name,
            universe,
            terms,
        })
    }

    /// Starts a builder that accepts raw `(a, b, c)` triples.
    pub fn builder(name: impl Into<String>, universe: Universe) -> LinguisticVariableBuilder {
        LinguisticVariableBuilder {
            name: name.into(),
            universe,
            terms: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> Universe {
        self.universe
    }

    /// Terms in declaration order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Looks up a term's position by label.
    pub fn term_index(&self, label: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.label == label)
    }

    pub fn term(&self, label: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.label == label)
    }

    /// Computes the degree of `x` in every term.
    ///
    /// No normalization is applied: overlapping terms may both be nonzero.
    pub fn fuzzify(&self, x: f64) -> Fuzzified<'_> {
        Fuzzified {
            variable: self,
            degrees: self.terms.iter().map(|t| t.shape.degree(x)).collect(),
        }
    }

    /// Rebuilds the output membership function from per-term strengths.
    ///
    /// For every sample `u` of the universe the result is
    /// `max over terms T of min(strengths[T], T.degree(u))`. `strengths` is
    /// indexed like [`Self::terms`]; missing trailing entries count as 0.
    pub fn reconstruct(&self, strengths: &[f64], resolution: f64) -> AggregatedOutput {
        let samples = self
            .universe
            .samples(resolution)
            .into_iter()
            .map(|u| {
                let degree = self
                    .terms
                    .iter()
                    .zip(strengths.iter().copied().chain(std::iter::repeat(0.0)))
                    .map(|(term, strength)| strength.min(term.shape.degree(u)))
                    .fold(0.0, f64::max);
                (u, degree)
            })
            .collect();

        AggregatedOutput::new(samples)
    }
}

/// Builder for constructing variables fluently from raw triples.
///
/// Shape validation is deferred to [`LinguisticVariableBuilder::build`] so the
/// first invalid term is reported with its variable and label.
#[derive(Debug)]
pub struct LinguisticVariableBuilder {
    name: String,
    universe: Universe,
    terms: Vec<(String, [f64; 3])>,
}

impl LinguisticVariableBuilder {
    /// Adds a triangular term `(a, b, c)`.
    pub fn term(mut self, label: impl Into<String>, a: f64, b: f64, c: f64) -> Self {
        self.terms.push((label.into(), [a, b, c]));
        self
    }

    pub fn build(self) -> Result<LinguisticVariable, ConfigError> {
        let mut terms = Vec::with_capacity(self.terms.len());

        for (label, [a, b, c]) in self.terms {
            let shape = Triangle::new(a, b, c).map_err(|source| ConfigError::InvalidTerm {
                variable: self.name.clone(),
                label: label.clone(),
                source: Box::new(source),
            })?;
            terms.push(Term { label, shape });
        }

        LinguisticVariable::new(self.name, self.universe, terms)
    }
}

// ============================================================================
// Fuzzification result
// ============================================================================

/// Degrees of one crisp value in every term of a variable, in term order.
#[derive(Clone, Debug, PartialEq)]
pub struct Fuzzified<'a> {
    variable: &'a LinguisticVariable,
    degrees: Vec<f64>,
}

impl<'a> Fuzzified<'a> {
    pub fn variable(&self) -> &'a LinguisticVariable {
        self.variable
    }

    /// Degree for a term label, `None` if the label is unknown.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.variable.term_index(label).map(|i| self.degrees[i])
    }

    /// Degree by term position.
    #[inline]
    pub fn degree_at(&self, index: usize) -> f64 {
        self.degrees.get(index).copied().unwrap_or(0.0)
    }

    /// Iterates `(label, degree)` pairs in term order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, f64)> + '_ {
        self.variable
            .terms
            .iter()
            .map(|t| t.label.as_str())
            .zip(self.degrees.iter().copied())
    }
}
