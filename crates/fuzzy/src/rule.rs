//! Fuzzy rules.
//!
//! A rule is a weighted conjunction of one term per input variable mapped to one
//! term of the output variable:
//!
//! ```text
//! IF distance IS close AND ammunition IS low THEN desirability IS undesirable
//! ```
//!
//! Conjunction is `min`, never product. The weight scales the resulting
//! strength and defaults to 1.
//!
//! Rules are described with [`RuleSpec`] (names only, unchecked) and compiled
//! into [`Rule`] by [`crate::RuleBase::new`], which resolves every name to an
//! index and rejects dangling references.

use crate::variable::Fuzzified;

/// Unchecked rule description.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleSpec {
    /// `(input variable name, term label)` pairs.
    pub antecedents: Vec<(String, String)>,
    /// Term label of the output variable.
    pub consequent: String,
    #[cfg_attr(feature = "serde", serde(default = "RuleSpec::default_weight"))]
    pub weight: f64,
}

impl RuleSpec {
    pub const fn default_weight() -> f64 {
        1.0
    }

    /// Creates a unit-weight rule.
    ///
    /// ```
    /// use fuzzy_core::RuleSpec;
    ///
    /// let rule = RuleSpec::new([("distance", "far"), ("ammunition", "high")], "essential");
    /// assert_eq!(rule.antecedents.len(), 2);
    /// assert_eq!(rule.weight, 1.0);
    /// ```
    pub fn new<I, V, T>(antecedents: I, consequent: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (V, T)>,
        V: Into<String>,
        T: Into<String>,
    {
        Self {
            antecedents: antecedents
                .into_iter()
                .map(|(v, t)| (v.into(), t.into()))
                .collect(),
            consequent: consequent.into(),
            weight: Self::default_weight(),
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// One resolved antecedent clause.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Antecedent {
    pub variable: String,
    pub term: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) variable_index: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) term_index: usize,
}

/// Compiled rule with all references resolved against its rule base.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rule {
    pub(crate) antecedents: Vec<Antecedent>,
    pub(crate) consequent: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) consequent_index: usize,
    pub(crate) weight: f64,
}

impl Rule {
    pub fn antecedents(&self) -> &[Antecedent] {
        &self.antecedents
    }

    /// Output term label this rule concludes.
    pub fn consequent(&self) -> &str {
        &self.consequent
    }

    /// Position of the consequent term in the output variable.
    pub fn consequent_index(&self) -> usize {
        self.consequent_index
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Term label this rule requires of `variable`, if it constrains it.
    pub fn term_for(&self, variable: &str) -> Option<&str> {
        self.antecedents
            .iter()
            .find(|a| a.variable == variable)
            .map(|a| a.term.as_str())
    }

    /// Computes the firing strength: `weight * min(antecedent degrees)`.
    ///
    /// `inputs` is indexed like the rule base's input variables.
    pub fn fire(&self, inputs: &[Fuzzified<'_>]) -> f64 {
        let strength = self
            .antecedents
            .iter()
            .map(|a| {
                inputs
                    .get(a.variable_index)
                    .map_or(0.0, |f| f.degree_at(a.term_index))
            })
            .fold(1.0, f64::min);

        strength * self.weight
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IF ")?;
        for (i, a) in self.antecedents.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{} IS {}", a.variable, a.term)?;
        }
        write!(f, " THEN {}", self.consequent)?;
        if self.weight != 1.0 {
            write!(f, " ({:.2})", self.weight)?;
        }
        Ok(())
    }
}
