//! Error types for the inference engine.
//!
//! Two categories exist and never overlap:
//!
//! - [`ConfigError`]: fatal, raised while building variables and rule bases.
//!   Once a [`crate::RuleBase`] exists, its configuration is known to be valid.
//! - [`EvalError`]: the caller handed [`crate::RuleBase::evaluate`] an input set of
//!   the wrong shape (missing variable, NaN). Numeric degeneracy such as an
//!   input with zero rule coverage is *not* an error; it is reported through
//!   [`crate::Coverage`].

use thiserror::Error;

/// Configuration failure detected while constructing engine entities.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("triangle ({a}, {b}, {c}) must satisfy a <= b <= c with finite values")]
    MalformedShape { a: f64, b: f64, c: f64 },

    #[error("term '{label}' of variable '{variable}' has an invalid shape")]
    InvalidTerm {
        variable: String,
        label: String,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("universe [{min}, {max}] must be finite with min < max")]
    InvalidUniverse { min: f64, max: f64 },

    #[error("term '{label}' of variable '{variable}' lies outside the universe [{min}, {max}]")]
    ShapeOutsideUniverse {
        variable: String,
        label: String,
        min: f64,
        max: f64,
    },

    #[error("variable '{variable}' declares term '{label}' more than once")]
    DuplicateTerm { variable: String, label: String },

    #[error("variable '{0}' has no terms")]
    EmptyVariable(String),

    #[error("variable '{0}' is declared more than once in the rule base")]
    DuplicateVariable(String),

    #[error("rule base has no rules")]
    EmptyRuleBase,

    #[error("rule {rule} has no antecedents")]
    EmptyAntecedent { rule: usize },

    #[error("rule {rule} references unknown input variable '{variable}'")]
    UnknownVariable { rule: usize, variable: String },

    #[error("rule {rule} references unknown term '{label}' of variable '{variable}'")]
    UnknownTerm {
        rule: usize,
        variable: String,
        label: String,
    },

    #[error("rule {rule} uses variable '{variable}' in more than one antecedent")]
    RepeatedAntecedent { rule: usize, variable: String },

    #[error("rule {rule} has weight {weight}, expected a value in [0, 1]")]
    InvalidWeight { rule: usize, weight: f64 },

    #[error("sampling resolution {0} must be finite and greater than zero")]
    InvalidResolution(f64),

    #[error("sampling resolution {resolution} yields more than {max} samples over a span of {span}")]
    ResolutionTooFine {
        resolution: f64,
        span: f64,
        max: usize,
    },
}

impl ConfigError {
    /// Returns a stable identifier for this error variant.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedShape { .. } => "malformed_shape",
            Self::InvalidTerm { .. } => "invalid_term",
            Self::InvalidUniverse { .. } => "invalid_universe",
            Self::ShapeOutsideUniverse { .. } => "shape_outside_universe",
            Self::DuplicateTerm { .. } => "duplicate_term",
            Self::EmptyVariable(_) => "empty_variable",
            Self::DuplicateVariable(_) => "duplicate_variable",
            Self::EmptyRuleBase => "empty_rule_base",
            Self::EmptyAntecedent { .. } => "empty_antecedent",
            Self::UnknownVariable { .. } => "unknown_variable",
            Self::UnknownTerm { .. } => "unknown_term",
            Self::RepeatedAntecedent { .. } => "repeated_antecedent",
            Self::InvalidWeight { .. } => "invalid_weight",
            Self::InvalidResolution(_) => "invalid_resolution",
            Self::ResolutionTooFine { .. } => "resolution_too_fine",
        }
    }
}

/// Call-shape failure while evaluating a rule base.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    #[error("no crisp value supplied for input variable '{0}'")]
    MissingInput(String),

    #[error("crisp value for input variable '{0}' is NaN")]
    NanInput(String),
}

impl EvalError {
    /// Returns a stable identifier for this error variant.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingInput(_) => "missing_input",
            Self::NanInput(_) => "nan_input",
        }
    }
}
