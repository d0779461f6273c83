//! Mamdani fuzzy inference engine.
//!
//! This crate provides a small, deterministic fuzzy inference engine that turns
//! crisp inputs into a crisp score:
//!
//! - **Triangular terms**: piecewise-linear membership shapes `(a, b, c)`
//! - **Min-AND rules**: a rule fires with the minimum of its antecedent degrees
//! - **Max aggregation**: per output label, the strongest rule wins
//! - **Centroid defuzzification**: center of gravity over a sampled universe
//!
//! All configuration is validated once at construction and is immutable
//! afterwards, so a [`RuleBase`] can be shared across threads without locking.
//!
//! # Architecture
//!
//! - [`membership`]: [`Triangle`] membership function
//! - [`variable`]: [`Universe`], [`Term`], [`LinguisticVariable`] and fuzzification
//! - [`rule`]: [`RuleSpec`] (unchecked) and [`Rule`] (compiled)
//! - [`rule_base`]: [`RuleBase`] evaluation pipeline and [`Evaluation`] results
//! - [`defuzz`]: [`AggregatedOutput`] and the [`centroid`] method
//! - [`config`]: [`EngineConfig`] (sampling resolution)
//! - [`error`]: [`ConfigError`] and [`EvalError`]

pub mod config;
pub mod defuzz;
pub mod error;
pub mod membership;
pub mod rule;
pub mod rule_base;
pub mod variable;

// Re-export core types for ergonomic API
pub use config::EngineConfig;
pub use defuzz::{AggregatedOutput, centroid};
pub use error::{ConfigError, EvalError};
pub use membership::Triangle;
pub use rule::{Antecedent, Rule, RuleSpec};
pub use rule_base::{Coverage, CrispInputs, Evaluation, RuleBase, RuleFiring};
pub use variable::{Fuzzified, LinguisticVariable, LinguisticVariableBuilder, Term, Universe};
