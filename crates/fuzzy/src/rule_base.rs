//! Rule base construction and the Mamdani evaluation pipeline.
//!
//! # Pipeline
//!
//! 1. **Fuzzify** every input variable against its crisp value
//! 2. **Fire** every rule: `min` over antecedent degrees, scaled by weight
//! 3. **Aggregate** per output label: `max` over the rules concluding it
//! 4. **Reconstruct** the output function: clip each term at its aggregated
//!    strength, take the pointwise `max`, sample across the output universe
//! 5. **Defuzzify** with the centroid
//!
//! # Zero coverage
//!
//! When every rule fires with strength 0 (input outside every support, or an
//! antecedent combination the table does not cover) the reconstructed function
//! is identically zero and the centroid is undefined. The score is then `0.0`
//! and [`Evaluation::coverage`] reports [`Coverage::NoCoverage`], so callers
//! can tell it apart from a computed low desirability.
//!
//! # Sharing
//!
//! A [`RuleBase`] is immutable after construction. Evaluation takes `&self`
//! and allocates only per-call buffers, so one instance can serve any number
//! of concurrent callers.

use std::collections::HashMap;

use crate::config::EngineConfig;
use crate::defuzz::AggregatedOutput;
use crate::error::{ConfigError, EvalError};
use crate::rule::{Antecedent, Rule, RuleSpec};
use crate::variable::{Fuzzified, LinguisticVariable};

/// Crisp inputs keyed by input variable name.
pub type CrispInputs = HashMap<String, f64>;

/// Whether any rule contributed to an evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Coverage {
    /// At least one rule fired with nonzero strength.
    Covered,
    /// The sampled output function is zero everywhere (every rule fired with
    /// strength 0); the score is the `0.0` fallback.
    NoCoverage,
}

impl Coverage {
    #[inline]
    pub fn is_covered(self) -> bool {
        matches!(self, Coverage::Covered)
    }
}

/// Strength produced by one rule during an evaluation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RuleFiring {
    /// Position of the rule in the rule base.
    pub rule: usize,
    /// Output term label the rule concludes.
    pub consequent: String,
    pub strength: f64,
}

/// Result of evaluating a rule base for one set of crisp inputs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Evaluation {
    score: f64,
    coverage: Coverage,
    firings: Vec<RuleFiring>,
    aggregated: Vec<(String, f64)>,
}

impl Evaluation {
    /// Crisp defuzzified score.
    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[inline]
    pub fn coverage(&self) -> Coverage {
        self.coverage
    }

    /// Returns true if the score is the zero-coverage fallback.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !self.coverage.is_covered()
    }

    /// Per-rule strengths, in rule order.
    pub fn firings(&self) -> &[RuleFiring] {
        &self.firings
    }

    /// Rules that fired with nonzero strength.
    pub fn active_firings(&self) -> impl Iterator<Item = &RuleFiring> {
        self.firings.iter().filter(|f| f.strength > 0.0)
    }

    /// Aggregated strength per output label, in output term order.
    pub fn aggregated(&self) -> &[(String, f64)] {
        &self.aggregated
    }

    /// Aggregated strength for one output label (0 for unknown labels).
    pub fn strength_of(&self, label: &str) -> f64 {
        self.aggregated
            .iter()
            .find(|(l, _)| l == label)
            .map_or(0.0, |&(_, s)| s)
    }

    /// Sum of aggregated strengths; zero exactly when coverage is missing.
    pub fn total_strength(&self) -> f64 {
        self.aggregated.iter().map(|&(_, s)| s).sum()
    }
}

/// Immutable set of rules over shared input variables and one output variable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RuleBase {
    inputs: Vec<LinguisticVariable>,
    output: LinguisticVariable,
    rules: Vec<Rule>,
    config: EngineConfig,
}

impl RuleBase {
    /// Validates the configuration and compiles every rule.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::DuplicateVariable`] if two variables share a name
    /// - [`ConfigError::EmptyRuleBase`] if `rules` is empty
    /// - [`ConfigError::InvalidResolution`] if `config` is invalid
    /// - [`ConfigError::ResolutionTooFine`] if sampling the output universe would
    ///   exceed [`EngineConfig::MAX_SAMPLES`]
    /// - any rule-level error from compiling a [`RuleSpec`]
    pub fn new(
        inputs: Vec<LinguisticVariable>,
        output: LinguisticVariable,
        rules: Vec<RuleSpec>,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate_for(output.universe())?;

        for (i, var) in inputs.iter().enumerate() {
            if inputs[..i].iter().any(|v| v.name() == var.name()) {
                return Err(ConfigError::DuplicateVariable(var.name().to_string()));
            }
        }
        if inputs.iter().any(|v| v.name() == output.name()) {
            return Err(ConfigError::DuplicateVariable(output.name().to_string()));
        }

        if rules.is_empty() {
            return Err(ConfigError::EmptyRuleBase);
        }

        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(index, spec)| compile_rule(index, spec, &inputs, &output))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            inputs,
            output,
            rules,
            config,
        })
    }

    /// Input variables in declaration order.
    pub fn inputs(&self) -> &[LinguisticVariable] {
        &self.inputs
    }

    pub fn input(&self, name: &str) -> Option<&LinguisticVariable> {
        self.inputs.iter().find(|v| v.name() == name)
    }

    pub fn output(&self) -> &LinguisticVariable {
        &self.output
    }

    /// Compiled rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluates the rule base for crisp inputs keyed by variable name.
    ///
    /// Extra entries in `inputs` are ignored.
    pub fn evaluate(&self, inputs: &CrispInputs) -> Result<Evaluation, EvalError> {
        self.evaluate_with(|name| inputs.get(name).copied())
    }

    /// Evaluates the rule base, looking up each input variable through `lookup`.
    pub fn evaluate_with<F>(&self, lookup: F) -> Result<Evaluation, EvalError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        let fuzzified = self.fuzzify(lookup)?;

        let strengths: Vec<f64> = self.rules.iter().map(|r| r.fire(&fuzzified)).collect();
        let aggregated = self.aggregate(&strengths);

        let output = self.output.reconstruct(&aggregated, self.config.resolution);
        let (score, coverage) = if !output.is_empty() {
            (output.centroid(), Coverage::Covered)
        } else {
            (0.0, Coverage::NoCoverage)
        };

        tracing::debug!(
            "RuleBase: output={} score={:.3} coverage={:?} active_rules={}",
            self.output.name(),
            score,
            coverage,
            strengths.iter().filter(|&&s| s > 0.0).count()
        );

        let firings = self
            .rules
            .iter()
            .zip(strengths)
            .enumerate()
            .map(|(rule, (r, strength))| RuleFiring {
                rule,
                consequent: r.consequent.clone(),
                strength,
            })
            .collect();

        let aggregated = self
            .output
            .terms()
            .iter()
            .map(|t| t.label.clone())
            .zip(aggregated)
            .collect();

        Ok(Evaluation {
            score,
            coverage,
            firings,
            aggregated,
        })
    }

    /// Reconstructs the sampled output function for crisp inputs.
    ///
    /// Exposes step 4 of the pipeline for presentation layers.
    pub fn output_function(&self, inputs: &CrispInputs) -> Result<AggregatedOutput, EvalError> {
        let fuzzified = self.fuzzify(|name| inputs.get(name).copied())?;
        let strengths: Vec<f64> = self.rules.iter().map(|r| r.fire(&fuzzified)).collect();
        let aggregated = self.aggregate(&strengths);
        Ok(self.output.reconstruct(&aggregated, self.config.resolution))
    }

    fn fuzzify<F>(&self, lookup: F) -> Result<Vec<Fuzzified<'_>>, EvalError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        self.inputs
            .iter()
            .map(|var| {
                let x = lookup(var.name())
                    .ok_or_else(|| EvalError::MissingInput(var.name().to_string()))?;
                if x.is_nan() {
                    return Err(EvalError::NanInput(var.name().to_string()));
                }
                Ok(var.fuzzify(x))
            })
            .collect()
    }

    /// Max-aggregates rule strengths per output term.
    fn aggregate(&self, strengths: &[f64]) -> Vec<f64> {
        let mut aggregated = vec![0.0_f64; self.output.terms().len()];
        for (rule, &strength) in self.rules.iter().zip(strengths) {
            let slot = &mut aggregated[rule.consequent_index];
            *slot = slot.max(strength);
        }
        aggregated
    }
}

fn compile_rule(
    index: usize,
    spec: RuleSpec,
    inputs: &[LinguisticVariable],
    output: &LinguisticVariable,
) -> Result<Rule, ConfigError> {
    if spec.antecedents.is_empty() {
        return Err(ConfigError::EmptyAntecedent { rule: index });
    }
    if !(0.0..=1.0).contains(&spec.weight) {
        return Err(ConfigError::InvalidWeight {
            rule: index,
            weight: spec.weight,
        });
    }

    let mut antecedents: Vec<Antecedent> = Vec::with_capacity(spec.antecedents.len());
    for (variable, term) in spec.antecedents {
        let variable_index = inputs
            .iter()
            .position(|v| v.name() == variable)
            .ok_or_else(|| ConfigError::UnknownVariable {
                rule: index,
                variable: variable.clone(),
            })?;

        if antecedents.iter().any(|a| a.variable_index == variable_index) {
            return Err(ConfigError::RepeatedAntecedent {
                rule: index,
                variable,
            });
        }

        let term_index =
            inputs[variable_index]
                .term_index(&term)
                .ok_or_else(|| ConfigError::UnknownTerm {
                    rule: index,
                    variable: variable.clone(),
                    label: term.clone(),
                })?;

        antecedents.push(Antecedent {
            variable,
            term,
            variable_index,
            term_index,
        });
    }

    let consequent_index =
        output
            .term_index(&spec.consequent)
            .ok_or_else(|| ConfigError::UnknownTerm {
                rule: index,
                variable: output.name().to_string(),
                label: spec.consequent.clone(),
            })?;

    Ok(Rule {
        antecedents,
        consequent: spec.consequent,
        consequent_index,
        weight: spec.weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Universe;

    fn distance() -> LinguisticVariable {
        LinguisticVariable::builder("distance", Universe::percent())
            .term("close", 0.0, 0.0, 35.0)
            .term("medium", 25.0, 50.0, 75.0)
            .term("far", 65.0, 100.0, 100.0)
            .build()
            .unwrap()
    }

    fn ammunition() -> LinguisticVariable {
        LinguisticVariable::builder("ammunition", Universe::percent())
            .term("low", 0.0, 0.0, 35.0)
            .term("medium", 25.0, 50.0, 75.0)
            .term("high", 65.0, 100.0, 100.0)
            .build()
            .unwrap()
    }

    fn desirability() -> LinguisticVariable {
        LinguisticVariable::builder("desirability", Universe::percent())
            .term("undesirable", 0.0, 0.0, 40.0)
            .term("desirable", 30.0, 50.0, 70.0)
            .term("essential", 60.0, 100.0, 100.0)
            .build()
            .unwrap()
    }

    fn rule(d: &str, a: &str, out: &str) -> RuleSpec {
        RuleSpec::new([("distance", d), ("ammunition", a)], out)
    }

    fn build(rules: Vec<RuleSpec>) -> Result<RuleBase, ConfigError> {
        RuleBase::new(
            vec![distance(), ammunition()],
            desirability(),
            rules,
            EngineConfig::default(),
        )
    }

    fn inputs(d: f64, a: f64) -> CrispInputs {
        CrispInputs::from([("distance".to_string(), d), ("ammunition".to_string(), a)])
    }

    #[test]
    fn and_is_min_of_antecedent_degrees() {
        let rb = build(vec![rule("close", "medium", "desirable")]).unwrap();
        let eval = rb.evaluate(&inputs(30.0, 30.0)).unwrap();

        let d1 = distance().fuzzify(30.0).get("close").unwrap();
        let d2 = ammunition().fuzzify(30.0).get("medium").unwrap();
        assert_eq!(eval.firings()[0].strength, d1.min(d2));
        assert_ne!(eval.firings()[0].strength, d1 * d2);
    }

    #[test]
    fn aggregation_is_max_over_rules_with_same_label() {
        let rb = build(vec![
            rule("close", "low", "desirable"),
            rule("medium", "medium", "desirable"),
        ])
        .unwrap();
        let eval = rb.evaluate(&inputs(30.0, 30.0)).unwrap();

        let s1 = eval.firings()[0].strength;
        let s2 = eval.firings()[1].strength;
        assert!(s1 > 0.0 && s2 > 0.0);
        assert_eq!(eval.strength_of("desirable"), s1.max(s2));
        assert_eq!(eval.strength_of("undesirable"), 0.0);
        assert_eq!(eval.strength_of("essential"), 0.0);
    }

    #[test]
    fn uncovered_combination_scores_zero_without_fault() {
        // Only close distance is covered; a far target leaves every rule at 0.
        let rb = build(vec![rule("close", "low", "essential")]).unwrap();
        let eval = rb.evaluate(&inputs(90.0, 10.0)).unwrap();

        assert_eq!(eval.score(), 0.0);
        assert!(eval.score().is_finite());
        assert_eq!(eval.coverage(), Coverage::NoCoverage);
        assert!(eval.is_degenerate());
        assert_eq!(eval.total_strength(), 0.0);
    }

    #[test]
    fn input_outside_every_support_scores_zero() {
        let rb = build(vec![
            rule("close", "low", "undesirable"),
            rule("far", "high", "essential"),
        ])
        .unwrap();
        let eval = rb.evaluate(&inputs(-10.0, 50.0)).unwrap();
        assert_eq!(eval.score(), 0.0);
        assert!(eval.is_degenerate());
    }

    #[test]
    fn covered_low_score_is_distinguishable_from_fallback() {
        let rb = build(vec![rule("close", "low", "undesirable")]).unwrap();
        let eval = rb.evaluate(&inputs(0.0, 0.0)).unwrap();
        assert!(eval.score() < 30.0);
        assert_eq!(eval.coverage(), Coverage::Covered);
        assert!(eval.total_strength() > 0.0);
    }

    #[test]
    fn full_undesirable_centroid() {
        let rb = build(vec![rule("medium", "medium", "undesirable")]).unwrap();
        let eval = rb.evaluate(&inputs(50.0, 50.0)).unwrap();
        // Σu(40-u) / Σ(40-u) over u = 0..40
        assert!((eval.score() - 13.0).abs() < 1e-9);
    }

    #[test]
    fn weight_scales_strength() {
        let rb = build(vec![rule("medium", "medium", "desirable").with_weight(0.5)]).unwrap();
        let eval = rb.evaluate(&inputs(50.0, 50.0)).unwrap();
        assert_eq!(eval.firings()[0].strength, 0.5);
        assert!((eval.score() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn missing_input_is_reported() {
        let rb = build(vec![rule("close", "low", "undesirable")]).unwrap();
        let partial = CrispInputs::from([("distance".to_string(), 10.0)]);
        assert_eq!(
            rb.evaluate(&partial),
            Err(EvalError::MissingInput("ammunition".into()))
        );
    }

    #[test]
    fn nan_input_is_reported() {
        let rb = build(vec![rule("close", "low", "undesirable")]).unwrap();
        assert_eq!(
            rb.evaluate(&inputs(f64::NAN, 10.0)),
            Err(EvalError::NanInput("distance".into()))
        );
    }

    #[test]
    fn infinite_input_saturates_instead_of_failing() {
        let rb = build(vec![rule("far", "low", "essential")]).unwrap();
        let eval = rb.evaluate(&inputs(f64::INFINITY, 0.0)).unwrap();
        assert_eq!(eval.coverage(), Coverage::NoCoverage);
        assert_eq!(eval.score(), 0.0);
    }

    #[test]
    fn resolution_too_fine_for_universe_is_rejected() {
        let err = RuleBase::new(
            vec![distance(), ammunition()],
            desirability(),
            vec![rule("close", "low", "undesirable")],
            EngineConfig { resolution: 1e-300 },
        )
        .unwrap_err();
        assert_eq!(err.code(), "resolution_too_fine");

        let finest = 200.0 / EngineConfig::MAX_SAMPLES as f64;
        assert!(
            RuleBase::new(
                vec![distance(), ammunition()],
                desirability(),
                vec![rule("close", "low", "undesirable")],
                EngineConfig { resolution: finest },
            )
            .is_ok()
        );
    }

    #[test]
    fn evaluation_is_pure() {
        let rb = build(vec![
            rule("close", "low", "undesirable"),
            rule("medium", "medium", "desirable"),
        ])
        .unwrap();
        let first = rb.evaluate(&inputs(30.0, 30.0)).unwrap();
        let second = rb.evaluate(&inputs(30.0, 30.0)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn output_function_matches_score() {
        let rb = build(vec![rule("far", "high", "essential")]).unwrap();
        let x = inputs(90.0, 90.0);
        let out = rb.output_function(&x).unwrap();
        assert_eq!(out.samples().len(), 101);
        assert_eq!(out.centroid(), rb.evaluate(&x).unwrap().score());
    }

    #[test]
    fn rejects_unknown_variable() {
        let err = build(vec![RuleSpec::new([("range", "close")], "desirable")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownVariable {
                rule: 0,
                variable: "range".into()
            }
        );
    }

    #[test]
    fn rejects_unknown_antecedent_term() {
        let err = build(vec![rule("close", "plenty", "desirable")]).unwrap_err();
        assert_eq!(err.code(), "unknown_term");
    }

    #[test]
    fn rejects_unknown_consequent_term() {
        let err = build(vec![
            rule("close", "low", "desirable"),
            rule("far", "high", "mandatory"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownTerm {
                rule: 1,
                variable: "desirability".into(),
                label: "mandatory".into()
            }
        );
    }

    #[test]
    fn rejects_empty_rule_base() {
        assert_eq!(build(vec![]).unwrap_err(), ConfigError::EmptyRuleBase);
    }

    #[test]
    fn rejects_empty_and_repeated_antecedents() {
        let empty = RuleSpec::new(Vec::<(String, String)>::new(), "desirable");
        assert_eq!(
            build(vec![empty]).unwrap_err(),
            ConfigError::EmptyAntecedent { rule: 0 }
        );

        let repeated = RuleSpec::new([("distance", "close"), ("distance", "far")], "desirable");
        assert_eq!(build(vec![repeated]).unwrap_err().code(), "repeated_antecedent");
    }

    #[test]
    fn rejects_out_of_range_weight() {
        let err = build(vec![rule("close", "low", "desirable").with_weight(1.5)]).unwrap_err();
        assert_eq!(err.code(), "invalid_weight");
    }

    #[test]
    fn rejects_duplicate_variables() {
        let err = RuleBase::new(
            vec![distance(), distance()],
            desirability(),
            vec![RuleSpec::new([("distance", "close")], "desirable")],
            EngineConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateVariable("distance".into()));
    }

    #[test]
    fn single_input_rules_are_allowed() {
        let rb = build(vec![RuleSpec::new([("distance", "far")], "essential")]).unwrap();
        let eval = rb.evaluate(&inputs(100.0, 0.0)).unwrap();
        assert!(eval.score() >= 60.0);
    }

    #[test]
    fn introspection_reflects_configuration() {
        let rb = build(vec![rule("medium", "high", "essential")]).unwrap();
        assert_eq!(rb.inputs().len(), 2);
        assert_eq!(rb.output().name(), "desirability");
        assert_eq!(rb.rules()[0].term_for("distance"), Some("medium"));
        assert_eq!(rb.rules()[0].term_for("ammunition"), Some("high"));
        assert_eq!(rb.rules()[0].consequent(), "essential");
        assert_eq!(
            rb.rules()[0].to_string(),
            "IF distance IS medium AND ammunition IS high THEN essential"
        );
    }
}
