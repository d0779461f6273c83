//! Weapon profiles and the arsenal that holds them.
//!
//! [`WeaponSpec`] and [`ArsenalSpec`] are plain descriptions (deserializable from
//! RON). [`ArsenalSpec::build`] validates them into an [`Arsenal`], after which
//! nothing can change: the same rule bases serve scoring and introspection.

use fuzzy_core::{EngineConfig, LinguisticVariable, RuleBase, RuleSpec, Universe};

use crate::error::ContentError;

/// Name of the target-distance input variable.
pub const DISTANCE: &str = "distance";
/// Name of the ammunition-level input variable.
pub const AMMUNITION: &str = "ammunition";
/// Name of the desirability output variable.
pub const DESIRABILITY: &str = "desirability";

// ============================================================================
// Descriptions
// ============================================================================

/// Unchecked variable description: a name, universe bounds and labelled triples.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "VariableSpec::percent_bounds"))]
    pub universe: (f64, f64),
    pub terms: Vec<(String, [f64; 3])>,
}

impl VariableSpec {
    pub const fn percent_bounds() -> (f64, f64) {
        (0.0, 100.0)
    }

    /// Describes a variable over `[0, 100]`.
    pub fn percent(name: impl Into<String>, terms: &[(&str, [f64; 3])]) -> Self {
        Self {
            name: name.into(),
            universe: Self::percent_bounds(),
            terms: terms
                .iter()
                .map(|&(label, shape)| (label.to_string(), shape))
                .collect(),
        }
    }

    pub fn build(&self) -> Result<LinguisticVariable, fuzzy_core::ConfigError> {
        let (min, max) = self.universe;
        self.terms
            .iter()
            .fold(
                LinguisticVariable::builder(self.name.clone(), Universe::new(min, max)?),
                |builder, (label, [a, b, c])| builder.term(label.clone(), *a, *b, *c),
            )
            .build()
    }
}

/// Unchecked weapon description.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponSpec {
    pub name: String,
    /// Opaque presentation tag (e.g. a hex colour); never read by the engine.
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: String,
    pub inputs: Vec<VariableSpec>,
    pub output: VariableSpec,
    pub rules: Vec<RuleSpec>,
}

impl WeaponSpec {
    /// Validates the description into an immutable profile.
    pub fn build(&self, config: EngineConfig) -> Result<WeaponProfile, ContentError> {
        let wrap = |source| ContentError::Weapon {
            weapon: self.name.clone(),
            source,
        };

        let inputs = self
            .inputs
            .iter()
            .map(VariableSpec::build)
            .collect::<Result<Vec<_>, _>>()
            .map_err(wrap)?;
        let output = self.output.build().map_err(wrap)?;
        let rule_base =
            RuleBase::new(inputs, output, self.rules.clone(), config).map_err(wrap)?;

        Ok(WeaponProfile {
            name: self.name.clone(),
            color: self.color.clone(),
            rule_base,
        })
    }
}

/// Unchecked arsenal description: engine settings plus weapons in declaration order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArsenalSpec {
    #[cfg_attr(feature = "serde", serde(default))]
    pub engine: EngineConfig,
    pub weapons: Vec<WeaponSpec>,
}

impl ArsenalSpec {
    /// Validates every weapon with the arsenal's own engine settings.
    pub fn build(&self) -> Result<Arsenal, ContentError> {
        self.build_with(self.engine)
    }

    /// Validates every weapon, overriding the engine settings.
    pub fn build_with(&self, config: EngineConfig) -> Result<Arsenal, ContentError> {
        config.validate()?;
        let weapons = self
            .weapons
            .iter()
            .map(|w| w.build(config))
            .collect::<Result<Vec<_>, _>>()?;
        Arsenal::new(weapons)
    }
}

// ============================================================================
// Validated configuration
// ============================================================================

/// A selectable weapon and the rule base that scores it.
#[derive(Clone, Debug, PartialEq)]
pub struct WeaponProfile {
    name: String,
    color: String,
    rule_base: RuleBase,
}

impl WeaponProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn rule_base(&self) -> &RuleBase {
        &self.rule_base
    }
}

/// Ordered, immutable set of weapon profiles with unique names.
///
/// Declaration order is significant: it breaks ties during selection.
#[derive(Clone, Debug, PartialEq)]
pub struct Arsenal {
    weapons: Vec<WeaponProfile>,
}

impl Arsenal {
    pub fn new(weapons: Vec<WeaponProfile>) -> Result<Self, ContentError> {
        if weapons.is_empty() {
            return Err(ContentError::EmptyArsenal);
        }
        for (i, weapon) in weapons.iter().enumerate() {
            if weapons[..i].iter().any(|w| w.name == weapon.name) {
                return Err(ContentError::DuplicateWeapon(weapon.name.clone()));
            }
        }
        Ok(Self { weapons })
    }

    /// Weapons in declaration order.
    pub fn weapons(&self) -> &[WeaponProfile] {
        &self.weapons
    }

    pub fn get(&self, name: &str) -> Option<&WeaponProfile> {
        self.weapons.iter().find(|w| w.name == name)
    }

    /// Declaration index of a weapon.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.weapons.iter().position(|w| w.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.weapons.iter().map(|w| w.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}
