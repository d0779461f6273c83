//! Built-in weapon presets.
//!
//! Three weapons share one term geometry and differ only in their 3x3 rule
//! tables. A table row is a distance term (close, medium, far); a column is an
//! ammunition term (low, medium, high); each cell is a desirability term.
//!
//! | Rocket Launcher | low | medium | high |
//! |-----------------|-----|--------|------|
//! | close           | U   | U      | U    |
//! | medium          | U   | D      | E    |
//! | far             | U   | D      | E    |
//!
//! | Sniper Rifle | low | medium | high |
//! |--------------|-----|--------|------|
//! | close        | U   | U      | U    |
//! | medium       | D   | D      | E    |
//! | far          | E   | E      | E    |
//!
//! | Pistol | low | medium | high |
//! |--------|-----|--------|------|
//! | close  | D   | E      | E    |
//! | medium | U   | U      | D    |
//! | far    | U   | U      | U    |

use fuzzy_core::{EngineConfig, RuleSpec};

use crate::error::ContentError;
use crate::weapon::{
    AMMUNITION, Arsenal, ArsenalSpec, DESIRABILITY, DISTANCE, VariableSpec, WeaponSpec,
};

pub const DISTANCE_TERMS: [(&str, [f64; 3]); 3] = [
    ("close", [0.0, 0.0, 35.0]),
    ("medium", [25.0, 50.0, 75.0]),
    ("far", [65.0, 100.0, 100.0]),
];

pub const AMMUNITION_TERMS: [(&str, [f64; 3]); 3] = [
    ("low", [0.0, 0.0, 35.0]),
    ("medium", [25.0, 50.0, 75.0]),
    ("high", [65.0, 100.0, 100.0]),
];

pub const DESIRABILITY_TERMS: [(&str, [f64; 3]); 3] = [
    ("undesirable", [0.0, 0.0, 40.0]),
    ("desirable", [30.0, 50.0, 70.0]),
    ("essential", [60.0, 100.0, 100.0]),
];

const U: &str = "undesirable";
const D: &str = "desirable";
const E: &str = "essential";

/// Consequent labels indexed `[distance term][ammunition term]`.
pub type RuleTable = [[&'static str; 3]; 3];

pub const ROCKET_LAUNCHER: RuleTable = [
    [U, U, U], // close
    [U, D, E], // medium
    [U, D, E], // far
];

pub const SNIPER_RIFLE: RuleTable = [
    [U, U, U], // close
    [D, D, E], // medium
    [E, E, E], // far
];

pub const PISTOL: RuleTable = [
    [D, E, E], // close
    [U, U, D], // medium
    [U, U, U], // far
];

/// Expands a table into rules, row-major.
pub fn table_rules(table: &RuleTable) -> Vec<RuleSpec> {
    let mut rules = Vec::with_capacity(9);
    for (row, (distance, _)) in table.iter().zip(DISTANCE_TERMS) {
        for (consequent, (ammunition, _)) in row.iter().zip(AMMUNITION_TERMS) {
            rules.push(RuleSpec::new(
                [(DISTANCE, distance), (AMMUNITION, ammunition)],
                *consequent,
            ));
        }
    }
    rules
}

/// Describes a weapon using the standard term geometry and the given table.
pub fn weapon_spec(name: &str, color: &str, table: &RuleTable) -> WeaponSpec {
    WeaponSpec {
        name: name.to_string(),
        color: color.to_string(),
        inputs: vec![
            VariableSpec::percent(DISTANCE, &DISTANCE_TERMS),
            VariableSpec::percent(AMMUNITION, &AMMUNITION_TERMS),
        ],
        output: VariableSpec::percent(DESIRABILITY, &DESIRABILITY_TERMS),
        rules: table_rules(table),
    }
}

/// Describes the standard arsenal in declaration order.
pub fn standard_spec() -> ArsenalSpec {
    ArsenalSpec {
        engine: EngineConfig::default(),
        weapons: vec![
            weapon_spec("Rocket Launcher", "#ff6b6b", &ROCKET_LAUNCHER),
            weapon_spec("Sniper Rifle", "#4ecdc4", &SNIPER_RIFLE),
            weapon_spec("Pistol", "#45b7d1", &PISTOL),
        ],
    }
}

/// Builds the standard arsenal with default engine settings.
pub fn standard_arsenal() -> Result<Arsenal, ContentError> {
    standard_spec().build()
}
