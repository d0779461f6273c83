//! Data-driven weapon definitions and loaders.
//!
//! This crate houses the weapon configuration consumed by the evaluator:
//! - Weapon descriptions ([`WeaponSpec`], [`ArsenalSpec`]) that validate into the
//!   immutable [`Arsenal`] of [`WeaponProfile`]s
//! - Built-in presets reproducing the three standard weapons ([`presets`])
//! - Loaders for RON arsenal files and TOML engine configuration
//!
//! Every weapon owns an independent rule base; presets share term geometry but
//! not variable instances.

pub mod error;
pub mod presets;
pub mod weapon;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use error::ContentError;
pub use presets::{RuleTable, standard_arsenal, standard_spec};
pub use weapon::{
    AMMUNITION, Arsenal, ArsenalSpec, DESIRABILITY, DISTANCE, VariableSpec, WeaponProfile,
    WeaponSpec,
};

#[cfg(feature = "loaders")]
pub use loaders::{ArsenalLoader, EngineConfigLoader};
