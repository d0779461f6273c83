//! Weapon scoring and selection over a shared arsenal.
//!
//! This crate turns the validated rule bases of an
//! [`arsenal_content::Arsenal`] into per-weapon desirability scores and picks
//! the best weapon for a combat situation.
//!
//! Modules are organized by responsibility:
//! - [`evaluator`] hosts [`WeaponEvaluator`], sequential and concurrent
//! - [`score`] holds per-weapon results and the [`Selection`]
//! - [`band`] maps scores onto coarse desirability bands
//! - [`error`] defines the per-weapon failure type
pub mod band;
pub mod error;
pub mod evaluator;
pub mod score;

pub use band::Band;
pub use error::{Result, SelectionError};
pub use evaluator::{AmmoByWeapon, WeaponEvaluator};
pub use score::{Selection, WeaponScore};
