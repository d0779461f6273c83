//! Error types surfaced by the weapon evaluator.
//!
//! Per-weapon failures never abort a multi-weapon evaluation: they are recorded
//! on the affected [`crate::WeaponScore`] and the remaining weapons are scored.
use fuzzy_core::EvalError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SelectionError>;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum SelectionError {
    #[error("unknown weapon '{0}'")]
    UnknownWeapon(String),

    #[error("no ammunition level supplied for weapon '{0}'")]
    MissingAmmunition(String),

    #[error("failed to evaluate weapon '{weapon}'")]
    Evaluation {
        weapon: String,
        #[source]
        source: EvalError,
    },

    #[error("evaluation task for weapon '{weapon}' failed: {reason}")]
    TaskFailed { weapon: String, reason: String },
}

impl SelectionError {
    /// Returns a stable identifier for this error variant.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownWeapon(_) => "unknown_weapon",
            Self::MissingAmmunition(_) => "missing_ammunition",
            Self::Evaluation { .. } => "evaluation_failed",
            Self::TaskFailed { .. } => "task_failed",
        }
    }
}
