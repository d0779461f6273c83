//! Errors raised while assembling an arsenal.

use fuzzy_core::ConfigError;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ContentError {
    #[error("weapon '{weapon}' has an invalid configuration")]
    Weapon {
        weapon: String,
        #[source]
        source: ConfigError,
    },

    #[error("weapon '{0}' is declared more than once")]
    DuplicateWeapon(String),

    #[error("arsenal declares no weapons")]
    EmptyArsenal,

    #[error(transparent)]
    Engine(#[from] ConfigError),
}

impl ContentError {
    /// Returns a stable identifier for this error variant.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Weapon { .. } => "invalid_weapon",
            Self::DuplicateWeapon(_) => "duplicate_weapon",
            Self::EmptyArsenal => "empty_arsenal",
            Self::Engine(_) => "invalid_engine_config",
        }
    }
}
