//! Client configuration and arsenal assembly.
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use arsenal_content::{Arsenal, ArsenalLoader, EngineConfigLoader, presets};
use fuzzy_core::EngineConfig;

/// Where the arsenal and engine settings come from.
///
/// Precedence for engine settings: `--config` file, then `ARSENAL_RESOLUTION`,
/// then whatever the arsenal itself declares.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// RON arsenal file; `None` uses the built-in presets.
    pub arsenal_path: Option<PathBuf>,
    /// TOML engine settings file.
    pub engine_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ARSENAL_FILE` - RON arsenal definition (default: built-in presets)
    /// - `ARSENAL_CONFIG` - TOML engine settings (default: none)
    pub fn from_env() -> Self {
        Self {
            arsenal_path: read_env("ARSENAL_FILE"),
            engine_path: read_env("ARSENAL_CONFIG"),
        }
    }

    /// Applies command-line paths on top of the environment.
    pub fn with_overrides(mut self, arsenal: Option<PathBuf>, engine: Option<PathBuf>) -> Self {
        if arsenal.is_some() {
            self.arsenal_path = arsenal;
        }
        if engine.is_some() {
            self.engine_path = engine;
        }
        self
    }

    pub fn load_arsenal(&self) -> Result<Arsenal> {
        let engine = self.engine_override()?;

        match (&self.arsenal_path, engine) {
            (Some(path), Some(engine)) => ArsenalLoader::load_with(path, engine),
            (Some(path), None) => ArsenalLoader::load(path),
            (None, engine) => presets::standard_spec()
                .build_with(engine.unwrap_or_default())
                .context("Failed to build built-in arsenal"),
        }
    }

    fn engine_override(&self) -> Result<Option<EngineConfig>> {
        if let Some(path) = &self.engine_path {
            return EngineConfigLoader::load(path).map(Some);
        }
        if env::var_os(EngineConfig::RESOLUTION_ENV).is_some() {
            return Ok(Some(EngineConfig::from_env()));
        }
        Ok(None)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
