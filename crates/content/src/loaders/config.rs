//! Engine configuration loader.

use std::path::Path;

use fuzzy_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct EngineConfigLoader;

impl EngineConfigLoader {
    /// Load engine settings from a TOML file.
    ///
    /// Missing keys take their defaults; the result is validated.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::from_toml(&content)
    }

    /// Parse engine settings from TOML text.
    pub fn from_toml(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse engine config TOML: {}", e))?;

        config.validate()?;
        Ok(config)
    }
}
