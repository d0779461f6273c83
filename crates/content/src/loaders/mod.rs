//! Content loaders for reading weapon data from files.
//!
//! - [`ArsenalLoader`]: RON arsenal descriptions ([`crate::ArsenalSpec`])
//! - [`EngineConfigLoader`]: TOML engine settings ([`fuzzy_core::EngineConfig`])

pub mod arsenal;
pub mod config;

pub use arsenal::ArsenalLoader;
pub use config::EngineConfigLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
