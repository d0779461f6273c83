//! Arsenal loader.
//!
//! File format: an [`ArsenalSpec`] in RON.
//!
//! ```ron
//! (
//!     engine: (resolution: 1.0),
//!     weapons: [
//!         (
//!             name: "Pistol",
//!             color: "#45b7d1",
//!             inputs: [
//!                 (name: "distance", terms: [("close", (0.0, 0.0, 35.0)), ...]),
//!                 (name: "ammunition", terms: [("low", (0.0, 0.0, 35.0)), ...]),
//!             ],
//!             output: (name: "desirability", terms: [("undesirable", (0.0, 0.0, 40.0)), ...]),
//!             rules: [
//!                 (antecedents: [("distance", "close"), ("ammunition", "low")], consequent: "desirable"),
//!                 ...
//!             ],
//!         ),
//!     ],
//! )
//! ```

use std::path::Path;

use fuzzy_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};
use crate::weapon::{Arsenal, ArsenalSpec};

/// Loader for weapon arsenals from RON files.
pub struct ArsenalLoader;

impl ArsenalLoader {
    /// Load and validate an arsenal using the engine settings in the file.
    pub fn load(path: &Path) -> LoadResult<Arsenal> {
        let spec = Self::load_spec(path)?;
        spec.build()
            .map_err(|e| anyhow::anyhow!("Invalid arsenal {}: {}", path.display(), describe(&e)))
    }

    /// Load and validate an arsenal, overriding the file's engine settings.
    pub fn load_with(path: &Path, config: EngineConfig) -> LoadResult<Arsenal> {
        let spec = Self::load_spec(path)?;
        spec.build_with(config)
            .map_err(|e| anyhow::anyhow!("Invalid arsenal {}: {}", path.display(), describe(&e)))
    }

    /// Load the unchecked description.
    pub fn load_spec(path: &Path) -> LoadResult<ArsenalSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse arsenal RON at {:?}: {}", path, e))
    }

    /// Parse an unchecked description from RON text.
    pub fn parse(content: &str) -> LoadResult<ArsenalSpec> {
        Ok(ron::from_str(content)?)
    }
}

/// Flattens an error and its sources into one line.
fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
