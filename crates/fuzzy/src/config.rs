//! Engine configuration.

use crate::error::ConfigError;
use crate::variable::Universe;

/// Tunable engine parameters.
///
/// The sampling resolution is observable in output precision: the centroid is
/// computed over `min, min + resolution, ..., max` of the output universe.
/// The default of 1.0 over `[0, 100]` gives 101 samples.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Grid spacing used when sampling the output universe.
    pub resolution: f64,
}

impl EngineConfig {
    pub const DEFAULT_RESOLUTION: f64 = 1.0;
    /// Upper bound on output samples per evaluation.
    pub const MAX_SAMPLES: usize = 1_000_000;

    /// Environment variable read by [`EngineConfig::from_env`].
    pub const RESOLUTION_ENV: &'static str = "ARSENAL_RESOLUTION";

    pub const fn new() -> Self {
        Self {
            resolution: Self::DEFAULT_RESOLUTION,
        }
    }

    /// Creates a validated configuration with the given resolution.
    pub fn with_resolution(resolution: f64) -> Result<Self, ConfigError> {
        let config = Self { resolution };
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ARSENAL_RESOLUTION` - sampling step of the output universe (default: 1.0)
    ///
    /// Unparseable or invalid values fall back to the default.
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Some(resolution) = std::env::var(Self::RESOLUTION_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
        {
            match Self::with_resolution(resolution) {
                Ok(valid) => config = valid,
                Err(err) => tracing::warn!("ignoring {}: {}", Self::RESOLUTION_ENV, err),
            }
        }

        config
    }

    /// Checks that the resolution is usable for sampling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution.is_finite() && self.resolution > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidResolution(self.resolution))
        }
    }

    /// Checks the resolution against the universe it will sample.
    ///
    /// Rejects steps so fine that sampling `universe` would exceed
    /// [`Self::MAX_SAMPLES`] points.
    pub fn validate_for(&self, universe: Universe) -> Result<(), ConfigError> {
        self.validate()?;

        let span = universe.max() - universe.min();
        if span / self.resolution > Self::MAX_SAMPLES as f64 {
            return Err(ConfigError::ResolutionTooFine {
                resolution: self.resolution,
                span,
                max: Self::MAX_SAMPLES,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_resolution_is_unit_step() {
        assert_eq!(EngineConfig::default().resolution, 1.0);
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_resolution() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = EngineConfig::with_resolution(bad).unwrap_err();
            assert_eq!(err.code(), "invalid_resolution");
        }
    }

    #[test]
    fn sample_count_is_bounded_per_universe() {
        let tiny = EngineConfig { resolution: 1e-300 };
        assert!(tiny.validate().is_ok());

        let err = tiny.validate_for(Universe::percent()).unwrap_err();
        assert_eq!(err.code(), "resolution_too_fine");

        assert!(EngineConfig::default().validate_for(Universe::percent()).is_ok());
    }

    #[test]
    fn accepts_fractional_resolution() {
        let config = EngineConfig::with_resolution(0.25).unwrap();
        assert_eq!(config.resolution, 0.25);
    }
}
