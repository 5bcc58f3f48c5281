use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const DEFAULT_NOISE_THRESHOLD: f64 = 0.3;
pub const DEFAULT_FUSION_THRESHOLD: f64 = 5.0;
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Inclusive range accepted for the noise threshold.
pub const NOISE_THRESHOLD_RANGE: RangeInclusive<f64> = 0.0..=1.0;
/// Exclusive bounds accepted for the fusion threshold.
pub const FUSION_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 100.0);

/// What the tracker does once its history table grows past capacity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Drop the entries refreshed longest ago until the table fits again.
    #[default]
    #[serde(alias = "lru")]
    LeastRecentlyUsed,
    /// Forget every entry at once.
    BulkClear,
}

/// Shared configuration for a detector instance and its stages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectorConfig {
    pub noise_threshold: f64,
    pub fusion_threshold: f64,
    pub history_capacity: usize,
    pub eviction: EvictionPolicy,
    pub parallel_extraction: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            noise_threshold: DEFAULT_NOISE_THRESHOLD,
            fusion_threshold: DEFAULT_FUSION_THRESHOLD,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            eviction: EvictionPolicy::default(),
            parallel_extraction: true,
        }
    }
}

impl DetectorConfig {
    /// Returns the first out-of-range setting, if any.
    pub fn validate(&self) -> ConfigResult<()> {
        check_noise_threshold(self.noise_threshold)?;
        check_fusion_threshold(self.fusion_threshold)?;
        if self.history_capacity == 0 {
            return Err(ConfigError::HistoryCapacity);
        }
        Ok(())
    }
}

pub(crate) fn check_noise_threshold(value: f64) -> ConfigResult<()> {
    if NOISE_THRESHOLD_RANGE.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::NoiseThreshold(value))
    }
}

pub(crate) fn check_fusion_threshold(value: f64) -> ConfigResult<()> {
    let (low, high) = FUSION_THRESHOLD_BOUNDS;
    if value > low && value < high {
        Ok(())
    } else {
        Err(ConfigError::FusionThreshold(value))
    }
}

/// Rejected configuration values. The previous setting stays in effect.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("noise threshold {0} outside [0, 1]")]
    NoiseThreshold(f64),
    #[error("fusion threshold {0} outside (0, 100)")]
    FusionThreshold(f64),
    #[error("history capacity must be at least 1")]
    HistoryCapacity,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DetectorConfig::default();
        assert_eq!(config.noise_threshold, 0.3);
        assert_eq!(config.fusion_threshold, 5.0);
        assert_eq!(config.history_capacity, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn fusion_threshold_bounds_are_exclusive() {
        assert!(check_fusion_threshold(0.0).is_err());
        assert!(check_fusion_threshold(100.0).is_err());
        assert!(check_fusion_threshold(99.9).is_ok());
        assert!(check_noise_threshold(0.0).is_ok());
        assert!(check_noise_threshold(1.0).is_ok());
        assert!(check_noise_threshold(f64::NAN).is_err());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: DetectorConfig =
            serde_json::from_str(r#"{"fusion_threshold": 8.0, "eviction": "bulk_clear"}"#)
                .unwrap();
        assert_eq!(config.fusion_threshold, 8.0);
        assert_eq!(config.noise_threshold, DEFAULT_NOISE_THRESHOLD);
        assert_eq!(config.eviction, EvictionPolicy::BulkClear);
    }
}
