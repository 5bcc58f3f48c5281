use anyhow::Context;
use fusioncore::prelude::{DetectorConfig, EvictionPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkflowConfig {
    #[serde(flatten)]
    pub detector: DetectorConfig,
    /// Pause between replayed cycles; `None` replays back to back.
    pub interval_ms: Option<u64>,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Applies command-line values on top of whatever was loaded.
    pub fn with_overrides(
        mut self,
        noise_threshold: Option<f64>,
        fusion_threshold: Option<f64>,
        history_capacity: Option<usize>,
        bulk_clear: bool,
    ) -> Self {
        if let Some(value) = noise_threshold {
            self.detector.noise_threshold = value;
        }
        if let Some(value) = fusion_threshold {
            self.detector.fusion_threshold = value;
        }
        if let Some(value) = history_capacity {
            self.detector.history_capacity = value;
        }
        if bulk_clear {
            self.detector.eviction = EvictionPolicy::BulkClear;
        }
        self
    }

    pub fn to_detector_config(&self) -> anyhow::Result<DetectorConfig> {
        self.detector
            .validate()
            .context("validating detector settings")?;
        Ok(self.detector.clone())
    }
}
