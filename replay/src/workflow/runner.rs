use crate::scenario::{ScanCycle, Scenario};
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use fusioncore::{ScanReport, TargetDetector};
use log::debug;

pub struct Runner {
    detector: TargetDetector,
}

impl Runner {
    pub fn new(config: &WorkflowConfig) -> anyhow::Result<Self> {
        let detector_config = config.to_detector_config()?;
        let detector =
            TargetDetector::with_config(detector_config).context("building target detector")?;
        Ok(Self { detector })
    }

    pub fn execute_cycle(&self, cycle: &ScanCycle) -> ScanReport {
        debug!(
            "replaying cycle with {} readings, dt {:.3}s",
            cycle.readings.len(),
            cycle.dt_seconds
        );
        self.detector.scan_with_dt(&cycle.readings, cycle.dt_seconds)
    }

    pub fn execute(&self, scenario: &Scenario) -> Vec<ScanReport> {
        scenario
            .cycles
            .iter()
            .map(|cycle| self.execute_cycle(cycle))
            .collect()
    }

    pub fn detector(&self) -> &TargetDetector {
        &self.detector
    }
}
