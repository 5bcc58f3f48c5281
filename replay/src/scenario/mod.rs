//! Recorded reading scenarios replayed through the detector.

use anyhow::Context;
use fusioncore::ScanReadings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEMO_SCENARIO: &str = include_str!("../../scenarios/demo.yaml");

/// One recorded scan cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanCycle {
    /// Seconds since the previous cycle, used for velocity tracking.
    #[serde(default)]
    pub dt_seconds: f64,
    #[serde(flatten)]
    pub readings: ScanReadings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub cycles: Vec<ScanCycle>,
}

impl Scenario {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scenario {}", path_ref.display()))?;
        Self::from_yaml(&contents).with_context(|| format!("parsing scenario {}", path_ref.display()))
    }

    pub fn from_yaml(contents: &str) -> anyhow::Result<Self> {
        let scenario: Scenario = serde_yaml::from_str(contents)?;
        if scenario.cycles.is_empty() {
            anyhow::bail!("scenario {} has no cycles", scenario.name);
        }
        Ok(scenario)
    }

    /// Built-in two-cycle harbor scenario.
    pub fn demo() -> anyhow::Result<Self> {
        Self::from_yaml(DEMO_SCENARIO).context("parsing built-in demo scenario")
    }

    pub fn reading_count(&self) -> usize {
        self.cycles.iter().map(|cycle| cycle.readings.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn demo_scenario_parses() {
        let scenario = Scenario::demo().unwrap();
        assert_eq!(scenario.name, "harbor-approach");
        assert_eq!(scenario.cycles.len(), 2);
        assert_eq!(scenario.cycles[0].readings.radar.len(), 4);
        assert_eq!(scenario.cycles[1].dt_seconds, 0.5);
    }

    #[test]
    fn missing_modalities_default_to_empty() {
        let scenario = Scenario::from_yaml(
            "name: radar-only\ncycles:\n  - radar:\n      - [0.0, 0.0, 0.0, 0.9]\n",
        )
        .unwrap();
        let cycle = &scenario.cycles[0];
        assert_eq!(cycle.dt_seconds, 0.0);
        assert!(cycle.readings.thermal.is_empty());
        assert!(cycle.readings.optical.is_empty());
        assert_eq!(scenario.reading_count(), 1);
    }

    #[test]
    fn empty_scenario_is_an_error() {
        assert!(Scenario::from_yaml("name: nothing\ncycles: []\n").is_err());
    }

    #[test]
    fn scenario_load_reads_file() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"name: file\ncycles:\n  - dt_seconds: 1.0\n    thermal:\n      - [1.0, 2.0, 3.0, 40.0]\n")
            .unwrap();
        let path = temp.into_temp_path();
        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.cycles[0].readings.thermal[0][3], 40.0);
    }
}
