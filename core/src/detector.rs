//! The detector instance: configuration, shared state and the scan cycle
//! `extract → filter → fuse → track → prioritize`.

use crate::coordinator::Coordinator;
use crate::extraction::ExtractionStage;
use crate::model::{Modality, Target};
use crate::prelude::{check_fusion_threshold, check_noise_threshold, ConfigResult, DetectorConfig};
use crate::processing::{FusionEngine, NoiseFilter, Prioritizer, Tracker};
use crate::telemetry::{BatchMetrics, LogManager, MetricsRecorder, ScanSummary};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Raw reading tuples for one scan cycle, one list per modality.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ScanReadings {
    pub radar: Vec<Vec<f64>>,
    pub thermal: Vec<Vec<f64>>,
    pub optical: Vec<Vec<f64>>,
}

impl ScanReadings {
    pub fn len(&self) -> usize {
        self.radar.len() + self.thermal.len() + self.optical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of one full scan cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub targets: Vec<Target>,
    pub metrics: BatchMetrics,
    pub summary: ScanSummary,
    pub velocities_updated: usize,
}

impl ScanReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub struct TargetDetector {
    config: DetectorConfig,
    coordinator: Coordinator,
    extraction: ExtractionStage,
    tracker: Mutex<Tracker>,
    prioritizer: Prioritizer,
    metrics: MetricsRecorder,
    last_scan: Mutex<Option<Instant>>,
    logger: LogManager,
}

impl TargetDetector {
    pub fn new() -> Self {
        Self::build(DetectorConfig::default())
    }

    pub fn with_config(config: DetectorConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: DetectorConfig) -> Self {
        Self {
            tracker: Mutex::new(Tracker::new(config.history_capacity, config.eviction)),
            config,
            coordinator: Coordinator::new(),
            extraction: ExtractionStage::new(),
            prioritizer: Prioritizer::new(),
            metrics: MetricsRecorder::new(),
            last_scan: Mutex::new(None),
            logger: LogManager::new(),
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn noise_threshold(&self) -> f64 {
        self.config.noise_threshold
    }

    pub fn fusion_threshold(&self) -> f64 {
        self.config.fusion_threshold
    }

    /// Accepts values in `[0, 1]`; otherwise keeps the current threshold.
    pub fn set_noise_threshold(&mut self, value: f64) -> ConfigResult<()> {
        check_noise_threshold(value).inspect_err(|err| self.logger.warn(&err.to_string()))?;
        self.config.noise_threshold = value;
        Ok(())
    }

    /// Accepts values in `(0, 100)`; otherwise keeps the current threshold.
    pub fn set_fusion_threshold(&mut self, value: f64) -> ConfigResult<()> {
        check_fusion_threshold(value).inspect_err(|err| self.logger.warn(&err.to_string()))?;
        self.config.fusion_threshold = value;
        Ok(())
    }

    /// Extracts, numbers and records the targets found in one modality's
    /// readings. Accepted targets are also appended to the result list.
    pub fn detect<R>(&self, modality: Modality, readings: &[R]) -> Vec<Target>
    where
        R: AsRef<[f64]> + Sync,
    {
        let started = Instant::now();
        let mut targets = self.extraction.run(modality, readings, &self.config);
        self.coordinator.assign_ids(&mut targets);

        let batch = BatchMetrics::measure(&targets, started.elapsed());
        self.metrics.record_batch(batch);
        self.coordinator.append(&targets);
        self.logger.debug(&format!(
            "{} batch: {} readings -> {} targets in {:.3} ms",
            modality,
            readings.len(),
            batch.targets_detected,
            batch.processing_time_ms
        ));
        targets
    }

    pub fn filter_noise(&self, targets: &mut Vec<Target>) -> usize {
        NoiseFilter::new(self.config.noise_threshold).apply(targets)
    }

    pub fn fuse(
        &self,
        radar: Vec<Target>,
        thermal: Vec<Target>,
        optical: Vec<Target>,
    ) -> Vec<Target> {
        FusionEngine::new(self.config.fusion_threshold).fuse(radar, thermal, optical)
    }

    /// Updates velocities from the previous cycle's positions. Returns how
    /// many targets had history.
    pub fn track(&self, targets: &mut [Target], dt_seconds: f64) -> usize {
        self.tracker().track(targets, dt_seconds)
    }

    pub fn prioritize(&self, targets: &mut [Target]) {
        self.prioritizer.prioritize(targets);
    }

    /// Runs a scan cycle, using the wall time since the previous scan as the
    /// tracking interval (zero for the first scan).
    pub fn scan(&self, readings: &ScanReadings) -> ScanReport {
        let now = Instant::now();
        let dt_seconds = {
            let mut last = self.last_scan.lock().unwrap_or_else(PoisonError::into_inner);
            let dt = last.map_or(0.0, |previous| now.duration_since(previous).as_secs_f64());
            *last = Some(now);
            dt
        };
        self.run_cycle(readings, dt_seconds, now)
    }

    /// Runs a scan cycle with an explicit tracking interval.
    pub fn scan_with_dt(&self, readings: &ScanReadings, dt_seconds: f64) -> ScanReport {
        let now = Instant::now();
        *self.last_scan.lock().unwrap_or_else(PoisonError::into_inner) = Some(now);
        self.run_cycle(readings, dt_seconds, now)
    }

    fn run_cycle(&self, readings: &ScanReadings, dt_seconds: f64, started: Instant) -> ScanReport {
        let extract = |modality: Modality, batch: &[Vec<f64>]| {
            self.extraction.run(modality, batch, &self.config)
        };
        let (mut radar, (mut thermal, mut optical)) = rayon::join(
            || extract(Modality::Radar, readings.radar.as_slice()),
            || {
                rayon::join(
                    || extract(Modality::Thermal, readings.thermal.as_slice()),
                    || extract(Modality::Optical, readings.optical.as_slice()),
                )
            },
        );

        for batch in [&mut radar, &mut thermal, &mut optical] {
            self.coordinator.assign_ids(batch);
            self.filter_noise(batch);
        }

        let mut targets = self.fuse(radar, thermal, optical);
        let velocities_updated = self.track(&mut targets, dt_seconds);
        self.filter_noise(&mut targets);
        self.prioritize(&mut targets);

        let metrics = BatchMetrics::measure(&targets, started.elapsed());
        self.metrics.record_batch(metrics);
        let summary = ScanSummary::from_targets(&targets);
        self.coordinator.replace(targets.clone());
        self.logger.record(&format!(
            "scan of {} readings: {} ({:.3} ms)",
            readings.len(),
            summary,
            metrics.processing_time_ms
        ));

        ScanReport {
            targets,
            metrics,
            summary,
            velocities_updated,
        }
    }

    pub fn detected_targets(&self) -> Vec<Target> {
        self.coordinator.snapshot()
    }

    pub fn target_count(&self) -> usize {
        self.coordinator.len()
    }

    pub fn add_target(&self, target: Target) {
        self.coordinator.push(target);
    }

    pub fn clear_targets(&self) {
        self.coordinator.clear();
    }

    pub fn total_detections(&self) -> usize {
        self.metrics.snapshot().1
    }

    pub fn last_metrics(&self) -> Option<BatchMetrics> {
        self.metrics.last_batch()
    }

    pub fn history_len(&self) -> usize {
        self.tracker().history_len()
    }

    pub fn reset_tracking(&self) {
        self.tracker().clear();
        *self.last_scan.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn tracker(&self) -> MutexGuard<'_, Tracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TargetDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ThreatLevel;
    use crate::prelude::ConfigError;

    #[test]
    fn rejected_thresholds_keep_previous_values() {
        let mut detector = TargetDetector::new();
        assert_eq!(
            detector.set_noise_threshold(1.5),
            Err(ConfigError::NoiseThreshold(1.5))
        );
        assert_eq!(detector.noise_threshold(), 0.3);
        assert!(detector.set_fusion_threshold(100.0).is_err());
        assert!(detector.set_fusion_threshold(0.0).is_err());
        assert_eq!(detector.fusion_threshold(), 5.0);

        detector.set_noise_threshold(0.5).unwrap();
        detector.set_fusion_threshold(12.5).unwrap();
        assert_eq!(detector.noise_threshold(), 0.5);
        assert_eq!(detector.fusion_threshold(), 12.5);
    }

    #[test]
    fn with_config_validates() {
        let config = DetectorConfig {
            fusion_threshold: -1.0,
            ..Default::default()
        };
        assert!(TargetDetector::with_config(config).is_err());
    }

    #[test]
    fn detect_numbers_targets_and_records_metrics() {
        let detector = TargetDetector::new();
        let readings = vec![
            vec![0.0, 0.0, 0.0, 0.9],
            vec![1.0, 0.0, 0.0, 0.2],
            vec![1.0, 0.0],
            vec![2.0, 0.0, 0.0, 0.5],
        ];
        let targets = detector.detect(Modality::Radar, &readings);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].id, 1);
        assert_eq!(targets[1].id, 2);

        let metrics = detector.last_metrics().unwrap();
        assert_eq!(metrics.targets_detected, 2);
        assert!((metrics.average_confidence - 0.875).abs() < 1e-12);
        assert_eq!(detector.target_count(), 2);
        assert_eq!(detector.total_detections(), 2);
    }

    #[test]
    fn ids_keep_increasing_across_calls() {
        let detector = TargetDetector::new();
        let radar = detector.detect(Modality::Radar, &[[0.0, 0.0, 0.0, 0.9]]);
        let thermal = detector.detect(Modality::Thermal, &[[0.0, 0.0, 0.0, 40.0]]);
        assert!(thermal[0].id > radar[0].id);

        detector.clear_targets();
        assert_eq!(detector.target_count(), 0);
        let optical = detector.detect(Modality::Optical, &[[0.0, 0.0, 0.0, 0.9, 0.9]]);
        assert!(optical[0].id > thermal[0].id);
    }

    #[test]
    fn scan_fuses_and_publishes_results() {
        let detector = TargetDetector::new();
        let readings = ScanReadings {
            radar: vec![vec![0.0, 0.0, 0.0, 0.5], vec![100.0, 0.0, 0.0, 0.4]],
            thermal: vec![vec![1.0, 0.0, 0.0, 35.0]],
            optical: vec![vec![0.0, 1.0, 0.0, 0.8, 0.8]],
        };

        let report = detector.scan_with_dt(&readings, 1.0);
        assert_eq!(report.targets.len(), 2);
        assert_eq!(report.summary.fused, 1);
        assert_eq!(report.targets[0].modality, Modality::Fused);
        assert_eq!(report.targets[0].threat_level, ThreatLevel::Critical);
        assert_eq!(detector.detected_targets().len(), 2);
        assert_eq!(report.metrics.targets_detected, 2);
        assert_eq!(detector.history_len(), 2);
    }

    #[test]
    fn track_uses_history_from_previous_cycle() {
        let detector = TargetDetector::new();
        let mut targets = detector.detect(Modality::Radar, &[[0.0, 0.0, 0.0, 0.9]]);
        assert_eq!(detector.track(&mut targets, 1.0), 0);

        targets[0].x = 30.0;
        targets[0].y = 40.0;
        assert_eq!(detector.track(&mut targets, 0.5), 1);
        assert_eq!(targets[0].velocity, 100.0);

        detector.reset_tracking();
        assert_eq!(detector.history_len(), 0);
    }

    #[test]
    fn report_serializes_to_json() {
        let detector = TargetDetector::new();
        let report = detector.scan(&ScanReadings::default());
        let json = report.to_json().unwrap();
        assert!(json.contains("\"targets\":[]"));
        assert!(json.contains("average_confidence"));
    }
}
