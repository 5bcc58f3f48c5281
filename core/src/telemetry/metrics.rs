use crate::math::StatsHelper;
use crate::model::Target;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;

/// Statistics for one detection batch or scan cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct BatchMetrics {
    pub processing_time_ms: f64,
    pub targets_detected: usize,
    pub average_confidence: f64,
}

impl BatchMetrics {
    pub fn measure(targets: &[Target], elapsed: Duration) -> Self {
        Self {
            processing_time_ms: elapsed.as_secs_f64() * 1000.0,
            targets_detected: targets.len(),
            average_confidence: StatsHelper::mean(targets.iter().map(|t| t.confidence)),
        }
    }
}

pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Default)]
struct Metrics {
    batches: usize,
    total_detections: usize,
    last: Option<BatchMetrics>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_batch(&self, batch: BatchMetrics) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.batches += 1;
            metrics.total_detections += batch.targets_detected;
            metrics.last = Some(batch);
        }
    }

    /// `(batches, total_detections)`
    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.batches, metrics.total_detections)
        } else {
            (0, 0)
        }
    }

    pub fn last_batch(&self) -> Option<BatchMetrics> {
        self.inner.lock().ok().and_then(|metrics| metrics.last)
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
