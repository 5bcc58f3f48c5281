use crate::model::Target;
use crate::telemetry::log::LogManager;

/// Drops targets that fail the validity gate, keeping survivors in order.
pub struct NoiseFilter {
    noise_threshold: f64,
    logger: LogManager,
}

impl NoiseFilter {
    pub fn new(noise_threshold: f64) -> Self {
        Self {
            noise_threshold,
            logger: LogManager::new(),
        }
    }

    /// Returns the number of removed targets.
    pub fn apply(&self, targets: &mut Vec<Target>) -> usize {
        let before = targets.len();
        targets.retain(|target| target.is_valid(self.noise_threshold));
        let removed = before - targets.len();
        if removed > 0 {
            self.logger
                .debug(&format!("noise filter removed {} of {}", removed, before));
        }
        removed
    }
}
