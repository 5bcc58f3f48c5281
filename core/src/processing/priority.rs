use crate::model::Target;
use crate::telemetry::log::LogManager;

/// Orders targets most threatening first.
pub struct Prioritizer {
    logger: LogManager,
}

impl Prioritizer {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new(),
        }
    }

    /// Re-derives every threat level, then stable-sorts descending by
    /// `(threat_level, confidence)`.
    ///
    /// Fusion may leave a merged target above its derived level, so levels are
    /// refreshed before the sort to keep the output ordered.
    pub fn prioritize(&self, targets: &mut [Target]) {
        targets.iter_mut().for_each(Target::refresh_threat);
        targets.sort_by(|a, b| b.priority_cmp(a));
        if let Some(top) = targets.first() {
            self.logger.debug(&format!(
                "prioritized {} targets, top {} ({})",
                targets.len(),
                top.id,
                top.threat_level
            ));
        }
    }
}

impl Default for Prioritizer {
    fn default() -> Self {
        Self::new()
    }
}
