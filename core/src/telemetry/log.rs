use log::{debug, info, trace, warn};

/// Thin wrapper over the `log` facade carried by each processing stage.
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    pub fn debug(&self, message: &str) {
        debug!("{}", message);
    }

    pub fn trace(&self, message: &str) {
        trace!("{}", message);
    }

    pub fn warn(&self, message: &str) {
        warn!("{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
