pub mod log;
pub mod metrics;
pub mod summary;

pub use log::LogManager;
pub use metrics::{BatchMetrics, MetricsRecorder};
pub use summary::ScanSummary;
