//! Detection, fusion and tracking core for the multi-modality sentinel
//! platform.
//!
//! Radar, thermal and optical reading tuples are extracted into candidate
//! targets, filtered, fused across modalities on a spatial hash grid, tracked
//! between scan cycles and ordered by threat.

pub mod coordinator;
pub mod detector;
pub mod extraction;
pub mod math;
pub mod model;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use detector::{ScanReadings, ScanReport, TargetDetector};
pub use model::{Modality, Target, ThreatLevel};
pub use prelude::{ConfigError, DetectorConfig, EvictionPolicy};
pub use telemetry::{BatchMetrics, ScanSummary};
