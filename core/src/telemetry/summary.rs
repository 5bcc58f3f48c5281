use crate::model::{Modality, Target, ThreatLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const HIGH_CONFIDENCE: f64 = 0.7;
pub const FAST_VELOCITY: f64 = 5.0;

/// Roll-up of a prioritized target list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScanSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub high_confidence: usize,
    pub fast_movers: usize,
    pub fused: usize,
}

impl ScanSummary {
    pub fn from_targets(targets: &[Target]) -> Self {
        let mut summary = Self {
            total: targets.len(),
            ..Default::default()
        };
        for target in targets {
            match target.threat_level {
                ThreatLevel::Critical => summary.critical += 1,
                ThreatLevel::High => summary.high += 1,
                ThreatLevel::Medium => summary.medium += 1,
                ThreatLevel::Low => summary.low += 1,
            }
            if target.confidence > HIGH_CONFIDENCE {
                summary.high_confidence += 1;
            }
            if target.velocity > FAST_VELOCITY {
                summary.fast_movers += 1;
            }
            if target.modality == Modality::Fused {
                summary.fused += 1;
            }
        }
        summary
    }

    pub fn count(&self, level: ThreatLevel) -> usize {
        match level {
            ThreatLevel::Critical => self.critical,
            ThreatLevel::High => self.high,
            ThreatLevel::Medium => self.medium,
            ThreatLevel::Low => self.low,
        }
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "targets={} critical={} high={} medium={} low={} fused={} high_confidence={} fast={}",
            self.total,
            self.critical,
            self.high,
            self.medium,
            self.low,
            self.fused,
            self.high_confidence,
            self.fast_movers
        )
    }
}
