use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal threat classification, `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ThreatLevel {
    pub const ALL: [ThreatLevel; 4] = [
        ThreatLevel::Low,
        ThreatLevel::Medium,
        ThreatLevel::High,
        ThreatLevel::Critical,
    ];

    /// Derives the threat level from a target's speed and confidence.
    pub fn assess(velocity: f64, confidence: f64) -> Self {
        if velocity > 100.0 || confidence > 0.9 {
            ThreatLevel::Critical
        } else if velocity > 50.0 || confidence > 0.7 {
            ThreatLevel::High
        } else if velocity > 20.0 || confidence > 0.5 {
            ThreatLevel::Medium
        } else {
            ThreatLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThreatLevel::Low => "LOW",
            ThreatLevel::Medium => "MEDIUM",
            ThreatLevel::High => "HIGH",
            ThreatLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
