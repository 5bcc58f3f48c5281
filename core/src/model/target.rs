use crate::math::geometry;
use crate::model::threat::ThreatLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Sensing channel a detection came from, or `Fused` once channels merged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Radar,
    Thermal,
    Optical,
    Fused,
}

impl Modality {
    pub fn label(self) -> &'static str {
        match self {
            Modality::Radar => "Radar",
            Modality::Thermal => "Thermal",
            Modality::Optical => "Optical",
            Modality::Fused => "Fused",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A detected object candidate, or several candidates fused into one.
///
/// `threat_level` is derived from `velocity` and `confidence`; use the
/// setters so the two stay consistent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Target {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub velocity: f64,
    pub confidence: f64,
    pub modality: Modality,
    pub threat_level: ThreatLevel,
    pub detection_time: DateTime<Utc>,
    pub description: String,
}

impl Target {
    /// Builds an unassigned (`id == 0`) candidate.
    pub fn new(modality: Modality, position: [f64; 3], velocity: f64, confidence: f64) -> Self {
        let [x, y, z] = position;
        Self {
            id: 0,
            x,
            y,
            z,
            velocity,
            confidence,
            modality,
            threat_level: ThreatLevel::assess(velocity, confidence),
            detection_time: Utc::now(),
            description: format!("{} detection", modality.label()),
        }
    }

    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn distance_to(&self, other: &Target) -> f64 {
        geometry::euclidean(self.position(), other.position())
    }

    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = velocity;
        self.refresh_threat();
    }

    pub fn set_confidence(&mut self, confidence: f64) {
        self.confidence = confidence;
        self.refresh_threat();
    }

    /// Recomputes `threat_level` from the current velocity and confidence.
    pub fn refresh_threat(&mut self) {
        self.threat_level = ThreatLevel::assess(self.velocity, self.confidence);
    }

    pub fn touch(&mut self) {
        self.detection_time = Utc::now();
    }

    /// Noise gate applied after extraction and before fusion.
    pub fn is_valid(&self, noise_threshold: f64) -> bool {
        self.confidence > noise_threshold
            && self.velocity >= 0.0
            && self.position().iter().all(|c| c.is_finite())
    }

    /// Priority order: threat level first, then confidence.
    pub fn priority_cmp(&self, other: &Target) -> Ordering {
        self.threat_level
            .cmp(&other.threat_level)
            .then_with(|| self.confidence.total_cmp(&other.confidence))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Threat: {} | Conf: {:.3} | Vel: {:.2} m/s | {} @ ({:.1}, {:.1}, {:.1})",
            self.id,
            self.threat_level,
            self.confidence,
            self.velocity,
            self.modality,
            self.x,
            self.y,
            self.z
        )
    }
}
