use crate::model::{Modality, Target};
use crate::processing::grid::SpatialGrid;
use crate::telemetry::log::LogManager;

pub const THERMAL_WEIGHT: f64 = 0.3;
pub const THERMAL_CONFIDENCE_CAP: f64 = 0.9;
pub const OPTICAL_WEIGHT: f64 = 0.2;
pub const OPTICAL_CONFIDENCE_CAP: f64 = 0.95;

/// Merges candidates from different modalities that sit within
/// `fusion_threshold` of each other.
///
/// Radar candidates form the base set. Thermal candidates merge into the
/// first radar-origin target found in the neighbouring grid cells, optical
/// candidates into the first non-optical one. Matching is greedy: the first
/// close target wins, not the closest.
pub struct FusionEngine {
    fusion_threshold: f64,
    logger: LogManager,
}

impl FusionEngine {
    pub fn new(fusion_threshold: f64) -> Self {
        Self {
            fusion_threshold,
            logger: LogManager::new(),
        }
    }

    pub fn fuse(
        &self,
        radar: Vec<Target>,
        thermal: Vec<Target>,
        optical: Vec<Target>,
    ) -> Vec<Target> {
        let mut grid = SpatialGrid::new(self.fusion_threshold);
        let mut fused = Vec::with_capacity(radar.len() + thermal.len() + optical.len());

        for target in radar {
            grid.insert(target.position(), fused.len());
            fused.push(target);
        }

        let mut thermal_merges = 0;
        for candidate in thermal {
            let found = self.first_match(&grid, &fused, &candidate, |existing| {
                matches!(existing.modality, Modality::Radar | Modality::Fused)
            });
            match found {
                Some(index) => {
                    merge_thermal(&mut fused[index], &candidate);
                    thermal_merges += 1;
                }
                None => {
                    grid.insert(candidate.position(), fused.len());
                    fused.push(candidate);
                }
            }
        }

        let mut optical_merges = 0;
        for candidate in optical {
            let found = self.first_match(&grid, &fused, &candidate, |existing| {
                existing.modality != Modality::Optical
            });
            match found {
                Some(index) => {
                    merge_optical(&mut fused[index], &candidate);
                    optical_merges += 1;
                }
                None => {
                    grid.insert(candidate.position(), fused.len());
                    fused.push(candidate);
                }
            }
        }

        self.logger.debug(&format!(
            "fusion produced {} targets ({} thermal merges, {} optical merges)",
            fused.len(),
            thermal_merges,
            optical_merges
        ));
        fused
    }

    fn first_match<F>(
        &self,
        grid: &SpatialGrid,
        fused: &[Target],
        candidate: &Target,
        eligible: F,
    ) -> Option<usize>
    where
        F: Fn(&Target) -> bool,
    {
        grid.neighbors(candidate.position()).find(|&index| {
            let existing = &fused[index];
            eligible(existing) && existing.distance_to(candidate) < self.fusion_threshold
        })
    }
}

fn merge_thermal(existing: &mut Target, thermal: &Target) {
    existing.confidence =
        (existing.confidence + thermal.confidence * THERMAL_WEIGHT).min(THERMAL_CONFIDENCE_CAP);
    existing.threat_level = existing.threat_level.max(thermal.threat_level);
    existing.modality = Modality::Fused;
    existing.description.push_str(" + Thermal");
    existing.touch();
}

fn merge_optical(existing: &mut Target, optical: &Target) {
    existing.confidence =
        (existing.confidence + optical.confidence * OPTICAL_WEIGHT).min(OPTICAL_CONFIDENCE_CAP);
    existing.threat_level = existing.threat_level.max(optical.threat_level);
    if existing.modality != Modality::Fused {
        existing.modality = Modality::Fused;
        existing.description.push_str(" + Optical");
    }
    existing.touch();
}
