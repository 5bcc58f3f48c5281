//! Per-modality extraction of candidate targets from raw reading tuples.
//!
//! Each reading is handled independently, so a batch fans out across the
//! rayon pool and the ordered collect acts as the join barrier.

pub mod optical;
pub mod radar;
pub mod thermal;

use crate::model::{Modality, Target};
use crate::prelude::DetectorConfig;
use crate::telemetry::log::LogManager;
use rayon::prelude::*;

type ExtractFn = fn(&[f64], f64) -> Option<Target>;

impl Modality {
    /// Number of leading fields a raw tuple must carry, `None` for `Fused`.
    pub fn required_fields(self) -> Option<usize> {
        match self {
            Modality::Radar => Some(radar::REQUIRED_FIELDS),
            Modality::Thermal => Some(thermal::REQUIRED_FIELDS),
            Modality::Optical => Some(optical::REQUIRED_FIELDS),
            Modality::Fused => None,
        }
    }

    fn extractor(self) -> Option<ExtractFn> {
        match self {
            Modality::Radar => Some(radar::extract),
            Modality::Thermal => Some(thermal::extract),
            Modality::Optical => Some(optical::extract),
            Modality::Fused => None,
        }
    }

    /// Turns one raw tuple into a valid, not yet numbered candidate.
    pub fn extract(self, reading: &[f64], noise_threshold: f64) -> Option<Target> {
        let extract = self.extractor()?;
        extract(reading, noise_threshold).filter(|target| target.is_valid(noise_threshold))
    }
}

/// Extraction stage shared by the detector for every modality.
pub struct ExtractionStage {
    logger: LogManager,
}

impl ExtractionStage {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new(),
        }
    }

    /// Extracts candidates in input order. Ids are left at zero.
    pub fn run<R>(
        &self,
        modality: Modality,
        readings: &[R],
        config: &DetectorConfig,
    ) -> Vec<Target>
    where
        R: AsRef<[f64]> + Sync,
    {
        if modality.extractor().is_none() {
            self.logger
                .warn(&format!("no extractor for {} readings", modality));
            return Vec::new();
        }

        let threshold = config.noise_threshold;
        let candidates: Vec<Target> = if config.parallel_extraction {
            readings
                .par_iter()
                .filter_map(|reading| modality.extract(reading.as_ref(), threshold))
                .collect()
        } else {
            readings
                .iter()
                .filter_map(|reading| modality.extract(reading.as_ref(), threshold))
                .collect()
        };

        let dropped = readings.len() - candidates.len();
        if dropped > 0 {
            self.logger.trace(&format!(
                "{} extractor dropped {} of {} readings",
                modality,
                dropped,
                readings.len()
            ));
        }
        self.logger.debug(&format!(
            "{} extractor produced {} candidates",
            modality,
            candidates.len()
        ));
        candidates
    }
}

impl Default for ExtractionStage {
    fn default() -> Self {
        Self::new()
    }
}
