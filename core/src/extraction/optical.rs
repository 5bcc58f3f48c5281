use crate::math::planar_norm;
use crate::model::{Modality, Target};

/// `x, y, z, brightness, contrast`
pub const REQUIRED_FIELDS: usize = 5;
pub const MIN_VISIBILITY: f64 = 0.2;

pub fn extract(reading: &[f64], _noise_threshold: f64) -> Option<Target> {
    let &[x, y, z, brightness, contrast, ..] = reading else {
        return None;
    };
    let visibility = brightness * contrast;
    if visibility.is_nan() || visibility <= MIN_VISIBILITY {
        return None;
    }

    let confidence = (visibility * 2.0).min(1.0);
    let velocity = planar_norm(x, y) * 0.08;
    Some(Target::new(Modality::Optical, [x, y, z], velocity, confidence))
}
