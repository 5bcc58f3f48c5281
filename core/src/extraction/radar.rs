use crate::math::planar_norm;
use crate::model::{Modality, Target};

/// `x, y, z, signal`
pub const REQUIRED_FIELDS: usize = 4;

pub fn extract(reading: &[f64], noise_threshold: f64) -> Option<Target> {
    let &[x, y, z, signal, ..] = reading else {
        return None;
    };
    if signal.is_nan() || signal <= noise_threshold {
        return None;
    }

    let confidence = (signal * 1.5).min(1.0);
    let velocity = planar_norm(x, y) * 0.1;
    Some(Target::new(Modality::Radar, [x, y, z], velocity, confidence))
}
