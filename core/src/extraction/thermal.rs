use crate::math::planar_norm;
use crate::model::{Modality, Target};

/// `x, y, z, temperature`
pub const REQUIRED_FIELDS: usize = 4;
/// Readings at or below this temperature (°C) are background.
pub const MIN_TEMPERATURE: f64 = 25.0;

pub fn extract(reading: &[f64], _noise_threshold: f64) -> Option<Target> {
    let &[x, y, z, temperature, ..] = reading else {
        return None;
    };
    if temperature.is_nan() || temperature <= MIN_TEMPERATURE {
        return None;
    }

    let confidence = ((temperature - 20.0) / 20.0).min(1.0);
    let velocity = planar_norm(x, y) * 0.05;
    Some(Target::new(Modality::Thermal, [x, y, z], velocity, confidence))
}
