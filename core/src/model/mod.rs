pub mod target;
pub mod threat;

pub use target::{Modality, Target};
pub use threat::ThreatLevel;
