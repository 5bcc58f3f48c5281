pub mod geometry;
pub mod stats;

pub use geometry::{euclidean, planar_norm};
pub use stats::StatsHelper;
