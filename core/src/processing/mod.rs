pub mod filter;
pub mod fusion;
pub mod grid;
pub mod priority;
pub mod tracker;

pub use filter::NoiseFilter;
pub use fusion::FusionEngine;
pub use grid::SpatialGrid;
pub use priority::Prioritizer;
pub use tracker::Tracker;
