//! Declination rings: clustering and per-ring statistics

pub mod cluster;
pub mod stats;

pub use cluster::{sort_by_declination, Ring, RingClusterer};
pub use stats::{
    circular_steps, declination_spacings, summarize_rings, RingSummary, StepStats,
};
