//! Declination ring analysis for pointing-model calibration grids
//!
//! A pointing-model sweep places calibration points on a grid of
//! (azimuth, altitude) positions. Converted to equatorial coordinates the
//! points fall onto "rings" of near-constant declination. This crate reads
//! grid files, performs the conversion, finds the rings, measures how evenly
//! each ring is sampled in hour angle, and fits ring population against
//! cos(declination).

pub mod analysis;
pub mod config;
pub mod filter;
pub mod fit;
pub mod grid_file;
pub mod report;
pub mod rings;
pub mod transform;

pub use analysis::RingAnalysis;
pub use config::{AnalysisConfig, ConfigError};
pub use fit::{PowerLawFit, PowerLawFitter};
pub use grid_file::{GridFile, GridParseError, RawPoint};
pub use rings::{Ring, RingClusterer, RingSummary, StepStats};
pub use transform::{CoordinateTransformer, TransformedPoint};
