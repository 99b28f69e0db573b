//! End-to-end ring analysis of a pointing grid

use crate::config::AnalysisConfig;
use crate::filter::transform_calibration_points;
use crate::fit::{PowerLawFit, PowerLawFitter};
use crate::grid_file::{GridFile, GridParseError, RawPoint};
use crate::rings::{declination_spacings, summarize_rings, Ring, RingClusterer, RingSummary};
use crate::transform::{CoordinateTransformer, TransformedPoint};
use serde::Serialize;
use std::path::Path;

/// Everything derived from one grid
#[derive(Debug, Clone, Serialize)]
pub struct RingAnalysis {
    /// Parameters the analysis ran with
    pub config: AnalysisConfig,
    /// Calibration points in input order
    pub points: Vec<TransformedPoint>,
    /// Rings in ascending declination order
    #[serde(skip)]
    pub rings: Vec<Ring>,
    /// One summary per ring
    pub summaries: Vec<RingSummary>,
    /// Mean declination step between consecutive rings
    pub dec_spacings: Vec<f64>,
    /// Power-law fit, absent when fewer than two rings qualify
    pub fit: Option<PowerLawFit>,
}

impl RingAnalysis {
    /// Run the full pipeline: transform, drop slew-only points, cluster,
    /// summarize and fit.
    pub fn run(points: &[RawPoint], config: &AnalysisConfig) -> Self {
        if config.has_degenerate_latitude() {
            log::warn!(
                "Observer latitude {}° is on a pole; hour angles will be undefined",
                config.observer_latitude_deg
            );
        }

        let transformer = CoordinateTransformer::from_config(config);
        let retained = transform_calibration_points(&transformer, points);

        let rings = RingClusterer::new(config.ring_threshold_deg).cluster(&retained);
        let summaries = summarize_rings(&rings);
        let dec_spacings = declination_spacings(&summaries);
        let fit = PowerLawFitter::new(config.fit_cos_floor).fit(&summaries);

        Self {
            config: *config,
            points: retained,
            rings,
            summaries,
            dec_spacings,
            fit,
        }
    }

    /// Read a grid file and analyze it
    pub fn from_grid_file(path: &Path, config: &AnalysisConfig) -> Result<Self, GridParseError> {
        let grid = GridFile::read(path)?;
        Ok(Self::run(&grid.points, config))
    }

    /// Number of calibration points that took part in clustering
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }
}
