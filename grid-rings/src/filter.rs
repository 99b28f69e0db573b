//! Selection of points usable for calibration analysis

use crate::grid_file::RawPoint;
use crate::transform::{CoordinateTransformer, TransformedPoint};

/// True when a point carries a calibration exposure (not slew-only)
pub fn is_calibration_point(point: &RawPoint) -> bool {
    !point.only_slew
}

/// Transform the calibration points of a grid, dropping slew-only entries.
///
/// Input order is preserved.
pub fn transform_calibration_points(
    transformer: &CoordinateTransformer,
    points: &[RawPoint],
) -> Vec<TransformedPoint> {
    let retained: Vec<TransformedPoint> = points
        .iter()
        .filter(|p| is_calibration_point(p))
        .map(|p| transformer.transform(p))
        .collect();

    log::debug!(
        "Retained {} of {} points ({} slew-only)",
        retained.len(),
        points.len(),
        points.len() - retained.len()
    );
    retained
}
