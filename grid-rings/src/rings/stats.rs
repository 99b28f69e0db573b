//! Per-ring hour-angle spacing statistics
//!
//! Hour angle is periodic, so spacing is measured around the full circle:
//! after sorting, each point is differenced against its successor modulo
//! 360°, and the last point wraps around to the first. A ring of `n` points
//! therefore yields `n` steps that sum to 360° (unless every hour angle is
//! identical).

use super::cluster::Ring;
use serde::Serialize;

/// Full turn in degrees
const FULL_TURN_DEG: f64 = 360.0;

/// Statistics over the circular hour-angle steps of one ring
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StepStats {
    /// Mean step in degrees
    pub mean: f64,
    /// Largest step minus smallest step
    pub spread: f64,
    /// Population standard deviation (divides by n)
    pub std_dev: f64,
}

impl StepStats {
    /// Compute statistics from a set of steps.
    ///
    /// Min, max and sum come from a single pass; the variance needs a
    /// second pass against the mean. Fewer than two steps means there is no
    /// pairwise spacing, and all values are zero.
    pub fn from_steps(steps: &[f64]) -> Self {
        if steps.len() < 2 {
            return Self::default();
        }

        let (min, max, sum) = steps.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &step| (min.min(step), max.max(step), sum + step),
        );
        let n = steps.len() as f64;
        let mean = sum / n;
        let variance = steps
            .iter()
            .map(|&s| (s - mean) * (s - mean))
            .fold(0.0, |acc, sq| acc + sq)
            / n;

        Self {
            mean,
            spread: max - min,
            std_dev: variance.sqrt(),
        }
    }
}

/// Circular successive differences of a set of hour angles (degrees).
///
/// The input order does not matter; angles are sorted first. The result has
/// one entry per angle, each in [0, 360).
pub fn circular_steps(hour_angles_deg: &[f64]) -> Vec<f64> {
    let mut sorted = hour_angles_deg.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    (0..n)
        .map(|i| (sorted[(i + 1) % n] - sorted[i]).rem_euclid(FULL_TURN_DEG))
        .collect()
}

/// Summary of one ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingSummary {
    /// Mean declination of the ring in degrees
    pub mean_dec_deg: f64,
    /// Number of points in the ring
    pub count: usize,
    /// Hour-angle step statistics
    pub steps: StepStats,
}

impl RingSummary {
    pub fn from_ring(ring: &Ring) -> Self {
        Self {
            mean_dec_deg: ring.mean_dec_deg(),
            count: ring.len(),
            steps: StepStats::from_steps(&circular_steps(&ring.hour_angles_deg())),
        }
    }
}

/// Summarize every ring, preserving ring order
pub fn summarize_rings(rings: &[Ring]) -> Vec<RingSummary> {
    rings.iter().map(RingSummary::from_ring).collect()
}

/// Difference between each ring's mean declination and its predecessor's.
///
/// The first ring has no predecessor, so the result holds one fewer entry
/// than `summaries`.
pub fn declination_spacings(summaries: &[RingSummary]) -> Vec<f64> {
    summaries
        .windows(2)
        .map(|pair| pair[1].mean_dec_deg - pair[0].mean_dec_deg)
        .collect()
}
