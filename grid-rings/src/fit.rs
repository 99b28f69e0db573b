//! Power-law fit of ring population against declination
//!
//! On a sphere, the circumference of a declination circle scales with
//! cos(dec), so the number of grid points per ring is modeled as
//!
//! `count ≈ K * cos(dec)^p`
//!
//! Taking logarithms turns this into a straight line,
//! `ln(count) = ln(K) + p * ln(cos(dec))`, which is fit by ordinary least
//! squares.

use crate::rings::RingSummary;
use serde::Serialize;

/// Minimum number of qualifying rings for a fit
pub const MIN_FIT_SAMPLES: usize = 2;

/// One ring expressed in log-log space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitSample {
    /// ln|cos(mean dec)|
    pub ln_cos_dec: f64,
    /// ln(count)
    pub ln_count: f64,
}

/// Result of a power-law fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerLawFit {
    /// Coefficient K
    pub coefficient: f64,
    /// Exponent p. NaN when every sample has the same declination.
    pub exponent: f64,
    /// Number of rings that contributed a sample
    pub samples: usize,
    /// Coefficient of determination in log-log space
    pub r_squared: f64,
}

impl PowerLawFit {
    /// Predicted ring population at a declination (degrees)
    pub fn predict(&self, dec_deg: f64) -> f64 {
        self.coefficient * dec_deg.to_radians().cos().abs().powf(self.exponent)
    }
}

/// Whether a ring can contribute a log-log sample.
///
/// The ring must be populated and |cos(dec)| must exceed `cos_floor` so the
/// logarithm stays finite.
pub fn is_valid_sample(summary: &RingSummary, cos_floor: f64) -> bool {
    summary.count > 0 && summary.mean_dec_deg.to_radians().cos().abs() > cos_floor
}

/// Fits ring population as a power of cos(declination)
#[derive(Debug, Clone, Copy)]
pub struct PowerLawFitter {
    cos_floor: f64,
}

impl PowerLawFitter {
    pub fn new(cos_floor: f64) -> Self {
        Self { cos_floor }
    }

    /// Log-log samples for the qualifying rings, in ring order
    pub fn samples(&self, summaries: &[RingSummary]) -> Vec<FitSample> {
        summaries
            .iter()
            .filter(|s| is_valid_sample(s, self.cos_floor))
            .map(|s| FitSample {
                ln_cos_dec: s.mean_dec_deg.to_radians().cos().abs().ln(),
                ln_count: (s.count as f64).ln(),
            })
            .collect()
    }

    /// Fit the ring summaries.
    ///
    /// Returns `None` when fewer than [`MIN_FIT_SAMPLES`] rings qualify.
    pub fn fit(&self, summaries: &[RingSummary]) -> Option<PowerLawFit> {
        let fit = fit_log_log(&self.samples(summaries));
        if let Some(f) = &fit {
            if f.exponent.is_nan() {
                log::warn!(
                    "Power-law exponent is undefined: all {} fit samples share one declination",
                    f.samples
                );
            }
        }
        fit
    }
}

/// Ordinary least-squares line through log-log samples.
///
/// A zero variance in `ln_cos_dec` gives a NaN exponent, which is
/// propagated into the coefficient rather than replaced.
pub fn fit_log_log(samples: &[FitSample]) -> Option<PowerLawFit> {
    if samples.len() < MIN_FIT_SAMPLES {
        return None;
    }

    let n = samples.len() as f64;
    let x_mean = samples.iter().map(|s| s.ln_cos_dec).sum::<f64>() / n;
    let y_mean = samples.iter().map(|s| s.ln_count).sum::<f64>() / n;

    let (num, den) = samples.iter().fold((0.0, 0.0), |(num, den), s| {
        let dx = s.ln_cos_dec - x_mean;
        (num + dx * (s.ln_count - y_mean), den + dx * dx)
    });
    let exponent = if den == 0.0 { f64::NAN } else { num / den };
    let intercept = y_mean - exponent * x_mean;

    let (ss_res, ss_tot) = samples.iter().fold((0.0, 0.0), |(res, tot), s| {
        let residual = s.ln_count - (intercept + exponent * s.ln_cos_dec);
        let deviation = s.ln_count - y_mean;
        (res + residual * residual, tot + deviation * deviation)
    });
    let r_squared = if ss_tot == 0.0 {
        f64::NAN
    } else {
        1.0 - ss_res / ss_tot
    };

    Some(PowerLawFit {
        coefficient: intercept.exp(),
        exponent,
        samples: samples.len(),
        r_squared,
    })
}
