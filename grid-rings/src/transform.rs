//! Horizontal to equatorial coordinate conversion
//!
//! Converts a grid point's (azimuth, altitude) into (declination, hour
//! angle) for an observer at a fixed latitude, using the standard
//! spherical-astronomy relations:
//!
//! ```text
//! sin(δ) = sin(h)·sin(φ) + cos(h)·cos(φ)·cos(A)
//! sin(H) = -sin(A)·cos(h) / cos(δ)
//! cos(H) = (sin(h) - sin(φ)·sin(δ)) / (cos(φ)·cos(δ))
//! ```
//!
//! Grid files store azimuth and altitude in radians, so the raw fields go
//! straight into the trigonometry. Results are reported in degrees.

use crate::config::AnalysisConfig;
use crate::grid_file::RawPoint;
use serde::Serialize;

/// Equatorial position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    pub dec_deg: f64,
    pub hour_angle_deg: f64,
}

/// A grid point expressed in equatorial coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransformedPoint {
    /// Declination in degrees
    pub dec_deg: f64,
    /// Hour angle in degrees, within [-180, 180]
    pub hour_angle_deg: f64,
    /// Original azimuth converted to degrees
    pub azimuth_deg: f64,
    /// Original altitude converted to degrees
    pub altitude_deg: f64,
    pub pier_side: i32,
    pub is_mouse_point: bool,
}

/// Converts horizontal coordinates at a fixed observer latitude
#[derive(Debug, Clone, Copy)]
pub struct CoordinateTransformer {
    sin_lat: f64,
    cos_lat: f64,
    cos_dec_floor: f64,
}

impl CoordinateTransformer {
    /// Create a transformer for an observer latitude in radians
    ///
    /// # Arguments
    /// * `latitude_rad` - Observer latitude in radians
    /// * `cos_dec_floor` - Smallest cos(dec) used as a divisor near the celestial pole
    pub fn new(latitude_rad: f64, cos_dec_floor: f64) -> Self {
        Self {
            sin_lat: latitude_rad.sin(),
            cos_lat: latitude_rad.cos(),
            cos_dec_floor,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.observer_latitude_rad(), config.cos_dec_floor)
    }

    /// Convert one azimuth/altitude pair (radians) to declination and hour angle (degrees).
    ///
    /// sin(dec) is clamped to [-1, 1] so the result always lies in [-90°, 90°].
    /// At a latitude of exactly ±90° the hour angle is non-finite.
    pub fn to_equatorial(&self, azimuth: f64, altitude: f64) -> Equatorial {
        let (sin_h, cos_h) = altitude.sin_cos();
        let (sin_a, cos_a) = azimuth.sin_cos();

        let sin_dec = (sin_h * self.sin_lat + cos_h * self.cos_lat * cos_a).clamp(-1.0, 1.0);
        let dec = sin_dec.asin();
        let cos_dec = dec.cos().max(self.cos_dec_floor);

        let sin_ha = -(sin_a * cos_h) / cos_dec;
        let cos_ha = (sin_h - self.sin_lat * sin_dec) / (self.cos_lat * cos_dec);
        let ha = sin_ha.atan2(cos_ha);

        Equatorial {
            dec_deg: dec.to_degrees(),
            hour_angle_deg: ha.to_degrees(),
        }
    }

    /// Transform a grid point, carrying its metadata forward
    pub fn transform(&self, point: &RawPoint) -> TransformedPoint {
        let eq = self.to_equatorial(point.azimuth, point.altitude);
        TransformedPoint {
            dec_deg: eq.dec_deg,
            hour_angle_deg: eq.hour_angle_deg,
            azimuth_deg: point.azimuth.to_degrees(),
            altitude_deg: point.altitude.to_degrees(),
            pier_side: point.pier_side,
            is_mouse_point: point.is_mouse_point,
        }
    }
}
