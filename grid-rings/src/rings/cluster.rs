//! Greedy declination clustering
//!
//! Points are visited in ascending declination. Each point joins the ring
//! being built when it lies within the threshold of that ring's *running*
//! mean declination, otherwise the ring is closed and a new one starts.
//! Because the mean drifts as points accrete, a ring can end up wider than
//! twice the threshold.

use crate::transform::TransformedPoint;

/// A cluster of grid points sharing nearly the same declination
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<TransformedPoint>,
}

impl Ring {
    /// Member points in ascending declination order
    pub fn points(&self) -> &[TransformedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for rings built by [`RingClusterer`]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Arithmetic mean declination in degrees
    pub fn mean_dec_deg(&self) -> f64 {
        self.points.iter().map(|p| p.dec_deg).sum::<f64>() / self.points.len() as f64
    }

    pub fn hour_angles_deg(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.hour_angle_deg).collect()
    }
}

/// Ring under construction plus the running declination sum
#[derive(Default)]
struct RingBuilder {
    points: Vec<TransformedPoint>,
    dec_sum: f64,
}

impl RingBuilder {
    fn mean(&self) -> f64 {
        self.dec_sum / self.points.len() as f64
    }

    fn push(&mut self, point: TransformedPoint) {
        self.dec_sum += point.dec_deg;
        self.points.push(point);
    }

    fn take(&mut self) -> Option<Ring> {
        self.dec_sum = 0.0;
        if self.points.is_empty() {
            None
        } else {
            Some(Ring {
                points: std::mem::take(&mut self.points),
            })
        }
    }
}

/// Fold state: closed rings and the ring being built
#[derive(Default)]
struct ClusterState {
    rings: Vec<Ring>,
    current: RingBuilder,
}

/// Groups declination-sorted points into rings
#[derive(Debug, Clone, Copy)]
pub struct RingClusterer {
    threshold_deg: f64,
}

impl RingClusterer {
    pub fn new(threshold_deg: f64) -> Self {
        Self { threshold_deg }
    }

    pub fn threshold_deg(&self) -> f64 {
        self.threshold_deg
    }

    /// Cluster points that are already sorted by ascending declination
    pub fn cluster_sorted(&self, sorted: &[TransformedPoint]) -> Vec<Ring> {
        let mut state = sorted
            .iter()
            .fold(ClusterState::default(), |mut state, &point| {
                let joins = !state.current.points.is_empty()
                    && (point.dec_deg - state.current.mean()).abs() <= self.threshold_deg;
                if !joins {
                    state.rings.extend(state.current.take());
                }
                state.current.push(point);
                state
            });
        state.rings.extend(state.current.take());

        log::debug!(
            "Formed {} rings from {} points (threshold {:.3}°)",
            state.rings.len(),
            sorted.len(),
            self.threshold_deg
        );
        state.rings
    }

    /// Sort points by declination and cluster them
    pub fn cluster(&self, points: &[TransformedPoint]) -> Vec<Ring> {
        self.cluster_sorted(&sort_by_declination(points))
    }
}

/// Stable ascending sort by declination.
///
/// Uses the IEEE total order, so NaN declinations gather at one end and
/// each one ends up in a ring of its own.
pub fn sort_by_declination(points: &[TransformedPoint]) -> Vec<TransformedPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.dec_deg.total_cmp(&b.dec_deg));
    sorted
}
