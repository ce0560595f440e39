//! Elevation assignment for densified tracks.
//!
//! Every track point gets exactly one elevation value, either resampled from
//! a real elevation profile (fetched by the caller at coarser granularity)
//! or synthesized procedurally from the requested total gain.

use std::f64::consts::PI;

use rand::Rng;

use crate::models::{ElevatedPoint, TrackPoint};

/// Fills in an elevation value for every interpolated point.
#[derive(Debug, Clone)]
pub struct ElevationSynthesizer {
    /// Base elevation for procedural profiles in meters.
    base_elevation_m: f64,
}

impl Default for ElevationSynthesizer {
    fn default() -> Self {
        Self {
            base_elevation_m: 10.0,
        }
    }
}

impl ElevationSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base elevation used by procedural synthesis.
    pub fn with_base_elevation(mut self, meters: f64) -> Self {
        self.base_elevation_m = meters;
        self
    }

    /// Assigns one elevation per point.
    ///
    /// Non-empty `profile` samples are resampled onto the track by
    /// nearest-index mapping; otherwise a procedural profile is built from
    /// `requested_gain_m`. Non-finite values never escape: they are replaced
    /// with the previous point's elevation.
    pub fn synthesize(
        &self,
        points: &[TrackPoint],
        profile: &[f64],
        requested_gain_m: f64,
        rng: &mut impl Rng,
    ) -> Vec<ElevatedPoint> {
        let raw = if profile.is_empty() {
            self.procedural_profile(points.len(), requested_gain_m, rng)
        } else {
            resample_profile(profile, points.len())
        };

        let mut out = Vec::with_capacity(points.len());
        let mut last_good = self.base_elevation_m;
        for (point, elevation) in points.iter().zip(raw) {
            let elevation_m = if elevation.is_finite() {
                last_good = elevation;
                elevation
            } else {
                last_good
            };
            out.push(ElevatedPoint {
                point: *point,
                elevation_m,
            });
        }
        out
    }

    /// Builds a synthetic profile: a half-sine overall climb reaching the
    /// requested gain, a higher-frequency hill pattern at a quarter of the
    /// gain, and uniform noise. A zero-gain request produces a flat profile
    /// with smaller noise.
    fn procedural_profile(&self, total: usize, gain_m: f64, rng: &mut impl Rng) -> Vec<f64> {
        let mut profile = Vec::with_capacity(total);

        if gain_m > 0.0 {
            for i in 0..total {
                let progress = i as f64 / total as f64;
                let hill_pattern = (progress * PI * 4.0).sin() * (gain_m / 4.0);
                let overall_climb = ((progress * PI - PI / 2.0).sin() + 1.0) * (gain_m / 2.0);
                let noise = rng.gen_range(-2.5..2.5);
                profile.push(self.base_elevation_m + overall_climb + hill_pattern + noise);
            }
        } else {
            for _ in 0..total {
                profile.push(self.base_elevation_m + rng.gen_range(-1.0..1.0));
            }
        }

        profile
    }
}

/// Nearest-index resampling of a coarse profile onto `total` points.
fn resample_profile(samples: &[f64], total: usize) -> Vec<f64> {
    (0..total)
        .map(|i| {
            let index = (i as f64 / total as f64 * (samples.len() - 1) as f64).floor() as usize;
            samples[index.min(samples.len() - 1)]
        })
        .collect()
}

/// Total elevation gain of a track: the sum of positive consecutive deltas.
///
/// Always recomputed from the synthesized profile rather than echoing the
/// requested gain, since resampling and noise alter the realized value.
pub fn elevation_gain(points: &[ElevatedPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| (w[1].elevation_m - w[0].elevation_m).max(0.0))
        .sum()
}
