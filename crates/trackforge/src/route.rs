//! Route densification.
//!
//! Turns a sparse user-drawn polyline into a dense point sequence with
//! near-uniform spacing, and provides a synthetic closed-loop fallback for
//! configs without a drawn route.

use std::f64::consts::TAU;

use crate::models::TrackPoint;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Densifies sparse waypoints into ~evenly spaced track points.
#[derive(Debug, Clone)]
pub struct WaypointInterpolator {
    /// Target spacing between emitted points in meters.
    spacing_m: f64,
}

impl Default for WaypointInterpolator {
    fn default() -> Self {
        Self { spacing_m: 10.0 }
    }
}

impl WaypointInterpolator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target point spacing.
    pub fn with_spacing(mut self, meters: f64) -> Self {
        self.spacing_m = meters;
        self
    }

    /// Densifies a route given as `[lon, lat]` vertices.
    ///
    /// Each consecutive pair is split into `max(1, floor(segment / spacing))`
    /// intervals with linear lat/lon interpolation (an acceptable
    /// approximation at 10 m scale). Shared endpoints between segments are
    /// emitted once; the final vertex is always included. Fewer than 2
    /// waypoints yields an empty sequence, which callers must treat as "no
    /// activity to export".
    pub fn densify(&self, route: &[[f64; 2]]) -> Vec<TrackPoint> {
        if route.len() < 2 {
            return Vec::new();
        }

        let mut points = Vec::new();
        let mut cumulative_m = 0.0;
        let mut prev: Option<(f64, f64)> = None;

        for (seg_idx, pair) in route.windows(2).enumerate() {
            let [lon1, lat1] = pair[0];
            let [lon2, lat2] = pair[1];

            let segment_m = haversine_distance(lat1, lon1, lat2, lon2);
            // A zero-length segment still emits one point.
            let intervals = ((segment_m / self.spacing_m).floor() as usize).max(1);

            // Skip the shared endpoint except on the final segment.
            let last_segment = seg_idx == route.len() - 2;
            let end = if last_segment { intervals } else { intervals - 1 };

            for i in 0..=end {
                let t = i as f64 / intervals as f64;
                let lat = lat1 + (lat2 - lat1) * t;
                let lon = lon1 + (lon2 - lon1) * t;

                if let Some((prev_lat, prev_lon)) = prev {
                    let step = haversine_distance(prev_lat, prev_lon, lat, lon);
                    if step.is_finite() {
                        cumulative_m += step;
                    }
                }
                prev = Some((lat, lon));

                points.push(TrackPoint {
                    lat,
                    lon,
                    distance_from_start_m: cumulative_m,
                });
            }
        }

        points
    }
}

/// Synthesizes a closed circular loop of the given length.
///
/// Used when no route is drawn: 101 vertices around a fixed center, radius
/// chosen so the circumference equals `distance_km`. The result is fed
/// through [`WaypointInterpolator::densify`] like any drawn route.
pub fn fallback_loop(distance_km: f64) -> Vec<[f64; 2]> {
    const CENTER_LAT: f64 = 40.7128;
    const CENTER_LON: f64 = -74.0060;
    const VERTICES: usize = 100;
    const EARTH_RADIUS_KM: f64 = 6_371.0;

    let radius_km = distance_km / TAU;

    (0..=VERTICES)
        .map(|i| {
            let angle = i as f64 / VERTICES as f64 * TAU;
            let d_lat = (radius_km / EARTH_RADIUS_KM).to_degrees() * angle.cos();
            let d_lon = (radius_km / EARTH_RADIUS_KM).to_degrees() * angle.sin()
                / CENTER_LAT.to_radians().cos();
            [CENTER_LON + d_lon, CENTER_LAT + d_lat]
        })
        .collect()
}

/// Calculates the haversine distance between two points in meters.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    // ~999.6 m of latitude at the equator.
    const KM_NORTH: [[f64; 2]; 2] = [[0.0, 0.0], [0.0, 0.00899]];

    #[test]
    fn test_fewer_than_two_waypoints_is_empty() {
        let interp = WaypointInterpolator::new();
        assert!(interp.densify(&[]).is_empty());
        assert!(interp.densify(&[[-74.0, 40.7]]).is_empty());
    }

    #[test]
    fn test_kilometer_segment_point_count() {
        let interp = WaypointInterpolator::new();
        let points = interp.densify(&KM_NORTH);

        // One point per ~10 m, both endpoints included exactly once.
        assert_eq!(points.len(), 100);
        assert_eq!(points[0].lat, 0.0);
        let last = points.last().unwrap();
        assert!((last.lat - 0.00899).abs() < 1e-12);
    }

    #[test]
    fn test_cumulative_distance_strictly_increases() {
        let interp = WaypointInterpolator::new();
        let points = interp.densify(&KM_NORTH);

        for window in points.windows(2) {
            assert!(window[1].distance_from_start_m > window[0].distance_from_start_m);
        }

        let total = points.last().unwrap().distance_from_start_m;
        assert!((total - 999.6).abs() < 2.0);
    }

    #[test]
    fn test_shared_endpoints_not_duplicated() {
        let interp = WaypointInterpolator::new();
        let route = [[0.0, 0.0], [0.0, 0.00899], [0.00899, 0.00899]];
        let points = interp.densify(&route);

        for window in points.windows(2) {
            assert!(
                window[0].lat != window[1].lat || window[0].lon != window[1].lon,
                "consecutive points must not coincide"
            );
        }
    }

    #[test]
    fn test_degenerate_segment_emits_one_point() {
        let interp = WaypointInterpolator::new();
        let points = interp.densify(&[[-74.0, 40.7], [-74.0, 40.7]]);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].distance_from_start_m, 0.0);
        assert_eq!(points[1].distance_from_start_m, 0.0);
    }

    #[test]
    fn test_fallback_loop_closes_and_matches_distance() {
        let loop_route = fallback_loop(5.0);
        assert_eq!(loop_route.len(), 101);

        let first = loop_route[0];
        let last = loop_route[100];
        assert!((first[0] - last[0]).abs() < 1e-9);
        assert!((first[1] - last[1]).abs() < 1e-9);

        let mut total = 0.0;
        for pair in loop_route.windows(2) {
            total += haversine_distance(pair[0][1], pair[0][0], pair[1][1], pair[1][0]);
        }
        // Chords of a 101-vertex circle underestimate the arc only slightly.
        assert!((total - 5000.0).abs() < 50.0, "total was {total}");
    }

    #[test]
    fn test_densified_loop_spacing() {
        let interp = WaypointInterpolator::new();
        let points = interp.densify(&fallback_loop(5.0));

        assert!(points.len() > 400);
        for window in points.windows(2) {
            let step = window[1].distance_from_start_m - window[0].distance_from_start_m;
            assert!(step > 0.0 && step < 15.0, "step was {step}");
        }
    }

    #[test]
    fn test_haversine() {
        // Known distance: ~111km for 1 degree of latitude.
        let dist = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((dist - 111_000.0).abs() < 1000.0);
    }
}
