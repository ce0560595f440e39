//! Sample types flowing through the generation pipeline.
//!
//! Each stage of the pipeline wraps the previous stage's output in a richer
//! type: interpolation produces [`TrackPoint`]s, elevation synthesis produces
//! [`ElevatedPoint`]s, simulation produces [`SimulatedSample`]s, and timestamp
//! sequencing produces [`TimestampedSample`]s. All of them are created fresh
//! per generation call and discarded after serialization.

use time::OffsetDateTime;

/// A single densified route point. Immutable once produced by interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    /// Cumulative haversine distance from the start of the track in meters.
    pub distance_from_start_m: f64,
}

/// A track point with an assigned elevation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevatedPoint {
    pub point: TrackPoint,
    pub elevation_m: f64,
}

/// A point with simulated per-point performance values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedSample {
    pub point: ElevatedPoint,
    /// Instantaneous pace in seconds per kilometer, clamped to a sane band.
    pub pace_sec_per_km: f64,
    /// The same pace expressed as speed in km/h (used for ride display).
    pub speed_kmh: f64,
    /// Heart rate in bpm, present only when heart-rate simulation is enabled.
    pub heart_rate_bpm: Option<u16>,
    /// Signed slope percentage relative to the previous point.
    pub gradient_pct: f64,
    /// Cumulative uphill-strain accumulator at this point, in sec/km of
    /// pace penalty. Simulation state carried point-to-point.
    pub fatigue_accum_sec: f64,
}

/// A fully simulated sample with an absolute wall-clock timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimestampedSample {
    pub sample: SimulatedSample,
    pub timestamp: OffsetDateTime,
}

impl ElevatedPoint {
    pub fn lat(&self) -> f64 {
        self.point.lat
    }

    pub fn lon(&self) -> f64 {
        self.point.lon
    }

    pub fn distance_from_start_m(&self) -> f64 {
        self.point.distance_from_start_m
    }
}

impl TimestampedSample {
    pub fn lat(&self) -> f64 {
        self.sample.point.lat()
    }

    pub fn lon(&self) -> f64 {
        self.sample.point.lon()
    }

    pub fn elevation_m(&self) -> f64 {
        self.sample.point.elevation_m
    }
}
