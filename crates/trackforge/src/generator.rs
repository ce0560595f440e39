//! The generation pipeline facade.
//!
//! Wires the five stages together: densify, elevate, simulate, timestamp,
//! serialize. Preview and export run the exact same simulation, differing
//! only in whether the series is downsampled for charting or timestamped
//! and rendered to a file.

use rand::Rng;
use tracing::{debug, info};

use crate::config::ActivityConfig;
use crate::elevation::ElevationSynthesizer;
use crate::errors::GenerateError;
use crate::export::{self, ExportFormat, ExportGate, ExportedFile};
use crate::models::{SimulatedSample, TimestampedSample};
use crate::route::{self, WaypointInterpolator};
use crate::simulate::PerformanceSimulator;
use crate::timeline::TimestampSequencer;

/// Number of chart buckets the preview series is downsampled to.
pub const DEFAULT_PREVIEW_BUCKETS: usize = 20;

/// Generates synthetic activity tracks from an [`ActivityConfig`].
///
/// Randomness is injected per call, so a seeded RNG makes the whole
/// pipeline reproducible.
#[derive(Debug, Clone, Default)]
pub struct TrackGenerator {
    interpolator: WaypointInterpolator,
    elevation: ElevationSynthesizer,
}

impl TrackGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the route densifier (e.g. to change point spacing).
    pub fn with_interpolator(mut self, interpolator: WaypointInterpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    /// Replaces the elevation synthesizer.
    pub fn with_elevation(mut self, elevation: ElevationSynthesizer) -> Self {
        self.elevation = elevation;
        self
    }

    /// Runs the full pipeline and returns the timestamped track.
    pub fn generate(
        &self,
        config: &ActivityConfig,
        rng: &mut impl Rng,
    ) -> Result<Vec<TimestampedSample>, GenerateError> {
        config.validate()?;
        let samples = self.simulate(config, rng)?;
        let sequencer = TimestampSequencer::new(config.inconsistency_pct);
        let timed = sequencer.sequence(
            samples,
            config.start_datetime(),
            config.target_time_sec,
            rng,
        );
        debug!(points = timed.len(), "generated track");
        Ok(timed)
    }

    /// Runs the pipeline up to simulation and downsamples the series for
    /// charting. Identical model to [`TrackGenerator::generate`], so the
    /// preview matches the exported file.
    pub fn preview(
        &self,
        config: &ActivityConfig,
        buckets: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<SimulatedSample>, GenerateError> {
        config.validate()?;
        let samples = self.simulate(config, rng)?;
        Ok(downsample(samples, buckets))
    }

    /// Generates and serializes the track in the requested format.
    pub fn export(
        &self,
        config: &ActivityConfig,
        format: ExportFormat,
        rng: &mut impl Rng,
    ) -> Result<ExportedFile, GenerateError> {
        let samples = self.generate(config, rng)?;
        let contents = match format {
            ExportFormat::Gpx => export::write_gpx(config, &samples),
            ExportFormat::Tcx => export::write_tcx(config, &samples),
        };
        let file_name = export::file_name(&config.name, format);
        info!(%file_name, points = samples.len(), "exported activity");
        Ok(ExportedFile {
            file_name,
            contents,
        })
    }

    /// Like [`TrackGenerator::export`], but consults the gate first.
    pub fn export_gated(
        &self,
        config: &ActivityConfig,
        format: ExportFormat,
        gate: &mut dyn ExportGate,
        rng: &mut impl Rng,
    ) -> Result<ExportedFile, GenerateError> {
        if !gate.try_consume() {
            return Err(GenerateError::ExportDenied);
        }
        self.export(config, format, rng)
    }

    /// Densify + elevate + simulate, shared by preview and export.
    fn simulate(
        &self,
        config: &ActivityConfig,
        rng: &mut impl Rng,
    ) -> Result<Vec<SimulatedSample>, GenerateError> {
        let points = if config.route.len() >= 2 {
            self.interpolator.densify(&config.route)
        } else {
            self.interpolator
                .densify(&route::fallback_loop(config.distance_km))
        };
        if points.is_empty() {
            return Err(GenerateError::NoRoute);
        }
        debug!(points = points.len(), "densified route");

        let elevated = self.elevation.synthesize(
            &points,
            &config.elevation_profile,
            config.elevation_gain_m,
            rng,
        );

        let simulator = PerformanceSimulator::new(config.avg_pace_sec_per_km)
            .with_inconsistency(config.inconsistency_pct)
            .with_heart_rate(config.heart_rate.clone());
        Ok(simulator.simulate(&elevated, rng))
    }
}

/// Picks `buckets + 1` evenly spaced samples (chart granularity). Shorter
/// series pass through unchanged.
fn downsample(samples: Vec<SimulatedSample>, buckets: usize) -> Vec<SimulatedSample> {
    if buckets == 0 || samples.len() <= buckets + 1 {
        return samples;
    }
    let last = samples.len() - 1;
    (0..=buckets)
        .map(|i| samples[(i as f64 / buckets as f64 * last as f64).round() as usize])
        .collect()
}
