//! Wall-clock timestamp allocation.
//!
//! Splits the requested total duration evenly across points, then jitters
//! each interval by the inconsistency dial. The jitter is an independent
//! noise term rather than being derived from the simulated per-point pace,
//! so the total duration stays anchored to the requested time with only
//! mean-zero drift bounded by the jitter amplitude.

use rand::Rng;
use time::{Duration, OffsetDateTime};

use crate::models::{SimulatedSample, TimestampedSample};

/// Allocates absolute timestamps across a simulated sample sequence.
#[derive(Debug, Clone)]
pub struct TimestampSequencer {
    inconsistency_pct: f64,
}

impl TimestampSequencer {
    pub fn new(inconsistency_pct: f64) -> Self {
        Self { inconsistency_pct }
    }

    /// Assigns a timestamp to every sample, starting at `start`.
    ///
    /// The average interval is `target_time_sec / max(1, n - 1)`; each
    /// interval after the first point is scaled by a uniform factor in
    /// `1 ± inconsistency_pct/100`. Non-finite intervals collapse to zero so
    /// a degenerate config can never corrupt the output.
    pub fn sequence(
        &self,
        samples: Vec<SimulatedSample>,
        start: OffsetDateTime,
        target_time_sec: f64,
        rng: &mut impl Rng,
    ) -> Vec<TimestampedSample> {
        let intervals = samples.len().saturating_sub(1).max(1);
        let avg_interval_sec = target_time_sec / intervals as f64;

        let mut timestamp = start;
        samples
            .into_iter()
            .enumerate()
            .map(|(i, sample)| {
                if i > 0 {
                    let mut interval = avg_interval_sec;
                    if self.inconsistency_pct > 0.0 {
                        interval *= 1.0 + rng.gen_range(-1.0..1.0) * (self.inconsistency_pct / 100.0);
                    }
                    if !interval.is_finite() {
                        interval = 0.0;
                    }
                    timestamp += Duration::seconds_f64(interval);
                }
                TimestampedSample { sample, timestamp }
            })
            .collect()
    }
}
