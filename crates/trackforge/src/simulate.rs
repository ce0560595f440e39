//! Per-point pace and heart-rate simulation.
//!
//! A single model serves both the preview chart and the exported track, so
//! what the user previews is what gets downloaded. Pace starts from the
//! configured average and is bent by three influences, all scaled by the
//! inconsistency dial:
//!
//! - an immediate grade cost (climbing costs more than descending saves),
//! - a bounded, decaying fatigue accumulator fed by sustained climbing,
//! - uniform random jitter.
//!
//! At 0% inconsistency all three contributions vanish and pacing is
//! perfectly even; 50% is the full-strength physical model; 100% doubles it.

use rand::Rng;

use crate::config::HeartRateConfig;
use crate::models::{ElevatedPoint, SimulatedSample};

/// Hard pace band: 2:30 to 15:00 min/km.
pub const MIN_PACE_SEC_PER_KM: f64 = 150.0;
pub const MAX_PACE_SEC_PER_KM: f64 = 900.0;

/// Absolute heart-rate safety band in bpm.
pub const MIN_HEART_RATE_BPM: f64 = 60.0;
pub const MAX_HEART_RATE_BPM: f64 = 200.0;

const UPHILL_COST_SEC_PER_PCT: f64 = 10.0;
const DOWNHILL_COST_SEC_PER_PCT: f64 = 5.0;

// Pace fatigue: grows on sustained climbs, decays otherwise, capped at a
// 2 min/km penalty.
const FATIGUE_CLIMB_THRESHOLD_PCT: f64 = 1.0;
const FATIGUE_GAIN_PER_PCT: f64 = 0.5;
const FATIGUE_DECAY_SEC: f64 = 2.0;
const MAX_FATIGUE_SEC: f64 = 120.0;

// Heart-rate fatigue: same shape, smaller magnitude.
const HR_FATIGUE_GAIN_PER_PCT: f64 = 0.1;
const HR_FATIGUE_DECAY_BPM: f64 = 0.5;
const MAX_HR_FATIGUE_BPM: f64 = 15.0;

const UPHILL_HR_BPM_PER_PCT: f64 = 2.0;
const DOWNHILL_HR_BPM_PER_PCT: f64 = 1.0;
const MAX_HR_VARIABILITY_PCT: f64 = 40.0;

/// Computes per-point pace, speed, gradient and optional heart rate.
#[derive(Debug, Clone)]
pub struct PerformanceSimulator {
    avg_pace_sec_per_km: f64,
    inconsistency_pct: f64,
    heart_rate: HeartRateConfig,
}

impl PerformanceSimulator {
    pub fn new(avg_pace_sec_per_km: f64) -> Self {
        Self {
            avg_pace_sec_per_km,
            inconsistency_pct: 0.0,
            heart_rate: HeartRateConfig::default(),
        }
    }

    /// Sets the inconsistency dial (0-100).
    pub fn with_inconsistency(mut self, pct: f64) -> Self {
        self.inconsistency_pct = pct;
        self
    }

    /// Enables/configures heart-rate simulation.
    pub fn with_heart_rate(mut self, config: HeartRateConfig) -> Self {
        self.heart_rate = config;
        self
    }

    /// Simulates the whole track in order, carrying fatigue point-to-point.
    pub fn simulate(
        &self,
        points: &[ElevatedPoint],
        rng: &mut impl Rng,
    ) -> Vec<SimulatedSample> {
        let physics_factor = self.inconsistency_pct / 50.0;
        let mut pace_fatigue = 0.0_f64;
        let mut hr_fatigue = 0.0_f64;

        let mut samples = Vec::with_capacity(points.len());

        for (i, point) in points.iter().enumerate() {
            let gradient_pct = if i == 0 {
                0.0
            } else {
                gradient_between(&points[i - 1], point)
            };

            // Immediate grade cost, asymmetric by design of the model.
            let grade_cost = if gradient_pct > 0.0 {
                gradient_pct * UPHILL_COST_SEC_PER_PCT
            } else {
                gradient_pct * DOWNHILL_COST_SEC_PER_PCT
            };

            if gradient_pct > FATIGUE_CLIMB_THRESHOLD_PCT {
                pace_fatigue += gradient_pct * FATIGUE_GAIN_PER_PCT;
            } else {
                pace_fatigue -= FATIGUE_DECAY_SEC;
            }
            pace_fatigue = pace_fatigue.clamp(0.0, MAX_FATIGUE_SEC);

            let mut pace = self.avg_pace_sec_per_km + (grade_cost + pace_fatigue) * physics_factor;

            if self.inconsistency_pct > 0.0 {
                pace += rng.gen_range(-1.0..1.0)
                    * (self.inconsistency_pct / 100.0)
                    * (self.avg_pace_sec_per_km * 0.5);
            }

            let pace = pace.clamp(MIN_PACE_SEC_PER_KM, MAX_PACE_SEC_PER_KM);

            let heart_rate_bpm = if self.heart_rate.enabled {
                Some(self.heart_rate_at(gradient_pct, physics_factor, &mut hr_fatigue, rng))
            } else {
                None
            };

            samples.push(SimulatedSample {
                point: *point,
                pace_sec_per_km: pace,
                speed_kmh: 3600.0 / pace,
                heart_rate_bpm,
                gradient_pct,
                fatigue_accum_sec: pace_fatigue,
            });
        }

        samples
    }

    /// One heart-rate sample: base average bent by grade and fatigue (scaled
    /// like pace), plus variability noise. Clamped first to the configured
    /// variability band, then to the absolute safety band.
    fn heart_rate_at(
        &self,
        gradient_pct: f64,
        physics_factor: f64,
        hr_fatigue: &mut f64,
        rng: &mut impl Rng,
    ) -> u16 {
        let avg = self.heart_rate.avg_bpm;
        let variability_pct = self
            .heart_rate
            .variability_pct
            .clamp(0.0, MAX_HR_VARIABILITY_PCT);

        let grade_impact = if gradient_pct > 0.0 {
            gradient_pct * UPHILL_HR_BPM_PER_PCT
        } else {
            gradient_pct * DOWNHILL_HR_BPM_PER_PCT
        };

        if gradient_pct > FATIGUE_CLIMB_THRESHOLD_PCT {
            *hr_fatigue += gradient_pct * HR_FATIGUE_GAIN_PER_PCT;
        } else {
            *hr_fatigue -= HR_FATIGUE_DECAY_BPM;
        }
        *hr_fatigue = hr_fatigue.clamp(0.0, MAX_HR_FATIGUE_BPM);

        let noise = rng.gen_range(-0.5..0.5) * (avg * variability_pct / 100.0);

        let band_min = (avg * (1.0 - variability_pct / 100.0)).round();
        let band_max = (avg * (1.0 + variability_pct / 100.0)).round();
        // Keep the band ordered even if the config is odd.
        let (band_min, band_max) = (band_min.min(band_max), band_min.max(band_max));

        let hr = (avg + (grade_impact + *hr_fatigue) * physics_factor + noise).round();
        let hr = hr.clamp(band_min, band_max);
        let hr = hr.clamp(MIN_HEART_RATE_BPM, MAX_HEART_RATE_BPM);
        hr as u16
    }
}

/// Signed slope percentage between consecutive points. Zero-length or
/// non-finite segments contribute no gradient.
fn gradient_between(prev: &ElevatedPoint, curr: &ElevatedPoint) -> f64 {
    let segment_m = curr.distance_from_start_m() - prev.distance_from_start_m();
    if segment_m <= 0.0 {
        return 0.0;
    }
    let gradient = (curr.elevation_m - prev.elevation_m) / segment_m * 100.0;
    if gradient.is_finite() { gradient } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::models::TrackPoint;

    fn flat_track(n: usize) -> Vec<ElevatedPoint> {
        (0..n)
            .map(|i| ElevatedPoint {
                point: TrackPoint {
                    lat: 40.0,
                    lon: -74.0 + i as f64 * 1e-4,
                    distance_from_start_m: i as f64 * 10.0,
                },
                elevation_m: 10.0,
            })
            .collect()
    }

    fn hilly_track(n: usize) -> Vec<ElevatedPoint> {
        (0..n)
            .map(|i| ElevatedPoint {
                point: TrackPoint {
                    lat: 40.0,
                    lon: -74.0 + i as f64 * 1e-4,
                    distance_from_start_m: i as f64 * 10.0,
                },
                // 5% sustained climb.
                elevation_m: 10.0 + i as f64 * 0.5,
            })
            .collect()
    }

    #[test]
    fn test_zero_inconsistency_is_perfectly_even() {
        let sim = PerformanceSimulator::new(300.0);
        let mut rng = StdRng::seed_from_u64(1);

        let samples = sim.simulate(&hilly_track(100), &mut rng);
        for s in &samples {
            assert_eq!(s.pace_sec_per_km, 300.0);
        }
    }

    #[test]
    fn test_pace_always_within_band() {
        let sim = PerformanceSimulator::new(880.0).with_inconsistency(100.0);
        let mut rng = StdRng::seed_from_u64(2);

        let samples = sim.simulate(&hilly_track(500), &mut rng);
        for s in &samples {
            assert!(s.pace_sec_per_km >= MIN_PACE_SEC_PER_KM);
            assert!(s.pace_sec_per_km <= MAX_PACE_SEC_PER_KM);
        }
    }

    #[test]
    fn test_climbing_slows_pace() {
        let sim = PerformanceSimulator::new(300.0).with_inconsistency(50.0);
        let mut rng = StdRng::seed_from_u64(3);

        let flat: f64 = sim
            .simulate(&flat_track(200), &mut rng)
            .iter()
            .map(|s| s.pace_sec_per_km)
            .sum::<f64>()
            / 200.0;
        let hilly: f64 = sim
            .simulate(&hilly_track(200), &mut rng)
            .iter()
            .map(|s| s.pace_sec_per_km)
            .sum::<f64>()
            / 200.0;

        assert!(hilly > flat + 30.0, "hilly {hilly} vs flat {flat}");
    }

    #[test]
    fn test_fatigue_is_bounded_and_decays() {
        let sim = PerformanceSimulator::new(300.0).with_inconsistency(50.0);
        let mut rng = StdRng::seed_from_u64(4);

        let mut points = hilly_track(400);
        // Flatten the second half so fatigue can recover.
        let crest = points[199].elevation_m;
        for p in points.iter_mut().skip(200) {
            p.elevation_m = crest;
        }

        let samples = sim.simulate(&points, &mut rng);
        for s in &samples {
            assert!(s.fatigue_accum_sec >= 0.0 && s.fatigue_accum_sec <= 120.0);
        }
        assert!(samples[199].fatigue_accum_sec > 0.0);
        assert_eq!(samples.last().unwrap().fatigue_accum_sec, 0.0);
    }

    #[test]
    fn test_heart_rate_disabled_by_default() {
        let sim = PerformanceSimulator::new(300.0).with_inconsistency(30.0);
        let mut rng = StdRng::seed_from_u64(5);

        let samples = sim.simulate(&flat_track(50), &mut rng);
        assert!(samples.iter().all(|s| s.heart_rate_bpm.is_none()));
    }

    #[test]
    fn test_heart_rate_within_bands() {
        let hr = HeartRateConfig {
            enabled: true,
            avg_bpm: 150.0,
            variability_pct: 20.0,
        };
        let sim = PerformanceSimulator::new(300.0)
            .with_inconsistency(100.0)
            .with_heart_rate(hr);
        let mut rng = StdRng::seed_from_u64(6);

        let samples = sim.simulate(&hilly_track(500), &mut rng);
        for s in &samples {
            let bpm = f64::from(s.heart_rate_bpm.unwrap());
            assert!((120.0..=180.0).contains(&bpm), "outside variability band: {bpm}");
            assert!((MIN_HEART_RATE_BPM..=MAX_HEART_RATE_BPM).contains(&bpm));
        }
    }

    #[test]
    fn test_excess_variability_is_clamped() {
        let hr = HeartRateConfig {
            enabled: true,
            avg_bpm: 150.0,
            variability_pct: 90.0,
        };
        let sim = PerformanceSimulator::new(300.0)
            .with_inconsistency(100.0)
            .with_heart_rate(hr);
        let mut rng = StdRng::seed_from_u64(7);

        // Effective variability caps at 40%: 90-210, then safety band 60-200.
        let samples = sim.simulate(&hilly_track(300), &mut rng);
        for s in &samples {
            let bpm = f64::from(s.heart_rate_bpm.unwrap());
            assert!((90.0..=200.0).contains(&bpm), "bpm {bpm}");
        }
    }

    #[test]
    fn test_speed_matches_pace() {
        let sim = PerformanceSimulator::new(360.0);
        let mut rng = StdRng::seed_from_u64(8);

        let samples = sim.simulate(&flat_track(10), &mut rng);
        for s in &samples {
            assert!((s.speed_kmh - 10.0).abs() < 1e-9);
        }
    }
}
