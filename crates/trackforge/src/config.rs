//! Activity configuration and derived-field maintenance.

use serde::{Deserialize, Serialize};
use time::macros::time;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

use crate::errors::GenerateError;

/// Activity discipline. Determines how pace is displayed and which sport
/// label the TCX export carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Run,
    Ride,
    Hike,
}

impl ActivityType {
    /// Sport attribute value for the TCX `<Activity>` element.
    pub fn tcx_sport(self) -> &'static str {
        match self {
            ActivityType::Run => "Running",
            ActivityType::Ride => "Biking",
            ActivityType::Hike => "Other",
        }
    }

    /// Rides report speed (km/h) instead of pace per distance.
    pub fn reports_speed(self) -> bool {
        matches!(self, ActivityType::Ride)
    }
}

/// Heart-rate simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartRateConfig {
    pub enabled: bool,
    /// Target average heart rate in bpm.
    pub avg_bpm: f64,
    /// Allowed deviation from the average as a percentage (clamped to 40).
    pub variability_pct: f64,
}

impl Default for HeartRateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            avg_bpm: 140.0,
            variability_pct: 10.0,
        }
    }
}

/// Everything needed to generate one activity.
///
/// The route and elevation profile are expected to be pre-resolved by the
/// caller (typically from a directions service and an elevation lookup); the
/// generator itself performs no I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    pub name: String,
    pub date: Date,
    pub start_time: Time,
    pub distance_km: f64,
    /// Total activity duration in seconds. Kept equal to
    /// `distance_km * avg_pace_sec_per_km` by [`derive_fields`].
    pub target_time_sec: f64,
    pub avg_pace_sec_per_km: f64,
    /// 0-100 dial scaling both the physical (gradient/fatigue) and random
    /// components of the simulation.
    pub inconsistency_pct: f64,
    pub activity_type: ActivityType,
    pub elevation_gain_m: f64,
    /// Real elevation samples along the route, possibly coarser than the
    /// densified track. Empty means "synthesize procedurally".
    pub elevation_profile: Vec<f64>,
    pub heart_rate: HeartRateConfig,
    /// Route vertices in `[lon, lat]` order, as delivered by the directions
    /// service. With fewer than 2 vertices a synthetic closed loop of length
    /// `distance_km` is used instead.
    pub route: Vec<[f64; 2]>,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            name: "Morning Run".to_string(),
            date: OffsetDateTime::now_utc().date(),
            start_time: time!(8:00),
            distance_km: 0.0,
            target_time_sec: 0.0,
            avg_pace_sec_per_km: 360.0,
            inconsistency_pct: 10.0,
            activity_type: ActivityType::Run,
            elevation_gain_m: 0.0,
            elevation_profile: Vec::new(),
            heart_rate: HeartRateConfig::default(),
            route: Vec::new(),
        }
    }
}

impl ActivityConfig {
    /// Wall-clock start of the activity, assumed UTC.
    pub fn start_datetime(&self) -> OffsetDateTime {
        PrimitiveDateTime::new(self.date, self.start_time).assume_utc()
    }

    /// Checks that the config can produce a track at all.
    ///
    /// A drawn route of at least 2 points is authoritative for geometry.
    /// Without one, a positive distance is required for the fallback loop:
    /// zero distance means there is nothing to export, a negative or
    /// non-finite value is a malformed config.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            return Err(GenerateError::InvalidConfig(
                "distance must be a non-negative number".to_string(),
            ));
        }
        if !self.avg_pace_sec_per_km.is_finite() || self.avg_pace_sec_per_km < 0.0 {
            return Err(GenerateError::InvalidConfig(
                "average pace must be a non-negative number".to_string(),
            ));
        }
        if !self.target_time_sec.is_finite() || self.target_time_sec < 0.0 {
            return Err(GenerateError::InvalidConfig(
                "target time must be a non-negative number".to_string(),
            ));
        }
        if self.route.len() < 2 && self.distance_km == 0.0 {
            return Err(GenerateError::NoRoute);
        }
        Ok(())
    }
}

/// A partial update to the distance/pace/time triple.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigPatch {
    pub distance_km: Option<f64>,
    pub avg_pace_sec_per_km: Option<f64>,
    pub target_time_sec: Option<f64>,
}

impl ConfigPatch {
    pub fn distance(km: f64) -> Self {
        Self {
            distance_km: Some(km),
            ..Self::default()
        }
    }

    pub fn pace(sec_per_km: f64) -> Self {
        Self {
            avg_pace_sec_per_km: Some(sec_per_km),
            ..Self::default()
        }
    }

    pub fn time(sec: f64) -> Self {
        Self {
            target_time_sec: Some(sec),
            ..Self::default()
        }
    }
}

/// Applies a patch and recomputes the dependent field.
///
/// Precedence when several fields change at once: a distance change wins over
/// a pace change, which wins over a time change.
/// - distance or pace changed: `target_time_sec = distance_km * pace`
/// - time changed: `avg_pace_sec_per_km = time / distance_km` (distance > 0)
pub fn derive_fields(prev: &ActivityConfig, patch: ConfigPatch) -> ActivityConfig {
    let mut next = prev.clone();

    if let Some(d) = patch.distance_km {
        next.distance_km = d;
    }
    if let Some(p) = patch.avg_pace_sec_per_km {
        next.avg_pace_sec_per_km = p;
    }
    if let Some(t) = patch.target_time_sec {
        next.target_time_sec = t;
    }

    let distance_changed = patch.distance_km.is_some_and(|d| d != prev.distance_km);
    let pace_changed = patch
        .avg_pace_sec_per_km
        .is_some_and(|p| p != prev.avg_pace_sec_per_km);
    let time_changed = patch
        .target_time_sec
        .is_some_and(|t| t != prev.target_time_sec);

    if distance_changed || pace_changed {
        next.target_time_sec = next.distance_km * next.avg_pace_sec_per_km;
    } else if time_changed && next.distance_km > 0.0 {
        next.avg_pace_sec_per_km = next.target_time_sec / next.distance_km;
    }

    next
}
