//! Synthetic GPS activity generation.
//!
//! Trackforge turns a sparse, user-drawn route plus a handful of scalar
//! parameters (distance, average pace, inconsistency, elevation gain,
//! heart-rate settings) into a dense, physically-plausible, timestamped
//! track, and serializes it as GPX 1.1 or TCX v2.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use trackforge::prelude::*;
//!
//! let config = ActivityConfig {
//!     name: "Morning Run".into(),
//!     distance_km: 5.0,
//!     avg_pace_sec_per_km: 300.0,
//!     target_time_sec: 1500.0,
//!     ..Default::default()
//! };
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let file = TrackGenerator::new().export(&config, ExportFormat::Gpx, &mut rng)?;
//! std::fs::write(&file.file_name, &file.contents)?;
//! ```
//!
//! The pipeline is pure computation: routes and elevation profiles are
//! expected pre-resolved by the caller, randomness is injected per call,
//! and nothing outlives one generation request.

pub mod config;
pub mod elevation;
pub mod errors;
pub mod export;
pub mod generator;
pub mod models;
pub mod route;
pub mod simulate;
pub mod timeline;

pub use config::{ActivityConfig, ActivityType, ConfigPatch, HeartRateConfig, derive_fields};
pub use errors::GenerateError;
pub use generator::TrackGenerator;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{
        ActivityConfig, ActivityType, ConfigPatch, HeartRateConfig, derive_fields,
    };
    pub use crate::elevation::{ElevationSynthesizer, elevation_gain};
    pub use crate::errors::GenerateError;
    pub use crate::export::{ExportFormat, ExportGate, ExportedFile};
    pub use crate::generator::{DEFAULT_PREVIEW_BUCKETS, TrackGenerator};
    pub use crate::models::{ElevatedPoint, SimulatedSample, TimestampedSample, TrackPoint};
    pub use crate::route::WaypointInterpolator;
    pub use crate::simulate::PerformanceSimulator;
    pub use crate::timeline::TimestampSequencer;
}
