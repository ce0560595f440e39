//! Example: Generate a hilly 8 km run and export it as GPX and TCX.
//!
//! Run with:
//! ```
//! cargo run --example export_activity
//! ```

use rand::SeedableRng;
use rand::rngs::StdRng;
use time::macros::time;
use trackforge::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // No drawn route: the generator falls back to a closed loop of the
    // requested distance. Distance and pace drive the derived total time.
    let base = ActivityConfig {
        name: "Sunday Long Run".to_string(),
        start_time: time!(09:15),
        avg_pace_sec_per_km: 330.0,
        inconsistency_pct: 25.0,
        elevation_gain_m: 120.0,
        heart_rate: HeartRateConfig {
            enabled: true,
            avg_bpm: 152.0,
            variability_pct: 12.0,
        },
        ..Default::default()
    };
    let config = derive_fields(&base, ConfigPatch::distance(8.0));

    let generator = TrackGenerator::new();
    let mut rng = StdRng::seed_from_u64(42);

    let track = generator.generate(&config, &mut rng)?;
    let gain = elevation_gain(
        &track
            .iter()
            .map(|s| s.sample.point)
            .collect::<Vec<_>>(),
    );
    tracing::info!(points = track.len(), realized_gain_m = gain.round(), "generated track");

    for format in [ExportFormat::Gpx, ExportFormat::Tcx] {
        let file = generator.export(&config, format, &mut rng)?;
        std::fs::write(&file.file_name, &file.contents)?;
        tracing::info!("wrote {}", file.file_name);
    }

    Ok(())
}
