//! TCX v2 (Training Center XML) serialization.

use time::format_description::well_known::Rfc3339;

use crate::config::ActivityConfig;
use crate::export::xml::XmlElement;
use crate::models::TimestampedSample;

const TCX_NS: &str = "http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2";

/// Renders a timestamped sample sequence as a TCX v2 document.
///
/// A single `<Activity>` with one `<Lap>` carrying the requested totals and
/// a `<Track>` of trackpoints with position, altitude, cumulative distance
/// and optional heart rate.
pub fn write_tcx(config: &ActivityConfig, samples: &[TimestampedSample]) -> String {
    let start_time = rfc3339(config.start_datetime());
    let total_distance_m = config.distance_km * 1000.0;
    let distance_step_m = if samples.is_empty() {
        0.0
    } else {
        total_distance_m / samples.len() as f64
    };

    let mut track = XmlElement::new("Track");
    let mut cumulative_m = 0.0;
    for sample in samples {
        cumulative_m += distance_step_m;

        let mut trackpoint = XmlElement::new("Trackpoint")
            .child(XmlElement::new("Time").text(rfc3339(sample.timestamp)))
            .child(
                XmlElement::new("Position")
                    .child(
                        XmlElement::new("LatitudeDegrees").text(format!("{:.6}", sample.lat())),
                    )
                    .child(
                        XmlElement::new("LongitudeDegrees").text(format!("{:.6}", sample.lon())),
                    ),
            )
            .child(XmlElement::new("AltitudeMeters").text(format!("{:.1}", sample.elevation_m())))
            .child(XmlElement::new("DistanceMeters").text(format!("{cumulative_m:.2}")));

        if let Some(bpm) = sample.sample.heart_rate_bpm {
            trackpoint = trackpoint.child(
                XmlElement::new("HeartRateBpm")
                    .child(XmlElement::new("Value").text(bpm.to_string())),
            );
        }

        track.push(trackpoint);
    }

    let lap = XmlElement::new("Lap")
        .attr("StartTime", start_time.clone())
        .child(XmlElement::new("TotalTimeSeconds").text(format!("{}", config.target_time_sec)))
        .child(XmlElement::new("DistanceMeters").text(format!("{total_distance_m}")))
        .child(XmlElement::new("Calories").text("0"))
        .child(XmlElement::new("Intensity").text("Active"))
        .child(XmlElement::new("TriggerMethod").text("Manual"))
        .child(track);

    XmlElement::new("TrainingCenterDatabase")
        .attr("xmlns", TCX_NS)
        .child(
            XmlElement::new("Activities").child(
                XmlElement::new("Activity")
                    .attr("Sport", config.activity_type.tcx_sport())
                    .child(XmlElement::new("Id").text(start_time))
                    .child(lap),
            ),
        )
        .to_document()
}

fn rfc3339(timestamp: time::OffsetDateTime) -> String {
    timestamp.format(&Rfc3339).unwrap_or_default()
}
