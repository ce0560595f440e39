//! GPX 1.1 serialization.

use time::format_description::well_known::Rfc3339;

use crate::config::ActivityConfig;
use crate::export::xml::XmlElement;
use crate::models::TimestampedSample;

const GPX_NS: &str = "http://www.topografix.com/GPX/1/1";
const GPX_TPX_NS: &str = "http://www.garmin.com/xmlschemas/TrackPointExtension/v1";

/// Renders a timestamped sample sequence as a GPX 1.1 document.
///
/// One `<trkpt>` per sample with coordinates at 6 decimals, elevation at 1
/// decimal and an RFC 3339 `<time>`. Heart rate goes into the Garmin
/// TrackPointExtension, emitted only for samples that carry a value.
pub fn write_gpx(config: &ActivityConfig, samples: &[TimestampedSample]) -> String {
    let start_time = rfc3339(config.start_datetime());

    let mut trkseg = XmlElement::new("trkseg");
    for sample in samples {
        let mut trkpt = XmlElement::new("trkpt")
            .attr("lat", format!("{:.6}", sample.lat()))
            .attr("lon", format!("{:.6}", sample.lon()))
            .child(XmlElement::new("ele").text(format!("{:.1}", sample.elevation_m())))
            .child(XmlElement::new("time").text(rfc3339(sample.timestamp)));

        if let Some(bpm) = sample.sample.heart_rate_bpm {
            trkpt = trkpt.child(
                XmlElement::new("extensions").child(
                    XmlElement::new("gpxtpx:TrackPointExtension")
                        .child(XmlElement::new("gpxtpx:hr").text(bpm.to_string())),
                ),
            );
        }

        trkseg.push(trkpt);
    }

    XmlElement::new("gpx")
        .attr("version", "1.1")
        .attr("creator", "trackforge")
        .attr("xmlns", GPX_NS)
        .attr("xmlns:gpxtpx", GPX_TPX_NS)
        .child(
            XmlElement::new("metadata")
                .child(XmlElement::new("name").text(config.name.clone()))
                .child(XmlElement::new("time").text(start_time)),
        )
        .child(
            XmlElement::new("trk")
                .child(XmlElement::new("name").text(config.name.clone()))
                .child(trkseg),
        )
        .to_document()
}

fn rfc3339(timestamp: time::OffsetDateTime) -> String {
    timestamp.format(&Rfc3339).unwrap_or_default()
}
