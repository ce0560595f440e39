//! Track serialization into activity-exchange formats.
//!
//! Both serializers consume the same [`TimestampedSample`] sequence the
//! simulator produced, so the downloaded file always matches the preview.
//!
//! [`TimestampedSample`]: crate::models::TimestampedSample

mod gpx;
mod tcx;
mod xml;

pub use gpx::write_gpx;
pub use tcx::write_tcx;
pub use xml::XmlElement;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Gpx,
    Tcx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Gpx => "gpx",
            ExportFormat::Tcx => "tcx",
        }
    }
}

/// A rendered export, ready to hand to the caller for download.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub file_name: String,
    pub contents: String,
}

/// Builds the download file name: whitespace runs in the activity name
/// collapse to single underscores, plus the format extension.
pub fn file_name(activity_name: &str, format: ExportFormat) -> String {
    let stem = activity_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    let stem = if stem.is_empty() { "activity" } else { &stem };
    format!("{stem}.{}", format.extension())
}

/// Permission gate consulted before an export is produced.
///
/// The caller owns whatever backs it (the original app consumes a paid
/// token per download); the generator only asks for a yes/no.
pub trait ExportGate {
    /// Returns `true` if one export may proceed, consuming whatever budget
    /// backs the gate.
    fn try_consume(&mut self) -> bool;
}

impl<F: FnMut() -> bool> ExportGate for F {
    fn try_consume(&mut self) -> bool {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_collapses_whitespace() {
        assert_eq!(file_name("Morning Run", ExportFormat::Gpx), "Morning_Run.gpx");
        assert_eq!(
            file_name("Long  Tempo \t Effort", ExportFormat::Tcx),
            "Long_Tempo_Effort.tcx"
        );
    }

    #[test]
    fn test_file_name_empty_falls_back() {
        assert_eq!(file_name("", ExportFormat::Gpx), "activity.gpx");
        assert_eq!(file_name("   ", ExportFormat::Tcx), "activity.tcx");
    }

    #[test]
    fn test_closure_export_gate() {
        let mut remaining = 1;
        let mut gate = || {
            if remaining > 0 {
                remaining -= 1;
                true
            } else {
                false
            }
        };
        assert!(gate.try_consume());
        assert!(!gate.try_consume());
    }
}
