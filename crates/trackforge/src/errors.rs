//! Error types for track generation.

use thiserror::Error;

/// Errors raised while generating or exporting an activity.
///
/// All variants are local to a single generation request; the caller decides
/// how to surface them.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Fewer than 2 route points and no distance to fall back on.
    #[error("route has fewer than 2 points and no fallback distance")]
    NoRoute,

    /// The activity config cannot produce a track (negative or non-finite
    /// numbers, inverted parameters).
    #[error("invalid activity config: {0}")]
    InvalidConfig(String),

    /// The export gate declined to authorize the export.
    #[error("export not permitted")]
    ExportDenied,
}
