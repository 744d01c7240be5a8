//! Error taxonomy for world generation and rendering.

use thiserror::Error;

/// Errors that can abort a generation or rendering run.
///
/// Recoverable conditions (stuck river traces, empty city candidate sets,
/// a missing gradient-noise capability) are handled in place and logged;
/// they never surface through this type.
#[derive(Debug, Error)]
pub enum WorldGenError {
    /// Rejected configuration, raised before any grid is allocated.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A renderer was invoked without the capability it needs.
    #[error("missing capability `{capability}`: {hint}")]
    CapabilityMissing {
        capability: &'static str,
        hint: &'static str,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "raster")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
