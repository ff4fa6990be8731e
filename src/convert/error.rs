//! Typed configuration errors for the converter.

/// Errors produced when building a [`crate::convert::Converter`] or when a
/// conversion call is handed a target it cannot satisfy.
///
/// All of these are caller mistakes surfaced as values; the pipeline itself
/// has no transient failure modes.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("output aspect ratio must be a finite value > 0, got {0}")]
    InvalidAspectRatio(f64),

    #[error("{name} threshold must be >= 0, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("buffer size hint must be >= 0, got {0}")]
    InvalidBufferHint(f64),

    #[error(
        "target {target_width}x{target_height} at aspect ratio {aspect_ratio} \
         produces a zero-size output grid"
    )]
    DegenerateTarget {
        target_width: u32,
        target_height: u32,
        aspect_ratio: f64,
    },

    #[error("unknown scale mode '{0}' (expected 'respect-aspect-ratio' or 'ignore-aspect-ratio')")]
    UnknownScaleMode(String),

    #[error("unknown color space '{0}' (expected 'none', '3bit', '4bit', '8bit' or '24bit')")]
    UnknownColorSpace(String),
}
