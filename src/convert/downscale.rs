//! Nearest-neighbor downscaling to the output character grid.

use super::error::ConfigError;
use super::source::{PixelBuffer, PixelSource, Rgba};

/// How target dimensions are interpreted when downscaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    /// Fix one axis to its target and derive the other from the aspect
    /// ratio. The recommended mode.
    #[default]
    RespectAspectRatio,
    /// Use the target width and height directly; the caller accepts the
    /// resulting distortion.
    IgnoreAspectRatio,
}

impl ScaleMode {
    /// Parse a scale mode identifier as used by the CLI and config file.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s {
            "respect-aspect-ratio" | "respect" => Ok(ScaleMode::RespectAspectRatio),
            "ignore-aspect-ratio" | "ignore" => Ok(ScaleMode::IgnoreAspectRatio),
            other => Err(ConfigError::UnknownScaleMode(other.to_string())),
        }
    }
}

/// Downscaler output: either the untouched source (identity shortcut) or a
/// freshly resampled buffer.
#[derive(Debug)]
pub enum Scaled<'a, S: PixelSource> {
    Source(&'a S),
    Resampled(PixelBuffer),
}

impl<S: PixelSource> PixelSource for Scaled<'_, S> {
    fn width(&self) -> u32 {
        match self {
            Scaled::Source(s) => s.width(),
            Scaled::Resampled(b) => b.width(),
        }
    }

    fn height(&self) -> u32 {
        match self {
            Scaled::Source(s) => s.height(),
            Scaled::Resampled(b) => b.height(),
        }
    }

    fn rgba(&self, x: u32, y: u32) -> Rgba {
        match self {
            Scaled::Source(s) => s.rgba(x, y),
            Scaled::Resampled(b) => b.rgba(x, y),
        }
    }
}

/// Downscale `src` to the output character grid.
///
/// In [`ScaleMode::RespectAspectRatio`] the dominant axis is fixed to its
/// target (width when `ratio >= 1`, height otherwise) and the other axis is
/// derived from the ratio. In [`ScaleMode::IgnoreAspectRatio`] both targets
/// are used directly. Sampling is nearest-neighbor and the result never
/// exceeds the source in either axis.
///
/// Returns the scaled pixels together with the *effective* aspect ratio
/// (output width / output height). Integer rounding means it can differ
/// slightly from `ratio`; downstream gradient thresholds must be scaled by
/// the effective value, not the requested one.
///
/// A computed output dimension of zero is a configuration error.
pub fn downscale<S: PixelSource>(
    src: &S,
    target_width: u32,
    target_height: u32,
    mode: ScaleMode,
    ratio: f64,
) -> Result<(Scaled<'_, S>, f64), ConfigError> {
    // Identity shortcut: square cells in respect mode means the grid already
    // matches the source sampling.
    if mode == ScaleMode::RespectAspectRatio && ratio == 1.0 {
        return Ok((Scaled::Source(src), 1.0));
    }

    let src_w = src.width();
    let src_h = src.height();

    let (new_w, new_h) = match mode {
        ScaleMode::RespectAspectRatio => {
            if ratio >= 1.0 {
                let w = target_width.min(src_w);
                let h = ((w as f64 / ratio) as u32).min(src_h);
                (w, h)
            } else {
                let h = target_height.min(src_h);
                let w = ((h as f64 * ratio) as u32).min(src_w);
                (w, h)
            }
        }
        ScaleMode::IgnoreAspectRatio => (target_width.min(src_w), target_height.min(src_h)),
    };

    if new_w == 0 || new_h == 0 {
        return Err(ConfigError::DegenerateTarget {
            target_width,
            target_height,
            aspect_ratio: ratio,
        });
    }

    let effective = new_w as f64 / new_h as f64;
    log::debug!(
        "downscale {}x{} -> {}x{} (requested ratio {}, effective {:.3})",
        src_w,
        src_h,
        new_w,
        new_h,
        ratio,
        effective
    );

    let mut out = PixelBuffer::new(new_w, new_h);
    for y in 0..new_h {
        // Integer math keeps the sample coordinates exact.
        let src_y = (y as u64 * src_h as u64 / new_h as u64) as u32;
        for x in 0..new_w {
            let src_x = (x as u64 * src_w as u64 / new_w as u64) as u32;
            out.set(x, y, src.rgba(src_x, src_y));
        }
    }

    Ok((Scaled::Resampled(out), effective))
}
