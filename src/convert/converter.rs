//! The conversion configuration and entry point.

use super::color::ColorQuantizer;
use super::downscale::{downscale, ScaleMode};
use super::error::ConfigError;
use super::glyph::EdgeGlyphMap;
use super::luminosity::LuminosityGrid;
use super::render::{render, EdgePlan, RenderPlan};
use super::sobel::SobelField;
use super::source::PixelSource;

/// Default estimated output bytes per character.
pub const DEFAULT_BYTES_PER_CHAR: f64 = 3.5;
/// Default squared-magnitude edge threshold (before aspect² scaling).
pub const DEFAULT_MAGNITUDE_THRESHOLD: f64 = 80_000.0;
/// Default Laplacian noise-rejection threshold.
pub const DEFAULT_LAPLACIAN_THRESHOLD: f64 = 300.0;

/// Everything a [`Converter`] can be configured with.
///
/// Collect the settings, then validate them once with [`Converter::new`].
#[derive(Debug, Clone)]
pub struct ConverterOptions {
    /// Output width:height ratio compensating for terminal character cells;
    /// the common 1:2 character cell wants the default 2.0.
    pub aspect_ratio: f64,
    pub scale_mode: ScaleMode,
    /// Render gradient strokes where the Sobel field finds edges.
    pub edge_detection: bool,
    /// Render edge-classified runs bold. Only has an effect together with
    /// `edge_detection`.
    pub bold_outline: bool,
    /// Squared-magnitude threshold for edge classification, before the
    /// aspect² scaling applied per conversion. 50,000-120,000 works well.
    pub magnitude_threshold: f64,
    /// Upper bound on |Laplacian| for edge classification. 100-400 works
    /// well.
    pub laplacian_threshold: f64,
    pub color: Option<ColorQuantizer>,
    /// Output-buffer estimate, bytes per plain character.
    pub bytes_per_char: f64,
    /// Output-buffer estimate, extra bytes per character for color escapes.
    /// Defaults to the selected quantizer's own hint.
    pub color_bytes_per_char: Option<f64>,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        ConverterOptions {
            aspect_ratio: 2.0,
            scale_mode: ScaleMode::RespectAspectRatio,
            edge_detection: false,
            bold_outline: false,
            magnitude_threshold: DEFAULT_MAGNITUDE_THRESHOLD,
            laplacian_threshold: DEFAULT_LAPLACIAN_THRESHOLD,
            color: None,
            bytes_per_char: DEFAULT_BYTES_PER_CHAR,
            color_bytes_per_char: None,
        }
    }
}

/// A validated, immutable conversion configuration.
///
/// Build once, then call [`convert`](Converter::convert) any number of
/// times; the converter holds no per-call state, so one instance can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct Converter {
    opts: ConverterOptions,
}

impl Converter {
    /// Validate `opts` and build a converter.
    ///
    /// Fails fast on out-of-range settings instead of producing degenerate
    /// output later: the aspect ratio must be finite and positive, thresholds
    /// and byte hints non-negative.
    pub fn new(opts: ConverterOptions) -> Result<Self, ConfigError> {
        if !(opts.aspect_ratio > 0.0) || !opts.aspect_ratio.is_finite() {
            return Err(ConfigError::InvalidAspectRatio(opts.aspect_ratio));
        }
        if !(opts.magnitude_threshold >= 0.0) {
            return Err(ConfigError::InvalidThreshold {
                name: "magnitude",
                value: opts.magnitude_threshold,
            });
        }
        if !(opts.laplacian_threshold >= 0.0) {
            return Err(ConfigError::InvalidThreshold {
                name: "laplacian",
                value: opts.laplacian_threshold,
            });
        }
        if !(opts.bytes_per_char >= 0.0) {
            return Err(ConfigError::InvalidBufferHint(opts.bytes_per_char));
        }
        if let Some(extra) = opts.color_bytes_per_char {
            if !(extra >= 0.0) {
                return Err(ConfigError::InvalidBufferHint(extra));
            }
        }
        Ok(Converter { opts })
    }

    /// Convert with default options (aspect ratio 2, no edges, no color).
    pub fn default_converter() -> Self {
        Converter {
            opts: ConverterOptions::default(),
        }
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.opts
    }

    /// Convert `src` into terminal text on a grid of roughly
    /// `target_width x target_height` characters.
    ///
    /// Deterministic: the same source, targets and configuration always
    /// produce byte-identical output. Fails only on a degenerate computed
    /// output size.
    pub fn convert<S: PixelSource>(
        &self,
        src: &S,
        target_width: u32,
        target_height: u32,
    ) -> Result<String, ConfigError> {
        let opts = &self.opts;
        let (scaled, effective_ratio) = downscale(
            src,
            target_width,
            target_height,
            opts.scale_mode,
            opts.aspect_ratio,
        )?;
        let lum = LuminosityGrid::from_source(&scaled);

        let color_bytes = opts.color_bytes_per_char.unwrap_or_else(|| {
            opts.color.map_or(0.0, |q| q.bytes_per_char_hint())
        });

        if opts.edge_detection {
            let field = SobelField::build(&lum, effective_ratio);
            let glyphs = EdgeGlyphMap::new(effective_ratio);
            Ok(render(RenderPlan {
                src: &scaled,
                lum: &lum,
                edges: Some(EdgePlan {
                    field: &field,
                    glyphs: &glyphs,
                    mag2_threshold: opts.magnitude_threshold
                        * effective_ratio
                        * effective_ratio,
                    laplacian_threshold: opts.laplacian_threshold,
                }),
                color: opts.color.as_ref(),
                bold_outline: opts.bold_outline,
                bytes_per_char: opts.bytes_per_char,
                color_bytes_per_char: color_bytes,
            }))
        } else {
            Ok(render(RenderPlan {
                src: &scaled,
                lum: &lum,
                edges: None,
                color: opts.color.as_ref(),
                bold_outline: opts.bold_outline,
                bytes_per_char: opts.bytes_per_char,
                color_bytes_per_char: color_bytes,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_aspect_ratio() {
        for ratio in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let opts = ConverterOptions {
                aspect_ratio: ratio,
                ..ConverterOptions::default()
            };
            assert!(
                matches!(Converter::new(opts), Err(ConfigError::InvalidAspectRatio(_))),
                "ratio {} accepted",
                ratio
            );
        }
    }

    #[test]
    fn test_rejects_negative_thresholds() {
        let opts = ConverterOptions {
            magnitude_threshold: -1.0,
            ..ConverterOptions::default()
        };
        assert!(matches!(
            Converter::new(opts),
            Err(ConfigError::InvalidThreshold { name: "magnitude", .. })
        ));

        let opts = ConverterOptions {
            laplacian_threshold: f64::NAN,
            ..ConverterOptions::default()
        };
        assert!(matches!(
            Converter::new(opts),
            Err(ConfigError::InvalidThreshold { name: "laplacian", .. })
        ));
    }

    #[test]
    fn test_accepts_defaults() {
        assert!(Converter::new(ConverterOptions::default()).is_ok());
    }
}
