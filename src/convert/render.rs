//! Streaming text assembly for the converted grid.

use super::color::ColorQuantizer;
use super::glyph::{ramp_glyph, EdgeGlyphMap};
use super::luminosity::LuminosityGrid;
use super::sobel::SobelField;
use super::source::PixelSource;

/// Full SGR reset.
pub const RESET: &str = "\x1b[0m";
const BOLD_ON: &str = "\x1b[1m";
const BOLD_OFF: &str = "\x1b[22m";

/// Edge-rendering inputs for [`render`]: the gradient field plus the
/// thresholds and stroke glyphs derived from the effective aspect ratio.
pub struct EdgePlan<'a> {
    pub field: &'a SobelField,
    pub glyphs: &'a EdgeGlyphMap,
    /// Magnitude-squared threshold, already scaled by aspect-ratio².
    pub mag2_threshold: f64,
    pub laplacian_threshold: f64,
}

/// Inputs for one render pass over a converted grid.
pub struct RenderPlan<'a, S: PixelSource> {
    /// Downscaled pixels, queried only when color is enabled.
    pub src: &'a S,
    pub lum: &'a LuminosityGrid,
    pub edges: Option<EdgePlan<'a>>,
    pub color: Option<&'a ColorQuantizer>,
    pub bold_outline: bool,
    /// Estimated output bytes per plain character.
    pub bytes_per_char: f64,
    /// Extra estimated bytes per character for color escapes.
    pub color_bytes_per_char: f64,
}

/// Compose the final text for a converted grid.
///
/// Scans row-major tracking the previous color code and bold state: a color
/// escape is emitted only when the code changes, bold on/off only when the
/// edge classification flips (and only if the bold outline is enabled). Each
/// row ends in exactly one newline and the row count equals the grid height.
/// When any escapes can be emitted the whole output is wrapped in a leading
/// and trailing full reset.
///
/// The output buffer is pre-sized from the byte hints; a low estimate just
/// means the `String` grows normally.
pub fn render<S: PixelSource>(plan: RenderPlan<'_, S>) -> String {
    let width = plan.lum.width();
    let height = plan.lum.height();

    let color_extra = if plan.color.is_some() {
        plan.color_bytes_per_char
    } else {
        0.0
    };
    let estimate = ((plan.bytes_per_char + color_extra) * (width + 1) as f64 * height as f64)
        as usize
        + 2 * RESET.len();
    let mut out = String::with_capacity(estimate);

    // Escapes are only ever produced by color or by the bold outline, which
    // itself needs edge classification to toggle on.
    let wrap = plan.color.is_some() || (plan.bold_outline && plan.edges.is_some());
    if wrap {
        out.push_str(RESET);
    }

    let mut prev_code: Option<u32> = None;
    let mut bold_on = false;

    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            let lum = plan.lum.get_at(idx);

            let edge_glyph = plan.edges.as_ref().and_then(|e| {
                e.field
                    .is_edge(idx, e.mag2_threshold, e.laplacian_threshold)
                    .then(|| e.glyphs.glyph(e.field.grad_at(idx)))
            });

            if plan.bold_outline && plan.edges.is_some() {
                if edge_glyph.is_some() && !bold_on {
                    out.push_str(BOLD_ON);
                    bold_on = true;
                } else if edge_glyph.is_none() && bold_on {
                    out.push_str(BOLD_OFF);
                    bold_on = false;
                }
            }

            if let Some(quantizer) = plan.color {
                let code = quantizer.code(plan.src.rgba(x, y), lum);
                if prev_code != Some(code) {
                    quantizer.push_escape(code, &mut out);
                    prev_code = Some(code);
                }
            }

            out.push(edge_glyph.unwrap_or_else(|| ramp_glyph(lum)));
        }
        out.push('\n');
    }

    if wrap {
        out.push_str(RESET);
    }

    out
}
