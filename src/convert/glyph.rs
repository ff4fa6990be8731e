//! Luminosity and gradient glyph selection.

/// Density ramp used for non-edge pixels.
/// Glyphs ordered from densest (used for the brightest pixels) to lightest.
pub const LUMINOSITY_RAMP: &[char] = &['@', '#', '%', '*', '+', '=', '-', ':', '.', ' '];

/// Glyph for a luminosity value via the density ramp.
///
/// `index = floor(last - lum/255 * (len - 1))`: full brightness lands on the
/// densest glyph, black on the lightest. The float math and rounding order
/// fix the exact output characters and must stay as written.
#[inline]
pub fn ramp_glyph(lum: u8) -> char {
    let last = LUMINOSITY_RAMP.len() - 1;
    let idx = (last as f64 - lum as f64 / 255.0 * last as f64).floor() as usize;
    LUMINOSITY_RAMP[idx]
}

/// Gradient-stop table: ascending thresholds over the gradient ratio dy/dx,
/// each paired with the stroke glyph drawn for ratios at or below it. The
/// first stop covers everything down to −∞ and the final stop everything up
/// to +∞. Steep ratios (fast vertical change) draw horizontal strokes,
/// shallow ones vertical strokes, the bands between the diagonals.
const GRADIENT_STOPS: &[(f64, char)] = &[
    (-2.0, '-'),
    (-0.5, '\\'),
    (0.5, '|'),
    (2.0, '/'),
    (f64::INFINITY, '-'),
];

/// Slots per unit of gradient ratio in the dense lookup table.
const SLOTS_PER_UNIT: f64 = 64.0;
/// Half-width of the lookup domain in ratio units. Past the final finite
/// stop every slot holds the same glyph, so a tight bound is enough.
const DOMAIN_HALF_WIDTH: f64 = 4.0;

/// Maps a gradient ratio to a stroke glyph in O(1).
///
/// Built once per effective output aspect ratio, not per pixel: the ratio
/// rescales the gradient before lookup because vertical differences on a
/// non-square sampling grid span `ratio` times the true image distance.
#[derive(Debug, Clone)]
pub struct EdgeGlyphMap {
    table: Vec<char>,
    scale: f64,
    mid: usize,
}

impl EdgeGlyphMap {
    /// Precompute the dense lookup table for `effective_ratio`.
    ///
    /// Each slot covers `1/SLOTS_PER_UNIT` of ratio space; the build scans
    /// slots in ascending ratio order, consuming gradient stops as their
    /// thresholds are passed, and stores the active stop's glyph.
    pub fn new(effective_ratio: f64) -> Self {
        let mid = (DOMAIN_HALF_WIDTH * SLOTS_PER_UNIT) as usize;
        let len = mid * 2 + 1;

        let mut table = Vec::with_capacity(len);
        let mut stop = 0;
        for slot in 0..len {
            let ratio = (slot as f64 - mid as f64) / SLOTS_PER_UNIT;
            while stop + 1 < GRADIENT_STOPS.len() && ratio > GRADIENT_STOPS[stop].0 {
                stop += 1;
            }
            table.push(GRADIENT_STOPS[stop].1);
        }

        EdgeGlyphMap {
            table,
            scale: SLOTS_PER_UNIT / effective_ratio,
            mid,
        }
    }

    /// Stroke glyph for a pixel's gradient ratio.
    ///
    /// The ratio is scaled into slot space, offset to the domain midpoint and
    /// clamped; ±∞ land on the outermost slots.
    #[inline]
    pub fn glyph(&self, grad: f64) -> char {
        let slot = (grad * self.scale).round() + self.mid as f64;
        let idx = (slot.max(0.0) as usize).min(self.table.len() - 1);
        self.table[idx]
    }
}
