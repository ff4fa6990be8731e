//! Per-pixel luminosity extraction.

use super::source::PixelSource;

/// Row-major grid of luminosity values (0-255), one per pixel.
///
/// Built once per conversion call from the downscaled image and treated as
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct LuminosityGrid {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

/// Luminosity of one pixel using relative-luminance weights
/// (R*2126 + G*7152 + B*722) / 10000, scaled by alpha/255.
///
/// Integer math throughout; the truncating divisions are what fix the exact
/// glyph each pixel maps to, so the order of operations here must not change.
#[inline]
pub fn luminosity(r: u8, g: u8, b: u8, a: u8) -> u8 {
    let weighted = (r as u32 * 2126 + g as u32 * 7152 + b as u32 * 722) / 10000;
    (weighted * a as u32 / 255) as u8
}

impl LuminosityGrid {
    /// Compute the luminosity grid for every pixel of `src`.
    pub fn from_source<S: PixelSource>(src: &S) -> Self {
        let width = src.width();
        let height = src.height();
        let mut data = Vec::with_capacity((width as usize) * (height as usize));

        for y in 0..height {
            for x in 0..width {
                let px = src.rgba(x, y);
                data.push(luminosity(px.r, px.g, px.b, px.a));
            }
        }

        LuminosityGrid {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Luminosity at a valid coordinate.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[(y * self.width + x) as usize]
    }

    /// Luminosity at a coordinate that may lie outside the grid; out-of-range
    /// coordinates are clamped to the nearest edge pixel (replicate border).
    #[inline]
    pub fn get_clamped(&self, x: i64, y: i64) -> u8 {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.get(cx, cy)
    }

    /// Luminosity by flat row-major index.
    #[inline]
    pub fn get_at(&self, idx: usize) -> u8 {
        self.data[idx]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
