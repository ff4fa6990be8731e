//! Sobel gradient field over a luminosity grid.
//!
//! The Sobel kernels used are:
//! ```text
//! Gx:          Gy:
//! [-1  0  1]   [-1 -2 -1]
//! [-2  0  2]   [ 0  0  0]
//! [-1  0  1]   [ 1  2  1]
//! ```
//!
//! Magnitude is kept squared (gx² + gy²) so the per-pixel loop never takes a
//! square root; edge thresholds are pre-scaled by aspect-ratio² to match.
//! A 5-point Laplacian with an inverse-aspect-weighted vertical arm is
//! computed alongside and used to reject high-curvature noise from edge
//! classification.

use super::luminosity::LuminosityGrid;

/// Per-pixel gradient data derived from a [`LuminosityGrid`].
///
/// Three parallel row-major arrays with the same indexing as the grid they
/// were built from. Read-only once built.
#[derive(Debug, Clone)]
pub struct SobelField {
    grad: Vec<f64>,
    mag2: Vec<i32>,
    laplacian: Vec<f64>,
    width: u32,
    height: u32,
}

/// Gradient ratio dy/dx. A vertical-only gradient (dx = 0) is signed
/// infinity, +∞ when dy > 0 and −∞ otherwise; never NaN.
#[inline]
fn gradient_ratio(gx: i32, gy: i32) -> f64 {
    if gx == 0 {
        if gy > 0 {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        }
    } else {
        gy as f64 / gx as f64
    }
}

impl SobelField {
    /// Compute gradients for every pixel of `grid`.
    ///
    /// `effective_ratio` is the effective output aspect ratio reported by the
    /// downscaler; it weights the Laplacian's vertical arm to compensate for
    /// the non-square sampling grid.
    ///
    /// Interior pixels use direct 8-neighborhood indexing. Border pixels take
    /// the replicate-border path where out-of-range neighbors clamp to the
    /// nearest edge coordinate, so every pixel gets a defined value even on
    /// 1x1 or 2x2 grids with no interior.
    pub fn build(grid: &LuminosityGrid, effective_ratio: f64) -> Self {
        let width = grid.width();
        let height = grid.height();
        let len = (width as usize) * (height as usize);

        let mut field = SobelField {
            grad: vec![0.0; len],
            mag2: vec![0; len],
            laplacian: vec![0.0; len],
            width,
            height,
        };
        let inv_ratio = 1.0 / effective_ratio;

        // Interior pixels, 3x3 kernel applied directly.
        for y in 1..height.saturating_sub(1) {
            for x in 1..width.saturating_sub(1) {
                field.apply_interior(grid, inv_ratio, x, y);
            }
        }

        if height > 0 && width > 0 {
            // Top and bottom rows.
            for x in 0..width {
                field.apply_clamped(grid, inv_ratio, x, 0);
                field.apply_clamped(grid, inv_ratio, x, height - 1);
            }
            // Left and right columns, corners already covered above.
            for y in 1..height.saturating_sub(1) {
                field.apply_clamped(grid, inv_ratio, 0, y);
                field.apply_clamped(grid, inv_ratio, width - 1, y);
            }
        }

        field
    }

    fn apply_interior(&mut self, grid: &LuminosityGrid, inv_ratio: f64, x: u32, y: u32) {
        let l = |dx: u32, dy: u32| grid.get(x + dx - 1, y + dy - 1) as i32;

        let gx = -l(0, 0) + l(2, 0) - 2 * l(0, 1) + 2 * l(2, 1) - l(0, 2) + l(2, 2);
        let gy = -l(0, 0) - 2 * l(1, 0) - l(2, 0) + l(0, 2) + 2 * l(1, 2) + l(2, 2);

        let center = l(1, 1) as f64;
        let lap = (l(0, 1) + l(2, 1)) as f64 - 2.0 * center
            + ((l(1, 0) + l(1, 2)) as f64 - 2.0 * center) * inv_ratio;

        self.store(x, y, gx, gy, lap);
    }

    fn apply_clamped(&mut self, grid: &LuminosityGrid, inv_ratio: f64, x: u32, y: u32) {
        let l = |dx: i64, dy: i64| grid.get_clamped(x as i64 + dx, y as i64 + dy) as i32;

        let gx = -l(-1, -1) + l(1, -1) - 2 * l(-1, 0) + 2 * l(1, 0) - l(-1, 1) + l(1, 1);
        let gy = -l(-1, -1) - 2 * l(0, -1) - l(1, -1) + l(-1, 1) + 2 * l(0, 1) + l(1, 1);

        let center = l(0, 0) as f64;
        let lap = (l(-1, 0) + l(1, 0)) as f64 - 2.0 * center
            + ((l(0, -1) + l(0, 1)) as f64 - 2.0 * center) * inv_ratio;

        self.store(x, y, gx, gy, lap);
    }

    #[inline]
    fn store(&mut self, x: u32, y: u32, gx: i32, gy: i32, lap: f64) {
        let idx = (y * self.width + x) as usize;
        self.mag2[idx] = gx * gx + gy * gy;
        self.grad[idx] = gradient_ratio(gx, gy);
        self.laplacian[idx] = lap;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Gradient ratio dy/dx by flat row-major index.
    #[inline]
    pub fn grad_at(&self, idx: usize) -> f64 {
        self.grad[idx]
    }

    /// Squared gradient magnitude by flat row-major index.
    #[inline]
    pub fn mag2_at(&self, idx: usize) -> i32 {
        self.mag2[idx]
    }

    /// Laplacian by flat row-major index.
    #[inline]
    pub fn laplacian_at(&self, idx: usize) -> f64 {
        self.laplacian[idx]
    }

    /// Whether the pixel at `idx` classifies as an edge.
    ///
    /// True iff the squared magnitude reaches `mag2_threshold` (already
    /// aspect²-scaled by the caller) and the Laplacian magnitude stays within
    /// `laplacian_threshold`.
    #[inline]
    pub fn is_edge(&self, idx: usize, mag2_threshold: f64, laplacian_threshold: f64) -> bool {
        self.mag2[idx] as f64 >= mag2_threshold && self.laplacian[idx].abs() <= laplacian_threshold
    }
}
