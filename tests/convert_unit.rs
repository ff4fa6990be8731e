//! Unit tests for the conversion pipeline stages.
//!
//! These tests exercise the public API of each stage:
//! - Downscaling dimension rules
//! - Luminosity extraction
//! - Sobel gradient field
//! - Glyph selection
//! - Color quantization

use termsketch::convert::*;

fn solid(width: u32, height: u32, px: Rgba) -> PixelBuffer {
    PixelBuffer::filled(width, height, px)
}

fn from_lums(width: u32, height: u32, lums: &[u8]) -> PixelBuffer {
    let pixels = lums.iter().map(|&v| Rgba::opaque(v, v, v)).collect();
    PixelBuffer::from_pixels(width, height, pixels)
}

// ==================== Downscaling Tests ====================

#[test]
fn test_downscale_respect_ratio_two_halves_height() {
    // For any target width W at ratio 2, the output is W x floor(W/2).
    let src = solid(400, 400, Rgba::opaque(9, 9, 9));
    for w in [10u32, 33, 100, 151] {
        let (scaled, _) = downscale(&src, w, 999, ScaleMode::RespectAspectRatio, 2.0).unwrap();
        assert_eq!(scaled.width(), w);
        assert_eq!(scaled.height(), w / 2);
        assert!(scaled.width() <= 400 && scaled.height() <= 400);
    }
}

#[test]
fn test_downscale_never_upscales_any_mode() {
    let src = solid(16, 12, Rgba::opaque(9, 9, 9));
    for mode in [ScaleMode::RespectAspectRatio, ScaleMode::IgnoreAspectRatio] {
        let (scaled, _) = downscale(&src, 500, 500, mode, 2.0).unwrap();
        assert!(scaled.width() <= 16, "{:?} upscaled width", mode);
        assert!(scaled.height() <= 12, "{:?} upscaled height", mode);
    }
}

#[test]
fn test_downscale_reports_effective_ratio() {
    let src = solid(300, 300, Rgba::opaque(9, 9, 9));
    // 99 / 3.0 = 33 exactly; effective matches the request.
    let (scaled, effective) = downscale(&src, 99, 99, ScaleMode::RespectAspectRatio, 3.0).unwrap();
    assert_eq!((scaled.width(), scaled.height()), (99, 33));
    assert_eq!(effective, 3.0);

    // 100 / 3.0 floors to 33; the effective ratio drifts above the request.
    let (scaled, effective) =
        downscale(&src, 100, 100, ScaleMode::RespectAspectRatio, 3.0).unwrap();
    assert_eq!((scaled.width(), scaled.height()), (100, 33));
    assert_eq!(effective, 100.0 / 33.0);
}

// ==================== Luminosity Tests ====================

#[test]
fn test_luminosity_grid_matches_formula() {
    let buf = PixelBuffer::from_pixels(
        3,
        1,
        vec![
            Rgba::opaque(255, 0, 0),
            Rgba::opaque(0, 255, 0),
            Rgba::opaque(0, 0, 255),
        ],
    );
    let grid = LuminosityGrid::from_source(&buf);
    assert_eq!(grid.get(0, 0), 54); // 255 * 2126 / 10000
    assert_eq!(grid.get(1, 0), 182); // 255 * 7152 / 10000
    assert_eq!(grid.get(2, 0), 18); // 255 * 722 / 10000
}

#[test]
fn test_luminosity_defined_for_all_channel_extremes() {
    // The u8 return type bounds the result; this sweep checks the integer
    // math never overflows on the way there (debug builds would panic).
    for r in [0u8, 255] {
        for g in [0u8, 255] {
            for b in [0u8, 255] {
                for a in [0u8, 1, 128, 255] {
                    let lum = luminosity(r, g, b, a);
                    if a == 0 {
                        assert_eq!(lum, 0);
                    }
                    if a == 255 && (r, g, b) == (255, 255, 255) {
                        assert_eq!(lum, 255);
                    }
                }
            }
        }
    }
}

#[test]
fn test_luminosity_perceptual_ordering() {
    let g = luminosity(0, 255, 0, 255);
    let r = luminosity(255, 0, 0, 255);
    let b = luminosity(0, 0, 255, 255);
    assert!(g > r, "green ({}) should outweigh red ({})", g, r);
    assert!(r > b, "red ({}) should outweigh blue ({})", r, b);
}

// ==================== Sobel Field Tests ====================

#[test]
fn test_sobel_dx_zero_gives_signed_infinity() {
    // Horizontal bands: gradient is purely vertical, so dx = 0.
    #[rustfmt::skip]
    let bright_below = from_lums(3, 3, &[
        0, 0, 0,
        128, 128, 128,
        255, 255, 255,
    ]);
    let grid = LuminosityGrid::from_source(&bright_below);
    let field = SobelField::build(&grid, 1.0);
    let center = 4usize;
    assert_eq!(field.grad_at(center), f64::INFINITY);

    #[rustfmt::skip]
    let bright_above = from_lums(3, 3, &[
        255, 255, 255,
        128, 128, 128,
        0, 0, 0,
    ]);
    let grid = LuminosityGrid::from_source(&bright_above);
    let field = SobelField::build(&grid, 1.0);
    assert_eq!(field.grad_at(center), f64::NEG_INFINITY);
}

#[test]
fn test_sobel_one_by_one_grid_is_defined() {
    let grid = LuminosityGrid::from_source(&solid(1, 1, Rgba::opaque(77, 77, 77)));
    let field = SobelField::build(&grid, 2.0);
    assert_eq!(field.mag2_at(0), 0);
    assert_eq!(field.laplacian_at(0), 0.0);
    assert!(!field.grad_at(0).is_nan());
}

#[test]
fn test_sobel_two_by_two_checkerboard_is_all_edges() {
    // No interior exists; every pixel must classify through the
    // replicate-border path.
    #[rustfmt::skip]
    let board = from_lums(2, 2, &[
        0, 255,
        255, 0,
    ]);
    let grid = LuminosityGrid::from_source(&board);
    let field = SobelField::build(&grid, 1.0);
    for idx in 0..4 {
        assert!(
            field.is_edge(idx, 1.0, f64::INFINITY),
            "pixel {} did not classify as an edge",
            idx
        );
    }
}

// ==================== Glyph Selection Tests ====================

#[test]
fn test_ramp_covers_full_luminosity_range() {
    assert_eq!(ramp_glyph(0), *LUMINOSITY_RAMP.last().unwrap());
    assert_eq!(ramp_glyph(255), LUMINOSITY_RAMP[0]);
    // Mid grey lands strictly inside the ramp.
    let mid = ramp_glyph(128);
    assert!(mid != LUMINOSITY_RAMP[0] && mid != *LUMINOSITY_RAMP.last().unwrap());
}

#[test]
fn test_edge_glyph_map_is_total_over_the_real_line() {
    let map = EdgeGlyphMap::new(2.0);
    for grad in [
        f64::NEG_INFINITY,
        -1e12,
        -3.7,
        -1.0,
        0.0,
        0.4,
        2.0,
        1e12,
        f64::INFINITY,
    ] {
        let glyph = map.glyph(grad);
        assert!(
            ['-', '\\', '|', '/'].contains(&glyph),
            "gradient {} mapped to {:?}",
            grad,
            glyph
        );
    }
}

// ==================== Color Quantizer Tests ====================

#[test]
fn test_three_bit_red_code_and_escape() {
    let q = ColorQuantizer::ThreeBit(ThreeBitOptions::default());
    let px = Rgba::opaque(255, 0, 0);
    let lum = luminosity(255, 0, 0, 255);
    assert_eq!(q.code(px, lum), 31);
    assert_eq!(q.escape(31), "\x1b[31m");
}

#[test]
fn test_true_color_code_and_escape() {
    let q = ColorQuantizer::TrueColor;
    let px = Rgba::opaque(10, 20, 30);
    let code = q.code(px, luminosity(10, 20, 30, 255));
    assert_eq!(code, (10 << 16) | (20 << 8) | 30);
    assert_eq!(q.escape(code), "\x1b[38;2;10;20;30m");
}

#[test]
fn test_quantizer_code_escape_pairs_stable() {
    let px = Rgba::opaque(200, 40, 90);
    let lum = luminosity(200, 40, 90, 255);
    for q in [
        ColorQuantizer::ThreeBit(ThreeBitOptions::default()),
        ColorQuantizer::FourBit(FourBitOptions::default()),
        ColorQuantizer::EightBit,
        ColorQuantizer::TrueColor,
    ] {
        let first = q.code(px, lum);
        let second = q.code(px, lum);
        assert_eq!(first, second);
        assert_eq!(q.escape(first), q.escape(second));
    }
}
