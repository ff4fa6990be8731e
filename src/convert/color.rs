//! Terminal color quantization.
//!
//! Every quantizer maps a pixel to a stable integer code plus the ANSI
//! escape sequence selecting that color. Codes are what the renderer
//! compares to suppress redundant escapes, so two pixels that render the
//! same color always produce the same code.

use std::fmt::Write as _;

use super::source::Rgba;

/// Foreground escape sequences for the 8 base ANSI colors, indexed by
/// `code - 30`.
#[rustfmt::skip]
const BASE_ESCAPES: [&str; 8] = [
    "\x1b[30m", "\x1b[31m", "\x1b[32m", "\x1b[33m",
    "\x1b[34m", "\x1b[35m", "\x1b[36m", "\x1b[37m",
];

/// Foreground escape sequences for the 8 bright ANSI colors, indexed by
/// `code - 90`.
#[rustfmt::skip]
const BRIGHT_ESCAPES: [&str; 8] = [
    "\x1b[90m", "\x1b[91m", "\x1b[92m", "\x1b[93m",
    "\x1b[94m", "\x1b[95m", "\x1b[96m", "\x1b[97m",
];

/// Channel step values of the xterm 6x6x6 color cube.
const CUBE_STEPS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Saturation-compensation rules applied before channel thresholding in the
/// 3- and 4-bit quantizers.
///
/// When the spread between the strongest and weakest channel reaches
/// `min_range`, the dominant channel(s) get `dominant_bonus`; otherwise the
/// pixel is treated as washed out and every channel gets `flat_bonus`.
#[derive(Debug, Clone, Copy)]
pub struct RewardRules {
    pub min_range: u8,
    pub dominant_bonus: u8,
    pub flat_bonus: u8,
}

impl Default for RewardRules {
    fn default() -> Self {
        RewardRules {
            min_range: 64,
            dominant_bonus: 48,
            flat_bonus: 24,
        }
    }
}

/// Configuration for the 3-bit (8 color) quantizer.
#[derive(Debug, Clone, Copy)]
pub struct ThreeBitOptions {
    /// Luminosity at or below this short-circuits to black (code 30).
    pub black_lum_threshold: u8,
    /// Luminosity at or above this short-circuits to white (code 37).
    pub white_lum_threshold: u8,
    /// Per-channel on/off boundary after the reward step.
    pub channel_threshold: u8,
    pub reward: RewardRules,
}

impl Default for ThreeBitOptions {
    fn default() -> Self {
        ThreeBitOptions {
            black_lum_threshold: 30,
            white_lum_threshold: 230,
            channel_threshold: 128,
            reward: RewardRules::default(),
        }
    }
}

/// Configuration for the 4-bit (16 color) quantizer: the 3-bit rules plus a
/// luminosity gate above which the bright palette (codes 90-97) is used.
#[derive(Debug, Clone, Copy)]
pub struct FourBitOptions {
    pub base: ThreeBitOptions,
    pub bold_lum_threshold: u8,
}

impl Default for FourBitOptions {
    fn default() -> Self {
        FourBitOptions {
            base: ThreeBitOptions::default(),
            bold_lum_threshold: 160,
        }
    }
}

/// Color quantization strategy.
///
/// Built once as part of the conversion configuration; quantizing is a pure
/// function of the pixel and its luminosity.
#[derive(Debug, Clone, Copy)]
pub enum ColorQuantizer {
    /// 8 base ANSI colors (codes 30-37).
    ThreeBit(ThreeBitOptions),
    /// 16 ANSI colors: base palette plus the bright palette above a
    /// luminosity gate (codes 30-37 and 90-97).
    FourBit(FourBitOptions),
    /// xterm 256-color palette: 6x6x6 cube (16-231) and the 24-step
    /// greyscale ramp (232-255).
    EightBit,
    /// Direct 24-bit color; the code is the packed RGB value.
    TrueColor,
}

fn three_bit_code(opts: &ThreeBitOptions, px: Rgba, lum: u8) -> u32 {
    if lum <= opts.black_lum_threshold {
        return 30;
    }
    if lum >= opts.white_lum_threshold {
        return 37;
    }

    let (mut r, mut g, mut b) = (px.r, px.g, px.b);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max - min >= opts.reward.min_range {
        let bonus = opts.reward.dominant_bonus;
        if r == max {
            r = r.saturating_add(bonus);
        }
        if g == max {
            g = g.saturating_add(bonus);
        }
        if b == max {
            b = b.saturating_add(bonus);
        }
    } else {
        r = r.saturating_add(opts.reward.flat_bonus);
        g = g.saturating_add(opts.reward.flat_bonus);
        b = b.saturating_add(opts.reward.flat_bonus);
    }

    let mut code = 30;
    if r >= opts.channel_threshold {
        code += 1;
    }
    if g >= opts.channel_threshold {
        code += 2;
    }
    if b >= opts.channel_threshold {
        code += 4;
    }
    code
}

/// Index of the cube step nearest to a channel value.
fn nearest_cube_step(c: u8) -> usize {
    let mut best = 0;
    let mut best_dist = i32::MAX;
    for (i, &step) in CUBE_STEPS.iter().enumerate() {
        let dist = (c as i32 - step as i32).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

fn eight_bit_code(px: Rgba) -> u32 {
    let (r, g, b) = (px.r as i32, px.g as i32, px.b as i32);

    let ri = nearest_cube_step(px.r);
    let gi = nearest_cube_step(px.g);
    let bi = nearest_cube_step(px.b);
    let cube = (
        CUBE_STEPS[ri] as i32,
        CUBE_STEPS[gi] as i32,
        CUBE_STEPS[bi] as i32,
    );
    let cube_dist =
        (r - cube.0) * (r - cube.0) + (g - cube.1) * (g - cube.1) + (b - cube.2) * (b - cube.2);

    let avg = (r + g + b) / 3;
    let grey_idx = ((avg - 8 + 5) / 10).clamp(0, 23);
    let grey = 8 + 10 * grey_idx;
    let grey_dist =
        (r - grey) * (r - grey) + (g - grey) * (g - grey) + (b - grey) * (b - grey);

    if grey_dist < cube_dist {
        232 + grey_idx as u32
    } else {
        16 + 36 * ri as u32 + 6 * gi as u32 + bi as u32
    }
}

impl ColorQuantizer {
    /// Stable color code for a pixel. Identical pixel and luminosity always
    /// yield an identical code.
    pub fn code(&self, px: Rgba, lum: u8) -> u32 {
        match self {
            ColorQuantizer::ThreeBit(opts) => three_bit_code(opts, px, lum),
            ColorQuantizer::FourBit(opts) => {
                let code = three_bit_code(&opts.base, px, lum);
                if lum >= opts.bold_lum_threshold {
                    code + 60
                } else {
                    code
                }
            }
            ColorQuantizer::EightBit => eight_bit_code(px),
            ColorQuantizer::TrueColor => {
                ((px.r as u32) << 16) | ((px.g as u32) << 8) | px.b as u32
            }
        }
    }

    /// Append the escape sequence selecting `code` to `out`.
    ///
    /// `code` must come from this quantizer's [`code`](Self::code).
    pub fn push_escape(&self, code: u32, out: &mut String) {
        match self {
            ColorQuantizer::ThreeBit(_) => out.push_str(BASE_ESCAPES[(code - 30) as usize]),
            ColorQuantizer::FourBit(_) => {
                if code >= 90 {
                    out.push_str(BRIGHT_ESCAPES[(code - 90) as usize]);
                } else {
                    out.push_str(BASE_ESCAPES[(code - 30) as usize]);
                }
            }
            ColorQuantizer::EightBit => {
                let _ = write!(out, "\x1b[38;5;{}m", code);
            }
            ColorQuantizer::TrueColor => {
                let _ = write!(
                    out,
                    "\x1b[38;2;{};{};{}m",
                    (code >> 16) & 0xff,
                    (code >> 8) & 0xff,
                    code & 0xff
                );
            }
        }
    }

    /// Escape sequence for `code` as an owned string.
    pub fn escape(&self, code: u32) -> String {
        let mut s = String::new();
        self.push_escape(code, &mut s);
        s
    }

    /// Extra output bytes to reserve per character for this quantizer's
    /// escape sequences.
    pub fn bytes_per_char_hint(&self) -> f64 {
        match self {
            ColorQuantizer::ThreeBit(_) => 5.0,
            ColorQuantizer::FourBit(_) => 6.0,
            ColorQuantizer::EightBit => 11.0,
            ColorQuantizer::TrueColor => 19.0,
        }
    }
}
