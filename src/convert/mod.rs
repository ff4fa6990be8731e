//! Image-to-ASCII conversion pipeline.
//!
//! This module provides the complete pipeline for converting a decoded
//! image to ASCII art suitable for terminal display:
//!
//! 1. **Downscaling** - Nearest-neighbor resample to the character grid
//! 2. **Luminosity extraction** - RGBA to per-pixel brightness
//! 3. **Sobel analysis** - Optional gradient/magnitude/Laplacian field
//! 4. **Glyph selection** - Brightness ramp, or stroke glyphs on edges
//! 5. **Color quantization** - Optional ANSI color codes (3/4/8/24-bit)
//! 6. **Rendering** - Escape-minimizing row-major text assembly
//!
//! Build a [`Converter`] once and reuse it:
//!
//! ```
//! use termsketch::convert::{Converter, ConverterOptions};
//! use termsketch::convert::{PixelBuffer, Rgba};
//!
//! let converter = Converter::new(ConverterOptions::default()).unwrap();
//! let img = PixelBuffer::filled(8, 8, Rgba::opaque(128, 128, 128));
//! let text = converter.convert(&img, 4, 4).unwrap();
//! assert_eq!(text.lines().count(), 2);
//! ```

mod color;
mod converter;
mod downscale;
mod error;
mod glyph;
mod luminosity;
mod render;
mod sobel;
mod source;

pub use color::{ColorQuantizer, FourBitOptions, RewardRules, ThreeBitOptions};
pub use converter::{
    Converter, ConverterOptions, DEFAULT_BYTES_PER_CHAR, DEFAULT_LAPLACIAN_THRESHOLD,
    DEFAULT_MAGNITUDE_THRESHOLD,
};
pub use downscale::{downscale, ScaleMode, Scaled};
pub use error::ConfigError;
pub use glyph::{ramp_glyph, EdgeGlyphMap, LUMINOSITY_RAMP};
pub use luminosity::{luminosity, LuminosityGrid};
pub use render::{render, EdgePlan, RenderPlan, RESET};
pub use sobel::SobelField;
pub use source::{PixelBuffer, PixelSource, Rgba};
