//! CLI enum types for color space and downscaling mode options.

use clap::ValueEnum;

use crate::convert::{ColorQuantizer, FourBitOptions, ScaleMode, ThreeBitOptions};

/// Terminal color space for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorSpace {
    /// Plain text, no escape sequences
    #[default]
    None,
    /// 8 base ANSI colors
    #[value(name = "3bit", alias = "3")]
    ThreeBit,
    /// 16 ANSI colors (bright palette above the luminosity gate)
    #[value(name = "4bit", alias = "4")]
    FourBit,
    /// xterm 256-color palette
    #[value(name = "8bit", alias = "8")]
    EightBit,
    /// 24-bit true color
    #[value(name = "24bit", alias = "24", alias = "truecolor", alias = "full")]
    TrueColor,
}

impl ColorSpace {
    /// The quantizer (with its default sub-options) for this color space, or
    /// `None` for plain-text output.
    pub fn quantizer(self) -> Option<ColorQuantizer> {
        match self {
            ColorSpace::None => None,
            ColorSpace::ThreeBit => Some(ColorQuantizer::ThreeBit(ThreeBitOptions::default())),
            ColorSpace::FourBit => Some(ColorQuantizer::FourBit(FourBitOptions::default())),
            ColorSpace::EightBit => Some(ColorQuantizer::EightBit),
            ColorSpace::TrueColor => Some(ColorQuantizer::TrueColor),
        }
    }
}

/// Downscaling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ScaleModeArg {
    /// Derive the secondary axis from the aspect ratio
    #[default]
    #[value(name = "respect-aspect-ratio", alias = "respect")]
    RespectAspectRatio,
    /// Use the target width and height directly
    #[value(name = "ignore-aspect-ratio", alias = "ignore")]
    IgnoreAspectRatio,
}

impl From<ScaleModeArg> for ScaleMode {
    fn from(m: ScaleModeArg) -> Self {
        match m {
            ScaleModeArg::RespectAspectRatio => ScaleMode::RespectAspectRatio,
            ScaleModeArg::IgnoreAspectRatio => ScaleMode::IgnoreAspectRatio,
        }
    }
}
