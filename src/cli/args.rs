//! CLI argument parsing with clap.
//!
//! Size, ratio and mode options are `Option`s so `main` can merge them with
//! the config file: CLI arguments > config file > built-in defaults.

use clap::Parser;
use std::path::PathBuf;

use super::enums::{ColorSpace, ScaleModeArg};

/// Render images as ANSI-colored ASCII art in the terminal
#[derive(Parser, Debug)]
#[command(name = "termsketch")]
#[command(version, about = "Render images as ASCII art in the terminal", long_about = None)]
pub struct Args {
    /// Image files to render. With no paths, reads newline-delimited paths
    /// from standard input.
    pub paths: Vec<PathBuf>,

    /// Target width in characters. Default: 100 (or from config file)
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Target height in characters; may be ignored depending on the
    /// downscaling mode. Default: 100 (or from config file)
    #[arg(long)]
    pub height: Option<u32>,

    /// Output aspect ratio; use the inverse of your terminal character's
    /// aspect ratio. Default: 2.0 (or from config file)
    #[arg(short, long)]
    pub aspect_ratio: Option<f64>,

    /// Color space for ANSI color output. Default: none (or from config
    /// file)
    #[arg(short, long)]
    pub color: Option<ColorSpace>,

    /// Enable Sobel edge detection (best with targets of ~100x100 and up)
    #[arg(short, long)]
    pub sobel: bool,

    /// Bold the detected outlines (requires --sobel)
    #[arg(short, long)]
    pub bold: bool,

    /// How to interpret the target dimensions. Default:
    /// respect-aspect-ratio (or from config file)
    #[arg(long = "downscale-mode", alias = "scale-mode")]
    pub scale_mode: Option<ScaleModeArg>,

    /// Squared-magnitude threshold for edge classification (50000-120000
    /// recommended). Default: 80000 (or from config file)
    #[arg(long)]
    pub magnitude_threshold: Option<f64>,

    /// Laplacian noise-rejection threshold for edge classification (100-400
    /// recommended). Default: 300 (or from config file)
    #[arg(long)]
    pub laplacian_threshold: Option<f64>,

    /// Shorthand for --sobel --bold --color 24bit
    #[arg(short, long)]
    pub rich: bool,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Fold the `--rich` shorthand into the flags it stands for. Explicit
    /// flags keep their values.
    pub fn apply_rich(mut self) -> Self {
        if self.rich {
            self.sobel = true;
            self.bold = true;
            self.color.get_or_insert(ColorSpace::TrueColor);
        }
        self
    }
}
