use clap::Parser;
use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

use termsketch::cli::{Args, ColorSpace};
use termsketch::config::Config;
use termsketch::convert::{
    ConfigError, Converter, ConverterOptions, DEFAULT_LAPLACIAN_THRESHOLD,
    DEFAULT_MAGNITUDE_THRESHOLD, ScaleMode,
};

/// Merge settings (CLI args > config file > built-in defaults) into a
/// validated converter plus the target grid size.
fn build_converter(args: &Args, cfg: &Config) -> Result<(Converter, u32, u32), ConfigError> {
    let width = args.width.or(cfg.output.width).unwrap_or(100);
    let height = args.height.or(cfg.output.height).unwrap_or(100);

    let scale_mode = args
        .scale_mode
        .map(ScaleMode::from)
        .or(cfg.scale_mode()?)
        .unwrap_or_default();

    let color_space = args.color.or(cfg.color_space()?).unwrap_or(ColorSpace::None);

    let options = ConverterOptions {
        aspect_ratio: args.aspect_ratio.or(cfg.output.aspect_ratio).unwrap_or(2.0),
        scale_mode,
        edge_detection: args.sobel || cfg.render.sobel.unwrap_or(false),
        bold_outline: args.bold || cfg.render.bold.unwrap_or(false),
        magnitude_threshold: args
            .magnitude_threshold
            .or(cfg.render.magnitude_threshold)
            .unwrap_or(DEFAULT_MAGNITUDE_THRESHOLD),
        laplacian_threshold: args
            .laplacian_threshold
            .or(cfg.render.laplacian_threshold)
            .unwrap_or(DEFAULT_LAPLACIAN_THRESHOLD),
        color: color_space.quantizer(),
        ..ConverterOptions::default()
    };

    Ok((Converter::new(options)?, width, height))
}

/// Decode one image file and convert it to terminal text.
fn render_file(
    converter: &Converter,
    path: &Path,
    width: u32,
    height: u32,
) -> Result<String, String> {
    let img = image::open(path)
        .map_err(|e| format!("error reading image '{}': {}", path.display(), e))?;
    let rgba = img.to_rgba8();

    let start = Instant::now();
    let text = converter
        .convert(&rgba, width, height)
        .map_err(|e| format!("error converting '{}': {}", path.display(), e))?;
    log::debug!("converted '{}' in {:?}", path.display(), start.elapsed());

    Ok(text)
}

fn main() {
    env_logger::init();

    let args = Args::parse().apply_rich();

    // An explicit --config must exist; the default location is optional.
    let cfg = if let Some(ref path) = args.config {
        match Config::load_from(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        match Config::load() {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Warning: {}", e);
                eprintln!("Using default settings.");
                Config::default()
            }
        }
    };

    let (converter, width, height) = match build_converter(&args, &cfg) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // A failed input is reported and skipped; the batch keeps going.
    let mut failures = 0u32;
    let mut process = |path: &Path| match render_file(&converter, path, width, height) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("{}", e);
            failures += 1;
        }
    };

    if args.paths.is_empty() {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        process(Path::new(line));
                    }
                }
                Err(e) => {
                    eprintln!("error reading stdin: {}", e);
                    failures += 1;
                    break;
                }
            }
        }
    } else {
        for path in &args.paths {
            process(path);
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
}
