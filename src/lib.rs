//! termsketch library crate.
//!
//! Converts decoded raster images into ASCII art for terminal display,
//! optionally annotated with ANSI color and Sobel-derived edge strokes.
//! See [`convert::Converter`] for the entry point; the `cli` and `config`
//! modules back the `termsketch` binary.

pub mod cli;
pub mod config;
pub mod convert;
