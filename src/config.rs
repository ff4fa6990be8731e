//! Configuration file handling for termsketch.
//!
//! Loads configuration from `~/.config/termsketch/config.toml` or a custom
//! path. Every field is optional; the CLI merges settings with precedence
//! CLI arguments > config file > built-in defaults.

use clap::ValueEnum as _;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::ColorSpace;
use crate::convert::{ConfigError, ScaleMode};

/// Configuration file structure for termsketch.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Output grid settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub aspect_ratio: Option<f64>,
    /// "respect-aspect-ratio" or "ignore-aspect-ratio"
    pub scale_mode: Option<String>,
}

/// Rendering settings.
#[derive(Debug, Deserialize, Default)]
pub struct RenderConfig {
    /// "none", "3bit", "4bit", "8bit" or "24bit"
    pub color: Option<String>,
    pub sobel: Option<bool>,
    pub bold: Option<bool>,
    pub magnitude_threshold: Option<f64>,
    pub laplacian_threshold: Option<f64>,
}

impl Config {
    /// Load configuration from the default path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from an explicit path; the file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// The configured scale mode, parsed.
    pub fn scale_mode(&self) -> Result<Option<ScaleMode>, ConfigError> {
        self.output
            .scale_mode
            .as_deref()
            .map(ScaleMode::parse)
            .transpose()
    }

    /// The configured color space, parsed.
    pub fn color_space(&self) -> Result<Option<ColorSpace>, ConfigError> {
        self.render
            .color
            .as_deref()
            .map(|s| {
                ColorSpace::from_str(s, true)
                    .map_err(|_| ConfigError::UnknownColorSpace(s.to_string()))
            })
            .transpose()
    }
}

/// Errors that can occur when loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config/termsketch/config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
            [output]
            width = 120
            height = 60
            aspect_ratio = 1.8
            scale_mode = "ignore-aspect-ratio"

            [render]
            color = "4bit"
            sobel = true
            bold = true
            magnitude_threshold = 60000.0
            laplacian_threshold = 250.0
            "#,
        );
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.output.width, Some(120));
        assert_eq!(config.output.height, Some(60));
        assert_eq!(config.output.aspect_ratio, Some(1.8));
        assert_eq!(
            config.scale_mode().unwrap(),
            Some(ScaleMode::IgnoreAspectRatio)
        );
        assert_eq!(config.color_space().unwrap(), Some(ColorSpace::FourBit));
        assert_eq!(config.render.sobel, Some(true));
        assert_eq!(config.render.bold, Some(true));
        assert_eq!(config.render.magnitude_threshold, Some(60000.0));
        assert_eq!(config.render.laplacian_threshold, Some(250.0));
    }

    #[test]
    fn test_empty_config_is_all_none() {
        let file = write_config("");
        let config = Config::load_from(file.path()).unwrap();
        assert!(config.output.width.is_none());
        assert!(config.render.color.is_none());
        assert!(config.scale_mode().unwrap().is_none());
        assert!(config.color_space().unwrap().is_none());
    }

    #[test]
    fn test_partial_section() {
        let file = write_config("[render]\nsobel = true\n");
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.render.sobel, Some(true));
        assert!(config.output.width.is_none());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Config::load_from(Path::new("/nonexistent/termsketch.toml")).unwrap_err();
        assert!(matches!(err, ConfigFileError::Io { .. }));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let file = write_config("[output\nwidth = ");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigFileError::Parse { .. }));
    }

    #[test]
    fn test_unknown_color_space_rejected() {
        let file = write_config("[render]\ncolor = \"5bit\"\n");
        let config = Config::load_from(file.path()).unwrap();
        assert!(matches!(
            config.color_space(),
            Err(ConfigError::UnknownColorSpace(_))
        ));
    }

    #[test]
    fn test_color_space_aliases_from_config() {
        for (value, expected) in [
            ("3", ColorSpace::ThreeBit),
            ("8bit", ColorSpace::EightBit),
            ("truecolor", ColorSpace::TrueColor),
        ] {
            let file = write_config(&format!("[render]\ncolor = \"{}\"\n", value));
            let config = Config::load_from(file.path()).unwrap();
            assert_eq!(config.color_space().unwrap(), Some(expected));
        }
    }
}
