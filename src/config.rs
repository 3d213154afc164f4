use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub images: ImagesConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Images,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Strip markdown markers from the joined text
    pub plain: bool,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ImagesConfig {
    /// Warn about image paths that are missing on disk
    pub check_exists: bool,
    /// Directory that relative image paths are resolved against
    pub base_dir: Option<PathBuf>,
}

impl ImagesConfig {
    /// Where an image path from the content points on disk.
    pub fn resolve(&self, image_path: &str) -> PathBuf {
        let path = Path::new(image_path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Config {
    /// The bundled default config (validated by the build script).
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or the compiled default if it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::compiled_default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
