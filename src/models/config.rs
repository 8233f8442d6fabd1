use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glitch_dither::Palette;

use crate::error::AppError;
use crate::pipeline::MethodName;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "GLITCHES_CONFIG";

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Named palettes as lists of hex colors
    #[serde(default)]
    pub palettes: HashMap<String, Vec<String>>,

    /// Defaults for options not given on the command line
    #[serde(default)]
    pub defaults: Defaults,
}

/// Fallback job options
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Defaults {
    #[serde(default = "default_method")]
    pub method: MethodName,

    /// Threshold matrix side for ordered dithering
    #[serde(default = "default_matrix")]
    pub matrix: usize,

    /// Median-cut target when no palette is given
    #[serde(default = "default_colors")]
    pub colors: usize,
}

fn default_method() -> MethodName {
    MethodName::FloydSteinberg
}

fn default_matrix() -> usize {
    4
}

fn default_colors() -> usize {
    16
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            method: default_method(),
            matrix: default_matrix(),
            colors: default_colors(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, AppError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// The config file to read: `path` if given, else `GLITCHES_CONFIG`.
    pub fn resolve_path(path: Option<&Path>) -> Option<PathBuf> {
        path.map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    /// Load configuration from the file chosen by [`resolve_path`](Self::resolve_path).
    ///
    /// A missing or malformed file logs a warning and yields the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = Self::resolve_path(path) else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        palettes = config.palettes.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Look up a named palette.
    ///
    /// Returns `Ok(None)` when no palette has that name.
    pub fn palette(&self, name: &str) -> Result<Option<Palette>, AppError> {
        let Some(hex) = self.palettes.get(name) else {
            return Ok(None);
        };
        let refs: Vec<&str> = hex.iter().map(String::as_str).collect();
        let palette = Palette::from_hex(&refs).map_err(|e| AppError::palette_spec(name, e.to_string()))?;
        Ok(Some(palette))
    }
}
