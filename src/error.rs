use glitch_dither::DitherError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("Unsupported PNG: {0}")]
    UnsupportedPng(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid palette spec '{spec}': {reason}")]
    InvalidPaletteSpec { spec: String, reason: String },

    #[error("Method '{0}' needs a palette")]
    MissingPalette(&'static str),

    #[error("Dither error: {0}")]
    Dither(#[from] DitherError),
}

impl AppError {
    pub(crate) fn palette_spec(spec: &str, reason: impl Into<String>) -> Self {
        AppError::InvalidPaletteSpec {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }
}
