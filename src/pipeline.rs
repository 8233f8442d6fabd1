//! Dither jobs: method, palette, and optional remap, applied to one image.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use glitch_dither::{
    mono_palette, recolour, remap, zx, Bayer, ChannelLayout, Dither, DitherError, DitherMode,
    FloydSteinberg, MatrixSize, Palette, PixelBuffer, Preset,
};

use crate::error::AppError;

/// Method names accepted in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MethodName {
    FloydSteinberg,
    Bayer,
    Nearest,
    /// Black and white by error diffusion
    Binary,
    /// Black and white by ordered dithering
    BinaryOrdered,
    Zx,
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Method::from(*self).name())
    }
}

/// How a job quantizes its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    FloydSteinberg,
    Bayer,
    /// Nearest color, no dithering
    Nearest,
    /// Threshold to black and white on luma
    Binary { ordered: bool },
    /// ZX Spectrum attribute cells
    Zx,
}

impl Method {
    pub fn name(self) -> &'static str {
        match self {
            Method::FloydSteinberg => "floyd-steinberg",
            Method::Bayer => "bayer",
            Method::Nearest => "nearest",
            Method::Binary { ordered: false } => "binary",
            Method::Binary { ordered: true } => "binary-ordered",
            Method::Zx => "zx",
        }
    }

    /// Whether the method quantizes against a caller-supplied palette.
    pub fn uses_palette(self) -> bool {
        matches!(self, Method::FloydSteinberg | Method::Bayer | Method::Nearest)
    }
}

impl From<MethodName> for Method {
    fn from(name: MethodName) -> Self {
        match name {
            MethodName::FloydSteinberg => Method::FloydSteinberg,
            MethodName::Bayer => Method::Bayer,
            MethodName::Nearest => Method::Nearest,
            MethodName::Binary => Method::Binary { ordered: false },
            MethodName::BinaryOrdered => Method::Binary { ordered: true },
            MethodName::Zx => Method::Zx,
        }
    }
}

/// One dithering job.
#[derive(Debug, Clone)]
pub struct DitherJob {
    pub method: Method,
    /// Palette to quantize against; required by palette methods.
    pub palette: Option<Palette>,
    /// Threshold matrix for ordered methods.
    pub matrix: MatrixSize,
    /// Replace the output colors positionally with this palette.
    pub remap_to: Option<Palette>,
    /// Dither on luma with a luma copy of the palette.
    pub luma: bool,
}

impl DitherJob {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            palette: None,
            matrix: MatrixSize::default(),
            remap_to: None,
            luma: false,
        }
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    pub fn matrix(mut self, matrix: MatrixSize) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn remap_to(mut self, target: Palette) -> Self {
        self.remap_to = Some(target);
        self
    }

    pub fn luma(mut self, luma: bool) -> Self {
        self.luma = luma;
        self
    }
}

fn rgb_palette(palette: &Palette) -> Result<Palette, AppError> {
    Palette::new(palette.colors().iter().map(|c| c.to_rgb()).collect())
        .map_err(|e| AppError::Dither(DitherError::from(e)))
}

/// Run `job` on `image`.
///
/// Returns the quantized buffer and the palette its pixels are drawn from,
/// which is the remap source when `remap_to` is set.
fn quantize(job: &DitherJob, image: &PixelBuffer) -> Result<(PixelBuffer, Palette), AppError> {
    match job.method {
        Method::Zx => {
            let out = zx::attribute_dither(&image.to_rgb())?;
            Ok((out, Preset::ZxFull.palette()))
        }
        Method::Binary { ordered } => {
            let luma = image.to_luma();
            let out = if ordered {
                Bayer::new(job.matrix).dither(&luma, DitherMode::Binary)?
            } else {
                FloydSteinberg.dither(&luma, DitherMode::Binary)?
            };
            Ok((out, mono_palette(2)?.to_luma()))
        }
        method => {
            let palette = job
                .palette
                .as_ref()
                .ok_or_else(|| AppError::MissingPalette(method.name()))?;
            let (source, palette) = if job.luma {
                (image.to_luma(), palette.to_luma())
            } else {
                (image.to_rgb(), rgb_palette(palette)?)
            };
            let out = match method {
                Method::Bayer => Bayer::new(job.matrix).dither(&source, DitherMode::palette(&palette))?,
                Method::Nearest => recolour(&source, &palette)?,
                _ => FloydSteinberg.dither(&source, DitherMode::palette(&palette))?,
            };
            Ok((out, palette))
        }
    }
}

/// Execute `job` against `image` and return the new image.
///
/// # Errors
///
/// - [`AppError::MissingPalette`] for a palette method without a palette
/// - [`AppError::Dither`] when remapping fails (length mismatch, or an output
///   color absent from the source palette)
pub fn run(job: &DitherJob, image: &PixelBuffer) -> Result<PixelBuffer, AppError> {
    tracing::debug!(
        method = job.method.name(),
        matrix = %job.matrix,
        luma = job.luma,
        remap = job.remap_to.is_some(),
        "running job"
    );

    let (mut out, mut used) = quantize(job, image)?;

    if let Some(target) = &job.remap_to {
        // Remap keys on exact colors, so both sides move to the target layout
        match target.layout() {
            ChannelLayout::Rgb if out.layout() == ChannelLayout::Mono => {
                out = out.to_rgb();
                used = rgb_palette(&used)?;
            }
            ChannelLayout::Mono if out.layout() == ChannelLayout::Rgb => {
                out = out.to_luma();
                used = used.to_luma();
            }
            _ => {}
        }
        out = remap(&out, &used, target)?;
    }

    Ok(out)
}
