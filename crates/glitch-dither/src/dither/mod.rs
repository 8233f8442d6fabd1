//! Dithering algorithms.
//!
//! Two independent strategies share the nearest-color matcher as their
//! quantization primitive:
//!
//! - **Floyd-Steinberg**: error diffusion in strict raster order
//! - **Bayer**: ordered dithering with a tiled threshold matrix, parallel
//!   across rows
//!
//! Both implement the [`Dither`] trait and take a [`DitherMode`] that says
//! whether pixels are matched against an RGB palette, a single-channel
//! palette, or a fixed black/white threshold.
//!
//! # Example
//!
//! ```
//! use glitch_dither::{Dither, DitherMode, FloydSteinberg, Palette, PixelBuffer};
//!
//! let palette = Palette::from_rgb8(&[[0, 0, 0], [255, 255, 255]]).unwrap();
//! let image = PixelBuffer::from_rgb8(2, 1, &[128, 128, 128, 128, 128, 128]).unwrap();
//!
//! let out = FloydSteinberg.dither(&image, DitherMode::Rgb(&palette)).unwrap();
//! assert_eq!(out.to_bytes(), vec![255, 255, 255, 0, 0, 0]);
//! ```

mod floyd_steinberg;
mod kernel;
mod ordered;

pub use floyd_steinberg::FloydSteinberg;
pub(crate) use kernel::{Kernel, FLOYD_STEINBERG};
pub use ordered::{Bayer, MatrixSize};

use crate::buffer::PixelBuffer;
use crate::color::{ChannelLayout, Color};
use crate::error::DitherError;
use crate::palette::Palette;

/// What a dithered pixel may become.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DitherMode<'a> {
    /// Match RGB pixels against an RGB palette.
    Rgb(&'a Palette),
    /// Match single-channel pixels against a single-channel palette.
    Mono(&'a Palette),
    /// Threshold single-channel pixels to 0 or 255.
    Binary,
}

impl<'a> DitherMode<'a> {
    /// `Rgb` or `Mono` depending on the palette's layout.
    pub fn palette(palette: &'a Palette) -> Self {
        match palette.layout() {
            ChannelLayout::Rgb => DitherMode::Rgb(palette),
            ChannelLayout::Mono => DitherMode::Mono(palette),
        }
    }

    /// Layout the input buffer must have.
    pub fn layout(&self) -> ChannelLayout {
        match self {
            DitherMode::Rgb(_) => ChannelLayout::Rgb,
            DitherMode::Mono(_) | DitherMode::Binary => ChannelLayout::Mono,
        }
    }

    /// Palette matched against, if any.
    pub fn palette_ref(&self) -> Option<&'a Palette> {
        match *self {
            DitherMode::Rgb(p) | DitherMode::Mono(p) => Some(p),
            DitherMode::Binary => None,
        }
    }

    /// Check that the palette and `image` both have this mode's layout.
    pub(crate) fn validate(&self, image: &PixelBuffer) -> Result<(), DitherError> {
        let expected = self.layout();
        if let Some(palette) = self.palette_ref() {
            if palette.layout() != expected {
                return Err(DitherError::LayoutMismatch {
                    expected,
                    found: palette.layout(),
                });
            }
        }
        image.ensure_layout(expected)
    }
}

/// Trait for dithering algorithms.
///
/// Implementations read `image` without modifying it and return a new buffer
/// of the same size and layout in which every pixel is a palette entry (or 0
/// or 255 in [`DitherMode::Binary`]).
pub trait Dither {
    /// Dither `image` under `mode`.
    ///
    /// # Errors
    ///
    /// [`DitherError::LayoutMismatch`] if the image or palette layout does
    /// not match `mode`.
    fn dither(&self, image: &PixelBuffer, mode: DitherMode<'_>) -> Result<PixelBuffer, DitherError>;
}

/// Error buffer for efficient error diffusion.
///
/// Manages a sliding window of error rows, storing only the rows that
/// the diffusion kernel can reach (determined by `max_dy`). Each row holds
/// `channels` interleaved values per pixel.
///
/// # Usage Pattern
///
/// 1. Create buffer with `new(width, channels, row_depth)`
/// 2. For each row:
///    a. Read accumulated error with `get_accumulated(x)`
///    b. After processing pixel, distribute error with `add_error(x, dy, error, weight)`
///    c. After row complete, call `advance_row()`
#[derive(Debug)]
pub struct ErrorBuffer {
    /// Error rows: rows[0] is current row, rows[1] is next, etc.
    rows: Vec<Vec<f32>>,
    width: usize,
    channels: usize,
}

impl ErrorBuffer {
    /// Create a new error buffer.
    ///
    /// # Arguments
    ///
    /// * `width` - Image width in pixels
    /// * `channels` - Values per pixel
    /// * `row_depth` - Number of rows to track (kernel's `max_dy + 1`)
    pub fn new(width: usize, channels: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![0.0; width * channels]).collect(),
            width,
            channels,
        }
    }

    /// Error accumulated so far for pixel `x` of the current row.
    #[inline]
    pub fn get_accumulated(&self, x: usize) -> &[f32] {
        let start = x * self.channels;
        &self.rows[0][start..start + self.channels]
    }

    /// Add `error * weight` to a future pixel.
    ///
    /// `row_offset` 0 is the current row. Silently ignores out-of-bounds
    /// coordinates.
    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: &[f32], weight: f32) {
        if x < self.width && row_offset < self.rows.len() {
            let start = x * self.channels;
            let row = &mut self.rows[row_offset][start..start + self.channels];
            for (acc, e) in row.iter_mut().zip(error) {
                *acc += e * weight;
            }
        }
    }

    /// Advance to the next row.
    ///
    /// Rotates the row buffer: the first row is discarded, subsequent rows
    /// shift forward, and a new zeroed row is added at the end.
    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill(0.0);
        }
    }
}

/// Error-diffusion binary threshold: `<= 128` is black.
#[inline]
fn threshold_binary(value: f32) -> f32 {
    if value <= 128.0 {
        0.0
    } else {
        255.0
    }
}

/// Quantize an already clamped pixel for error diffusion.
#[inline]
fn quantize(mode: &DitherMode<'_>, pixel: &Color) -> Color {
    match mode {
        DitherMode::Rgb(palette) | DitherMode::Mono(palette) => {
            palette.get(palette.find_nearest(pixel).0)
        }
        DitherMode::Binary => pixel.map(threshold_binary),
    }
}

/// Core error diffusion loop parameterized by kernel.
///
/// Pixels are visited in raster order. Each working pixel (source plus
/// accumulated error) is clamped to `0..=255`, quantized, and the
/// difference is spread over in-bounds neighbors. Weights falling outside
/// the image are dropped, not renormalized.
///
/// `mode` must already be validated against `image`.
pub(crate) fn dither_with_kernel(
    image: &PixelBuffer,
    mode: &DitherMode<'_>,
    kernel: &Kernel,
) -> PixelBuffer {
    let width = image.width();
    let height = image.height();
    let layout = image.layout();
    let mut output = PixelBuffer::new(width, height, layout);
    let mut error_buf = ErrorBuffer::new(width, layout.channels(), kernel.max_dy + 1);
    let divisor = kernel.divisor as f32;

    for y in 0..height {
        for x in 0..width {
            let mut pixel = image.get(x, y);
            for (c, e) in pixel
                .channels_mut()
                .iter_mut()
                .zip(error_buf.get_accumulated(x))
            {
                *c += e;
            }
            let pixel = pixel.clamped();
            let quantized = quantize(mode, &pixel);
            output.set(x, y, quantized);

            let mut error = pixel;
            for (e, q) in error.channels_mut().iter_mut().zip(quantized.channels()) {
                *e -= q;
            }

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i64 + dx as i64;
                let ny = y + dy as usize;
                if nx < 0 || nx >= width as i64 || ny >= height {
                    continue;
                }
                error_buf.add_error(nx as usize, dy as usize, error.channels(), weight as f32 / divisor);
            }
        }
        error_buf.advance_row();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_buffer_accumulates_and_rotates() {
        let mut buf = ErrorBuffer::new(3, 3, 2);
        buf.add_error(1, 0, &[16.0, 32.0, -16.0], 0.5);
        buf.add_error(1, 1, &[4.0, 4.0, 4.0], 1.0);
        assert_eq!(buf.get_accumulated(1), &[8.0, 16.0, -8.0]);

        buf.advance_row();
        assert_eq!(buf.get_accumulated(1), &[4.0, 4.0, 4.0]);
        assert_eq!(buf.get_accumulated(0), &[0.0, 0.0, 0.0]);

        buf.advance_row();
        assert_eq!(buf.get_accumulated(1), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_error_buffer_ignores_out_of_bounds() {
        let mut buf = ErrorBuffer::new(2, 1, 2);
        buf.add_error(2, 0, &[1.0], 1.0);
        buf.add_error(0, 2, &[1.0], 1.0);
        assert_eq!(buf.get_accumulated(0), &[0.0]);
        assert_eq!(buf.get_accumulated(1), &[0.0]);
    }

    #[test]
    fn test_mode_layouts() {
        let rgb = Palette::from_rgb8(&[[0, 0, 0]]).unwrap();
        let mono = rgb.to_luma();
        assert_eq!(DitherMode::palette(&rgb), DitherMode::Rgb(&rgb));
        assert_eq!(DitherMode::palette(&mono), DitherMode::Mono(&mono));
        assert_eq!(DitherMode::Binary.layout(), ChannelLayout::Mono);
        assert!(DitherMode::Binary.palette_ref().is_none());
    }

    #[test]
    fn test_validate_rejects_mismatch() {
        let rgb = Palette::from_rgb8(&[[0, 0, 0]]).unwrap();
        let mono_image = PixelBuffer::new(1, 1, ChannelLayout::Mono);
        let rgb_image = PixelBuffer::new(1, 1, ChannelLayout::Rgb);

        assert!(DitherMode::Rgb(&rgb).validate(&rgb_image).is_ok());
        assert!(matches!(
            DitherMode::Rgb(&rgb).validate(&mono_image),
            Err(DitherError::LayoutMismatch { .. })
        ));
        // Palette layout disagrees with the mode
        assert!(matches!(
            DitherMode::Mono(&rgb).validate(&mono_image),
            Err(DitherError::LayoutMismatch { .. })
        ));
        assert!(DitherMode::Binary.validate(&mono_image).is_ok());
        assert!(DitherMode::Binary.validate(&rgb_image).is_err());
    }

    #[test]
    fn test_binary_threshold_boundary() {
        assert_eq!(threshold_binary(128.0), 0.0);
        assert_eq!(threshold_binary(128.01), 255.0);
    }
}
