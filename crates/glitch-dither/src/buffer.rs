//! In-memory pixel grid shared by every operation.

use crate::color::{channel_to_u8, ChannelLayout, Color};
use crate::error::DitherError;

/// A `width × height` grid of [`Color`] samples in row-major order.
///
/// Samples are stored interleaved as `f32`, `layout.channels()` values per
/// pixel. The channel layout is fixed for the lifetime of the buffer.
///
/// # Example
///
/// ```
/// use glitch_dither::{Color, PixelBuffer};
///
/// let buffer = PixelBuffer::from_rgb8(2, 1, &[255, 0, 0, 0, 0, 255]).unwrap();
/// assert_eq!(buffer.get(1, 0), Color::from_u8(0, 0, 255));
/// assert_eq!(buffer.to_bytes(), vec![255, 0, 0, 0, 0, 255]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    layout: ChannelLayout,
    samples: Vec<f32>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    pub fn new(width: usize, height: usize, layout: ChannelLayout) -> Self {
        Self {
            width,
            height,
            layout,
            samples: vec![0.0; width * height * layout.channels()],
        }
    }

    /// Create a buffer where every pixel is `color`.
    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        let layout = color.layout();
        let mut samples = Vec::with_capacity(width * height * layout.channels());
        for _ in 0..width * height {
            samples.extend_from_slice(color.channels());
        }
        Self {
            width,
            height,
            layout,
            samples,
        }
    }

    /// Wrap interleaved `f32` samples.
    ///
    /// # Errors
    ///
    /// [`DitherError::DimensionMismatch`] if `samples.len()` is not
    /// `width * height * layout.channels()`.
    pub fn from_samples(
        width: usize,
        height: usize,
        layout: ChannelLayout,
        samples: Vec<f32>,
    ) -> Result<Self, DitherError> {
        let expected = width * height * layout.channels();
        if samples.len() != expected {
            return Err(DitherError::DimensionMismatch {
                expected,
                found: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            samples,
        })
    }

    /// Wrap interleaved 8-bit RGB bytes.
    pub fn from_rgb8(width: usize, height: usize, bytes: &[u8]) -> Result<Self, DitherError> {
        let samples = bytes.iter().map(|&b| b as f32).collect();
        Self::from_samples(width, height, ChannelLayout::Rgb, samples)
    }

    /// Wrap 8-bit luminance bytes.
    pub fn from_luma8(width: usize, height: usize, bytes: &[u8]) -> Result<Self, DitherError> {
        let samples = bytes.iter().map(|&b| b as f32).collect();
        Self::from_samples(width, height, ChannelLayout::Mono, samples)
    }

    /// Build a buffer from row-major colors.
    ///
    /// The layout is taken from the first color (RGB for an empty slice).
    ///
    /// # Errors
    ///
    /// [`DitherError::DimensionMismatch`] if `colors.len() != width * height`,
    /// [`DitherError::LayoutMismatch`] if the colors mix layouts.
    pub fn from_colors(width: usize, height: usize, colors: &[Color]) -> Result<Self, DitherError> {
        if colors.len() != width * height {
            return Err(DitherError::DimensionMismatch {
                expected: width * height,
                found: colors.len(),
            });
        }
        let layout = colors.first().map_or(ChannelLayout::Rgb, Color::layout);
        let mut samples = Vec::with_capacity(colors.len() * layout.channels());
        for color in colors {
            if color.layout() != layout {
                return Err(DitherError::LayoutMismatch {
                    expected: layout,
                    found: color.layout(),
                });
            }
            samples.extend_from_slice(color.channels());
        }
        Ok(Self {
            width,
            height,
            layout,
            samples,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Channel layout of every pixel.
    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Returns true if the buffer has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Interleaved samples.
    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Mutable interleaved samples.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y * self.width + x) * self.layout.channels()
    }

    /// Read the pixel at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Color {
        let start = self.offset(x, y);
        Color::from_channels(
            self.layout,
            &self.samples[start..start + self.layout.channels()],
        )
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `color` has the buffer's layout.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        debug_assert_eq!(color.layout(), self.layout);
        let start = self.offset(x, y);
        let n = self.layout.channels();
        self.samples[start..start + n].copy_from_slice(color.channels());
    }

    /// Iterate pixels in raster order.
    pub fn pixels(&self) -> impl Iterator<Item = Color> + '_ {
        let layout = self.layout;
        self.samples
            .chunks_exact(layout.channels())
            .map(move |c| Color::from_channels(layout, c))
    }

    /// Fail with [`DitherError::LayoutMismatch`] unless the buffer has `expected` layout.
    pub fn ensure_layout(&self, expected: ChannelLayout) -> Result<(), DitherError> {
        if self.layout != expected {
            return Err(DitherError::LayoutMismatch {
                expected,
                found: self.layout,
            });
        }
        Ok(())
    }

    /// Clamped, truncated bytes with `layout.channels()` bytes per pixel.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.samples.iter().map(|&s| channel_to_u8(s)).collect()
    }

    /// Single-channel copy using ITU-R 601-2 luma. Mono buffers are cloned.
    pub fn to_luma(&self) -> PixelBuffer {
        if self.layout == ChannelLayout::Mono {
            return self.clone();
        }
        let samples = self.pixels().map(|p| p.luma()).collect();
        Self {
            width: self.width,
            height: self.height,
            layout: ChannelLayout::Mono,
            samples,
        }
    }

    /// RGB copy, replicating mono values. RGB buffers are cloned.
    pub fn to_rgb(&self) -> PixelBuffer {
        if self.layout == ChannelLayout::Rgb {
            return self.clone();
        }
        let samples = self.samples.iter().flat_map(|&v| [v, v, v]).collect();
        Self {
            width: self.width,
            height: self.height,
            layout: ChannelLayout::Rgb,
            samples,
        }
    }

    /// Copy the region starting at `(x, y)`, clipped to the buffer bounds.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> PixelBuffer {
        let x0 = x.min(self.width);
        let y0 = y.min(self.height);
        let w = width.min(self.width - x0);
        let h = height.min(self.height - y0);
        let n = self.layout.channels();

        let mut samples = Vec::with_capacity(w * h * n);
        for row in y0..y0 + h {
            let start = (row * self.width + x0) * n;
            samples.extend_from_slice(&self.samples[start..start + w * n]);
        }
        Self {
            width: w,
            height: h,
            layout: self.layout,
            samples,
        }
    }

    /// Copy `other` into this buffer with its top-left corner at `(x, y)`.
    ///
    /// Pixels falling outside this buffer are dropped.
    ///
    /// # Errors
    ///
    /// [`DitherError::LayoutMismatch`] if the layouts differ.
    pub fn paste(&mut self, other: &PixelBuffer, x: usize, y: usize) -> Result<(), DitherError> {
        self.ensure_layout(other.layout)?;
        let n = self.layout.channels();
        let w = other.width.min(self.width.saturating_sub(x));
        let h = other.height.min(self.height.saturating_sub(y));
        if w == 0 || h == 0 {
            return Ok(());
        }
        for row in 0..h {
            let src = row * other.width * n;
            let dst = ((y + row) * self.width + x) * n;
            self.samples[dst..dst + w * n].copy_from_slice(&other.samples[src..src + w * n]);
        }
        Ok(())
    }
}
