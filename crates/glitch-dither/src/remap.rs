//! Exact palette-to-palette substitution.
//!
//! A pixel quantized against palette A is rewritten as the entry at the same
//! position in palette B. Matching is exact on the integer-packed color key;
//! there is no nearest-color fallback.

use std::collections::HashMap;

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::error::DitherError;
use crate::palette::{Palette, PaletteError};

/// Positional color substitution between two equal-length palettes.
///
/// If the source palette repeats a color, the last position holding it
/// decides the target entry.
///
/// # Example
///
/// ```
/// use glitch_dither::{ColorRemapper, Palette, PixelBuffer};
///
/// let greys = Palette::from_rgb8(&[[0, 0, 0], [255, 255, 255]]).unwrap();
/// let inks = Palette::from_rgb8(&[[20, 0, 60], [250, 220, 90]]).unwrap();
/// let remapper = ColorRemapper::new(&greys, &inks).unwrap();
///
/// let image = PixelBuffer::from_rgb8(2, 1, &[255, 255, 255, 0, 0, 0]).unwrap();
/// let out = remapper.apply(&image).unwrap();
/// assert_eq!(out.to_bytes(), vec![250, 220, 90, 20, 0, 60]);
/// ```
#[derive(Debug, Clone)]
pub struct ColorRemapper {
    lookup: HashMap<u32, usize>,
    target: Palette,
}

impl ColorRemapper {
    /// Build the key→index lookup from `source` and keep `target`.
    ///
    /// # Errors
    ///
    /// [`DitherError::InvalidPalette`] if the palettes differ in length,
    /// [`DitherError::LayoutMismatch`] if they differ in layout.
    pub fn new(source: &Palette, target: &Palette) -> Result<Self, DitherError> {
        if source.len() != target.len() {
            return Err(PaletteError::LengthMismatch {
                source_len: source.len(),
                target_len: target.len(),
            }
            .into());
        }
        if source.layout() != target.layout() {
            return Err(DitherError::LayoutMismatch {
                expected: source.layout(),
                found: target.layout(),
            });
        }

        let lookup = source
            .colors()
            .iter()
            .enumerate()
            .map(|(i, c)| (c.to_key(), i))
            .collect();

        Ok(Self {
            lookup,
            target: target.clone(),
        })
    }

    /// Target entry for `color`, if its key is in the source palette.
    pub fn lookup(&self, color: &Color) -> Option<Color> {
        self.lookup
            .get(&color.to_key())
            .map(|&i| self.target.get(i))
    }

    /// Rewrite every pixel of `buffer`.
    ///
    /// # Errors
    ///
    /// - [`DitherError::LayoutMismatch`] if `buffer`'s layout differs from the palettes'
    /// - [`DitherError::UnknownColor`] for the first pixel, in raster order,
    ///   whose key is not in the source palette
    pub fn apply(&self, buffer: &PixelBuffer) -> Result<PixelBuffer, DitherError> {
        buffer.ensure_layout(self.target.layout())?;
        tracing::debug!(
            width = buffer.width(),
            height = buffer.height(),
            colors = self.target.len(),
            "remap"
        );

        let mut output = PixelBuffer::new(buffer.width(), buffer.height(), buffer.layout());
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let color = buffer.get(x, y);
                let mapped = self.lookup(&color).ok_or_else(|| DitherError::UnknownColor {
                    x,
                    y,
                    key: color.to_key(),
                })?;
                output.set(x, y, mapped);
            }
        }
        Ok(output)
    }
}

/// Substitute each pixel's `source` entry by the `target` entry at the same
/// position.
///
/// See [`ColorRemapper`] for the lookup rules and errors.
pub fn remap(buffer: &PixelBuffer, source: &Palette, target: &Palette) -> Result<PixelBuffer, DitherError> {
    ColorRemapper::new(source, target)?.apply(buffer)
}
