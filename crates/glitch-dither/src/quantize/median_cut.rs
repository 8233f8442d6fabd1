//! Median-cut palette building.
//!
//! Every distinct color in the image counts once, whatever its pixel count.
//! The box with the largest channel range is split at the midpoint of its
//! colors sorted on that channel, until the target size is reached or every
//! box holds a single color.

use std::collections::HashSet;

use crate::buffer::PixelBuffer;
use crate::color::{ChannelLayout, Color};
use crate::error::DitherError;
use crate::palette::Palette;

/// A set of distinct colors and their per-channel bounds.
#[derive(Debug, Clone)]
struct ColorBox {
    colors: Vec<Color>,
}

impl ColorBox {
    fn new(colors: Vec<Color>) -> Self {
        debug_assert!(!colors.is_empty());
        Self { colors }
    }

    /// `max - min` of channel `axis` over the box.
    fn range(&self, axis: usize) -> f32 {
        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;
        for c in &self.colors {
            let v = c.channels()[axis];
            lo = lo.min(v);
            hi = hi.max(v);
        }
        hi - lo
    }

    /// Sort on `axis` and split at `len / 2`; an odd extra color goes to
    /// the upper half.
    fn split(mut self, axis: usize) -> (ColorBox, ColorBox) {
        // Stable so equal channel values keep their collection order
        self.colors
            .sort_by(|a, b| a.channels()[axis].total_cmp(&b.channels()[axis]));
        let upper = self.colors.split_off(self.colors.len() / 2);
        (ColorBox::new(self.colors), ColorBox::new(upper))
    }

    /// Floor of the per-channel mean.
    fn average(&self, layout: ChannelLayout) -> Color {
        let n = self.colors.len() as f64;
        let mut avg = Color::zeroed(layout);
        for (axis, out) in avg.channels_mut().iter_mut().enumerate() {
            let sum: f64 = self.colors.iter().map(|c| c.channels()[axis] as f64).sum();
            *out = (sum / n).floor() as f32;
        }
        avg
    }
}

/// Result of [`median_cut`].
///
/// When the image has fewer distinct colors than requested, splitting stops
/// early and the palette is shorter than [`requested`](Self::requested).
/// This is a partial success rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub struct MedianCutPalette {
    palette: Palette,
    requested: usize,
}

impl MedianCutPalette {
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn into_palette(self) -> Palette {
        self.palette
    }

    /// Target size passed to [`median_cut`].
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// `true` when the palette reached the requested size.
    pub fn is_complete(&self) -> bool {
        self.palette.len() == self.requested
    }

    /// How many entries short of the request the palette is.
    pub fn shortfall(&self) -> usize {
        self.requested - self.palette.len()
    }
}

/// Distinct colors in first-seen raster order.
fn distinct_colors(buffer: &PixelBuffer) -> Vec<Color> {
    let mut seen: HashSet<[u32; 3]> = HashSet::new();
    let mut colors = Vec::new();
    for pixel in buffer.pixels() {
        let mut key = [0u32; 3];
        for (k, v) in key.iter_mut().zip(pixel.channels()) {
            *k = v.to_bits();
        }
        if seen.insert(key) {
            colors.push(pixel);
        }
    }
    colors
}

/// Build a palette of up to `target` colors by median cut.
///
/// Output entries are box averages in box order, and share the buffer's
/// channel layout. The result is deterministic for a given buffer.
///
/// # Errors
///
/// - [`DitherError::InvalidTargetSize`] if `target == 0`
/// - [`DitherError::EmptyImage`] if the buffer has no pixels
///
/// # Example
///
/// ```
/// use glitch_dither::{median_cut, Color, PixelBuffer};
///
/// let image = PixelBuffer::from_rgb8(2, 1, &[255, 0, 0, 0, 0, 255]).unwrap();
/// let result = median_cut(&image, 2).unwrap();
/// assert!(result.is_complete());
/// assert_eq!(result.palette().colors(), &[
///     Color::from_u8(0, 0, 255),
///     Color::from_u8(255, 0, 0),
/// ]);
/// ```
pub fn median_cut(buffer: &PixelBuffer, target: usize) -> Result<MedianCutPalette, DitherError> {
    if target == 0 {
        return Err(DitherError::InvalidTargetSize(0));
    }
    if buffer.width() == 0 || buffer.height() == 0 {
        return Err(DitherError::EmptyImage);
    }

    let layout = buffer.layout();
    let colors = distinct_colors(buffer);
    tracing::debug!(
        width = buffer.width(),
        height = buffer.height(),
        distinct = colors.len(),
        target,
        "median cut"
    );

    let mut boxes = vec![ColorBox::new(colors)];
    while boxes.len() < target {
        // First box, then first channel, with the strictly largest range
        let mut longest: Option<(usize, usize, f32)> = None;
        for (b, color_box) in boxes.iter().enumerate() {
            for axis in 0..layout.channels() {
                let range = color_box.range(axis);
                if longest.map_or(true, |(_, _, best)| range > best) {
                    longest = Some((b, axis, range));
                }
            }
        }

        let Some((index, axis, range)) = longest else {
            break;
        };
        if range <= 0.0 {
            // Every box is a single color
            break;
        }

        tracing::trace!(index, axis, range, boxes = boxes.len(), "split box");
        let (lower, upper) = boxes.remove(index).split(axis);
        boxes.insert(index, upper);
        boxes.insert(index, lower);
    }

    let averages: Vec<Color> = boxes.iter().map(|b| b.average(layout)).collect();
    let palette = Palette::new(averages)?;
    if palette.len() < target {
        tracing::warn!(
            requested = target,
            produced = palette.len(),
            "image has fewer distinct colors than requested"
        );
    }

    Ok(MedianCutPalette {
        palette,
        requested: target,
    })
}
