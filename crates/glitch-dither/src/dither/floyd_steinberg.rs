//! Floyd-Steinberg error diffusion dithering algorithm.

use crate::buffer::PixelBuffer;
use crate::error::DitherError;

use super::{dither_with_kernel, Dither, DitherMode, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion dithering.
///
/// The classic error diffusion algorithm, distributing 100% of quantization
/// error to 4 neighboring pixels:
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// Weights: 7/16 right, 3/16 bottom-left, 5/16 bottom, 1/16 bottom-right.
/// Neighbors outside the image are skipped without renormalizing the rest.
///
/// Each pixel depends on the error left by every pixel before it in raster
/// order, so this pass is strictly sequential.
///
/// # Example
///
/// ```
/// use glitch_dither::{Dither, DitherMode, FloydSteinberg, PixelBuffer};
///
/// let image = PixelBuffer::from_luma8(4, 1, &[100, 100, 100, 100]).unwrap();
/// let out = FloydSteinberg.dither(&image, DitherMode::Binary).unwrap();
/// assert_eq!(out.to_bytes(), vec![0, 255, 0, 0]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(&self, image: &PixelBuffer, mode: DitherMode<'_>) -> Result<PixelBuffer, DitherError> {
        mode.validate(image)?;
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            colors = mode.palette_ref().map(|p| p.len()),
            "floyd-steinberg"
        );
        Ok(dither_with_kernel(image, &mode, &FLOYD_STEINBERG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ChannelLayout, Color};
    use crate::palette::{mono_palette, Palette};
    use pretty_assertions::assert_eq;

    fn black_white() -> Palette {
        Palette::from_rgb8(&[[0, 0, 0], [255, 255, 255]]).unwrap()
    }

    #[test]
    fn test_floyd_steinberg_mixes_mid_grey() {
        let palette = black_white();
        let image = PixelBuffer::filled(8, 8, Color::from_u8(128, 128, 128));
        let out = FloydSteinberg.dither(&image, DitherMode::Rgb(&palette)).unwrap();

        let white = out.pixels().filter(|p| *p == Color::from_u8(255, 255, 255)).count();
        let black = out.pixels().filter(|p| *p == Color::from_u8(0, 0, 0)).count();
        assert_eq!(white + black, 64);
        assert!(white > 16 && black > 16, "white={} black={}", white, black);
    }

    #[test]
    fn test_right_neighbor_gets_seven_sixteenths() {
        // 100 -> 0, then 100 + 43.75 -> 255
        let image = PixelBuffer::from_luma8(2, 1, &[100, 100]).unwrap();
        let out = FloydSteinberg.dither(&image, DitherMode::Binary).unwrap();
        assert_eq!(out.to_bytes(), vec![0, 255]);
    }

    #[test]
    fn test_edge_weights_are_not_renormalized() {
        // Single column: only 5/16 of 90 reaches the pixel below
        let image = PixelBuffer::from_luma8(1, 2, &[90, 90]).unwrap();
        let out = FloydSteinberg.dither(&image, DitherMode::Binary).unwrap();
        assert_eq!(out.to_bytes(), vec![0, 0]);
    }

    #[test]
    fn test_no_wraparound_between_rows() {
        // (0, 1) gets 3/16 of 128 from (1, 0); wrapping the 7/16 share
        // there as well would push it over the threshold
        let image = PixelBuffer::from_luma8(2, 2, &[0, 128, 100, 0]).unwrap();
        let out = FloydSteinberg.dither(&image, DitherMode::Binary).unwrap();
        assert_eq!(out.to_bytes(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_mono_palette_mode() {
        let palette = mono_palette(4).unwrap().to_luma();
        let image = PixelBuffer::from_luma8(3, 1, &[0, 85, 255]).unwrap();
        let out = FloydSteinberg.dither(&image, DitherMode::Mono(&palette)).unwrap();
        assert_eq!(out.to_bytes(), vec![0, 85, 255]);
    }

    #[test]
    fn test_output_is_palette_only() {
        let palette = Palette::from_rgb8(&[[255, 0, 0], [0, 0, 255], [20, 200, 20]]).unwrap();
        let bytes: Vec<u8> = (0..16 * 16 * 3).map(|i| ((i * 37) % 256) as u8).collect();
        let image = PixelBuffer::from_rgb8(16, 16, &bytes).unwrap();
        let out = FloydSteinberg.dither(&image, DitherMode::Rgb(&palette)).unwrap();
        for p in out.pixels() {
            assert!(palette.colors().contains(&p), "{:?} not in palette", p);
        }
    }

    #[test]
    fn test_source_is_untouched() {
        let palette = black_white();
        let image = PixelBuffer::filled(3, 3, Color::from_u8(90, 90, 90));
        let copy = image.clone();
        FloydSteinberg.dither(&image, DitherMode::Rgb(&palette)).unwrap();
        assert_eq!(image, copy);
    }

    #[test]
    fn test_layout_mismatch() {
        let palette = black_white();
        let image = PixelBuffer::new(2, 2, ChannelLayout::Mono);
        assert!(matches!(
            FloydSteinberg.dither(&image, DitherMode::Rgb(&palette)),
            Err(DitherError::LayoutMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_image() {
        let palette = black_white();
        let image = PixelBuffer::new(0, 0, ChannelLayout::Rgb);
        let out = FloydSteinberg.dither(&image, DitherMode::Rgb(&palette)).unwrap();
        assert!(out.is_empty());
    }
}
