//! Assertion helpers for tests.

use glitch_dither::{Color, Palette, PixelBuffer};
use pretty_assertions::assert_eq;

/// Assert every pixel of `buffer` is an entry of `palette`
pub fn assert_only_palette_colors(buffer: &PixelBuffer, palette: &Palette) {
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let pixel = buffer.get(x, y);
            assert!(
                palette.colors().contains(&pixel),
                "Pixel ({}, {}) is {:?}, not in palette {:?}",
                x,
                y,
                pixel,
                palette.to_hex()
            );
        }
    }
}

/// Assert two buffers have the same dimensions
pub fn assert_same_size(a: &PixelBuffer, b: &PixelBuffer) {
    assert_eq!(
        (a.width(), a.height()),
        (b.width(), b.height()),
        "Buffer sizes differ"
    );
}

/// Count pixels equal to `color`
pub fn count_color(buffer: &PixelBuffer, color: Color) -> usize {
    buffer.pixels().filter(|p| *p == color).count()
}
