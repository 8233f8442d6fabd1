//! ZX Spectrum attribute-block rendering.
//!
//! The Spectrum stores two colors (ink and paper) per 8×8 cell, both from
//! the same intensity bank. Each cell's two dominant colors are found by
//! median cut, mapped onto the normal or the bright bank, and the cell is
//! dithered against just those entries.

use crate::buffer::PixelBuffer;
use crate::color::{ChannelLayout, Color};
use crate::dither::{Dither, DitherMode, FloydSteinberg};
use crate::error::DitherError;
use crate::palette::{find_nearest, find_nearest_excluding, Palette, ZX_BASIC, ZX_BRIGHT};
use crate::quantize::median_cut;

/// Side of an attribute cell in pixels.
pub const BLOCK_SIZE: usize = 8;

/// Colors chosen for one attribute cell.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockAttributes {
    /// One or two entries from a single intensity bank.
    pub colors: Palette,
    /// `true` when the bright bank was chosen.
    pub bright: bool,
    /// Summed Euclidean distance from the cell's colors to `colors`.
    pub score: f32,
}

fn bank(table: &[[u8; 3]; 8]) -> Vec<Color> {
    table.iter().map(|&c| Color::from_bytes(c)).collect()
}

/// Match up to two colors onto `bank`; the second may not reuse the
/// first's entry. Returns the matched entries and the summed distance.
fn match_bank(colors: &[Color], bank: &[Color]) -> Result<(Vec<Color>, f32), DitherError> {
    let mut matched = Vec::with_capacity(2);
    let mut score = 0.0;

    let Some(first) = colors.first() else {
        return Ok((matched, score));
    };
    let (first_idx, d) = find_nearest(first, bank)?;
    matched.push(bank[first_idx]);
    score += d.sqrt();

    if let Some(second) = colors.get(1) {
        if let Some((idx, d)) = find_nearest_excluding(second, bank, first_idx)? {
            matched.push(bank[idx]);
            score += d.sqrt();
        }
    }
    Ok((matched, score))
}

/// Pick the attribute colors for one RGB cell.
///
/// The normal bank is used only when it scores strictly lower than the
/// bright bank.
///
/// # Errors
///
/// [`DitherError::EmptyImage`] for an empty cell,
/// [`DitherError::LayoutMismatch`] unless the cell is RGB.
pub fn block_attributes(block: &PixelBuffer) -> Result<BlockAttributes, DitherError> {
    block.ensure_layout(ChannelLayout::Rgb)?;
    let dominant = median_cut(block, 2)?;
    let dominant = dominant.palette().colors();

    let (basic, basic_score) = match_bank(dominant, &bank(&ZX_BASIC))?;
    let (bright, bright_score) = match_bank(dominant, &bank(&ZX_BRIGHT))?;

    let (colors, bright, score) = if basic_score < bright_score {
        (basic, false, basic_score)
    } else {
        (bright, true, bright_score)
    };
    Ok(BlockAttributes {
        colors: Palette::new(colors)?,
        bright,
        score,
    })
}

/// Render `buffer` under the Spectrum's two-colors-per-cell constraint.
///
/// Cells are [`BLOCK_SIZE`] square, starting at the top-left; cells on the
/// right and bottom edges are clipped to the image. Each cell is dithered
/// independently with Floyd-Steinberg, so no error crosses cell borders.
///
/// # Errors
///
/// [`DitherError::LayoutMismatch`] unless `buffer` is RGB.
///
/// # Example
///
/// ```
/// use glitch_dither::{zx, Color, PixelBuffer};
///
/// let image = PixelBuffer::filled(16, 8, Color::from_u8(0, 0, 255));
/// let out = zx::attribute_dither(&image).unwrap();
/// assert_eq!(out, image);
/// ```
pub fn attribute_dither(buffer: &PixelBuffer) -> Result<PixelBuffer, DitherError> {
    buffer.ensure_layout(ChannelLayout::Rgb)?;
    let width = buffer.width();
    let height = buffer.height();
    tracing::debug!(width, height, "zx attribute dither");

    let mut output = PixelBuffer::new(width, height, ChannelLayout::Rgb);
    let mut bright_cells = 0usize;
    for by in (0..height).step_by(BLOCK_SIZE) {
        for bx in (0..width).step_by(BLOCK_SIZE) {
            let block = buffer.crop(bx, by, BLOCK_SIZE, BLOCK_SIZE);
            let attrs = block_attributes(&block)?;
            if attrs.bright {
                bright_cells += 1;
            }
            let dithered = FloydSteinberg.dither(&block, DitherMode::Rgb(&attrs.colors))?;
            output.paste(&dithered, bx, by)?;
        }
    }

    tracing::debug!(bright_cells, "zx attribute dither complete");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_tone(a: [u8; 3], b: [u8; 3]) -> PixelBuffer {
        let mut bytes = Vec::new();
        for i in 0..BLOCK_SIZE * BLOCK_SIZE {
            bytes.extend_from_slice(if i % 2 == 0 { &a } else { &b });
        }
        PixelBuffer::from_rgb8(BLOCK_SIZE, BLOCK_SIZE, &bytes).unwrap()
    }

    #[test]
    fn test_bright_bank_for_saturated_colors() {
        let block = two_tone([0, 0, 255], [255, 0, 0]);
        let attrs = block_attributes(&block).unwrap();
        assert!(attrs.bright);
        assert_eq!(attrs.score, 0.0);
        assert_eq!(
            attrs.colors.colors(),
            &[Color::from_u8(0, 0, 255), Color::from_u8(255, 0, 0)]
        );
    }

    #[test]
    fn test_basic_bank_when_strictly_closer() {
        let block = PixelBuffer::filled(8, 8, Color::from_u8(0, 0xCD, 0xCD));
        let attrs = block_attributes(&block).unwrap();
        assert!(!attrs.bright);
        assert_eq!(attrs.colors.colors(), &[Color::from_u8(0, 0xCD, 0xCD)]);
    }

    #[test]
    fn test_tie_goes_to_bright() {
        // Black is in both banks
        let block = PixelBuffer::filled(8, 8, Color::from_u8(0, 0, 0));
        let attrs = block_attributes(&block).unwrap();
        assert!(attrs.bright);
        assert_eq!(attrs.score, 0.0);
    }

    #[test]
    fn test_second_color_avoids_first_entry() {
        // Both dominant colors sit nearest bright white; the second falls
        // back to its next-best entry
        let block = two_tone([255, 255, 255], [250, 250, 250]);
        let attrs = block_attributes(&block).unwrap();
        assert_eq!(attrs.colors.len(), 2);
        assert_ne!(attrs.colors.get(0), attrs.colors.get(1));
    }

    #[test]
    fn test_exact_bank_colors_pass_through() {
        let image = two_tone([0, 0, 255], [255, 0, 0]);
        let out = attribute_dither(&image).unwrap();
        assert_eq!(out, image);
    }

    #[test]
    fn test_edge_cells_are_clipped() {
        let image = PixelBuffer::filled(10, 9, Color::from_u8(0xCD, 0, 0));
        let out = attribute_dither(&image).unwrap();
        assert_eq!((out.width(), out.height()), (10, 9));
        assert!(out.pixels().all(|p| p == Color::from_u8(0xCD, 0, 0)));
    }

    #[test]
    fn test_at_most_two_colors_per_cell() {
        let bytes: Vec<u8> = (0..16 * 16 * 3).map(|i| ((i * 53) % 256) as u8).collect();
        let image = PixelBuffer::from_rgb8(16, 16, &bytes).unwrap();
        let out = attribute_dither(&image).unwrap();
        for by in (0..16).step_by(8) {
            for bx in (0..16).step_by(8) {
                let mut seen: Vec<Color> = Vec::new();
                for p in out.crop(bx, by, 8, 8).pixels() {
                    if !seen.contains(&p) {
                        seen.push(p);
                    }
                }
                assert!(seen.len() <= 2, "cell ({}, {}) has {:?}", bx, by, seen);
            }
        }
    }

    #[test]
    fn test_requires_rgb() {
        let image = PixelBuffer::new(8, 8, ChannelLayout::Mono);
        assert!(matches!(
            attribute_dither(&image),
            Err(DitherError::LayoutMismatch { .. })
        ));
    }
}
