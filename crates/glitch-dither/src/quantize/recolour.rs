//! Plain nearest-color recolouring without dithering.

use crate::buffer::PixelBuffer;
use crate::error::DitherError;
use crate::palette::Palette;

/// Replace every pixel by its nearest palette entry.
///
/// No error is propagated, so flat regions band instead of dithering.
///
/// # Errors
///
/// [`DitherError::LayoutMismatch`] if the palette and buffer layouts differ.
pub fn recolour(buffer: &PixelBuffer, palette: &Palette) -> Result<PixelBuffer, DitherError> {
    buffer.ensure_layout(palette.layout())?;
    tracing::debug!(
        width = buffer.width(),
        height = buffer.height(),
        colors = palette.len(),
        "recolour"
    );

    let mut output = PixelBuffer::new(buffer.width(), buffer.height(), buffer.layout());
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let (idx, _) = palette.find_nearest(&buffer.get(x, y).clamped());
            output.set(x, y, palette.get(idx));
        }
    }
    Ok(output)
}
