//! Unified error type for the glitch-dither public API.
//!
//! [`DitherError`] wraps all error types from the crate into a single enum
//! for convenient `?` propagation in application code.

use thiserror::Error;

use crate::color::ChannelLayout;
use crate::palette::{PaletteError, ParseColorError};

/// Unified error type for the glitch-dither public API.
///
/// Every failure is deterministic: retrying the same call with the same
/// inputs fails the same way. A failed call never returns partial output.
///
/// A median-cut that cannot reach its target size is *not* an error; see
/// [`MedianCutPalette`](crate::MedianCutPalette).
///
/// # Example
///
/// ```
/// use glitch_dither::{DitherError, Palette};
///
/// fn create_palette() -> Result<Palette, DitherError> {
///     let palette = Palette::from_hex(&["#000000", "#FFFFFF"])?;
///     Ok(palette)
/// }
/// ```
#[derive(Debug, Error)]
pub enum DitherError {
    /// Palette is empty, mixes layouts, or has the wrong length for the call
    #[error("invalid palette: {0}")]
    InvalidPalette(#[from] PaletteError),

    /// A pixel's exact value does not appear in the source palette of a remap
    #[error("pixel ({x}, {y}) has color key {key:#08x} which is not in the source palette")]
    UnknownColor {
        /// Pixel column
        x: usize,
        /// Pixel row
        y: usize,
        /// Integer-packed color key of the pixel
        key: u32,
    },

    /// Sample count does not match `width * height * channels`
    #[error("dimension mismatch: expected {expected} samples, found {found}")]
    DimensionMismatch {
        /// Samples required by the declared shape
        expected: usize,
        /// Samples supplied
        found: usize,
    },

    /// Operands disagree on channel arity
    #[error("channel layout mismatch: expected {expected}, found {found}")]
    LayoutMismatch {
        /// Layout required by the operation
        expected: ChannelLayout,
        /// Layout supplied
        found: ChannelLayout,
    },

    /// Threshold matrix size other than 2, 3, 4 or 8
    #[error("unsupported threshold matrix size {0} (expected 2, 3, 4 or 8)")]
    UnsupportedMatrix(usize),

    /// A palette of zero colors was requested
    #[error("invalid target palette size {0}")]
    InvalidTargetSize(usize),

    /// Image has no pixels
    #[error("image has no pixels")]
    EmptyImage,
}

impl From<ParseColorError> for DitherError {
    fn from(err: ParseColorError) -> Self {
        DitherError::InvalidPalette(PaletteError::ParseColor(err))
    }
}
