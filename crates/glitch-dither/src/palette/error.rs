//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use std::num::ParseIntError;

use thiserror::Error;

use crate::color::ChannelLayout;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for palette validation.
///
/// Returned when a palette is empty, mixes channel layouts, or does not pair
/// up with another palette of the same length.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// An entry's layout differs from the first entry's
    #[error("palette entry {index} is {found}, expected {expected}")]
    MixedLayouts {
        /// Index of the offending entry
        index: usize,
        /// Layout of the first entry
        expected: ChannelLayout,
        /// Layout of the offending entry
        found: ChannelLayout,
    },
    /// Source and target palette lengths don't match
    #[error("palette length mismatch: source has {source_len} colors, target has {target_len}")]
    LengthMismatch {
        /// Length of the source palette
        source_len: usize,
        /// Length of the target palette
        target_len: usize,
    },
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
