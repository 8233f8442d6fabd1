#![allow(clippy::module_inception)]

//! glitch-dither: palette reduction and dithering for raster images
//!
//! This library reduces an image to a small fixed palette and approximates
//! the discarded color through dithering. It works on in-memory
//! [`PixelBuffer`]s; decoding and encoding files is left to the caller.
//!
//! # Quick Start
//!
//! ```
//! use glitch_dither::{median_cut, Dither, DitherMode, FloydSteinberg, PixelBuffer};
//!
//! let bytes: Vec<u8> = (0..4 * 4 * 3).map(|i| (i * 5) as u8).collect();
//! let image = PixelBuffer::from_rgb8(4, 4, &bytes).unwrap();
//!
//! let palette = median_cut(&image, 4).unwrap().into_palette();
//! let out = FloydSteinberg.dither(&image, DitherMode::Rgb(&palette)).unwrap();
//! assert!(out.pixels().all(|p| palette.colors().contains(&p)));
//! ```
//!
//! # Components
//!
//! - [`find_nearest`]: squared-Euclidean nearest palette entry, lowest index
//!   on ties. Every quantizing operation goes through it.
//! - [`median_cut`]: palette building by recursive box splitting over the
//!   image's distinct colors.
//! - [`FloydSteinberg`]: sequential error diffusion.
//! - [`Bayer`]: ordered dithering with 2×2, 3×3, 4×4 or 8×8 matrices,
//!   parallel across rows.
//! - [`ColorRemapper`]: exact positional substitution between two palettes
//!   of equal length.
//! - [`zx::attribute_dither`]: two colors per 8×8 cell from the ZX Spectrum
//!   banks.
//!
//! Palettes come from [`median_cut`], the generators ([`mono_palette`],
//! [`hue_palette`], [`gradient_palette`] and the random hue schemes), the
//! built-in [`Preset`]s, or hex strings via [`Palette::from_hex`].
//!
//! # Channel Layouts
//!
//! Buffers and palettes are either RGB or single-channel ([`ChannelLayout`]).
//! Operands of one call must agree; mismatches fail with
//! [`DitherError::LayoutMismatch`] instead of being converted silently.
//! Use [`PixelBuffer::to_luma`] and [`Palette::to_luma`] to convert.

pub mod buffer;
pub mod color;
pub mod dither;
pub mod error;
pub mod palette;
pub mod quantize;
pub mod remap;
pub mod zx;


pub use buffer::PixelBuffer;
pub use color::{ChannelLayout, Color};
pub use dither::{Bayer, Dither, DitherMode, FloydSteinberg, MatrixSize};
pub use error::DitherError;
pub use palette::{
    find_nearest, gradient_palette, hue_palette, hue_palette_from, mono_palette, Palette,
    PaletteError, ParseColorError, Preset,
};
pub use quantize::{median_cut, recolour, MedianCutPalette};
pub use remap::{remap, ColorRemapper};
