//! Palette types and utilities
//!
//! This module provides the [`Palette`] type, the nearest-color matcher every
//! quantizing operation is built on, deterministic palette generators, the
//! built-in preset tables, and the error types for parsing and validation.

mod error;
mod generate;
mod nearest;
mod palette;
mod presets;

pub use error::{PaletteError, ParseColorError};
pub use generate::{
    analogous_four, complementary_four, complementary_pairs, gradient_palette, hsv_to_rgb,
    hue_palette, hue_palette_from, mono_palette, random_hues, rgb_to_hsv,
    split_complementary_four,
};
pub use nearest::{find_nearest, find_nearest_excluding};
pub use palette::Palette;
pub use presets::{Preset, CGA, GAMEBOY, ZX_BASIC, ZX_BRIGHT, ZX_FULL};
