//! Palette building and undithered quantization.

mod median_cut;
mod recolour;

pub use median_cut::{median_cut, MedianCutPalette};
pub use recolour::recolour;
