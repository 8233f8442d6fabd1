//! Nearest-color matching by squared Euclidean distance.
//!
//! This linear scan is the per-pixel hot path of every quantizing operation:
//! `O(palette size)` per call. Palettes here are small (2-256 entries), so a
//! spatial index such as a k-d tree is left as a later optimization.

use crate::color::Color;
use crate::error::DitherError;
use crate::palette::PaletteError;

/// Scan `colors` for the entry closest to `color`.
///
/// Strict `<` keeps the lowest index on exact ties. `colors` must be
/// non-empty and share `color`'s layout.
#[inline]
pub(crate) fn nearest_unchecked(color: &Color, colors: &[Color]) -> (usize, f32) {
    let mut best_idx = 0;
    let mut best_dist = f32::INFINITY;

    for (i, candidate) in colors.iter().enumerate() {
        let dist = color.distance_squared(candidate);
        if dist < best_dist {
            best_dist = dist;
            best_idx = i;
        }
    }

    (best_idx, best_dist)
}

fn check_layouts(color: &Color, colors: &[Color]) -> Result<(), DitherError> {
    if colors.is_empty() {
        return Err(PaletteError::EmptyPalette.into());
    }
    if let Some(bad) = colors.iter().find(|c| c.layout() != color.layout()) {
        return Err(DitherError::LayoutMismatch {
            expected: color.layout(),
            found: bad.layout(),
        });
    }
    Ok(())
}

/// Find the palette entry closest to `color`.
///
/// Returns `(index, squared_distance)`. On exact ties the lowest index wins.
///
/// # Errors
///
/// - [`DitherError::InvalidPalette`] if `colors` is empty
/// - [`DitherError::LayoutMismatch`] if an entry's layout differs from `color`'s
///
/// # Example
///
/// ```
/// use glitch_dither::{find_nearest, Color};
///
/// let colors = [Color::from_u8(0, 0, 0), Color::from_u8(255, 255, 255)];
/// let (idx, dist) = find_nearest(&Color::from_u8(200, 200, 200), &colors).unwrap();
/// assert_eq!(idx, 1);
/// assert_eq!(dist, 3.0 * 55.0 * 55.0);
/// ```
pub fn find_nearest(color: &Color, colors: &[Color]) -> Result<(usize, f32), DitherError> {
    check_layouts(color, colors)?;
    Ok(nearest_unchecked(color, colors))
}

/// Like [`find_nearest`], but never returns index `exclude`.
///
/// Returns `Ok(None)` when `exclude` is the only entry.
pub fn find_nearest_excluding(
    color: &Color,
    colors: &[Color],
    exclude: usize,
) -> Result<Option<(usize, f32)>, DitherError> {
    check_layouts(color, colors)?;

    let mut best: Option<(usize, f32)> = None;
    for (i, candidate) in colors.iter().enumerate() {
        if i == exclude {
            continue;
        }
        let dist = color.distance_squared(candidate);
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }
    Ok(best)
}
