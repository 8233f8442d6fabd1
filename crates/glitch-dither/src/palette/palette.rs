//! Palette struct with layout validation and nearest-color matching.

use super::error::PaletteError;
use super::nearest::nearest_unchecked;
use crate::color::{ChannelLayout, Color};

/// An ordered, non-empty list of output colors.
///
/// All entries share one [`ChannelLayout`]. Duplicate entries are legal;
/// nearest-color matching then always resolves to the first of them.
///
/// Order does not affect matching, but it does define the positional
/// correspondence used by [`remap`](crate::remap).
///
/// # Example
///
/// ```
/// use glitch_dither::{Color, Palette};
///
/// let palette = Palette::from_rgb8(&[[0, 0, 0], [255, 255, 255]]).unwrap();
/// assert_eq!(palette.len(), 2);
///
/// let (idx, _) = palette.find_nearest(&Color::from_u8(30, 30, 30));
/// assert_eq!(idx, 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
    layout: ChannelLayout,
}

impl Palette {
    /// Create a palette from colors.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::MixedLayouts`] if entries disagree on channel layout
    pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
        let layout = match colors.first() {
            Some(first) => first.layout(),
            None => return Err(PaletteError::EmptyPalette),
        };

        if let Some((index, bad)) = colors
            .iter()
            .enumerate()
            .find(|(_, c)| c.layout() != layout)
        {
            return Err(PaletteError::MixedLayouts {
                index,
                expected: layout,
                found: bad.layout(),
            });
        }

        Ok(Self { colors, layout })
    }

    /// Create an RGB palette from byte triplets.
    pub fn from_rgb8(colors: &[[u8; 3]]) -> Result<Self, PaletteError> {
        Self::new(colors.iter().map(|&c| Color::from_bytes(c)).collect())
    }

    /// RGB palette from a non-empty built-in table.
    pub(crate) fn from_rgb8_table(colors: &'static [[u8; 3]]) -> Self {
        debug_assert!(!colors.is_empty());
        Self {
            colors: colors.iter().map(|&c| Color::from_bytes(c)).collect(),
            layout: ChannelLayout::Rgb,
        }
    }

    /// Create an RGB palette from hex color strings.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`.
    ///
    /// # Example
    ///
    /// ```
    /// use glitch_dither::{Color, Palette};
    ///
    /// let palette = Palette::from_hex(&["#000", "#FFFFFF"]).unwrap();
    /// assert_eq!(palette.get(1), Color::from_u8(255, 255, 255));
    /// ```
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .map(|s| s.parse::<Color>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Channel layout shared by every entry.
    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Entry at `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> Color {
        self.colors[idx]
    }

    /// All entries, in order.
    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Single-channel copy of this palette, converting entries by luma.
    pub fn to_luma(&self) -> Palette {
        Self {
            colors: self.colors.iter().map(|c| c.to_mono()).collect(),
            layout: ChannelLayout::Mono,
        }
    }

    /// Entries formatted as `#rrggbb`.
    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(Color::to_hex).collect()
    }

    /// Find the entry nearest to `color` by squared Euclidean distance.
    ///
    /// Returns `(index, squared_distance)`; exact ties keep the lowest index.
    /// `color` must have the palette's layout.
    #[inline]
    pub fn find_nearest(&self, color: &Color) -> (usize, f32) {
        debug_assert_eq!(color.layout(), self.layout);
        nearest_unchecked(color, &self.colors)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}
