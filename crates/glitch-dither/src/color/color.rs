//! The [`Color`] sample type.

use std::str::FromStr;

use super::layout::ChannelLayout;
use crate::palette::ParseColorError;

/// Clamp a working channel value to `0..=255` and truncate it to a byte.
///
/// This is the only place floating-point channels become integers.
#[inline]
pub fn channel_to_u8(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0) as u8
}

/// A single color sample.
///
/// Channels are stored as `f32` so that quantization error can accumulate
/// beyond `0..=255` before it is clamped.
///
/// # Example
///
/// ```
/// use glitch_dither::Color;
///
/// let a = Color::from_u8(0, 0, 0);
/// let b = Color::from_u8(3, 4, 0);
/// assert_eq!(a.distance_squared(&b), 25.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Red, green, blue.
    Rgb([f32; 3]),
    /// Luminance.
    Mono([f32; 1]),
}

impl Color {
    /// Create an RGB color from float channels.
    #[inline]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color::Rgb([r, g, b])
    }

    /// Create a single-channel color.
    #[inline]
    pub fn mono(value: f32) -> Self {
        Color::Mono([value])
    }

    /// Create an RGB color from 8-bit channels.
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb([r as f32, g as f32, b as f32])
    }

    /// Create an RGB color from a byte array `[R, G, B]`.
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// All-zero color of the given layout.
    #[inline]
    pub fn zeroed(layout: ChannelLayout) -> Self {
        match layout {
            ChannelLayout::Rgb => Color::Rgb([0.0; 3]),
            ChannelLayout::Mono => Color::Mono([0.0]),
        }
    }

    /// Build a color from a channel slice whose length matches `layout`.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `channels.len() == layout.channels()`.
    #[inline]
    pub fn from_channels(layout: ChannelLayout, channels: &[f32]) -> Self {
        debug_assert_eq!(channels.len(), layout.channels());
        match layout {
            ChannelLayout::Rgb => Color::Rgb([channels[0], channels[1], channels[2]]),
            ChannelLayout::Mono => Color::Mono([channels[0]]),
        }
    }

    /// Channel layout of this color.
    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        match self {
            Color::Rgb(_) => ChannelLayout::Rgb,
            Color::Mono(_) => ChannelLayout::Mono,
        }
    }

    /// Channel values as a slice (3 for RGB, 1 for mono).
    #[inline]
    pub fn channels(&self) -> &[f32] {
        match self {
            Color::Rgb(c) => c,
            Color::Mono(c) => c,
        }
    }

    /// Mutable channel values.
    #[inline]
    pub fn channels_mut(&mut self) -> &mut [f32] {
        match self {
            Color::Rgb(c) => c,
            Color::Mono(c) => c,
        }
    }

    /// Squared Euclidean distance across all channels.
    ///
    /// Both colors are expected to share a layout; callers validate this at
    /// the buffer/palette boundary.
    #[inline]
    pub fn distance_squared(&self, other: &Color) -> f32 {
        debug_assert_eq!(self.layout(), other.layout());
        self.channels()
            .iter()
            .zip(other.channels())
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum()
    }

    /// Apply `f` to every channel.
    #[inline]
    pub fn map(mut self, f: impl Fn(f32) -> f32) -> Self {
        for c in self.channels_mut() {
            *c = f(*c);
        }
        self
    }

    /// Clamp every channel to `0.0..=255.0`.
    #[inline]
    pub fn clamped(self) -> Self {
        self.map(|c| c.clamp(0.0, 255.0))
    }

    /// Add the same bias to every channel.
    #[inline]
    pub fn offset(self, bias: f32) -> Self {
        self.map(|c| c + bias)
    }

    /// Integer-packed exact key.
    ///
    /// RGB colors pack as `(r << 16) | (g << 8) | b`; mono colors use the
    /// value itself. Channels are clamped and truncated first.
    #[inline]
    pub fn to_key(&self) -> u32 {
        match self {
            Color::Rgb([r, g, b]) => {
                ((channel_to_u8(*r) as u32) << 16)
                    | ((channel_to_u8(*g) as u32) << 8)
                    | channel_to_u8(*b) as u32
            }
            Color::Mono([v]) => channel_to_u8(*v) as u32,
        }
    }

    /// ITU-R 601-2 luma: `r*299/1000 + g*587/1000 + b*114/1000`.
    #[inline]
    pub fn luma(&self) -> f32 {
        match self {
            Color::Rgb([r, g, b]) => (r * 299.0 + g * 587.0 + b * 114.0) / 1000.0,
            Color::Mono([v]) => *v,
        }
    }

    /// Convert to a single-channel color via [`luma`](Self::luma).
    #[inline]
    pub fn to_mono(self) -> Self {
        Color::Mono([self.luma()])
    }

    /// Convert to RGB, replicating a mono value across all three channels.
    #[inline]
    pub fn to_rgb(self) -> Self {
        match self {
            Color::Rgb(_) => self,
            Color::Mono([v]) => Color::Rgb([v, v, v]),
        }
    }

    /// Clamped, truncated bytes; mono values are replicated.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 3] {
        match self {
            Color::Rgb([r, g, b]) => [channel_to_u8(*r), channel_to_u8(*g), channel_to_u8(*b)],
            Color::Mono([v]) => {
                let v = channel_to_u8(*v);
                [v, v, v]
            }
        }
    }

    /// Format as `#rrggbb`. Mono values print as the equivalent grey.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse an RGB color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitively,
    /// with surrounding whitespace trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand digits expand by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
