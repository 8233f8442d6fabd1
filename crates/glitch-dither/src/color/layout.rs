use std::fmt;

/// Channel arity of a [`Color`](super::Color), [`PixelBuffer`](crate::PixelBuffer)
/// or [`Palette`](crate::Palette).
///
/// The arity is fixed for the lifetime of a buffer or palette, and every
/// binary operation requires both operands to agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Red, green and blue channels.
    Rgb,
    /// A single luminance channel.
    Mono,
}

impl ChannelLayout {
    /// Number of channels per sample.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            ChannelLayout::Rgb => 3,
            ChannelLayout::Mono => 1,
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelLayout::Rgb => write!(f, "rgb"),
            ChannelLayout::Mono => write!(f, "mono"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_counts() {
        assert_eq!(ChannelLayout::Rgb.channels(), 3);
        assert_eq!(ChannelLayout::Mono.channels(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(ChannelLayout::Rgb.to_string(), "rgb");
        assert_eq!(ChannelLayout::Mono.to_string(), "mono");
    }
}
