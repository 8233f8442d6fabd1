//! Color values and channel layouts
//!
//! Every sample in the crate is a [`Color`]: either three RGB channels or a
//! single luminance channel, stored as `f32` in the nominal `0.0..=255.0`
//! domain. Values may leave that domain while error is being diffused; they
//! are clamped and truncated to integers only when written out.
//!
//! # Example
//!
//! ```
//! use glitch_dither::{ChannelLayout, Color};
//!
//! let orange: Color = "#ff8000".parse().unwrap();
//! assert_eq!(orange.layout(), ChannelLayout::Rgb);
//! assert_eq!(orange.to_key(), 0xff8000);
//!
//! let grey = orange.to_mono();
//! assert_eq!(grey.layout(), ChannelLayout::Mono);
//! ```

mod color;
mod layout;

pub use color::{channel_to_u8, Color};
pub use layout::ChannelLayout;
