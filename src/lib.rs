//! Glitches - palette reduction and retro dithering for raster images
//!
//! The command-line front end over `glitch-dither`: PNG input and output,
//! YAML configuration, palette specifications and dither jobs.
//! This library exposes modules for integration testing.

pub mod error;
pub mod image_io;
pub mod models;
pub mod palette_spec;
pub mod pipeline;
