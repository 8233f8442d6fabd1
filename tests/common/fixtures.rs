//! Test images and palettes.

use glitch_dither::{Palette, PixelBuffer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Config with two named palettes
pub const CONFIG_YAML: &str = r##"
palettes:
  duo: ["#1a1c2c", "#f4f4f4"]
  inks: ["#2b0f54", "#ab1f65", "#ff4f69", "#fff7f8"]
defaults:
  method: bayer
  matrix: 2
  colors: 4
"##;

/// Horizontal grey ramp, black on the left and white on the right
pub fn grey_ramp(width: usize, height: usize) -> PixelBuffer {
    let bytes: Vec<u8> = (0..height)
        .flat_map(|_| {
            (0..width).flat_map(move |x| {
                let v = (x * 255 / (width - 1)) as u8;
                [v, v, v]
            })
        })
        .collect();
    PixelBuffer::from_rgb8(width, height, &bytes).unwrap()
}

/// Seeded RGB noise
pub fn noise(width: usize, height: usize, seed: u64) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let bytes: Vec<u8> = (0..width * height * 3).map(|_| rng.gen::<u8>()).collect();
    PixelBuffer::from_rgb8(width, height, &bytes).unwrap()
}

/// Black and white
pub fn black_white() -> Palette {
    Palette::from_rgb8(&[[0, 0, 0], [255, 255, 255]]).unwrap()
}

/// Four-level grey
pub fn greys4() -> Palette {
    Palette::from_rgb8(&[[0, 0, 0], [85, 85, 85], [170, 170, 170], [255, 255, 255]]).unwrap()
}
