//! Ordered dithering with Bayer threshold matrices.
//!
//! Every pixel receives a bias that depends only on its position modulo the
//! matrix side, so rows are dithered in parallel and the result is
//! identical to a sequential pass.

use std::fmt;

use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::error::DitherError;

use super::{Dither, DitherMode};

#[rustfmt::skip]
const BAYER_2: [u8; 4] = [
    1, 3,
    4, 2,
];

#[rustfmt::skip]
const BAYER_3: [u8; 9] = [
    3, 7, 4,
    6, 1, 9,
    2, 8, 5,
];

#[rustfmt::skip]
const BAYER_4: [u8; 16] = [
     1,  9,  3, 11,
    13,  5, 15,  7,
     4, 12,  2, 10,
    16,  8, 14,  6,
];

#[rustfmt::skip]
const BAYER_8: [u8; 64] = [
     1, 49, 13, 61,  4, 52, 16, 64,
    33, 17, 45, 29, 36, 20, 48, 32,
     9, 57,  5, 53, 12, 60,  8, 56,
    41, 25, 37, 21, 44, 28, 40, 24,
     3, 51, 15, 63,  2, 50, 14, 62,
    35, 19, 47, 31, 34, 18, 46, 30,
    11, 59,  7, 55, 10, 58,  6, 54,
    43, 27, 39, 23, 42, 26, 38, 22,
];

/// Side length of a threshold matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatrixSize {
    Two,
    Three,
    #[default]
    Four,
    Eight,
}

impl MatrixSize {
    pub const ALL: [MatrixSize; 4] = [
        MatrixSize::Two,
        MatrixSize::Three,
        MatrixSize::Four,
        MatrixSize::Eight,
    ];

    #[inline]
    pub const fn side(self) -> usize {
        match self {
            MatrixSize::Two => 2,
            MatrixSize::Three => 3,
            MatrixSize::Four => 4,
            MatrixSize::Eight => 8,
        }
    }

    #[inline]
    pub const fn area(self) -> usize {
        self.side() * self.side()
    }

    /// Rank values `1..=area` in row-major order.
    pub fn ranks(self) -> &'static [u8] {
        match self {
            MatrixSize::Two => &BAYER_2,
            MatrixSize::Three => &BAYER_3,
            MatrixSize::Four => &BAYER_4,
            MatrixSize::Eight => &BAYER_8,
        }
    }

    /// Rank at image position `(x, y)`, tiling the matrix.
    #[inline]
    pub fn rank(self, x: usize, y: usize) -> u8 {
        let m = self.side();
        self.ranks()[(y % m) * m + x % m]
    }
}

impl TryFrom<usize> for MatrixSize {
    type Error = DitherError;

    fn try_from(side: usize) -> Result<Self, Self::Error> {
        match side {
            2 => Ok(MatrixSize::Two),
            3 => Ok(MatrixSize::Three),
            4 => Ok(MatrixSize::Four),
            8 => Ok(MatrixSize::Eight),
            other => Err(DitherError::UnsupportedMatrix(other)),
        }
    }
}

impl fmt::Display for MatrixSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.side();
        write!(f, "{m}x{m}")
    }
}

/// Bayer ordered dithering.
///
/// With a palette of `n` entries the level gap is `255 / (n - 1)` and each
/// pixel is offset by `rank * gap / area - gap / 2` on every channel, then
/// clamped and matched to the nearest entry. A single-entry palette gets no
/// offset.
///
/// In [`DitherMode::Binary`] the offset is `rank * 255 / (area + 1)`, and
/// the pixel becomes white when `floor(value / 2)` exceeds 128.
///
/// # Example
///
/// ```
/// use glitch_dither::{Bayer, Dither, DitherMode, MatrixSize, PixelBuffer};
///
/// let image = PixelBuffer::from_luma8(2, 2, &[128; 4]).unwrap();
/// let out = Bayer::new(MatrixSize::Two).dither(&image, DitherMode::Binary).unwrap();
/// assert_eq!(out.to_bytes(), vec![0, 255, 255, 0]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Bayer {
    matrix: MatrixSize,
}

impl Bayer {
    pub fn new(matrix: MatrixSize) -> Self {
        Self { matrix }
    }

    /// Create from a matrix side length.
    ///
    /// # Errors
    ///
    /// [`DitherError::UnsupportedMatrix`] unless `side` is 2, 3, 4 or 8.
    pub fn with_side(side: usize) -> Result<Self, DitherError> {
        Ok(Self::new(MatrixSize::try_from(side)?))
    }

    pub fn matrix(&self) -> MatrixSize {
        self.matrix
    }

    /// Per-rank offsets for `mode`, indexed by `rank - 1`.
    fn biases(&self, mode: &DitherMode<'_>) -> Vec<f32> {
        let area = self.matrix.area() as f32;
        let ranks = 1..=self.matrix.area();
        match mode.palette_ref() {
            Some(palette) => {
                let gap = if palette.len() > 1 {
                    255.0 / (palette.len() - 1) as f32
                } else {
                    0.0
                };
                ranks.map(|r| r as f32 * gap / area - gap / 2.0).collect()
            }
            None => ranks.map(|r| r as f32 * 255.0 / (area + 1.0)).collect(),
        }
    }
}

#[inline]
fn threshold_ordered(value: f32) -> f32 {
    if (value / 2.0).floor() <= 128.0 {
        0.0
    } else {
        255.0
    }
}

impl Dither for Bayer {
    fn dither(&self, image: &PixelBuffer, mode: DitherMode<'_>) -> Result<PixelBuffer, DitherError> {
        mode.validate(image)?;
        let width = image.width();
        let height = image.height();
        let mut output = PixelBuffer::new(width, height, image.layout());
        if width == 0 || height == 0 {
            return Ok(output);
        }

        tracing::debug!(
            width,
            height,
            matrix = %self.matrix,
            colors = mode.palette_ref().map(|p| p.len()),
            "bayer"
        );

        let biases = self.biases(&mode);
        let matrix = self.matrix;
        let channels = image.layout().channels();

        output
            .samples_mut()
            .par_chunks_mut(width * channels)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, out) in row.chunks_exact_mut(channels).enumerate() {
                    let bias = biases[matrix.rank(x, y) as usize - 1];
                    let biased = image.get(x, y).offset(bias);
                    let quantized: Color = match mode.palette_ref() {
                        Some(palette) => palette.get(palette.find_nearest(&biased.clamped()).0),
                        None => biased.map(threshold_ordered),
                    };
                    out.copy_from_slice(quantized.channels());
                }
            });

        Ok(output)
    }
}
