//! PNG decoding and encoding to and from [`PixelBuffer`].
//!
//! Decoding expands palettes and low bit depths and strips 16-bit samples
//! to 8 bits. Alpha is composited against white. Grayscale images become
//! single-channel buffers; everything else becomes RGB.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use glitch_dither::{ChannelLayout, PixelBuffer};

use crate::error::AppError;

/// Composite one channel over white.
#[inline]
fn over_white(value: u8, alpha: u8) -> u8 {
    let a = alpha as u16;
    ((value as u16 * a + 255 * (255 - a)) / 255) as u8
}

/// Decode a PNG stream.
pub fn decode_png<R: Read>(reader: R) -> Result<PixelBuffer, AppError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let data = &buf[..info.buffer_size()];
    let width = info.width as usize;
    let height = info.height as usize;

    if info.bit_depth != png::BitDepth::Eight {
        return Err(AppError::UnsupportedPng(format!(
            "bit depth {:?} after expansion",
            info.bit_depth
        )));
    }

    let buffer = match info.color_type {
        png::ColorType::Grayscale => PixelBuffer::from_luma8(width, height, data)?,
        png::ColorType::GrayscaleAlpha => {
            let luma: Vec<u8> = data.chunks_exact(2).map(|p| over_white(p[0], p[1])).collect();
            PixelBuffer::from_luma8(width, height, &luma)?
        }
        png::ColorType::Rgb => PixelBuffer::from_rgb8(width, height, data)?,
        png::ColorType::Rgba => {
            let rgb: Vec<u8> = data
                .chunks_exact(4)
                .flat_map(|p| {
                    if p[3] == 255 {
                        [p[0], p[1], p[2]]
                    } else {
                        [over_white(p[0], p[3]), over_white(p[1], p[3]), over_white(p[2], p[3])]
                    }
                })
                .collect();
            PixelBuffer::from_rgb8(width, height, &rgb)?
        }
        png::ColorType::Indexed => {
            return Err(AppError::UnsupportedPng(
                "indexed color was not expanded".to_string(),
            ))
        }
    };

    tracing::debug!(width, height, layout = %buffer.layout(), "decoded png");
    Ok(buffer)
}

/// Read and decode a PNG file.
pub fn read_png(path: &Path) -> Result<PixelBuffer, AppError> {
    let file = File::open(path)?;
    decode_png(BufReader::new(file))
}

/// Encode `buffer` as an 8-bit RGB or grayscale PNG.
pub fn encode_png<W: Write>(writer: W, buffer: &PixelBuffer) -> Result<(), AppError> {
    let color_type = match buffer.layout() {
        ChannelLayout::Rgb => png::ColorType::Rgb,
        ChannelLayout::Mono => png::ColorType::Grayscale,
    };
    let width = u32::try_from(buffer.width())
        .map_err(|_| AppError::UnsupportedPng(format!("width {} too large", buffer.width())))?;
    let height = u32::try_from(buffer.height())
        .map_err(|_| AppError::UnsupportedPng(format!("height {} too large", buffer.height())))?;

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&buffer.to_bytes())?;
    writer.finish()?;
    Ok(())
}

/// Encode `buffer` to a PNG file at `path`.
pub fn write_png(path: &Path, buffer: &PixelBuffer) -> Result<(), AppError> {
    let file = File::create(path)?;
    encode_png(BufWriter::new(file), buffer)?;
    tracing::debug!(path = %path.display(), "wrote png");
    Ok(())
}
