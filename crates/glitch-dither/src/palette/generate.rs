//! Deterministic palette generators.
//!
//! Generated channels are truncated to integers so that the resulting
//! palettes can serve as exact keys for [`remap`](crate::remap).

use rand::Rng;

use super::palette::Palette;
use crate::color::Color;
use crate::error::DitherError;

/// Linear grey ramp of `n` entries from black.
///
/// The step is `255 / (n - 1)` in integer arithmetic, so the last entry is
/// white only when `n - 1` divides 255. A single-entry ramp is black.
///
/// # Errors
///
/// [`DitherError::InvalidTargetSize`] if `n == 0`.
///
/// # Example
///
/// ```
/// use glitch_dither::{mono_palette, Color};
///
/// let palette = mono_palette(4).unwrap();
/// assert_eq!(palette.colors(), &[
///     Color::from_u8(0, 0, 0),
///     Color::from_u8(85, 85, 85),
///     Color::from_u8(170, 170, 170),
///     Color::from_u8(255, 255, 255),
/// ]);
/// ```
pub fn mono_palette(n: usize) -> Result<Palette, DitherError> {
    if n == 0 {
        return Err(DitherError::InvalidTargetSize(0));
    }
    let step = if n == 1 { 0 } else { 255 / (n - 1) };
    let colors = (0..n)
        .map(|i| {
            let l = (i * step).min(255) as u8;
            Color::from_u8(l, l, l)
        })
        .collect();
    Ok(Palette::new(colors)?)
}

/// Convert RGB (any common scale) to `(hue, saturation, value)`.
///
/// Hue and saturation are in `0.0..1.0`; value keeps the input scale.
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let v = maxc;
    if minc == maxc {
        return (0.0, 0.0, v);
    }
    let span = maxc - minc;
    let s = span / maxc;
    let rc = (maxc - r) / span;
    let gc = (maxc - g) / span;
    let bc = (maxc - b) / span;
    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), s, v)
}

/// Convert `(hue, saturation, value)` to RGB on the scale of `v`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    if s == 0.0 {
        return [v, v, v];
    }
    let sector = (h * 6.0).trunc();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

fn truncated(rgb: [f32; 3]) -> Color {
    Color::rgb(
        rgb[0].clamp(0.0, 255.0).trunc(),
        rgb[1].clamp(0.0, 255.0).trunc(),
        rgb[2].clamp(0.0, 255.0).trunc(),
    )
}

/// One entry per hue in `hues` (each in `0.0..1.0`), at the given
/// `saturation` and `value` (both `0.0..=1.0`).
pub fn hue_palette_from(hues: &[f32], saturation: f32, value: f32) -> Result<Palette, DitherError> {
    let colors = hues
        .iter()
        .map(|&h| truncated(hsv_to_rgb(h, saturation, value * 255.0)))
        .collect();
    Ok(Palette::new(colors)?)
}

/// `n` evenly spaced hues `i / n`, at the given `saturation` and `value`.
///
/// # Errors
///
/// [`DitherError::InvalidTargetSize`] if `n == 0`.
pub fn hue_palette(n: usize, saturation: f32, value: f32) -> Result<Palette, DitherError> {
    if n == 0 {
        return Err(DitherError::InvalidTargetSize(0));
    }
    let hues: Vec<f32> = (0..n).map(|i| i as f32 / n as f32).collect();
    hue_palette_from(&hues, saturation, value)
}

/// `steps` colors interpolated linearly in HSV space from `from` to `to`.
///
/// When `to` is achromatic with hue 0 the hue is held at `from`'s hue, so a
/// fade towards white or grey does not sweep through the color wheel.
///
/// # Errors
///
/// [`DitherError::InvalidTargetSize`] if `steps == 0`.
pub fn gradient_palette(from: Color, to: Color, steps: usize) -> Result<Palette, DitherError> {
    if steps == 0 {
        return Err(DitherError::InvalidTargetSize(0));
    }
    let [fr, fg, fb] = channels3(from);
    let [tr, tg, tb] = channels3(to);
    let (h0, s0, v0) = rgb_to_hsv(fr, fg, fb);
    let (h1, s1, v1) = rgb_to_hsv(tr, tg, tb);

    let h1 = if h1 == 0.0 && s1 == 0.0 { h0 } else { h1 };
    let denom = steps.saturating_sub(1).max(1) as f32;

    let colors = (0..steps)
        .map(|i| {
            let t = i as f32 / denom;
            truncated(hsv_to_rgb(
                h0 + (h1 - h0) * t,
                s0 + (s1 - s0) * t,
                v0 + (v1 - v0) * t,
            ))
        })
        .collect();
    Ok(Palette::new(colors)?)
}

fn channels3(color: Color) -> [f32; 3] {
    match color.to_rgb() {
        Color::Rgb(c) => c,
        Color::Mono([v]) => [v, v, v],
    }
}

/// `n` independent uniformly random hues.
pub fn random_hues<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<f32> {
    (0..n).map(|_| rng.gen::<f32>()).collect()
}

/// `n` hues in complementary pairs: a random hue followed by its opposite.
///
/// An odd `n` ends with an unpaired hue.
pub fn complementary_pairs<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<f32> {
    let mut hues = Vec::with_capacity(n);
    while hues.len() < n {
        let h = rng.gen::<f32>();
        hues.push(h);
        if hues.len() < n {
            hues.push((h + 0.5).rem_euclid(1.0));
        }
    }
    hues
}

/// Two random hues and their complements: `[a, b, b', a']`.
pub fn complementary_four<R: Rng + ?Sized>(rng: &mut R) -> [f32; 4] {
    let a = rng.gen::<f32>();
    let b = rng.gen::<f32>();
    [a, b, (b + 0.5).rem_euclid(1.0), (a + 0.5).rem_euclid(1.0)]
}

/// A hue, a neighbour within ±0.2, its complement, and a neighbour of the
/// complement within ±0.2.
pub fn split_complementary_four<R: Rng + ?Sized>(rng: &mut R) -> [f32; 4] {
    let a = rng.gen::<f32>();
    let b = (a + rng.gen_range(-0.2f32..0.2)).rem_euclid(1.0);
    let c = (a + 0.5).rem_euclid(1.0);
    let d = (c + rng.gen_range(-0.2f32..0.2)).rem_euclid(1.0);
    [a, b, c, d]
}

/// Three closely related hues (steps within ±0.1) plus an accent 0.2-0.4
/// away from the second.
pub fn analogous_four<R: Rng + ?Sized>(rng: &mut R) -> [f32; 4] {
    let a = rng.gen::<f32>();
    let b = (a + rng.gen_range(-0.1f32..0.1)).rem_euclid(1.0);
    let c = (b + rng.gen_range(-0.1f32..0.1)).rem_euclid(1.0);
    let d = (b + rng.gen_range(0.2f32..0.4)).rem_euclid(1.0);
    [a, b, c, d]
}
