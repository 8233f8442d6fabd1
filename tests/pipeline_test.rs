//! End-to-end tests for dither jobs.

mod common;

use common::{assert_only_palette_colors, assert_same_size, count_color, fixtures, TestWorkspace};
use glitch_dither::{ChannelLayout, Color, MatrixSize, Palette, PixelBuffer, Preset};
use glitches::error::AppError;
use glitches::palette_spec;
use glitches::pipeline::{run, DitherJob, Method};
use pretty_assertions::assert_eq;

#[test]
fn test_floyd_steinberg_job_uses_palette_only() {
    let image = fixtures::noise(40, 24, 3);
    let palette = fixtures::greys4();
    let out = run(&DitherJob::new(Method::FloydSteinberg).palette(palette.clone()), &image).unwrap();

    assert_same_size(&out, &image);
    assert_only_palette_colors(&out, &palette);
}

#[test]
fn test_every_matrix_size_runs() {
    let image = fixtures::grey_ramp(48, 16);
    let palette = fixtures::black_white();
    for size in MatrixSize::ALL {
        let job = DitherJob::new(Method::Bayer)
            .palette(palette.clone())
            .matrix(size);
        let out = run(&job, &image).unwrap();
        assert_only_palette_colors(&out, &palette);
    }
}

#[test]
fn test_ramp_gets_brighter_left_to_right() {
    let image = fixtures::grey_ramp(64, 16);
    let white = Color::from_u8(255, 255, 255);
    let job = DitherJob::new(Method::FloydSteinberg).palette(fixtures::black_white());
    let out = run(&job, &image).unwrap();

    let left = out.crop(0, 0, 16, 16);
    let right = out.crop(48, 0, 16, 16);
    assert!(count_color(&left, white) < count_color(&right, white));
}

#[test]
fn test_nearest_on_exact_colors_is_identity() {
    let palette = Preset::Cga.palette();
    let image = PixelBuffer::from_colors(2, 2, palette.colors()).unwrap();
    let out = run(&DitherJob::new(Method::Nearest).palette(palette), &image).unwrap();
    assert_eq!(out, image);
}

#[test]
fn test_binary_methods_ignore_palette() {
    let image = fixtures::noise(16, 16, 8);
    for ordered in [false, true] {
        let out = run(&DitherJob::new(Method::Binary { ordered }), &image).unwrap();
        assert_eq!(out.layout(), ChannelLayout::Mono);
        assert!(out.samples().iter().all(|&v| v == 0.0 || v == 255.0));
    }
}

#[test]
fn test_median_cut_palette_then_dither() {
    let image = fixtures::noise(32, 32, 17);
    let palette = palette_spec::resolve("median:6", &Default::default(), Some(&image)).unwrap();
    assert_eq!(palette.len(), 6);

    let out = run(&DitherJob::new(Method::FloydSteinberg).palette(palette.clone()), &image).unwrap();
    assert_only_palette_colors(&out, &palette);
}

#[test]
fn test_remap_to_config_palette() {
    let workspace = TestWorkspace::new();
    let config = workspace.load_config(fixtures::CONFIG_YAML);
    let inks = palette_spec::resolve("inks", &config, None).unwrap();

    let job = DitherJob::new(Method::FloydSteinberg)
        .palette(fixtures::greys4())
        .remap_to(inks.clone());
    let out = run(&job, &fixtures::grey_ramp(32, 8)).unwrap();

    assert_only_palette_colors(&out, &inks);
    assert_eq!(out.get(0, 0), inks.get(0));
}

#[test]
fn test_luma_job_remaps_to_rgb() {
    let duo = Palette::from_hex(&["#1a1c2c", "#f4f4f4"]).unwrap();
    let job = DitherJob::new(Method::Bayer)
        .palette(fixtures::black_white())
        .luma(true)
        .remap_to(duo.clone());
    let out = run(&job, &fixtures::noise(24, 24, 4)).unwrap();

    assert_eq!(out.layout(), ChannelLayout::Rgb);
    assert_only_palette_colors(&out, &duo);
}

#[test]
fn test_remap_length_mismatch_fails() {
    let job = DitherJob::new(Method::FloydSteinberg)
        .palette(fixtures::black_white())
        .remap_to(fixtures::greys4());
    let result = run(&job, &fixtures::grey_ramp(8, 2));
    assert!(matches!(result, Err(AppError::Dither(_))));
}

#[test]
fn test_zx_job_draws_from_spectrum_colors() {
    let image = fixtures::noise(20, 12, 5);
    let out = run(&DitherJob::new(Method::Zx), &image).unwrap();

    assert_same_size(&out, &image);
    assert_only_palette_colors(&out, &Preset::ZxFull.palette());
}

#[test]
fn test_zx_job_remaps_through_full_palette() {
    let blue = PixelBuffer::filled(8, 8, Color::from_u8(0, 0, 255));
    let target = fixtures::greys4();
    // 16 entries; blue sits at index 9 in the bright half
    let colors: Vec<Color> = (0..16).map(|i| Color::from_u8(i * 10, 0, 0)).collect();
    let job = DitherJob::new(Method::Zx).remap_to(Palette::new(colors).unwrap());
    let out = run(&job, &blue).unwrap();

    assert!(out.pixels().all(|p| p == Color::from_u8(90, 0, 0)));
    assert!(run(&DitherJob::new(Method::Zx).remap_to(target), &blue).is_err());
}
