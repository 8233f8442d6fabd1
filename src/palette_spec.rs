//! Palette specifications given on the command line.
//!
//! | Form                        | Palette                                  |
//! |-----------------------------|------------------------------------------|
//! | `preset:<name>`             | built-in preset                          |
//! | `mono:<n>`                  | `n` evenly spaced greys                  |
//! | `hue:<n>`                   | `n` evenly spaced full-saturation hues   |
//! | `median:<n>`                | median cut of the input image            |
//! | `random:<n>`                | `n` random complementary hues            |
//! | `scheme:<name>`             | four random hues: `complementary`, `split`, `analogous` |
//! | `#rrggbb,#rrggbb,...`       | explicit colors                          |
//! | `<name>`                    | config palette, else preset              |

use rand::Rng;

use glitch_dither::palette::{
    analogous_four, complementary_four, complementary_pairs, split_complementary_four,
};
use glitch_dither::{hue_palette, hue_palette_from, median_cut, mono_palette, Palette, PixelBuffer, Preset};

use crate::error::AppError;
use crate::models::AppConfig;
use crate::pipeline::Method;

fn parse_count(spec: &str, value: &str) -> Result<usize, AppError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| AppError::palette_spec(spec, format!("expected a color count, got '{}'", value)))
}

/// Resolve `spec` to a palette, drawing random hues from the thread RNG.
///
/// `image` is required only for `median:` specs.
pub fn resolve(spec: &str, config: &AppConfig, image: Option<&PixelBuffer>) -> Result<Palette, AppError> {
    resolve_with_rng(spec, config, image, &mut rand::thread_rng())
}

/// [`resolve`] with a caller-supplied RNG.
pub fn resolve_with_rng<R: Rng + ?Sized>(
    spec: &str,
    config: &AppConfig,
    image: Option<&PixelBuffer>,
    rng: &mut R,
) -> Result<Palette, AppError> {
    let spec = spec.trim();

    if spec.starts_with('#') || spec.contains(',') {
        let colors: Vec<&str> = spec.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
        return Palette::from_hex(&colors).map_err(|e| AppError::palette_spec(spec, e.to_string()));
    }

    let Some((kind, arg)) = spec.split_once(':') else {
        if let Some(palette) = config.palette(spec)? {
            return Ok(palette);
        }
        return Preset::by_name(spec)
            .map(Preset::palette)
            .ok_or_else(|| AppError::UnknownPreset(spec.to_string()));
    };

    let palette = match kind {
        "preset" => Preset::by_name(arg)
            .map(Preset::palette)
            .ok_or_else(|| AppError::UnknownPreset(arg.to_string()))?,
        "mono" => mono_palette(parse_count(spec, arg)?)?,
        "hue" => hue_palette(parse_count(spec, arg)?, 1.0, 1.0)?,
        "median" => {
            let image = image.ok_or_else(|| AppError::palette_spec(spec, "needs an input image"))?;
            median_cut(image, parse_count(spec, arg)?)?.into_palette()
        }
        "random" => {
            let n = parse_count(spec, arg)?;
            if n == 0 {
                return Err(AppError::palette_spec(spec, "needs at least one color"));
            }
            hue_palette_from(&complementary_pairs(rng, n), 1.0, 1.0)?
        }
        "scheme" => {
            let hues = match arg {
                "complementary" => complementary_four(rng),
                "split" | "split-complementary" => split_complementary_four(rng),
                "analogous" => analogous_four(rng),
                other => {
                    return Err(AppError::palette_spec(
                        spec,
                        format!("unknown scheme '{}'", other),
                    ))
                }
            };
            hue_palette_from(&hues, 1.0, 1.0)?
        }
        other => {
            return Err(AppError::palette_spec(
                spec,
                format!("unknown palette kind '{}'", other),
            ))
        }
    };

    tracing::debug!(spec, colors = palette.len(), "resolved palette");
    Ok(palette)
}

/// The palette a job with `method` runs against.
///
/// Palette methods use `spec`, or `median:<defaults.colors>` of `image` when
/// no spec is given. Other methods get `None`; a spec passed to them is
/// ignored with a warning.
pub fn job_palette<R: Rng + ?Sized>(
    method: Method,
    spec: Option<&str>,
    config: &AppConfig,
    image: &PixelBuffer,
    rng: &mut R,
) -> Result<Option<Palette>, AppError> {
    if !method.uses_palette() {
        if spec.is_some() {
            tracing::warn!(method = method.name(), "Method ignores --palette");
        }
        return Ok(None);
    }
    let default_spec = format!("median:{}", config.defaults.colors);
    let spec = spec.unwrap_or(&default_spec);
    resolve_with_rng(spec, config, Some(image), rng).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glitch_dither::{ChannelLayout, Color};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> AppConfig {
        AppConfig::from_yaml_str("palettes:\n  duo: [\"#102030\", \"#f0e0d0\"]\n  cga: [\"#000\"]\n")
            .unwrap()
    }

    #[test]
    fn test_preset_forms() {
        let config = AppConfig::default();
        assert_eq!(resolve("preset:gameboy", &config, None).unwrap(), Preset::Gameboy.palette());
        assert_eq!(resolve("zx-bright", &config, None).unwrap(), Preset::ZxBright.palette());
    }

    #[test]
    fn test_config_palette_shadows_preset() {
        let palette = resolve("cga", &config(), None).unwrap();
        assert_eq!(palette.len(), 1);
        let duo = resolve("duo", &config(), None).unwrap();
        assert_eq!(duo.get(0), Color::from_u8(0x10, 0x20, 0x30));
    }

    #[test]
    fn test_explicit_preset_ignores_config() {
        let palette = resolve("preset:cga", &config(), None).unwrap();
        assert_eq!(palette, Preset::Cga.palette());
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            resolve("c64", &AppConfig::default(), None),
            Err(AppError::UnknownPreset(name)) if name == "c64"
        ));
    }

    #[test]
    fn test_hex_list() {
        let palette = resolve("#000000, #ffffff", &AppConfig::default(), None).unwrap();
        assert_eq!(palette, Palette::from_rgb8(&[[0, 0, 0], [255, 255, 255]]).unwrap());
    }

    #[test]
    fn test_bad_hex() {
        assert!(matches!(
            resolve("#zzz,#000", &AppConfig::default(), None),
            Err(AppError::InvalidPaletteSpec { .. })
        ));
    }

    #[test]
    fn test_generators() {
        let config = AppConfig::default();
        assert_eq!(resolve("mono:3", &config, None).unwrap(), mono_palette(3).unwrap());
        assert_eq!(resolve("hue:6", &config, None).unwrap().len(), 6);
    }

    #[test]
    fn test_bad_count() {
        assert!(matches!(
            resolve("mono:many", &AppConfig::default(), None),
            Err(AppError::InvalidPaletteSpec { .. })
        ));
        assert!(matches!(
            resolve("mono:0", &AppConfig::default(), None),
            Err(AppError::Dither(_))
        ));
    }

    #[test]
    fn test_median_needs_image() {
        let config = AppConfig::default();
        assert!(matches!(
            resolve("median:4", &config, None),
            Err(AppError::InvalidPaletteSpec { .. })
        ));

        let image = PixelBuffer::from_rgb8(2, 1, &[0, 0, 0, 255, 255, 255]).unwrap();
        let palette = resolve("median:2", &config, Some(&image)).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.layout(), ChannelLayout::Rgb);
    }

    #[test]
    fn test_random_is_seeded() {
        let config = AppConfig::default();
        let a = resolve_with_rng("random:5", &config, None, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = resolve_with_rng("random:5", &config, None, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn test_schemes() {
        let config = AppConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        for name in ["complementary", "split", "analogous"] {
            let spec = format!("scheme:{}", name);
            let palette = resolve_with_rng(&spec, &config, None, &mut rng).unwrap();
            assert_eq!(palette.len(), 4);
        }
        assert!(resolve_with_rng("scheme:triad", &config, None, &mut rng).is_err());
    }

    #[test]
    fn test_job_palette_defaults_to_median_cut() {
        let config = AppConfig::from_yaml_str("defaults:\n  colors: 3\n").unwrap();
        let image = PixelBuffer::from_rgb8(
            4,
            1,
            &[0, 0, 0, 255, 0, 0, 0, 255, 0, 255, 255, 255],
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let palette = job_palette(Method::Bayer, None, &config, &image, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(palette, median_cut(&image, 3).unwrap().into_palette());
        assert_eq!(palette.len(), 3);
    }

    #[test]
    fn test_job_palette_prefers_given_spec() {
        let image = PixelBuffer::from_luma8(2, 1, &[0, 255]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let palette = job_palette(
            Method::FloydSteinberg,
            Some("mono:2"),
            &AppConfig::default(),
            &image,
            &mut rng,
        )
        .unwrap();
        assert_eq!(palette, Some(mono_palette(2).unwrap()));
    }

    #[test]
    fn test_job_palette_skips_fixed_palette_methods() {
        let image = PixelBuffer::from_luma8(2, 1, &[0, 255]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for method in [Method::Zx, Method::Binary { ordered: false }, Method::Binary { ordered: true }] {
            let palette = job_palette(method, Some("preset:cga"), &AppConfig::default(), &image, &mut rng);
            assert_eq!(palette.unwrap(), None);
        }
    }

    #[test]
    fn test_job_palette_reports_bad_spec() {
        let image = PixelBuffer::from_luma8(1, 1, &[9]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let result = job_palette(Method::Nearest, Some("c64"), &AppConfig::default(), &image, &mut rng);
        assert!(matches!(result, Err(AppError::UnknownPreset(_))));
    }

    #[test]
    fn test_unknown_kind() {
        assert!(matches!(
            resolve("spiral:3", &AppConfig::default(), None),
            Err(AppError::InvalidPaletteSpec { .. })
        ));
    }
}
