use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glitch_dither::{median_cut, MatrixSize, PixelBuffer, Preset};
use glitches::image_io::{read_png, write_png};
use glitches::models::{AppConfig, CONFIG_ENV};
use glitches::palette_spec;
use glitches::pipeline::{self, DitherJob, Method, MethodName};

#[derive(Parser)]
#[command(name = "glitches")]
#[command(about = "Palette reduction and retro dithering for PNG images")]
struct Cli {
    /// YAML config file (falls back to $GLITCHES_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dither an image against a palette
    Dither {
        /// Input PNG
        input: PathBuf,

        /// Output PNG
        output: PathBuf,

        /// Dithering method (default from config)
        #[arg(short, long, value_enum)]
        method: Option<MethodName>,

        /// Palette spec: preset:<name>, mono:<n>, hue:<n>, median:<n>,
        /// random:<n>, scheme:<name>, a hex list, or a config palette name
        #[arg(short, long)]
        palette: Option<String>,

        /// Bayer matrix side: 2, 3, 4 or 8 (default from config)
        #[arg(long)]
        matrix: Option<usize>,

        /// Dither on luma with a grey copy of the palette
        #[arg(long)]
        mono: bool,

        /// Palette spec to substitute positionally into the result
        #[arg(long)]
        remap: Option<String>,

        /// Seed for random palettes
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the median-cut palette of an image
    Palette {
        /// Input PNG
        input: PathBuf,

        /// Number of colors (default from config)
        #[arg(short, long)]
        colors: Option<usize>,

        /// Print a JSON report instead of one color per line
        #[arg(long)]
        json: bool,
    },
    /// Render an image with ZX Spectrum attribute cells
    Zx {
        /// Input PNG
        input: PathBuf,

        /// Output PNG
        output: PathBuf,
    },
    /// List built-in palettes
    Presets,
}

/// JSON output of the `palette` command.
#[derive(Serialize)]
struct PaletteReport {
    requested: usize,
    complete: bool,
    colors: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glitches=info,glitch_dither=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = AppConfig::resolve_path(cli.config.as_deref());
    let config = AppConfig::load(config_path.as_deref());

    match cli.command {
        Some(Commands::Dither {
            input,
            output,
            method,
            palette,
            matrix,
            mono,
            remap,
            seed,
        }) => {
            let method = method.unwrap_or(config.defaults.method);
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let matrix = MatrixSize::try_from(matrix.unwrap_or(config.defaults.matrix))?;
            run_dither_command(
                &config,
                &input,
                &output,
                DitherArgs {
                    method,
                    palette: palette.as_deref(),
                    matrix,
                    mono,
                    remap: remap.as_deref(),
                },
                &mut rng,
            )
        }
        Some(Commands::Palette {
            input,
            colors,
            json,
        }) => run_palette_command(&input, colors.unwrap_or(config.defaults.colors), json),
        Some(Commands::Zx { input, output }) => {
            let image = read_png(&input).with_context(|| format!("reading {}", input.display()))?;
            let out = pipeline::run(&DitherJob::new(Method::Zx), &image)?;
            write_png(&output, &out).with_context(|| format!("writing {}", output.display()))?;
            tracing::info!(output = %output.display(), "Rendered zx image");
            Ok(())
        }
        Some(Commands::Presets) => {
            for preset in Preset::ALL {
                println!("{:<10} {}", preset.name(), preset.palette().to_hex().join(" "));
            }
            Ok(())
        }
        None => {
            run_status_command(&config, config_path.as_deref());
            Ok(())
        }
    }
}

struct DitherArgs<'a> {
    method: MethodName,
    palette: Option<&'a str>,
    matrix: MatrixSize,
    mono: bool,
    remap: Option<&'a str>,
}

fn run_dither_command(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    args: DitherArgs<'_>,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    let image = read_png(input).with_context(|| format!("reading {}", input.display()))?;
    let method = Method::from(args.method);

    let palette = palette_spec::job_palette(method, args.palette, config, &image, rng)?;
    let remap_to = args
        .remap
        .map(|spec| palette_spec::resolve_with_rng(spec, config, Some(&image), rng))
        .transpose()?;

    let job = DitherJob {
        method,
        palette,
        matrix: args.matrix,
        remap_to,
        luma: args.mono,
    };
    let out = pipeline::run(&job, &image)?;
    write_png(output, &out).with_context(|| format!("writing {}", output.display()))?;

    tracing::info!(
        method = method.name(),
        width = out.width(),
        height = out.height(),
        output = %output.display(),
        "Dithered image"
    );
    Ok(())
}

fn run_palette_command(input: &Path, colors: usize, json: bool) -> anyhow::Result<()> {
    let image: PixelBuffer =
        read_png(input).with_context(|| format!("reading {}", input.display()))?;
    let result = median_cut(&image, colors)?;

    if json {
        let report = PaletteReport {
            requested: result.requested(),
            complete: result.is_complete(),
            colors: result.palette().to_hex(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for hex in result.palette().to_hex() {
            println!("{hex}");
        }
    }
    Ok(())
}

/// Display version, configuration and command summary
fn run_status_command(config: &AppConfig, config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Glitches v{VERSION} - palette reduction and retro dithering\n");

    println!("Configuration:");
    match config_path {
        Some(path) => println!("  file     = {}", path.display()),
        None => println!("  file     = (none; use --config or {CONFIG_ENV})"),
    }
    println!("  method   = {}", config.defaults.method);
    println!("  matrix   = {}", config.defaults.matrix);
    println!("  colors   = {}", config.defaults.colors);

    let mut names: Vec<&String> = config.palettes.keys().collect();
    names.sort();
    if names.is_empty() {
        println!("  palettes = (none)");
    } else {
        println!(
            "  palettes = {}",
            names.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
        );
    }

    println!("\nCommands:");
    println!("  glitches dither    Dither a PNG against a palette");
    println!("  glitches palette   Print an image's median-cut palette");
    println!("  glitches zx        Render with ZX Spectrum attribute cells");
    println!("  glitches presets   List built-in palettes");
    println!("\nRun 'glitches --help' for more details.");
}
