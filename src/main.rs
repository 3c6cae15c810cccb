use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bitmap_dither::{DitherMethod, OutputMode};
use ditherlab::models::{DitherConfig, PaletteConfig, RenderSettings, ToneConfig, CONFIG_ENV_VAR};
use ditherlab::services::{FrameRunner, RenderService, DEFAULT_OUTPUT_NAME};

#[derive(Parser)]
#[command(name = "ditherlab")]
#[command(about = "Deterministic bitmap dithering for PNG images and frame sequences")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dither a single PNG image
    Render {
        /// Source PNG file
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long, default_value = DEFAULT_OUTPUT_NAME)]
        output: PathBuf,

        #[command(flatten)]
        params: ParamArgs,
    },
    /// Dither every PNG frame of a directory
    Frames {
        /// Directory holding the source frames
        input_dir: PathBuf,

        /// Directory receiving the dithered frames
        output_dir: PathBuf,

        #[command(flatten)]
        params: ParamArgs,
    },
    /// Print the resolved parameter snapshot as JSON
    Config {
        #[command(flatten)]
        params: ParamArgs,
    },
}

/// Parameter flags shared by every command. Set flags override the preset.
#[derive(Args, Debug, Default)]
struct ParamArgs {
    /// YAML preset file (defaults to $DITHERLAB_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ordered, floyd-steinberg, atkinson, sierra-lite, burkes
    #[arg(short, long)]
    method: Option<String>,

    /// mono, gray, palette, rgb
    #[arg(long)]
    mode: Option<String>,

    /// Working resolution in percent of the source
    #[arg(short, long)]
    scale: Option<f32>,

    #[arg(long, allow_negative_numbers = true)]
    brightness: Option<f32>,

    #[arg(long)]
    contrast: Option<f32>,

    #[arg(long)]
    gamma: Option<f32>,

    /// Additive threshold offset
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<f32>,

    #[arg(long)]
    black_point: Option<f32>,

    #[arg(long)]
    white_point: Option<f32>,

    /// Error carry multiplier (0 = plain threshold)
    #[arg(long)]
    strength: Option<f32>,

    /// Glitch noise intensity, 0-100
    #[arg(long)]
    glitch: Option<f32>,

    /// Foreground hex color for palette mode (e.g. "#ffcc00")
    #[arg(long)]
    foreground: Option<String>,

    /// Background hex color for palette mode
    #[arg(long)]
    background: Option<String>,

    /// Keep source alpha in gray mode
    #[arg(long, overrides_with = "no_preserve_alpha")]
    preserve_alpha: bool,

    /// Force opaque gray output even if the preset keeps alpha
    #[arg(long, overrides_with = "preserve_alpha")]
    no_preserve_alpha: bool,

    /// Seed for reproducible glitch noise
    #[arg(long)]
    seed: Option<u64>,

    /// Export size: "source", "none" or an integer factor
    #[arg(long)]
    upscale: Option<String>,
}

impl ParamArgs {
    fn overrides(&self) -> DitherConfig {
        DitherConfig {
            method: self.method.clone(),
            mode: self.mode.clone(),
            scale: self.scale,
            tone: ToneConfig {
                brightness: self.brightness,
                contrast: self.contrast,
                gamma: self.gamma,
                threshold: self.threshold,
                black_point: self.black_point,
                white_point: self.white_point,
            },
            dither_strength: self.strength,
            glitch: self.glitch,
            palette: PaletteConfig {
                foreground: self.foreground.clone(),
                background: self.background.clone(),
            },
            preserve_alpha: self.preserve_alpha_override(),
            seed: self.seed,
            upscale: self.upscale.clone(),
        }
    }

    /// `None` when neither flag was given, so the preset value stands.
    fn preserve_alpha_override(&self) -> Option<bool> {
        match (self.preserve_alpha, self.no_preserve_alpha) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Preset (explicit or from the environment) layered under the flags.
    fn resolve(&self) -> anyhow::Result<RenderSettings> {
        let preset = DitherConfig::load_preset(self.config.as_deref())?;
        let settings = RenderSettings::resolve(&preset.merged_with(self.overrides()))?;
        tracing::debug!(?settings, "Resolved settings");
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            params,
        }) => {
            init_logging();
            run_render_command(&input, &output, &params)
        }
        Some(Commands::Frames {
            input_dir,
            output_dir,
            params,
        }) => {
            init_logging();
            run_frames_command(&input_dir, &output_dir, &params)
        }
        Some(Commands::Config { params }) => {
            init_logging();
            run_config_command(&params)
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ditherlab=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

fn run_render_command(input: &Path, output: &Path, params: &ParamArgs) -> anyhow::Result<()> {
    let service = RenderService::new(params.resolve()?);
    let report = service.render_file(input, output)?;
    println!(
        "Rendered {} ({}x{}, {} bytes)",
        report.path.display(),
        report.width,
        report.height,
        report.bytes
    );
    Ok(())
}

fn run_frames_command(input_dir: &Path, output_dir: &Path, params: &ParamArgs) -> anyhow::Result<()> {
    let service = RenderService::new(params.resolve()?);
    let reports = FrameRunner::new(&service).run(input_dir, output_dir)?;
    let total: usize = reports.iter().map(|r| r.bytes).sum();
    println!(
        "Rendered {} frames into {} ({} bytes)",
        reports.len(),
        output_dir.display(),
        total
    );
    Ok(())
}

fn run_config_command(params: &ParamArgs) -> anyhow::Result<()> {
    let settings = params.resolve()?;
    println!("{}", serde_json::to_string_pretty(&settings.to_config())?);
    Ok(())
}

/// Show version, environment and available commands
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("ditherlab v{VERSION}");
    println!("Deterministic bitmap dithering for PNG images\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV_VAR:<17} {}",
        std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| "(not set)".to_string())
    );
    println!(
        "  RUST_LOG          {}",
        std::env::var("RUST_LOG").unwrap_or_else(|_| "(not set, default ditherlab=info)".to_string())
    );

    let methods: Vec<&str> = DitherMethod::ALL.iter().map(|m| m.name()).collect();
    let modes: Vec<&str> = OutputMode::ALL.iter().map(|m| m.name()).collect();
    println!("\nMethods: {}", methods.join(", "));
    println!("Modes:   {}", modes.join(", "));

    println!("\nCommands:");
    println!("  ditherlab render   Dither a PNG image");
    println!("  ditherlab frames   Dither every PNG frame of a directory");
    println!("  ditherlab config   Print the resolved parameters as JSON");
    println!("\nRun 'ditherlab --help' for more details.");
}
