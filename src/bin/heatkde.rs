use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use heatkde::{
    AnimateOpts, Colormap, CropBox, EstimatorKind, GifOpts, HeatmapParams, Interpolation,
    OverlayOpts, RenderThreading,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "heatkde",
    version,
    about = "Generate kernel-density heatmaps from point data"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a heatmap PNG from a JSON coordinate file.
    Generate(GenerateArgs),
    /// Simulate drifting points and render an animated heatmap GIF.
    Animate(AnimateArgs),
    /// Composite a heatmap over a background image.
    Overlay(OverlayArgs),
    /// Assemble an image sequence into a GIF.
    Gif(GifArgs),
}

/// Heatmap parameters; unset flags fall back to `--config`, then to defaults.
#[derive(clap::Args, Debug)]
struct ParamArgs {
    /// JSON file with heatmap parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Size of grid cells.
    #[arg(long)]
    grid_size: Option<f64>,

    /// Kernel bandwidth (radius of influence).
    #[arg(long)]
    bandwidth: Option<f64>,

    /// Colour palette (jet, viridis, plasma, inferno, magma, hot, cool, gray).
    #[arg(long)]
    colormap: Option<Colormap>,

    /// Display smoothing (nearest, gaussian).
    #[arg(long)]
    interpolation: Option<Interpolation>,

    /// Density estimator (brute, bucket).
    #[arg(long)]
    estimator: Option<EstimatorKind>,

    /// Compute grid rows in parallel.
    #[arg(long, default_value_t = false)]
    parallel_rows: bool,
}

impl ParamArgs {
    fn resolve(&self, base: HeatmapParams) -> anyhow::Result<HeatmapParams> {
        let mut p = match &self.config {
            Some(path) => HeatmapParams::from_path_over(path, base)?,
            None => base,
        };
        if let Some(v) = self.grid_size {
            p.grid_size = v;
        }
        if let Some(v) = self.bandwidth {
            p.bandwidth = v;
        }
        if let Some(v) = self.colormap {
            p.colormap = v;
        }
        if let Some(v) = self.interpolation {
            p.interpolation = v;
        }
        if let Some(v) = self.estimator {
            p.estimator = v;
        }
        p.parallel |= self.parallel_rows;
        Ok(p)
    }
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input JSON file with coordinate data.
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Output path for the heatmap image.
    #[arg(long, short = 'o')]
    output: PathBuf,

    #[command(flatten)]
    params: ParamArgs,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Output path for the GIF animation.
    #[arg(long, short = 'o')]
    output: PathBuf,

    /// Number of frames to generate.
    #[arg(long, default_value_t = 100)]
    frames: usize,

    /// Number of simulated points.
    #[arg(long, default_value_t = 100)]
    points: usize,

    /// Optional background image to overlay every frame on.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Frame duration in milliseconds.
    #[arg(long, default_value_t = 20)]
    duration: u32,

    /// Random seed for the simulation.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Render frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Scratch directory for frame PNGs.
    #[arg(long, default_value = "temp_frames")]
    frames_dir: PathBuf,

    /// Keep the frame PNGs after the GIF is written.
    #[arg(long, default_value_t = false)]
    keep_frames: bool,

    #[command(flatten)]
    params: ParamArgs,
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    /// Background image path.
    #[arg(long)]
    background: PathBuf,

    /// Heatmap image path.
    #[arg(long)]
    heatmap: PathBuf,

    /// Output path for the composite image.
    #[arg(long, short = 'o')]
    output: PathBuf,

    /// Crop box as "left,top,right,bottom".
    #[arg(long)]
    crop: Option<CropBox>,

    /// Stretch the heatmap to the background size first.
    #[arg(long, default_value_t = false)]
    fit: bool,
}

#[derive(Parser, Debug)]
struct GifArgs {
    /// Input pattern, e.g. "frames/frame_*.png".
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Output path for the GIF.
    #[arg(long, short = 'o')]
    output: PathBuf,

    /// Frame duration in milliseconds.
    #[arg(long, default_value_t = 20)]
    duration: u32,

    /// Number of loops, 0 for infinite.
    #[arg(long = "loop", default_value_t = 0)]
    loop_count: u16,

    /// Palette quality, 1-100.
    #[arg(long, default_value_t = 50)]
    quality: u8,

    /// Use the best palette quantization.
    #[arg(long, default_value_t = false)]
    optimize: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Overlay(args) => cmd_overlay(args),
        Command::Gif(args) => cmd_gif(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let params = args.params.resolve(HeatmapParams::default())?;
    let frame = heatkde::create_heatmap(&args.output, &args.input, &params)
        .context("failed to generate heatmap")?;
    let (rows, cols) = frame.grid.shape();
    tracing::info!(rows, cols, "heatmap generated: {}", args.output.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let opts = AnimateOpts {
        frames: args.frames,
        points: args.points,
        output: args.output.clone(),
        background: args.background,
        gif: GifOpts {
            duration_ms: args.duration,
            ..GifOpts::default()
        },
        params: args.params.resolve(HeatmapParams::for_point_cloud())?,
        seed: args.seed,
        threading: RenderThreading {
            parallel: args.parallel,
            threads: args.threads,
        },
        frames_dir: args.frames_dir,
        keep_frames: args.keep_frames,
    };
    heatkde::animate(&opts).context("failed to create animation")?;
    tracing::info!("animation created: {}", args.output.display());
    Ok(())
}

fn cmd_overlay(args: OverlayArgs) -> anyhow::Result<()> {
    let opts = OverlayOpts {
        crop: args.crop,
        fit: args.fit,
    };
    heatkde::overlay_images(&args.background, &args.heatmap, &args.output, opts)
        .context("failed to overlay images")?;
    tracing::info!("image overlay created: {}", args.output.display());
    Ok(())
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    let opts = GifOpts {
        duration_ms: args.duration,
        loop_count: args.loop_count,
        quality: args.quality,
        optimize: args.optimize,
    };
    heatkde::create_gif(&args.input, &args.output, opts).context("failed to create gif")?;
    tracing::info!("gif created: {}", args.output.display());
    Ok(())
}
