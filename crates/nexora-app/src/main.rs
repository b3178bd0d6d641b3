use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nexora_app::ascii::AsciiRenderer;
use nexora_app::frame_loop::{spawn_frame_loop, LoopConfig};
use nexora_core::config::SceneConfig;
use nexora_core::types::Viewport;
use nexora_sim::host::MountOptions;
use nexora_sim::presets::Preset;

#[derive(Parser)]
#[command(author, version, about = "Run a NEXORA animation in the terminal", long_about = None)]
struct Args {
    /// Built-in scene: globe, attack-map, particle-field, or radar
    #[arg(short, long, default_value = "globe")]
    preset: String,

    /// Scene configuration JSON file (overrides --preset)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many frame ticks
    #[arg(short, long, default_value_t = 300)]
    frames: u64,

    /// Override the scene's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated surface width in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Simulated surface height in pixels
    #[arg(long, default_value_t = 500.0)]
    height: f64,

    /// Terminal grid columns
    #[arg(long, default_value_t = 80)]
    cols: usize,

    /// Terminal grid rows
    #[arg(long, default_value_t = 24)]
    rows: usize,

    /// Print every Nth frame
    #[arg(long, default_value_t = 10)]
    every: u64,

    /// Draw one static frame instead of animating
    #[arg(long)]
    reduced_motion: bool,

    /// Print the resolved scene configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn init_tracing() {
    // RUST_LOG=nexora_sim=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();
}

fn load_scene(args: &Args) -> Result<SceneConfig> {
    let mut scene = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            SceneConfig::from_json(&json).with_context(|| format!("loading {}", path.display()))?
        }
        None => match Preset::from_name(&args.preset) {
            Some(preset) => preset.config(),
            None => bail!(
                "unknown preset `{}` (expected one of: {})",
                args.preset,
                Preset::ALL.map(|p| p.name()).join(", ")
            ),
        },
    };
    if let Some(seed) = args.seed {
        scene.seed = seed;
    }
    Ok(scene)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let scene = load_scene(&args)?;
    if args.dump_config {
        println!("{}", serde_json::to_string_pretty(&scene)?);
        return Ok(());
    }

    let config = LoopConfig {
        scene,
        viewport: Viewport::new(args.width, args.height),
        options: MountOptions {
            reduced_motion: args.reduced_motion,
        },
        max_frames: Some(args.frames),
    };
    let renderer = AsciiRenderer::new(std::io::stdout(), args.cols, args.rows, args.every);

    let (_commands, handle) = spawn_frame_loop(config, renderer).context("starting frame loop")?;
    let report = match handle.join() {
        Ok(result) => result.context("mounting animation")?,
        Err(_) => bail!("frame loop thread panicked"),
    };

    info!(
        frames = report.frames,
        spawned = report.spawned,
        live = report.live,
        detected = report.stats.detected,
        blocked = report.stats.blocked,
        "done"
    );
    Ok(())
}
