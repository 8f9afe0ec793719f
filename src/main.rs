use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use icon_drift::{DriftConfig, FrameScheduler, IconField, Viewport, run_visualizer};

/// Floating icon layer: bouncing icons over a gradient backdrop.
#[derive(Parser, Debug)]
#[command(name = "icon-drift", version, about)]
struct Args {
    /// JSON config file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// RNG seed, overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Simulate without a window and print the final positions as JSON
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DriftConfig::load(path)?,
        None => DriftConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let viewport = Viewport::new(args.width, args.height);
    let mut field = IconField::new(config, viewport);

    if args.headless {
        field.mount(&mut rng);
        for _ in 0..args.frames {
            field.tick();
        }
        info!(frames = args.frames, icons = field.len(), "headless run finished");
        println!("{}", serde_json::to_string_pretty(&field.snapshot())?);
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();
    let scheduler = FrameScheduler::new(field.config().frames_per_second);

    info!(width = viewport.width(), height = viewport.height(), "opening preview window");
    run_visualizer(field, scheduler, &mut rng)?;
    Ok(())
}
