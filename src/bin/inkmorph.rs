use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "inkmorph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate up to a frame and write it as a PNG.
    Frame(FrameArgs),
    /// Write a PNG sequence starting at frame 0.
    Frames(FramesArgs),
    /// Validate a config and its SVG, then print shape statistics.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scene config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Override the config seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Scene config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Number of frames to write.
    #[arg(long, conflicts_with = "seconds", required_unless_present = "seconds")]
    count: Option<u64>,

    /// Length of the sequence in seconds, at the config frame rate.
    #[arg(long)]
    seconds: Option<f64>,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Scene config JSON.
    #[arg(long)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn load_scene(config: &Path, seed: Option<u64>) -> anyhow::Result<inkmorph::Scene> {
    let mut cfg = inkmorph::SceneConfig::load(config)
        .with_context(|| format!("load config '{}'", config.display()))?;
    if let Some(seed) = seed {
        cfg.seed = seed;
    }
    Ok(inkmorph::Scene::load(cfg)?)
}

fn renderer(scene: &inkmorph::Scene) -> inkmorph::FrameRenderer {
    inkmorph::FrameRenderer::new(&inkmorph::RenderSettings {
        system_fonts: scene.config().text.enabled,
    })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut scene = load_scene(&args.config, args.seed)?;
    let mut renderer = renderer(&scene);
    let frame = inkmorph::render_frame(&mut scene, inkmorph::FrameIndex(args.frame), &mut renderer)?;
    inkmorph::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut scene = load_scene(&args.config, args.seed)?;
    let count = match (args.count, args.seconds) {
        (Some(count), _) => count,
        (None, Some(seconds)) if seconds.is_finite() && seconds > 0.0 => {
            scene.config().fps.secs_to_frames_floor(seconds).max(1)
        }
        _ => anyhow::bail!("--seconds must be > 0"),
    };
    let mut renderer = renderer(&scene);
    let mut sink = inkmorph::PngSequenceSink::new(&args.out_dir);
    let stats = inkmorph::render_range(&mut scene, count, &mut renderer, &mut sink)?;

    eprintln!(
        "wrote {} frames ({} half-cycles) to {}",
        stats.frames_rendered,
        stats.half_cycles,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let cfg = inkmorph::SceneConfig::load(&args.config)
        .with_context(|| format!("load config '{}'", args.config.display()))?;
    let shape = inkmorph::Shape::load(&cfg.svg, cfg.tolerance)?;
    let scene = inkmorph::Scene::new(cfg, shape)?;

    let shape = scene.shape();
    println!("svg:       {}", scene.config().svg.display());
    println!("lines:     {}", shape.lines().len());
    println!("vertices:  {}", shape.total_vertex_count());
    println!("materials: {}", scene.colors().materials().len());
    let b = shape.bounds();
    println!(
        "bounds:    {:.2},{:.2} {:.2}x{:.2}",
        b.x0,
        b.y0,
        b.width(),
        b.height()
    );
    Ok(())
}
