use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sakura_scene::{
    CpuCanvas, CpuCanvasOpts, FrameRGBA, FsFetcher, HeadlessHost, ImageFetcher,
    Scene, SceneConfig,
};

#[derive(Parser, Debug)]
#[command(name = "sakura-scene", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the scene headless and write the last frame as a PNG.
    Frame(FrameArgs),
    /// Run the scene headless and write every `--every`-th frame as numbered PNGs.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene configuration JSON; built-in scene when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width.
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Surface height.
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Font file (TTF/OTF) used for all text; text is skipped without one.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Root directory image sources are resolved against.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Random seed; overrides the config seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Pointer position `x,y` applied before the first frame.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<(f64, f64)>,

    /// Frame index before which a click is injected; repeatable.
    #[arg(long = "click-at")]
    click_at: Vec<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames to run.
    #[arg(long, default_value_t = 1)]
    frames: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames to run.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Write every N-th frame.
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'x,y', got '{s}'"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("bad y: {e}"))?;
    Ok((x, y))
}

struct Session {
    scene: Scene,
    host: HeadlessHost,
    canvas: CpuCanvas,
    clicks: Vec<u64>,
}

impl Session {
    fn new(args: &SceneArgs) -> anyhow::Result<Self> {
        let mut config = match &args.config {
            Some(p) => {
                let s = std::fs::read_to_string(p)
                    .with_context(|| format!("read config '{}'", p.display()))?;
                SceneConfig::from_json_str(&s)
                    .with_context(|| format!("parse config '{}'", p.display()))?
            }
            None => SceneConfig::default(),
        };
        if args.seed.is_some() {
            config.seed = args.seed;
        }

        let font_bytes = match &args.font {
            Some(p) => Some(
                std::fs::read(p).with_context(|| format!("read font '{}'", p.display()))?,
            ),
            None => None,
        };
        let canvas = CpuCanvas::new(CpuCanvasOpts {
            font_bytes,
            clear: None,
        })?;

        let mut scene = Scene::new(config).context("invalid scene config")?;
        if let Some(root) = &args.assets {
            let fetcher: Arc<dyn ImageFetcher> = Arc::new(FsFetcher::new(root));
            scene = scene.with_fetcher(fetcher);
        }

        let mut host = HeadlessHost::new(args.width, args.height);
        scene.start(&mut host);
        if let Some((x, y)) = args.pointer {
            host.pointer_move(x, y);
        }

        let mut clicks = args.click_at.clone();
        clicks.sort_unstable();
        Ok(Self {
            scene,
            host,
            canvas,
            clicks,
        })
    }

    fn run_frame(&mut self, index: u64) -> bool {
        let n = self.clicks.iter().filter(|&&c| c == index).count();
        for _ in 0..n {
            self.host.click();
        }
        self.host.run_frame(&mut self.scene, &mut self.canvas)
    }

    fn snapshot(&self) -> anyhow::Result<FrameRGBA> {
        self.canvas
            .snapshot()
            .context("no frame rendered (zero-size surface?)")
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut session = Session::new(&args.scene)?;
    for i in 0..args.frames.max(1) {
        if !session.run_frame(i) {
            break;
        }
    }
    write_png(&args.out, &session.snapshot()?)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let every = args.every.max(1);
    let mut session = Session::new(&args.scene)?;
    let mut written = 0usize;
    for i in 0..args.frames {
        if !session.run_frame(i) {
            break;
        }
        if i % every == 0 {
            let out = args.out_dir.join(format!("frame_{i:05}.png"));
            write_png(&out, &session.snapshot()?)?;
            written += 1;
        }
    }
    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

fn write_png(out: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let straight = frame.to_straight();
    image::save_buffer_with_format(
        out,
        &straight.data,
        straight.width,
        straight.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}
