use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use neon_heart::{
    CpuSurfaceOpts, FfmpegSink, FfmpegSinkOpts, Fps, FrameIndex, FrameSink, PngSequenceSink,
    RecordStats, Recorder, RecorderOpts, write_png,
};

#[derive(Parser, Debug)]
#[command(name = "neon-heart", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render frames into a PNG sequence directory or an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    /// Logical surface width.
    #[arg(long, default_value_t = 400.0)]
    width: f64,

    /// Logical surface height.
    #[arg(long, default_value_t = 300.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Fire a restart right before this frame.
    #[arg(long)]
    restart_at: Option<u64>,

    /// Skip shadow blur (fast preview).
    #[arg(long, default_value_t = false)]
    no_shadows: bool,
}

impl SurfaceArgs {
    fn recorder_opts(&self) -> anyhow::Result<RecorderOpts> {
        Ok(RecorderOpts {
            width: self.width,
            height: self.height,
            dpr: self.dpr,
            fps: Fps::new(self.fps, 1)?,
            restart_at: self.restart_at.map(FrameIndex),
            surface: CpuSurfaceOpts::default().with_shadows(!self.no_shadows),
        })
    }
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    surface: SurfaceArgs,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Number of frames to render.
    #[arg(long, default_value_t = 360)]
    frames: u64,

    /// Output directory for a PNG sequence, or a `.mp4` path.
    #[arg(long)]
    out: PathBuf,

    /// Fail instead of replacing an existing MP4.
    #[arg(long)]
    no_overwrite: bool,

    #[command(flatten)]
    surface: SurfaceArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut recorder = Recorder::new(args.surface.recorder_opts()?)?;
    let frame = recorder.render_frame(FrameIndex(args.frame))?;
    write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut recorder = Recorder::new(args.surface.recorder_opts()?)?;

    let stats = if is_mp4(&args.out) {
        let mut sink = FfmpegSink::new(FfmpegSinkOpts {
            overwrite: !args.no_overwrite,
            ..FfmpegSinkOpts::new(&args.out)
        });
        record(&mut recorder, args.frames, &mut sink)?
    } else {
        let mut sink = PngSequenceSink::new(&args.out);
        let stats = record(&mut recorder, args.frames, &mut sink)?;
        let stats_path = args.out.join("stats.json");
        let json = serde_json::to_vec_pretty(&stats)?;
        std::fs::write(&stats_path, json)
            .with_context(|| format!("write stats '{}'", stats_path.display()))?;
        stats
    };

    eprintln!(
        "wrote {} ({} frames, {}x{})",
        args.out.display(),
        stats.frames,
        stats.width,
        stats.height
    );
    Ok(())
}

fn record(
    recorder: &mut Recorder,
    frames: u64,
    sink: &mut dyn FrameSink,
) -> anyhow::Result<RecordStats> {
    Ok(recorder.record(frames, sink)?)
}

fn is_mp4(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
}
