use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use slidereel::{FfmpegSink, FfmpegSinkOpts, FitMode, Resolution, SlideshowSpec};

/// Turn a folder of images into a video slideshow.
#[derive(Parser, Debug)]
#[command(name = "slidereel", version)]
struct Cli {
    /// Directory containing the images.
    input_dir: PathBuf,

    /// Output video file path.
    #[arg(short, long, default_value = "slideshow.mp4")]
    output: PathBuf,

    /// ffmpeg codec to use (e.g. libx264, libx265, mpeg4).
    #[arg(long, default_value = "libx264")]
    codec: String,

    /// Output resolution as WIDTHxHEIGHT (e.g. 1280x720).
    #[arg(long, default_value = "1920x1080", value_parser = parse_resolution)]
    resolution: Resolution,

    /// How images are fitted onto the output frame.
    #[arg(long, value_enum, default_value_t = FitMode::Fit)]
    mode: FitMode,

    /// Seconds each image stays on screen.
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Frames per second of the final video.
    #[arg(long, default_value_t = 24)]
    fps: u32,

    /// Write a JSON manifest of the assembled timeline to this path.
    #[arg(long)]
    dump_timeline: Option<PathBuf>,
}

fn parse_resolution(s: &str) -> Result<Resolution, String> {
    s.parse::<Resolution>().map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let spec = SlideshowSpec {
        input_dir: cli.input_dir,
        out_path: cli.output,
        codec: cli.codec,
        resolution: cli.resolution,
        mode: cli.mode,
        duration_s: cli.duration,
        fps: cli.fps,
    };
    spec.validate()?;

    let timeline = slidereel::assemble_timeline(&spec)?;

    if let Some(manifest_path) = &cli.dump_timeline {
        let manifest = timeline.manifest(spec.resolution, spec.fps);
        let f = std::fs::File::create(manifest_path)
            .with_context(|| format!("create manifest '{}'", manifest_path.display()))?;
        serde_json::to_writer_pretty(f, &manifest)
            .with_context(|| "serialize timeline manifest")?;
        eprintln!("wrote {}", manifest_path.display());
    }

    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&spec.out_path, &spec.codec));
    let stats = slidereel::stream_timeline(&timeline, spec.fps, &mut sink)?;

    eprintln!(
        "wrote {} ({} slides, {} frames)",
        spec.out_path.display(),
        stats.slides,
        stats.frames_written
    );
    Ok(())
}
