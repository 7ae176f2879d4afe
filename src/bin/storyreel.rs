use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use storyreel::{
    AudioSegment, FfmpegEditor, RenderSpec, VideoEditor as _, build_timeline,
    parse_dialogue_script, portrait_crop, render_spec_to_mp4, required_duration,
    resolve_video_fit,
};

#[derive(Parser, Debug)]
#[command(name = "storyreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a dialogue script and print the segments as JSON.
    Parse(ParseArgs),
    /// Build the gap-corrected timeline for a script and print it as JSON.
    Timeline(TimelineArgs),
    /// Decide how a background video fits a required duration.
    Fit(FitArgs),
    /// Render a composition spec to an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ParseArgs {
    /// Input script file (`Speaker: Text` lines).
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Input script file (`Speaker: Text` lines).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Per-segment durations in seconds as a JSON array; text-length
    /// estimates are used when omitted.
    #[arg(long)]
    durations: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// Background video file (probed with `ffprobe`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Required output duration, seconds.
    #[arg(long)]
    required: f64,

    /// Request a looped asset instead of failing when the video is short.
    #[arg(long, default_value_t = false)]
    loop_if_short: bool,

    /// Seed for the trim-offset draw (entropy when omitted).
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input composition spec JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
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
    match cli.cmd {
        Command::Parse(args) => cmd_parse(args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Fit(args) => cmd_fit(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_parse(args: ParseArgs) -> anyhow::Result<()> {
    let script = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read script '{}'", args.in_path.display()))?;
    let parsed = parse_dialogue_script(&script)?;
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let script = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read script '{}'", args.in_path.display()))?;
    let parsed = parse_dialogue_script(&script)?;

    let durations: Option<Vec<f64>> = match &args.durations {
        None => None,
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read durations '{}'", path.display()))?;
            let values: Vec<f64> = serde_json::from_str(&raw)
                .with_context(|| format!("parse durations '{}'", path.display()))?;
            anyhow::ensure!(
                values.len() == parsed.segments.len(),
                "expected {} durations, got {}",
                parsed.segments.len(),
                values.len()
            );
            Some(values)
        }
    };

    let segments: Vec<AudioSegment> = parsed
        .segments
        .iter()
        .enumerate()
        .map(|(i, dialogue)| {
            let mut seg = AudioSegment::new(dialogue.clone(), None);
            seg.duration_secs = durations.as_ref().map(|d| d[i]);
            seg
        })
        .collect();

    let timeline = build_timeline(&segments);
    let total = required_duration(&timeline);
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "entries": timeline,
            "required_duration": total,
        }))?
    );
    Ok(())
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let editor = FfmpegEditor;
    let source = editor.probe(&args.in_path)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let decision = resolve_video_fit(
        source.duration_secs,
        args.required,
        args.loop_if_short,
        &mut rng,
    )?;
    let crop = portrait_crop(source.width, source.height)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "source": source,
            "decision": decision,
            "portrait_crop": crop,
        }))?
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read spec '{}'", args.in_path.display()))?;
    let spec: RenderSpec = serde_json::from_str(&raw)
        .with_context(|| format!("parse spec '{}'", args.in_path.display()))?;
    let out = render_spec_to_mp4(&spec, &args.out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
