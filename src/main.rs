//! Paddle Arcade native runner
//!
//! Plays a headless session with the autoplay host and prints the session
//! totals as JSON.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};

use paddle_arcade::autoplay::AutoplayHost;
use paddle_arcade::platform::FrameLoop;
use paddle_arcade::{GameState, Layout, MonospaceMetrics, Settings};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum CliMode {
    Pong,
    Breakout,
}

impl From<CliMode> for Layout {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Pong => Layout::DualPaddle,
            CliMode::Breakout => Layout::SinglePaddle,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "paddle-arcade")]
#[command(about = "Headless Pong/Breakout sessions on the shared paddle simulation")]
struct Cli {
    /// Game layout; ignored when --settings names a file
    #[arg(long, value_enum, default_value_t = CliMode::Pong)]
    mode: CliMode,
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Fall back to the --mode defaults when the settings file is unusable
    #[arg(long)]
    lenient: bool,
    /// Stop after this many frames
    #[arg(long, default_value_t = 3_600)]
    frames: u64,
    /// Stop after this many finished rounds
    #[arg(long)]
    rounds: Option<u32>,
    /// RNG seed (defaults to the settings seed, then the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Fixed frame time in seconds (defaults to 1 / target_fps)
    #[arg(long)]
    dt: Option<f32>,
    /// Pretty-print the JSON summary
    #[arg(long)]
    pretty: bool,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) if cli.lenient => Settings::load_or_default(path, cli.mode.into()),
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::for_layout(cli.mode.into()),
    };

    let dt = cli.dt.unwrap_or(1.0 / settings.target_fps as f32);
    if !(dt.is_finite() && dt > 0.0) {
        return Err(anyhow!("--dt must be a positive number of seconds, got {dt}"));
    }

    let seed = cli.seed.or(settings.seed).unwrap_or_else(clock_seed);
    log::info!(
        "Paddle Arcade ({}) starting: seed {seed}, dt {dt:.4}s, up to {} frames",
        settings.layout.as_str(),
        cli.frames
    );

    let mut host = AutoplayHost::new(settings.layout, dt);
    host.max_rounds = cli.rounds;
    let mut frame_loop = FrameLoop::new(GameState::new(settings, seed), MonospaceMetrics::default());
    let stats = frame_loop.run(&mut host, Some(cli.frames));

    let summary = if cli.pretty {
        serde_json::to_string_pretty(&stats)
    } else {
        serde_json::to_string(&stats)
    }
    .context("failed to serialize session stats")?;
    println!("{summary}");
    Ok(())
}
