use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{ControlMode, GameConfig};
use grid_snake::modes::{PlayMode, SimulateConfig, SimulateMode};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a grid with obstacles and a pathfinding autopilot")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "manual")]
    mode: Mode,

    /// Grid width (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// JSON game configuration; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food and obstacle placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games to play in simulate mode
    #[arg(long, default_value = "100")]
    games: usize,

    /// Per-game step cap in simulate mode
    #[arg(long, default_value = "10000")]
    max_steps: u32,

    /// Draw the autopilot's planned path
    #[arg(long)]
    show_path: bool,

    /// Print one JSON snapshot per finished game in simulate mode
    #[arg(long)]
    json: bool,

    /// Write logs to this file (the terminal UI owns the screen)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Manual,
    /// Watch the autopilot play
    Auto,
    /// Run autopilot games headless and print statistics
    Simulate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(
        cli.log_file.as_deref(),
        matches!(cli.mode, Mode::Simulate),
    )?;

    let config = load_config(&cli)?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Manual => {
            let mut play = PlayMode::new(config, ControlMode::Manual, cli.seed, cli.show_path);
            play.run().await?;
        }
        Mode::Auto => {
            let mut play = PlayMode::new(config, ControlMode::Autopilot, cli.seed, cli.show_path);
            play.run().await?;
        }
        Mode::Simulate => {
            let mut simulate_config = SimulateConfig::new(cli.games);
            simulate_config.seed = cli.seed;
            simulate_config.max_steps = cli.max_steps;
            simulate_config.json = cli.json;
            simulate_config.game_config = config;

            let mut simulate = SimulateMode::new(simulate_config);
            simulate.run()?;
        }
    }

    Ok(())
}

/// Config file first, then command-line overrides, then validation
fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid game configuration")?;

    Ok(config)
}

/// Install the tracing subscriber.
///
/// With a log file everything goes there. Without one, only headless runs log
/// to stderr; the terminal UI stays quiet.
fn init_logging(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {:?}", path))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if headless {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}
