//! Headless autopilot runs
//!
//! Plays a batch of autopilot games without a terminal UI and reports how
//! they went. Useful for checking the pathfinder on different boards and for
//! reproducing a particular game from its seed.
//!
//! # Example
//!
//! ```rust
//! use grid_snake::game::GameConfig;
//! use grid_snake::modes::{SimulateConfig, SimulateMode};
//!
//! let mut config = SimulateConfig::new(5);
//! config.seed = Some(7);
//! config.max_steps = 200;
//! config.game_config = GameConfig::small();
//!
//! let mut mode = SimulateMode::with_writer(config, Vec::new());
//! let stats = mode.run()?;
//! assert_eq!(stats.total_games(), 5);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use std::io::{self, Stdout, Write};
use tracing::{debug, info};

use crate::game::{ControlMode, GameConfig, Session};
use crate::metrics::{GameOutcome, RunStats};

/// Configuration for simulate mode
#[derive(Debug, Clone)]
pub struct SimulateConfig {
    /// Number of games to play
    pub games: usize,

    /// Seed for the whole batch; entropy if absent
    pub seed: Option<u64>,

    /// A game still running after this many steps is cut off
    pub max_steps: u32,

    /// Print progress every N games
    pub log_frequency: usize,

    /// Emit each final snapshot as a JSON line instead of text reports
    pub json: bool,

    /// Board and placement settings
    pub game_config: GameConfig,
}

impl SimulateConfig {
    pub fn new(games: usize) -> Self {
        Self {
            games,
            seed: None,
            max_steps: 10_000,
            log_frequency: 100,
            json: false,
            game_config: GameConfig::default(),
        }
    }
}

/// Runs autopilot games back to back, recording [`RunStats`]
pub struct SimulateMode<W: Write = Stdout> {
    session: Session,
    stats: RunStats,
    config: SimulateConfig,
    out: W,
}

impl SimulateMode<Stdout> {
    pub fn new(config: SimulateConfig) -> Self {
        Self::with_writer(config, io::stdout())
    }
}

impl<W: Write> SimulateMode<W> {
    pub fn with_writer(config: SimulateConfig, out: W) -> Self {
        let game_config = config.game_config.clone();
        let session = match config.seed {
            Some(seed) => Session::seeded(game_config, ControlMode::Autopilot, seed),
            None => Session::new(game_config, ControlMode::Autopilot),
        };

        Self {
            session,
            // Rolling averages cover the whole batch
            stats: RunStats::new(config.games.max(1)),
            config,
            out,
        }
    }

    /// Play every game and print the final statistics
    pub fn run(&mut self) -> Result<&RunStats> {
        self.print_header()?;

        for game in 0..self.config.games {
            if game > 0 {
                self.session.restart();
            }

            let outcome = self.play_game();
            let state = self.session.state();
            debug!(
                game = game + 1,
                score = state.score,
                steps = state.steps,
                ?outcome,
                "game finished"
            );
            self.stats.record_game(state.score, state.steps, outcome);

            if self.config.json {
                let line = serde_json::to_string(&state.snapshot())
                    .context("Failed to serialize snapshot")?;
                writeln!(self.out, "{}", line).context("Failed to write snapshot")?;
            } else if (game + 1) % self.config.log_frequency.max(1) == 0 {
                self.print_progress(game + 1)?;
            }
        }

        info!(summary = %self.stats.format_summary(), "simulation complete");

        if !self.config.json {
            writeln!(self.out, "\nSimulation complete!").context("Failed to write summary")?;
            writeln!(self.out, "\nFinal Statistics:")?;
            writeln!(self.out, "{}", self.stats.format_summary())?;
        }
        self.out.flush().context("Failed to flush output")?;

        Ok(&self.stats)
    }

    /// Tick the current game until it ends or hits the step cap
    fn play_game(&mut self) -> GameOutcome {
        loop {
            let state = self.session.state();
            if let Some(reason) = state.end_reason {
                return GameOutcome::Ended(reason);
            }
            if state.steps >= self.config.max_steps {
                return GameOutcome::StepLimit;
            }
            self.session.tick();
        }
    }

    fn print_header(&mut self) -> Result<()> {
        if self.config.json {
            return Ok(());
        }

        let game_config = &self.config.game_config;
        let seed = self
            .config
            .seed
            .map_or_else(|| "random".to_string(), |seed| seed.to_string());

        writeln!(self.out, "{}", "=".repeat(70)).context("Failed to write header")?;
        writeln!(self.out, "Autopilot Simulation - Grid Snake")?;
        writeln!(self.out, "{}", "=".repeat(70))?;
        writeln!(self.out, "Games: {}", self.config.games)?;
        writeln!(
            self.out,
            "Game Config: {}x{} grid, {} obstacles",
            game_config.grid_width, game_config.grid_height, game_config.obstacle_count
        )?;
        writeln!(self.out, "Seed: {}", seed)?;
        writeln!(self.out, "Step cap: {} per game", self.config.max_steps)?;
        writeln!(self.out, "{}", "=".repeat(70))?;
        writeln!(self.out)?;
        Ok(())
    }

    fn print_progress(&mut self, game: usize) -> Result<()> {
        writeln!(
            self.out,
            "[Game {}/{}] {}",
            game,
            self.config.games,
            self.stats.format_summary()
        )
        .context("Failed to write progress")
    }

    /// Consume the mode and return the output sink
    pub fn into_writer(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Phase, Snapshot};
    use pretty_assertions::assert_eq;

    fn config(games: usize, seed: u64) -> SimulateConfig {
        let mut config = SimulateConfig::new(games);
        config.seed = Some(seed);
        config.max_steps = 500;
        config.game_config = GameConfig::small();
        config
    }

    fn run_to_string(config: SimulateConfig) -> String {
        let mut mode = SimulateMode::with_writer(config, Vec::new());
        mode.run().unwrap();
        String::from_utf8(mode.into_writer()).unwrap()
    }

    #[test]
    fn test_simulate_config_creation() {
        let config = SimulateConfig::new(1000);
        assert_eq!(config.games, 1000);
        assert_eq!(config.seed, None);
        assert!(!config.json);
    }

    #[test]
    fn test_plays_every_game() {
        let mut mode = SimulateMode::with_writer(config(4, 11), Vec::new());
        let stats = mode.run().unwrap();

        assert_eq!(stats.total_games(), 4);
        assert_eq!(
            stats.collisions() + stats.no_path() + stats.board_full() + stats.step_limit(),
            4
        );
    }

    #[test]
    fn test_autopilot_never_collides() {
        let mut mode = SimulateMode::with_writer(config(20, 12), Vec::new());
        let stats = mode.run().unwrap();
        assert_eq!(stats.collisions(), 0);
    }

    #[test]
    fn test_step_cap() {
        let mut config = config(3, 13);
        config.max_steps = 5;
        config.game_config = GameConfig {
            obstacle_count: 0,
            ..GameConfig::default()
        };

        let mut mode = SimulateMode::with_writer(config, Vec::new());
        let stats = mode.run().unwrap();

        assert_eq!(stats.step_limit(), 3);
        assert_eq!(stats.total_steps(), 15);
    }

    #[test]
    fn test_same_seed_same_report() {
        let first = run_to_string(config(5, 14));
        let second = run_to_string(config(5, 14));
        assert_eq!(first, second);
        assert!(first.contains("Seed: 14"));
        assert!(first.contains("Games: 5"));
    }

    #[test]
    fn test_json_lines() {
        let mut config = config(3, 15);
        config.json = true;

        let output = run_to_string(config);
        let snapshots: Vec<Snapshot> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(snapshots.len(), 3);
        for snapshot in &snapshots {
            assert!(!snapshot.snake.is_empty());
            if snapshot.phase == Phase::Over {
                assert!(snapshot.end_reason.is_some());
            }
        }
        assert!(!output.contains("Simulation complete"));
    }
}
