use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

use super::{
    action::Action,
    config::GameConfig,
    controller::{ControlMode, Controller},
    engine::{GameEngine, StepResult},
    state::{GameState, Phase, Position},
};

/// One player's game: engine, current state and the controller driving it.
///
/// Input is applied between ticks; each [`Session::tick`] reads whatever the
/// controller has accumulated since the previous one.
pub struct Session<R = StdRng> {
    engine: GameEngine<R>,
    state: GameState,
    controller: Box<dyn Controller>,
    mode: ControlMode,
}

impl Session<StdRng> {
    pub fn new(config: GameConfig, mode: ControlMode) -> Self {
        Self::with_engine(GameEngine::new(config), mode)
    }

    pub fn seeded(config: GameConfig, mode: ControlMode, seed: u64) -> Self {
        Self::with_engine(GameEngine::seeded(config, seed), mode)
    }
}

impl<R: Rng> Session<R> {
    pub fn with_engine(mut engine: GameEngine<R>, mode: ControlMode) -> Self {
        let state = engine.new_game(mode);
        Self {
            engine,
            state,
            controller: mode.controller(),
            mode,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    /// Path the controller is following, empty for keyboard play
    pub fn planned_path(&self) -> &[Position] {
        self.controller.planned_path()
    }

    /// Whether the tick timer should keep firing
    pub fn is_ticking(&self) -> bool {
        self.state.phase == Phase::Running
    }

    /// Advance the simulation by one step; a no-op unless running
    pub fn tick(&mut self) -> StepResult {
        let candidate = if self.is_ticking() {
            self.controller.next_head(&self.state)
        } else {
            None
        };
        self.engine.step(&mut self.state, candidate)
    }

    /// Apply a player action
    ///
    /// Returns true if the session entered `Running`, so the caller can start
    /// a fresh tick chain.
    pub fn apply(&mut self, action: Action) -> bool {
        match (action, self.state.phase) {
            (Action::Move(direction), Phase::Running) if self.mode == ControlMode::Manual => {
                // Only quarter turns; reversing or repeating the heading is ignored
                if self.state.snake.direction.is_perpendicular(direction) {
                    self.controller.request_turn(direction);
                } else {
                    debug!(?direction, heading = ?self.state.snake.direction, "turn ignored");
                }
                false
            }
            (Action::Start, Phase::Paused) => {
                self.state.phase = Phase::Running;
                info!("resumed");
                true
            }
            (Action::Start, Phase::Over) => {
                self.restart();
                true
            }
            (Action::Pause, Phase::Running) if self.mode == ControlMode::Manual => {
                self.state.phase = Phase::Paused;
                info!("paused");
                false
            }
            _ => false,
        }
    }

    /// Replace the whole game with a fresh one, running immediately
    pub fn restart(&mut self) {
        self.state = self.engine.new_game(self.mode);
        self.state.phase = if self.state.is_over() {
            Phase::Over
        } else {
            Phase::Running
        };
        self.controller.reset();
        info!(mode = self.mode.as_str(), "restarted");
    }
}
