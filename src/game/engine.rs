use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    config::GameConfig,
    controller::ControlMode,
    placement::{place_food, place_obstacles},
    rules::{apply_move, check_collision},
    state::{CollisionType, EndReason, GameState, Phase, Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn idle(terminated: bool) -> Self {
        Self {
            terminated,
            info: StepInfo {
                ate_food: false,
                collision_type: None,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose placements are reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh game: snake, then obstacles around it, then food
    pub fn new_game(&mut self, mode: ControlMode) -> GameState {
        let grid = self.config.grid();
        let snake = Snake::new(
            self.config.start_position(),
            self.config.start_direction,
            self.config.initial_snake_length,
        );

        let obstacles = place_obstacles(
            &mut self.rng,
            &grid,
            self.config.obstacle_count,
            &snake,
            None,
            self.config.obstacle_bounds,
            self.config.max_placement_attempts,
        );
        let food = place_food(
            &mut self.rng,
            &grid,
            &snake,
            &obstacles,
            self.config.max_placement_attempts,
        );

        let mut state = GameState::new(snake, food, obstacles, grid);
        state.phase = match mode {
            ControlMode::Manual => Phase::Paused,
            ControlMode::Autopilot => Phase::Running,
        };
        if food.is_none() {
            state.finish(EndReason::BoardFull);
        }

        info!(
            mode = mode.as_str(),
            obstacles = state.obstacles.len(),
            food = ?state.food,
            "new game"
        );
        state
    }

    /// Execute one step toward `candidate`
    ///
    /// `None` means the controller had no move, which ends the game.
    pub fn step(&mut self, state: &mut GameState, candidate: Option<Position>) -> StepResult {
        if state.phase != Phase::Running {
            return StepResult::idle(state.is_over());
        }

        let Some(new_head) = candidate else {
            state.finish(EndReason::NoPath);
            info!(score = state.score, steps = state.steps, "game over: no path");
            return StepResult::idle(true);
        };

        // Check for collisions
        if let Some(collision_type) =
            check_collision(&state.grid, new_head, &state.snake, &state.obstacles)
        {
            state.finish(EndReason::Collision(collision_type));
            info!(
                score = state.score,
                steps = state.steps,
                ?collision_type,
                "game over"
            );

            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                },
            };
        }

        // Move snake (grow if ate food)
        let ate_food = apply_move(&mut state.snake, new_head, state.food);
        state.steps += 1;

        if ate_food {
            state.score += 1;
            state.food = place_food(
                &mut self.rng,
                &state.grid,
                &state.snake,
                &state.obstacles,
                self.config.max_placement_attempts,
            );
            debug!(score = state.score, food = ?state.food, "food eaten");

            if state.food.is_none() {
                state.finish(EndReason::BoardFull);
                info!(score = state.score, steps = state.steps, "game over: board full");
            }
        }

        StepResult {
            terminated: state.is_over(),
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        }
    }
}
