use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::pathfinder::shortest_path;
use super::state::{GameState, Position};

/// Which controller drives the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    /// Arrow keys; the session starts paused
    Manual,
    /// Breadth-first search toward the food; the session starts running
    Autopilot,
}

impl ControlMode {
    pub fn controller(self) -> Box<dyn Controller> {
        match self {
            ControlMode::Manual => Box::new(Keyboard::default()),
            ControlMode::Autopilot => Box::new(Autopilot::default()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Manual => "Manual",
            ControlMode::Autopilot => "Autopilot",
        }
    }
}

/// Source of the snake's next head cell
pub trait Controller {
    /// Candidate cell for the head on this tick.
    ///
    /// `None` means the controller has nowhere to go, which ends the game.
    fn next_head(&mut self, state: &GameState) -> Option<Position>;

    /// Record a turn request; the caller has already checked it is perpendicular
    fn request_turn(&mut self, _direction: Direction) {}

    /// Forget per-game memory when a new game starts
    fn reset(&mut self) {}

    /// Cells the controller currently intends to follow, head first
    fn planned_path(&self) -> &[Position] {
        &[]
    }
}

/// Follows the most recent turn request, otherwise keeps going straight
#[derive(Debug, Default)]
pub struct Keyboard {
    pending: Option<Direction>,
}

impl Controller for Keyboard {
    fn next_head(&mut self, state: &GameState) -> Option<Position> {
        let direction = self.pending.take().unwrap_or(state.snake.direction);
        Some(state.snake.head().moved_in_direction(direction))
    }

    fn request_turn(&mut self, direction: Direction) {
        self.pending = Some(direction);
    }

    fn reset(&mut self) {
        self.pending = None;
    }
}

/// Steps along a freshly computed shortest path to the food every tick
#[derive(Debug, Default)]
pub struct Autopilot {
    path: Vec<Position>,
}

impl Controller for Autopilot {
    fn next_head(&mut self, state: &GameState) -> Option<Position> {
        self.path = shortest_path(state).unwrap_or_default();
        tracing::trace!(len = self.path.len(), "autopilot path");
        // A path shorter than two cells has no next step
        self.path.get(1).copied()
    }

    fn reset(&mut self) {
        self.path.clear();
    }

    fn planned_path(&self) -> &[Position] {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Grid;
    use crate::game::state::{Obstacle, Orientation, Snake};

    fn state(food: Option<Position>, obstacles: Vec<Obstacle>) -> GameState {
        GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 1),
            food,
            obstacles,
            Grid::new(20, 20),
        )
    }

    #[test]
    fn test_keyboard_keeps_heading() {
        let mut keyboard = Keyboard::default();
        let state = state(Some(Position::new(0, 0)), Vec::new());
        assert_eq!(keyboard.next_head(&state), Some(Position::new(6, 5)));
    }

    #[test]
    fn test_keyboard_uses_latest_request_once() {
        let mut keyboard = Keyboard::default();
        let state = state(Some(Position::new(0, 0)), Vec::new());

        keyboard.request_turn(Direction::Up);
        keyboard.request_turn(Direction::Down);
        assert_eq!(keyboard.next_head(&state), Some(Position::new(5, 6)));
        // Consumed; falls back to the snake's own heading
        assert_eq!(keyboard.next_head(&state), Some(Position::new(6, 5)));
    }

    #[test]
    fn test_keyboard_reset_drops_request() {
        let mut keyboard = Keyboard::default();
        keyboard.request_turn(Direction::Up);
        keyboard.reset();

        let state = state(Some(Position::new(0, 0)), Vec::new());
        assert_eq!(keyboard.next_head(&state), Some(Position::new(6, 5)));
    }

    #[test]
    fn test_autopilot_steps_toward_food() {
        let mut autopilot = Autopilot::default();
        let state = state(Some(Position::new(8, 5)), Vec::new());

        assert_eq!(autopilot.next_head(&state), Some(Position::new(6, 5)));
        assert_eq!(autopilot.planned_path().len(), 4);
    }

    #[test]
    fn test_autopilot_without_route() {
        let mut autopilot = Autopilot::default();
        // Food walled in at the top-left corner
        let state = state(
            Some(Position::new(0, 0)),
            vec![
                Obstacle::new(Position::new(1, 0), Orientation::Vertical),
                Obstacle::new(Position::new(0, 1), Orientation::Horizontal),
            ],
        );

        assert_eq!(autopilot.next_head(&state), None);
        assert!(autopilot.planned_path().is_empty());
    }

    #[test]
    fn test_autopilot_without_food() {
        let mut autopilot = Autopilot::default();
        assert_eq!(autopilot.next_head(&state(None, Vec::new())), None);
    }

    #[test]
    fn test_control_mode_builds_controller() {
        let state = state(Some(Position::new(8, 5)), Vec::new());
        let mut manual = ControlMode::Manual.controller();
        let mut auto = ControlMode::Autopilot.controller();

        assert_eq!(manual.next_head(&state), Some(Position::new(6, 5)));
        assert_eq!(auto.next_head(&state), Some(Position::new(6, 5)));
        assert!(!auto.planned_path().is_empty());
    }
}
