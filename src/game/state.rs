use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::grid::Grid;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Direction of a single step from self to other, if they are adjacent
    pub fn direction_to(&self, other: Position) -> Option<Direction> {
        Direction::from_delta(other.x - self.x, other.y - self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction of the most recent move
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Check if position is occupied by any segment, head and tail included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend a new head, dropping the tail unless growing
    pub fn advance_to(&mut self, new_head: Position, grow: bool) {
        if let Some(direction) = self.head().direction_to(new_head) {
            self.direction = direction;
        }
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }
}

/// Number of cells in one obstacle group
pub const OBSTACLE_LEN: usize = 4;

/// Axis an obstacle extends along from its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    fn step(&self) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// A straight wall segment of [`OBSTACLE_LEN`] cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub cells: [Position; OBSTACLE_LEN],
    pub orientation: Orientation,
}

impl Obstacle {
    /// Extend from the anchor by +1 along the orientation's axis.
    ///
    /// Cells are not clipped to the grid.
    pub fn new(anchor: Position, orientation: Orientation) -> Self {
        let (dx, dy) = orientation.step();
        let cells = std::array::from_fn(|i| anchor.moved_by(dx * i as i32, dy * i as i32));
        Self { cells, orientation }
    }

    pub fn anchor(&self) -> Position {
        self.cells[0]
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Whether every cell lies on the grid
    pub fn is_inside(&self, grid: &Grid) -> bool {
        self.cells.iter().all(|&c| grid.in_bounds(c))
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake hit an obstacle block
    Obstacle,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Collision(CollisionType),
    /// The autopilot found no route to the food
    NoPath,
    /// Food was eaten and no free cell was left for the next one
    BoardFull,
}

impl EndReason {
    pub fn describe(&self) -> &'static str {
        match self {
            EndReason::Collision(CollisionType::Wall) => "Hit the wall",
            EndReason::Collision(CollisionType::SelfCollision) => "Bit its own tail",
            EndReason::Collision(CollisionType::Obstacle) => "Crashed into an obstacle",
            EndReason::NoPath => "No path to the food",
            EndReason::BoardFull => "Board full",
        }
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Paused,
    Running,
    Over,
}

/// Complete state of one game session
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Position>,
    pub obstacles: Vec<Obstacle>,
    pub grid: Grid,
    pub score: u32,
    /// Moves made; the tick that ends the game is not one
    pub steps: u32,
    pub phase: Phase,
    pub end_reason: Option<EndReason>,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Option<Position>, obstacles: Vec<Obstacle>, grid: Grid) -> Self {
        Self {
            snake,
            food,
            obstacles,
            grid,
            score: 0,
            steps: 0,
            phase: Phase::Running,
            end_reason: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.grid.in_bounds(pos)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Check if a position is part of any obstacle
    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.iter().any(|o| o.contains(pos))
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    /// End the session, keeping the first recorded reason
    pub fn finish(&mut self, reason: EndReason) {
        self.phase = Phase::Over;
        self.end_reason.get_or_insert(reason);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.body.clone(),
            food: self.food,
            obstacles: self.obstacles.iter().map(|o| o.cells.to_vec()).collect(),
            score: self.score,
            steps: self.steps,
            phase: self.phase,
            end_reason: self.end_reason,
        }
    }
}

/// Owned copy of what a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub obstacles: Vec<Vec<Position>>,
    pub score: u32,
    pub steps: u32,
    pub phase: Phase,
    pub end_reason: Option<EndReason>,
}
