use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::action::Direction;
use super::grid::Grid;
use super::state::{Position, OBSTACLE_LEN};

/// Whether obstacle cells may extend past the grid edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleBounds {
    /// Only the anchor has to be on the grid; trailing cells may fall off it
    #[default]
    Unclipped,
    /// Every obstacle cell has to be on the grid
    Inside,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Starting cell of the snake head
    pub start_x: i32,
    pub start_y: i32,
    /// Initial heading; the initial body trails behind it
    pub start_direction: Direction,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Obstacle groups placed per session
    pub obstacle_count: usize,
    pub obstacle_bounds: ObstacleBounds,
    /// Random samples tried before placement scans the grid
    pub max_placement_attempts: usize,
    /// Delay between simulation ticks
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            start_x: 5,
            start_y: 5,
            start_direction: Direction::Right,
            initial_snake_length: 1,
            obstacle_count: 6,
            obstacle_bounds: ObstacleBounds::Unclipped,
            max_placement_attempts: 1000,
            tick_interval_ms: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    pub fn start_position(&self) -> Position {
        Position::new(self.start_x, self.start_y)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if i32::try_from(self.grid_width).is_err() || i32::try_from(self.grid_height).is_err() {
            return Err("grid dimensions must fit in i32".to_string());
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        let grid = self.grid();
        if !grid.in_bounds(self.start_position()) || !self.tail_fits(&grid) {
            return Err(format!(
                "initial snake from ({}, {}) with length {} does not fit the {}x{} grid",
                self.start_x,
                self.start_y,
                self.initial_snake_length,
                self.grid_width,
                self.grid_height
            ));
        }

        // Snake, food and every obstacle cell need room
        let needed = self
            .obstacle_count
            .checked_mul(OBSTACLE_LEN)
            .and_then(|cells| cells.checked_add(self.initial_snake_length))
            .and_then(|cells| cells.checked_add(1));
        if needed.map_or(true, |needed| needed > grid.cell_count()) {
            return Err(format!(
                "obstacle_count ({}) leaves no room on a {}x{} grid",
                self.obstacle_count, self.grid_width, self.grid_height
            ));
        }

        if self.obstacle_count > 0
            && self.obstacle_bounds == ObstacleBounds::Inside
            && self.grid_width < OBSTACLE_LEN
            && self.grid_height < OBSTACLE_LEN
        {
            return Err(format!(
                "obstacles of {} cells cannot fit inside a {}x{} grid",
                OBSTACLE_LEN, self.grid_width, self.grid_height
            ));
        }

        if self.max_placement_attempts == 0 {
            return Err("max_placement_attempts must be at least 1".to_string());
        }

        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be positive".to_string());
        }

        Ok(())
    }

    /// Whether the initial body, trailing opposite to the start direction,
    /// ends inside the grid
    fn tail_fits(&self, grid: &Grid) -> bool {
        let (dx, dy) = self.start_direction.delta();
        let trail = i64::try_from(self.initial_snake_length - 1).unwrap_or(i64::MAX);
        let tail_x = i64::from(self.start_x).saturating_sub(i64::from(dx).saturating_mul(trail));
        let tail_y = i64::from(self.start_y).saturating_sub(i64::from(dy).saturating_mul(trail));

        (0..grid.columns as i64).contains(&tail_x) && (0..grid.rows as i64).contains(&tail_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 1);
        assert_eq!(config.obstacle_count, 6);
        assert_eq!(config.start_position(), Position::new(5, 5));
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 15);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.grid(), Grid::new(15, 15));
    }

    #[test]
    fn test_rejects_empty_grid() {
        assert!(GameConfig::new(0, 20).validate().is_err());
        assert!(GameConfig::new(20, 0).validate().is_err());
    }

    #[test]
    fn test_rejects_start_outside_grid() {
        let mut config = GameConfig::default();
        config.start_x = 20;
        assert!(config.validate().is_err());

        // Body of 7 trailing left from x=5 would need x=-1
        let mut config = GameConfig::default();
        config.initial_snake_length = 7;
        assert!(config.validate().is_err());

        config.initial_snake_length = 6;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_overfull_obstacles() {
        let mut config = GameConfig::new(6, 6);
        config.start_x = 0;
        config.start_y = 0;
        config.obstacle_count = 9;
        assert!(config.validate().is_err());

        config.obstacle_count = 8;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_huge_counts_without_overflow() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "initial_snake_length": 2147483648 }"#).unwrap();
        assert!(config.validate().is_err());

        let config: GameConfig =
            serde_json::from_str(r#"{ "initial_snake_length": 18446744073709551615 }"#).unwrap();
        assert!(config.validate().is_err());

        let config: GameConfig =
            serde_json::from_str(r#"{ "obstacle_count": 4611686018427387904 }"#).unwrap();
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.obstacle_count = usize::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_limits() {
        let mut config = GameConfig::default();
        config.max_placement_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "grid_width": 12, "obstacle_count": 2, "obstacle_bounds": "inside" }}"#
        )
        .unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.obstacle_count, 2);
        assert_eq!(config.obstacle_bounds, ObstacleBounds::Inside);
        assert_eq!(config.start_direction, Direction::Right);
    }

    #[test]
    fn test_load_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = GameConfig::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(GameConfig::from_json_file(&missing).is_err());
    }
}
