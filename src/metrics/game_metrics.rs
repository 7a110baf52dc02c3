use std::time::{Duration, Instant};

use crate::game::GameState;

/// Per-process stats shown in the header while playing
pub struct GameMetrics {
    /// Play time of the current game, excluding pauses
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    last_update: Instant,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            last_update: Instant::now(),
        }
    }

    /// Accumulate wall time since the last call if the game was running
    pub fn update(&mut self, running: bool) {
        let now = Instant::now();
        if running {
            self.elapsed_time += now.duration_since(self.last_update);
        }
        self.last_update = now;
    }

    pub fn on_game_start(&mut self) {
        self.elapsed_time = Duration::ZERO;
        self.last_update = Instant::now();
    }

    pub fn on_game_over(&mut self, state: &GameState) {
        self.games_played += 1;
        self.high_score = self.high_score.max(state.score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, EndReason, Grid, Position, Snake};

    fn finished(score: u32) -> GameState {
        let mut state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 1),
            Some(Position::new(1, 1)),
            Vec::new(),
            Grid::new(20, 20),
        );
        state.score = score;
        state.finish(EndReason::NoPath);
        state
    }

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(&finished(10));
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(&finished(5));
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(&finished(15));
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_clock_stops_while_paused() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(30));
        metrics.update(false);
        assert_eq!(metrics.elapsed_time, Duration::ZERO);

        std::thread::sleep(Duration::from_millis(30));
        metrics.update(true);
        assert!(metrics.elapsed_time.as_millis() >= 30);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(42);

        metrics.on_game_start();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
    }
}
