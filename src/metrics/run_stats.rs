//! Statistics for batches of headless autopilot games
//!
//! Rolling averages over the most recent games, plus totals and a breakdown
//! of how the games ended.

use std::collections::VecDeque;

use crate::game::EndReason;

/// How a simulated game stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Ended(EndReason),
    /// Still running when the per-game step cap was reached
    StepLimit,
}

/// Game statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use grid_snake::game::EndReason;
/// use grid_snake::metrics::{GameOutcome, RunStats};
///
/// let mut stats = RunStats::new(100);
/// stats.record_game(12, 340, GameOutcome::Ended(EndReason::NoPath));
///
/// assert_eq!(stats.total_games(), 1);
/// assert_eq!(stats.best_score(), 12);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Game scores (rolling window)
    scores: VecDeque<u32>,

    /// Game lengths in steps (rolling window)
    lengths: VecDeque<u32>,

    total_games: usize,
    total_steps: u64,
    best_score: u32,

    collisions: usize,
    no_path: usize,
    board_full: usize,
    step_limit: usize,

    /// Window size for rolling averages
    window_size: usize,
}

impl RunStats {
    /// Create a new tracker keeping `window_size` recent games for averages
    pub fn new(window_size: usize) -> Self {
        Self {
            scores: VecDeque::with_capacity(window_size),
            lengths: VecDeque::with_capacity(window_size),
            total_games: 0,
            total_steps: 0,
            best_score: 0,
            collisions: 0,
            no_path: 0,
            board_full: 0,
            step_limit: 0,
            window_size,
        }
    }

    /// Record the end of a game
    pub fn record_game(&mut self, score: u32, steps: u32, outcome: GameOutcome) {
        Self::push_deque(&mut self.scores, score, self.window_size);
        Self::push_deque(&mut self.lengths, steps, self.window_size);
        self.total_games += 1;
        self.total_steps += u64::from(steps);
        self.best_score = self.best_score.max(score);

        match outcome {
            GameOutcome::Ended(EndReason::Collision(_)) => self.collisions += 1,
            GameOutcome::Ended(EndReason::NoPath) => self.no_path += 1,
            GameOutcome::Ended(EndReason::BoardFull) => self.board_full += 1,
            GameOutcome::StepLimit => self.step_limit += 1,
        }
    }

    /// Mean score over the rolling window, 0.0 if empty
    pub fn mean_score(&self) -> f32 {
        Self::mean(&self.scores)
    }

    /// Mean game length in steps over the rolling window
    pub fn mean_length(&self) -> f32 {
        Self::mean(&self.lengths)
    }

    pub fn total_games(&self) -> usize {
        self.total_games
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn no_path(&self) -> usize {
        self.no_path
    }

    pub fn board_full(&self) -> usize {
        self.board_full
    }

    pub fn step_limit(&self) -> usize {
        self.step_limit
    }

    /// Format a one-line summary of the current statistics
    pub fn format_summary(&self) -> String {
        format!(
            "Games: {} | Steps: {} | Score: {:.2} | Best: {} | Len: {:.1} | NoPath: {} | Collision: {} | Full: {} | Capped: {}",
            self.total_games,
            self.total_steps,
            self.mean_score(),
            self.best_score,
            self.mean_length(),
            self.no_path,
            self.collisions,
            self.board_full,
            self.step_limit,
        )
    }

    fn mean(deque: &VecDeque<u32>) -> f32 {
        if deque.is_empty() {
            0.0
        } else {
            deque.iter().map(|&v| v as f32).sum::<f32>() / deque.len() as f32
        }
    }

    /// Helper function to push to a deque with size limit
    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
