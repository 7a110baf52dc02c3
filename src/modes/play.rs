use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{ControlMode, GameConfig, Session};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Interactive terminal game, driven by the keyboard or by the autopilot
pub struct PlayMode {
    session: Session,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig, mode: ControlMode, seed: Option<u64>, show_path: bool) -> Self {
        let session = match seed {
            Some(seed) => Session::seeded(config, mode, seed),
            None => Session::new(config, mode),
        };

        Self {
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new().with_path(show_path),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            mode = self.session.mode().as_str(),
            width = self.session.config().grid_width,
            height = self.session.config().grid_height,
            "session started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            games = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "session closed"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // A late tick is pushed back rather than fired in a burst
        let mut tick_timer = interval(self.session.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, &mut tick_timer),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, only while running
                _ = tick_timer.tick(), if self.session.is_ticking() => {
                    self.update_game();
                    self.draw(terminal)?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::GameAction(action) => {
                // Settle the clock under the old phase first
                self.metrics.update(self.session.is_ticking());
                let restarting = self.session.state().is_over();

                if self.session.apply(action) {
                    if restarting {
                        self.metrics.on_game_start();
                    }
                    // First move lands one full interval after (re)starting
                    tick_timer.reset();
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let result = self.session.tick();

        if result.terminated {
            let state = self.session.state();
            self.metrics.update(true);
            self.metrics.on_game_over(state);
            debug!(
                games = self.metrics.games_played,
                high_score = self.metrics.high_score,
                "game recorded"
            );
        }
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update(self.session.is_ticking());
        terminal
            .draw(|frame| {
                self.renderer.render(
                    frame,
                    self.session.state(),
                    &self.metrics,
                    self.session.mode(),
                    self.session.planned_path(),
                );
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Phase, Position};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn open_config() -> GameConfig {
        GameConfig {
            obstacle_count: 0,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_game_initialization() {
        let manual = PlayMode::new(GameConfig::default(), ControlMode::Manual, Some(1), false);
        assert_eq!(manual.session.state().phase, Phase::Paused);
        assert_eq!(manual.session.state().score, 0);

        let auto = PlayMode::new(GameConfig::default(), ControlMode::Autopilot, Some(1), true);
        assert_eq!(auto.session.state().phase, Phase::Running);
    }

    #[tokio::test]
    async fn test_start_key_begins_manual_game() {
        let mut mode = PlayMode::new(open_config(), ControlMode::Manual, Some(2), false);
        let mut timer = interval(Duration::from_millis(100));

        mode.handle_event(key(KeyCode::Char('y')), &mut timer);
        assert!(mode.session.is_ticking());

        mode.handle_event(key(KeyCode::Char('p')), &mut timer);
        assert_eq!(mode.session.state().phase, Phase::Paused);
    }

    #[tokio::test]
    async fn test_quit_key() {
        let mut mode = PlayMode::new(open_config(), ControlMode::Manual, Some(3), false);
        let mut timer = interval(Duration::from_millis(100));

        mode.handle_event(key(KeyCode::Esc), &mut timer);
        assert!(mode.should_quit);
    }

    #[tokio::test]
    async fn test_game_over_then_restart() {
        let mut mode = PlayMode::new(open_config(), ControlMode::Manual, Some(4), false);
        let mut timer = interval(Duration::from_millis(100));
        mode.handle_event(key(KeyCode::Char('y')), &mut timer);
        mode.handle_event(key(KeyCode::Up), &mut timer);

        // Head starts at (5, 5); the sixth move up leaves the grid
        for _ in 0..6 {
            mode.update_game();
        }
        assert!(mode.session.state().is_over());
        assert_eq!(mode.metrics.games_played, 1);

        mode.handle_event(key(KeyCode::Char('Y')), &mut timer);
        assert_eq!(mode.session.state().phase, Phase::Running);
        assert_eq!(mode.session.state().snake.head(), Position::new(5, 5));
        assert_eq!(mode.metrics.elapsed_time, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_key_release_is_ignored() {
        let mut mode = PlayMode::new(open_config(), ControlMode::Manual, Some(5), false);
        let mut timer = interval(Duration::from_millis(100));

        let mut release = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        mode.handle_event(Event::Key(release), &mut timer);

        assert_eq!(mode.session.state().phase, Phase::Paused);
    }
}
