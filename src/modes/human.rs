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
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{Direction, Game, GameConfig, GameStatus, StopReason, TickEvent};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Frame period of the driver loop (~60 FPS)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Keyboard-driven play in the terminal
///
/// Every frame the game clock is read, the game is polled with
/// [`Game::should_update`] and, if due, advanced with [`Game::update`]. The
/// last heading pressed since the previous tick is applied just before it.
pub struct HumanMode {
    config: GameConfig,
    game: Game,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let game = Game::new(config.clone());

        Self {
            config,
            game,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
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
            width = self.config.grid_width,
            height = self.config.grid_height,
            max_level = self.config.max_level,
            "Starting game"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(FRAME_INTERVAL);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Poll the game and draw
                _ = frame_timer.tick() => {
                    self.on_frame(self.metrics.game_time_ms());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.game, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                self.game.stop();
                break;
            }
        }

        info!(
            games_played = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "Leaving game"
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    self.pending_direction = Some(direction);
                }
                KeyAction::Restart => {
                    self.reset_game();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    /// One driver frame at game time `now`
    fn on_frame(&mut self, now: u64) {
        let was_running = self.game.is_running();

        if self.game.should_update(now) {
            if let Some(direction) = self.pending_direction.take() {
                self.game.set_direction(direction);
            }

            if let TickEvent::LevelUp { level } = self.game.update(now) {
                debug!(level, speed = self.game.speed(), "Level cleared");
            }
        }

        if was_running && !self.game.is_running() {
            let won = self.game.status() == GameStatus::Stopped(StopReason::Won);
            self.metrics.on_game_over(self.game.score(), won);
        }
        self.metrics.update(self.game.is_running());
    }

    fn reset_game(&mut self) {
        self.game = Game::new(self.config.clone());
        self.metrics.on_game_start();
        self.pending_direction = None;
        info!("Game restarted");
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

    fn small_mode() -> HumanMode {
        HumanMode::new(GameConfig {
            seed: Some(11),
            ..GameConfig::small()
        })
    }

    #[test]
    fn test_game_initialization() {
        let mode = small_mode();
        assert!(mode.game.is_running());
        assert_eq!(mode.game.score(), 0);
        assert_eq!(mode.metrics.games_played, 0);
    }

    #[test]
    fn test_pending_direction_applied_on_tick() {
        let mut mode = small_mode();
        mode.pending_direction = Some(Direction::Down);

        mode.on_frame(0);

        assert_eq!(mode.game.snake().direction(), Direction::Down);
        assert_eq!(mode.pending_direction, None);
    }

    #[test]
    fn test_pending_direction_waits_for_due_tick() {
        let mut mode = small_mode();
        mode.on_frame(0);
        let head = mode.game.snake().head();

        mode.pending_direction = Some(Direction::Up);
        mode.on_frame(10);

        assert_eq!(mode.game.snake().head(), head);
        assert_eq!(mode.pending_direction, Some(Direction::Up));
    }

    #[test]
    fn test_game_over_recorded_once() {
        let mut mode = small_mode();

        // Centre start heading right on a 10-wide board hits the wall within 5 ticks
        let mut now = 0;
        while mode.game.is_running() && now < 10_000 {
            mode.on_frame(now);
            now += 16;
        }
        mode.on_frame(now);
        mode.on_frame(now + 1_000);

        assert!(!mode.game.is_running());
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = small_mode();
        mode.game.stop();
        mode.pending_direction = Some(Direction::Left);
        mode.metrics.start_time -= Duration::from_secs(2);

        mode.reset_game();

        assert!(mode.metrics.game_time_ms() < 2_000);
        assert!(mode.game.is_running());
        assert_eq!(mode.game.score(), 0);
        assert_eq!(mode.pending_direction, None);
    }
}
