use std::time::{Duration, Instant};

/// Per-process play statistics shown in the header
#[derive(Debug)]
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub games_won: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            games_won: 0,
        }
    }

    /// Refresh the clock; frozen once the current game has ended
    pub fn update(&mut self, running: bool) {
        if running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    /// Milliseconds since the current game started; drives the engine's ticks
    pub fn game_time_ms(&self) -> u64 {
        u64::try_from(self.start_time.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32, won: bool) {
        self.games_played += 1;
        if won {
            self.games_won += 1;
        }
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
