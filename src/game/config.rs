use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

/// Configuration for the game
///
/// Loaded once at startup and never changed while a session runs. Missing
/// fields in a JSON file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    /// Tick interval at level 0, in milliseconds
    pub default_speed: u64,
    /// How much the tick interval shrinks per level, in milliseconds
    pub speed_step: u64,
    /// Clearing this many levels wins the game
    pub max_level: u32,

    // Scoring
    /// Points for eating an apple
    pub apple_reward: u32,
    /// Points for clearing a level
    pub level_bonus: u32,

    // Apple seeding
    /// Apples placed on level 0
    pub initial_apples: usize,
    /// Extra apples per level above 0
    pub apples_per_level: usize,

    /// Fixed RNG seed for reproducible apple placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 80,
            grid_height: 40,
            initial_snake_length: 3,
            default_speed: 100,
            speed_step: 7,
            max_level: 10,
            apple_reward: 100,
            level_bonus: 1000,
            initial_apples: 5,
            apples_per_level: 1,
            seed: None,
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

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(120, 60)
    }

    /// Read a (possibly partial) configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Check that the configuration describes a playable game
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width >= 2 && self.grid_height >= 2,
            "Grid must be at least 2x2, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            i32::try_from(self.grid_width).is_ok() && i32::try_from(self.grid_height).is_ok(),
            "Grid {}x{} is too large",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.initial_snake_length >= 1,
            "Snake needs at least one cell"
        );
        ensure!(
            self.initial_snake_length <= self.grid_width / 2 + 1,
            "Snake of length {} does not fit behind the centre of a {}-wide grid",
            self.initial_snake_length,
            self.grid_width
        );
        ensure!(self.max_level >= 1, "max_level must be at least 1");
        let total_slowdown = self.speed_step.checked_mul(u64::from(self.max_level - 1));
        ensure!(
            total_slowdown.is_some_and(|total| self.default_speed > total),
            "default_speed {} would reach zero before level {} (step {})",
            self.default_speed,
            self.max_level,
            self.speed_step
        );
        ensure!(
            self.initial_apples >= 1,
            "A level needs at least one apple"
        );
        ensure!(
            self.grid_width * self.grid_height > self.initial_snake_length,
            "No room left for apples"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 80);
        assert_eq!(config.grid_height, 40);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.default_speed, 100);
        assert_eq!(config.max_level, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 15);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.speed_step, 7);
        assert!(GameConfig::small().validate().is_ok());
        assert!(GameConfig::large().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "grid_width": 30, "max_level": 3 }"#).unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 40);
        assert_eq!(config.max_level, 3);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_rejects_tiny_grid() {
        assert!(GameConfig::new(1, 10).validate().is_err());
    }

    #[test]
    fn test_rejects_speed_underflow() {
        let config = GameConfig {
            default_speed: 50,
            speed_step: 7,
            max_level: 10,
            ..GameConfig::small()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            default_speed: 64,
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_overflowing_speed_step() {
        let config = GameConfig {
            speed_step: u64::MAX,
            max_level: 3,
            ..GameConfig::small()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_snake() {
        let config = GameConfig {
            initial_snake_length: 7,
            ..GameConfig::small()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = GameConfig::from_json_file(Path::new("/nonexistent/level_snake.json"));
        assert!(result.is_err());
    }
}
