use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use level_snake::game::GameConfig;
use level_snake::modes::HumanMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "level_snake")]
#[command(version, about = "Snake: clear every apple to reach the next, faster level")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Tick interval at the first level, in milliseconds
    #[arg(long)]
    speed: Option<u64>,

    /// Number of levels to clear to win
    #[arg(long)]
    max_level: Option<u32>,

    /// Seed for apple placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where log output goes; the terminal is taken by the game
    #[arg(long, default_value = "level_snake.log")]
    log_file: PathBuf,
}

impl Cli {
    /// Defaults, then the config file, then command-line flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(speed) = self.speed {
            config.default_speed = speed;
        }
        if let Some(max_level) = self.max_level {
            config.max_level = max_level;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let log_file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install log subscriber: {err}"))?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_file)?;
    let config = cli.game_config()?;
    tracing::debug!(?config, "Resolved configuration");

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
