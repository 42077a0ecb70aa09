use anyhow::{Context, Result, anyhow};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Fixed-step snake game for the terminal")]
struct Cli {
    /// Grid width
    #[arg(long, default_value = "24")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "18")]
    height: usize,

    /// Milliseconds per snake step
    #[arg(long, default_value = "125")]
    step_ms: u64,

    /// Food items on the board
    #[arg(long, default_value = "4")]
    food: usize,

    /// Seed for food placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Render frames per second
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Write a debug log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            grid_width: self.width,
            grid_height: self.height,
            step_rate: Duration::from_millis(self.step_ms),
            initial_food: self.food,
            seed: self.seed,
        }
    }
}

fn init_logging(path: &PathBuf) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), file)
        .context("Failed to initialize logger")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config();
    config.validate().map_err(|msg| anyhow!(msg))?;
    if cli.fps == 0 {
        return Err(anyhow!("fps must be at least 1"));
    }

    info!(
        "Starting {}x{} game, step {:?}",
        config.grid_width, config.grid_height, config.step_rate
    );

    let frame_interval = Duration::from_secs(1) / cli.fps;
    let mut human_mode = HumanMode::new(config, frame_interval);
    human_mode.run().await?;

    Ok(())
}
