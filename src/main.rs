//! Headless Grid Snake runner
//!
//! Reads commands from stdin, one per line, and writes every frame to stdout
//! as a JSON line. Logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grid_snake::broadcast::{write_frames, Broadcaster, InMemoryBroadcaster};
use grid_snake::event_log::EventLog;
use grid_snake::game::game_loop::spawn_game_loop;
use grid_snake::{Command, GameConfig, RoundController};

#[derive(Parser)]
#[command(name = "grid-snake")]
#[command(version, about = "Snake on a wraparound grid, driven from stdin")]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Board height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Starting speed in ticks per second
    #[arg(long)]
    speed: Option<u32>,

    /// Length that wins the round
    #[arg(long)]
    win_length: Option<usize>,

    /// RNG seed for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,

    /// Append round events to this file
    #[arg(long)]
    event_log: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.board_width = width;
        }
        if let Some(height) = self.height {
            config.board_height = height;
        }
        if let Some(speed) = self.speed {
            config.speed_start = speed;
        }
        if let Some(win_length) = self.win_length {
            config.win_length = win_length;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.event_log.is_some() {
            config.event_log = self.event_log;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grid_snake=info".into()),
        )
        .init();

    let config = Cli::parse().into_config()?;
    let events = match &config.event_log {
        Some(path) => EventLog::open(path),
        None => EventLog::disabled(),
    };
    let controller = RoundController::new(config)?;

    let broadcaster: Arc<dyn Broadcaster> = Arc::new(InMemoryBroadcaster::new());
    let frames = broadcaster.subscribe();
    let (tx, rx) = mpsc::unbounded_channel();

    // Frames -> stdout
    let printer = tokio::spawn(write_frames(frames, tokio::io::stdout()));

    // stdin -> commands
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match Command::parse(&line) {
                Some(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                None => debug!("Ignoring unknown command {:?}", line.trim()),
            }
        }
    });

    let summary = spawn_game_loop(controller, rx, broadcaster.clone(), events).await?;
    drop(broadcaster);
    match printer.await {
        Ok(Ok(written)) => debug!("Printed {} frames", written),
        Ok(Err(e)) => warn!("Frame output stopped: {}", e),
        Err(e) => error!("Frame printer task failed: {}", e),
    }

    info!(
        "Finished after {} ticks, longest snake {}",
        summary.ticks, summary.best_length
    );
    Ok(())
}
