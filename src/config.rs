//! Game configuration
//!
//! Defaults mirror a 640x480 playfield split into 20px cells. Every field can
//! be overridden from a TOML file; missing fields fall back to the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Cell size in pixels
pub const CELL_SIZE: u32 = 20;

/// Board width in cells
pub const BOARD_WIDTH: u32 = 640 / CELL_SIZE;

/// Board height in cells
pub const BOARD_HEIGHT: u32 = 480 / CELL_SIZE;

/// Starting speed in ticks per second
pub const SPEED_START: u32 = 10;

/// Slowest allowed speed in ticks per second
pub const SPEED_MIN: u32 = 1;

/// Fastest allowed speed in ticks per second
pub const SPEED_MAX: u32 = 30;

/// Fastest tick rate any configuration may ask for
pub const SPEED_LIMIT: u32 = 1000;

/// Largest board side in cells
pub const BOARD_SIDE_LIMIT: u32 = 4096;

/// Speed change per SpeedUp/SpeedDown command
pub const SPEED_STEP: u32 = 1;

/// Length target that wins the round
pub const WIN_LENGTH: usize = 50;

/// Frame broadcast channel capacity
pub const BROADCAST_CAPACITY: usize = 100;

/// Static configuration of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pixels per cell, passed through to renderers
    pub cell_size: u32,
    /// Board width in cells
    pub board_width: u32,
    /// Board height in cells
    pub board_height: u32,
    /// Initial tick rate
    pub speed_start: u32,
    /// Lower clamp for the tick rate
    pub speed_min: u32,
    /// Upper clamp for the tick rate
    pub speed_max: u32,
    /// Tick rate change per speed command
    pub speed_step: u32,
    /// Length target at which the round is won
    pub win_length: usize,
    /// RNG seed; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Where to append the JSON-lines round event log
    pub event_log: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            speed_start: SPEED_START,
            speed_min: SPEED_MIN,
            speed_max: SPEED_MAX,
            speed_step: SPEED_STEP,
            win_length: WIN_LENGTH,
            seed: None,
            event_log: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom board size
    pub fn new(board_width: u32, board_height: u32) -> Self {
        Self {
            board_width,
            board_height,
            ..Default::default()
        }
    }

    /// Same configuration with a fixed RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Same configuration with a different win length
    pub fn with_win_length(mut self, win_length: usize) -> Self {
        self.win_length = win_length;
        self
    }

    /// Load and validate configuration from a TOML file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.board_width as usize * self.board_height as usize
    }

    /// Check that the configuration describes a playable board
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::Validation("cell_size must be positive".into()));
        }

        if self.board_width == 0 || self.board_height == 0 {
            return Err(ConfigError::Validation(format!(
                "board must have at least one cell, got {}x{}",
                self.board_width, self.board_height
            )));
        }

        if self.board_width > BOARD_SIDE_LIMIT || self.board_height > BOARD_SIDE_LIMIT {
            return Err(ConfigError::Validation(format!(
                "board sides are limited to {} cells, got {}x{}",
                BOARD_SIDE_LIMIT, self.board_width, self.board_height
            )));
        }

        if self.speed_min == 0 {
            return Err(ConfigError::Validation("speed_min must be positive".into()));
        }

        if self.speed_min > self.speed_max {
            return Err(ConfigError::Validation(format!(
                "speed_min {} exceeds speed_max {}",
                self.speed_min, self.speed_max
            )));
        }

        if self.speed_max > SPEED_LIMIT {
            return Err(ConfigError::Validation(format!(
                "speed_max {} exceeds the limit of {} ticks/s",
                self.speed_max, SPEED_LIMIT
            )));
        }

        if !(self.speed_min..=self.speed_max).contains(&self.speed_start) {
            return Err(ConfigError::Validation(format!(
                "speed_start {} outside [{}, {}]",
                self.speed_start, self.speed_min, self.speed_max
            )));
        }

        if self.speed_step == 0 {
            return Err(ConfigError::Validation("speed_step must be positive".into()));
        }

        if self.win_length < 2 {
            return Err(ConfigError::Validation(format!(
                "win_length must be at least 2, got {}",
                self.win_length
            )));
        }

        // Food always needs a free cell before the win triggers.
        if self.win_length > self.cell_count() {
            return Err(ConfigError::Validation(format!(
                "win_length {} exceeds the {} cells of the board",
                self.win_length,
                self.cell_count()
            )));
        }

        Ok(())
    }
}
