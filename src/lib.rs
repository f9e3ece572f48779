//! Grid Snake
//!
//! Simulation engine for a single-player snake on a toroidal grid, plus a
//! tokio tick driver that turns input commands into per-tick frames.

pub mod broadcast;
pub mod config;
pub mod error;
pub mod event_log;
pub mod game;
pub mod protocol;

pub use config::GameConfig;
pub use error::{ConfigError, GameError};
pub use game::{Cell, Direction, RoundController, RoundState, TickOutcome};
pub use protocol::{Command, Frame, FrameOutcome};
