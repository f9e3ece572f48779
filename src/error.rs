//! Error types for configuration loading and the simulation core

use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found
    #[error("config file not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Validation error
    #[error("validation error: {0}")]
    Validation(String),
}

/// Contract violations inside the simulation core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Food placement was requested while every cell is excluded
    #[error("no free cell left for food on a board of {cells} cells")]
    BoardFull { cells: usize },
}
