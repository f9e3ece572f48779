//! Messages exchanged with the input and rendering layers

use serde::{Deserialize, Serialize};

use crate::game::direction::Direction;
use crate::game::grid::Cell;
use crate::game::round::{RoundState, TickOutcome};

/// Commands sent from the input layer to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    SpeedUp,
    SpeedDown,
    Restart,
    Quit,
}

impl Command {
    /// Parse a command from a line of text
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        // Check for direction commands
        if let Some(dir) = Direction::parse(s) {
            return Some(dir.into());
        }

        match s.to_lowercase().as_str() {
            "+" | "faster" => Some(Command::SpeedUp),
            "-" | "slower" => Some(Command::SpeedDown),
            "r" | "restart" => Some(Command::Restart),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }

    /// Heading carried by a move command
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Command::MoveUp => Some(Direction::Up),
            Command::MoveDown => Some(Direction::Down),
            Command::MoveLeft => Some(Direction::Left),
            Command::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Command::MoveUp,
            Direction::Down => Command::MoveDown,
            Direction::Left => Command::MoveLeft,
            Direction::Right => Command::MoveRight,
        }
    }
}

/// What the last tick did, so renderers know when to redraw from scratch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameOutcome {
    /// No tick has run yet
    Started,
    Moved,
    Ate,
    /// Snake was reset; stale segments must be cleared
    Collided,
    Won,
    Frozen,
    /// Round was reset by command; stale segments must be cleared
    Restarted,
    Quit,
}

impl FrameOutcome {
    /// Whether the board must be cleared before drawing this frame
    pub fn clears_board(&self) -> bool {
        matches!(self, FrameOutcome::Collided | FrameOutcome::Restarted)
    }
}

impl From<TickOutcome> for FrameOutcome {
    fn from(outcome: TickOutcome) -> Self {
        match outcome {
            TickOutcome::Moved => FrameOutcome::Moved,
            TickOutcome::Ate => FrameOutcome::Ate,
            TickOutcome::Collided(_) => FrameOutcome::Collided,
            TickOutcome::Won => FrameOutcome::Won,
            TickOutcome::Frozen => FrameOutcome::Frozen,
            TickOutcome::Restarted => FrameOutcome::Restarted,
            TickOutcome::Quit => FrameOutcome::Quit,
        }
    }
}

/// Read-only state published to renderers after every tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub state: RoundState,
    pub outcome: FrameOutcome,
    /// Snake segments, head first
    pub body: Vec<Cell>,
    /// Cell to erase, if the tail moved off it
    pub vacated: Option<Cell>,
    pub food: Cell,
    /// Ticks per second
    pub speed: u32,
    pub length_target: usize,
    pub score: u32,
    pub cell_size: u32,
    pub board_width: i32,
    pub board_height: i32,
}

impl Frame {
    /// Serialize frame to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
