//! Round event logging for replay and debugging

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{error, info};

use crate::game::grid::Cell;
use crate::game::round::TickOutcome;
use crate::protocol::Frame;

/// Types of round events that can be logged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    /// Snake ran into itself and was reset
    Collision { tick: u64, cell: Cell, length: usize },
    /// Snake ate the food
    FoodEaten {
        tick: u64,
        cell: Cell,
        length_target: usize,
    },
    /// Win length reached
    Won { tick: u64, length_target: usize },
    /// Restart command processed
    Restarted { tick: u64 },
    /// Tick rate changed
    SpeedChanged { tick: u64, from: u32, to: u32 },
}

impl RoundEvent {
    /// Event worth logging for a tick outcome, if any
    pub fn from_tick(outcome: TickOutcome, frame: &Frame) -> Option<Self> {
        let tick = frame.tick;
        match outcome {
            TickOutcome::Collided(event) => Some(RoundEvent::Collision {
                tick,
                cell: event.cell,
                length: event.length,
            }),
            TickOutcome::Ate => Some(RoundEvent::FoodEaten {
                tick,
                cell: frame.body.first().copied().unwrap_or(frame.food),
                length_target: frame.length_target,
            }),
            TickOutcome::Won => Some(RoundEvent::Won {
                tick,
                length_target: frame.length_target,
            }),
            TickOutcome::Restarted => Some(RoundEvent::Restarted { tick }),
            TickOutcome::Moved | TickOutcome::Frozen | TickOutcome::Quit => None,
        }
    }
}

/// Logged event with timestamp
#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    /// Unix timestamp in milliseconds
    timestamp_ms: u128,
    /// The event data
    #[serde(flatten)]
    event: &'a RoundEvent,
}

/// JSON-lines event sink; a disabled log drops everything
pub struct EventLog {
    writer: Option<Mutex<Box<dyn Write + Send>>>,
}

impl EventLog {
    /// Log that records nothing
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    /// Append to a file, falling back to a disabled log if it cannot be opened
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                info!("Event logging enabled, writing to {}", path.display());
                Self::from_writer(BufWriter::new(file))
            }
            Err(e) => {
                error!("Failed to open event log file {}: {}", path.display(), e);
                Self::disabled()
            }
        }
    }

    /// Record into any writer
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Some(Mutex::new(Box::new(writer))),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    /// Log a round event
    pub fn log(&self, event: &RoundEvent) {
        let Some(writer) = &self.writer else {
            return;
        };

        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        let entry = LogEntry { timestamp_ms, event };

        if let Ok(mut w) = writer.lock() {
            if let Ok(json) = serde_json::to_string(&entry) {
                let _ = writeln!(w, "{}", json);
                let _ = w.flush();
            }
        }
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::disabled()
    }
}
