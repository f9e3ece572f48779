//! Game loop - ticks the round controller at its current speed

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::round::{RoundController, TickOutcome};
use crate::broadcast::Broadcaster;
use crate::event_log::{EventLog, RoundEvent};
use crate::protocol::Command;

/// What a finished loop reports back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    /// Ticks executed
    pub ticks: u64,
    /// Longest body seen
    pub best_length: usize,
}

/// Time between ticks at `speed` ticks per second, never zero
pub fn tick_period(speed: u32) -> Duration {
    let nanos = 1_000_000_000 / u64::from(speed.max(1));
    Duration::from_nanos(nanos.max(1))
}

fn ticker(speed: u32, first: Instant) -> Interval {
    let mut tick_interval = interval_at(first, tick_period(speed));
    tick_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tick_interval
}

/// Spawn the game loop task.
///
/// Commands received between ticks are handed to the controller in arrival
/// order right before the next tick. The loop ends once a quit command is
/// processed or the command channel closes.
pub fn spawn_game_loop(
    mut controller: RoundController,
    mut commands: mpsc::UnboundedReceiver<Command>,
    broadcaster: Arc<dyn Broadcaster>,
    events: EventLog,
) -> JoinHandle<RoundSummary> {
    tokio::spawn(async move {
        let mut speed = controller.speed();
        let mut tick_interval = ticker(speed, Instant::now());
        let mut best_length = controller.snake().len();

        info!("Game loop started ({} ticks/s)", speed);
        if broadcaster.subscriber_count() == 0 {
            warn!("No frame subscribers, frames will be dropped");
        }

        loop {
            tick_interval.tick().await;

            loop {
                match commands.try_recv() {
                    Ok(command) => controller.apply_input(command),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        debug!("Command channel closed");
                        controller.apply_input(Command::Quit);
                        break;
                    }
                }
            }

            let outcome = controller.tick();
            let frame = controller.frame();
            best_length = best_length.max(frame.body.len());

            if let Some(event) = RoundEvent::from_tick(outcome, &frame) {
                events.log(&event);
            }

            if controller.speed() != speed {
                events.log(&RoundEvent::SpeedChanged {
                    tick: frame.tick,
                    from: speed,
                    to: controller.speed(),
                });
                speed = controller.speed();
                tick_interval = ticker(speed, Instant::now() + tick_period(speed));
            }

            broadcaster.send(frame).await;

            if outcome == TickOutcome::Quit {
                break;
            }
        }

        let summary = RoundSummary {
            ticks: controller.ticks(),
            best_length,
        };
        info!(
            "Game loop stopped after {} ticks (best length {})",
            summary.ticks, summary.best_length
        );
        summary
    })
}
