//! Round controller - owns the simulation and runs one tick at a time

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::collision::CollisionEvent;
use super::food::Food;
use super::grid::Grid;
use super::snake::{MoveOutcome, Snake};
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::protocol::{Command, Frame, FrameOutcome};

/// Phase of the round
///
/// `Won` freezes the simulation until a restart command arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundState {
    Running,
    Won,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Snake advanced without eating
    Moved,
    /// Snake ate the food and the food moved elsewhere
    Ate,
    /// Snake hit itself and was reset
    Collided(CollisionEvent),
    /// Length target reached the win length this tick
    Won,
    /// Round is won and waiting for a restart
    Frozen,
    /// A restart command reset the round
    Restarted,
    /// A quit command was processed
    Quit,
}

/// Owns the snake, the food and the tick state machine
pub struct RoundController {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Food,
    state: RoundState,
    speed: u32,
    commands: VecDeque<Command>,
    ticks: u64,
    score: u32,
    quit: bool,
    last_outcome: Option<TickOutcome>,
    rng: StdRng,
}

impl RoundController {
    /// Create a controller, seeding the RNG from the config or OS entropy
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a controller with an explicit random source
    pub fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = Grid::from_config(&config);
        let snake = Snake::new(grid.center());
        // A valid config has at least two cells, so one is always free.
        let food = Food::new(&grid, &snake.occupied(), &mut rng)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        info!(
            "New round on a {}x{} board, win at length {}",
            grid.width_cells(),
            grid.height_cells(),
            config.win_length
        );

        Ok(Self {
            speed: config.speed_start,
            config,
            grid,
            snake,
            food,
            state: RoundState::Running,
            commands: VecDeque::new(),
            ticks: 0,
            score: 0,
            quit: false,
            last_outcome: None,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Mutable access for scripted setups
    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    /// Move the food to a chosen cell
    pub fn place_food(&mut self, food: Food) {
        self.food = food;
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Current tick rate in ticks per second
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Foods eaten since the last reset
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_quit(&self) -> bool {
        self.quit
    }

    /// Buffer a command; it takes effect at the start of the next tick
    pub fn apply_input(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Run one tick: apply buffered commands, then move and resolve
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.step();
        self.last_outcome = Some(outcome);
        outcome
    }

    /// Outcome of the most recent tick
    pub fn last_outcome(&self) -> Option<TickOutcome> {
        self.last_outcome
    }

    fn step(&mut self) -> TickOutcome {
        if self.quit {
            return TickOutcome::Quit;
        }
        self.ticks += 1;

        let mut restarted = false;
        while let Some(command) = self.commands.pop_front() {
            match command {
                Command::Quit => {
                    info!("Quit requested after {} ticks", self.ticks);
                    self.quit = true;
                    self.commands.clear();
                    return TickOutcome::Quit;
                }
                Command::Restart => {
                    self.restart();
                    restarted = true;
                }
                Command::SpeedUp => self.change_speed(true),
                Command::SpeedDown => self.change_speed(false),
                other => {
                    if let (Some(direction), RoundState::Running) = (other.direction(), self.state) {
                        self.snake.update_direction(direction);
                    }
                }
            }
        }

        if restarted {
            return TickOutcome::Restarted;
        }

        match self.state {
            RoundState::Won => TickOutcome::Frozen,
            RoundState::Running => self.resolve(),
        }
    }

    /// Move the snake and settle collision, food and win
    fn resolve(&mut self) -> TickOutcome {
        match self.snake.advance(&self.grid, &mut self.rng) {
            MoveOutcome::Collided(event) => {
                info!(
                    "Self-collision at ({}, {}) with length {}, resetting",
                    event.cell.x, event.cell.y, event.length
                );
                self.score = 0;
                self.relocate_food();
                TickOutcome::Collided(event)
            }
            MoveOutcome::Moved { .. } => {
                let head = self.snake.head();
                if !self.food.is_at(head) {
                    debug!("Tick {}: head at ({}, {})", self.ticks, head.x, head.y);
                    return TickOutcome::Moved;
                }

                self.snake.grow();
                self.score += 1;
                let placed = self.relocate_food();
                debug!("Ate food, length target now {}", self.snake.length_target());

                if self.snake.length_target() >= self.config.win_length || !placed {
                    info!("Round won at length {}", self.snake.length_target());
                    self.state = RoundState::Won;
                    return TickOutcome::Won;
                }
                TickOutcome::Ate
            }
        }
    }

    /// Fresh snake, fresh food, back to running
    fn restart(&mut self) {
        info!("Restarting round");
        self.snake.reset(&mut self.rng);
        self.score = 0;
        self.state = RoundState::Running;
        self.relocate_food();
    }

    /// Returns false when no free cell was left
    fn relocate_food(&mut self) -> bool {
        match self
            .food
            .randomize(&self.grid, &self.snake.occupied(), &mut self.rng)
        {
            Ok(cell) => {
                debug!("Food placed at ({}, {})", cell.x, cell.y);
                true
            }
            Err(e) => {
                warn!("Food not relocated: {}", e);
                false
            }
        }
    }

    fn change_speed(&mut self, faster: bool) {
        let step = self.config.speed_step;
        let next = if faster {
            self.speed.saturating_add(step).min(self.config.speed_max)
        } else {
            self.speed.saturating_sub(step).max(self.config.speed_min)
        };

        if next != self.speed {
            info!("Speed {} -> {} ticks/s", self.speed, next);
            self.speed = next;
        }
    }

    /// Read-only snapshot for renderers
    pub fn frame(&self) -> Frame {
        Frame {
            tick: self.ticks,
            state: self.state,
            outcome: self
                .last_outcome
                .map_or(FrameOutcome::Started, FrameOutcome::from),
            body: self.snake.body().iter().copied().collect(),
            // A cell the new head re-entered is not erased.
            vacated: self
                .snake
                .last_removed()
                .filter(|cell| !self.snake.contains(*cell)),
            food: self.food.position(),
            speed: self.speed,
            length_target: self.snake.length_target(),
            score: self.score,
            cell_size: self.grid.cell_size(),
            board_width: self.grid.width_cells(),
            board_height: self.grid.height_cells(),
        }
    }
}
