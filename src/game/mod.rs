//! Game module
//!
//! Pure simulation: nothing in here draws, polls input or sleeps, except the
//! tick driver in [`game_loop`].

pub mod collision;
pub mod direction;
pub mod food;
pub mod game_loop;
pub mod grid;
pub mod round;
pub mod snake;

pub use direction::Direction;
pub use food::Food;
pub use grid::{Axis, Cell, Grid};
pub use round::{RoundController, RoundState, TickOutcome};
pub use snake::{MoveOutcome, Snake};
