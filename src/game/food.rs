//! Food entity - placed on a random free cell

use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;
use tracing::debug;

use super::grid::{Cell, Grid};
use crate::error::GameError;

/// Random probes before falling back to enumerating free cells
const SAMPLE_ATTEMPTS: usize = 64;

/// The food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    /// Position of the food
    position: Cell,
}

impl Food {
    /// Place food on a random cell outside `exclude`
    pub fn new<R: Rng + ?Sized>(
        grid: &Grid,
        exclude: &HashSet<Cell>,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let mut food = Self {
            position: Cell::new(0, 0),
        };
        food.randomize(grid, exclude, rng)?;
        Ok(food)
    }

    /// Create food at a specific cell
    pub fn at(position: Cell) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Check if a cell matches the food position
    pub fn is_at(&self, cell: Cell) -> bool {
        self.position == cell
    }

    /// Move to a uniformly random cell not in `exclude`.
    ///
    /// Fails without touching the position when `exclude` covers the board.
    pub fn randomize<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        exclude: &HashSet<Cell>,
        rng: &mut R,
    ) -> Result<Cell, GameError> {
        let blocked = exclude.iter().filter(|c| grid.contains(**c)).count();
        if blocked >= grid.cell_count() {
            return Err(GameError::BoardFull {
                cells: grid.cell_count(),
            });
        }

        for _ in 0..SAMPLE_ATTEMPTS {
            let candidate = grid.random_cell(rng);
            if !exclude.contains(&candidate) {
                self.position = candidate;
                return Ok(candidate);
            }
        }

        debug!("Board crowded ({} of {} cells), picking from free cells", blocked, grid.cell_count());
        let candidate = grid
            .cells()
            .filter(|c| !exclude.contains(c))
            .choose(rng)
            .ok_or(GameError::BoardFull {
                cells: grid.cell_count(),
            })?;
        self.position = candidate;
        Ok(candidate)
    }
}
