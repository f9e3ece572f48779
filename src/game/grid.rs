//! Grid geometry: cells and toroidal wraparound

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use crate::config::GameConfig;

/// A position on the board, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Create a new cell
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Board axis used by [`Grid::wrap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

fn side(cells: u32) -> i32 {
    i32::try_from(cells.max(1)).unwrap_or(i32::MAX)
}

/// Board dimensions and wraparound arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cell_size: u32,
    width: i32,
    height: i32,
}

impl Grid {
    /// Create a grid; each side is clamped to `1..=i32::MAX`
    pub fn new(cell_size: u32, width: u32, height: u32) -> Self {
        Self {
            cell_size,
            width: side(width),
            height: side(height),
        }
    }

    /// Grid described by a configuration
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.cell_size, config.board_width, config.board_height)
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn width_cells(&self) -> i32 {
        self.width
    }

    pub fn height_cells(&self) -> i32 {
        self.height
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Map any coordinate back into `[0, dimension)` on the given axis
    pub fn wrap(&self, coord: i32, axis: Axis) -> i32 {
        let dim = match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        };
        coord.rem_euclid(dim)
    }

    /// The cell one step away in `direction`, re-entering from the opposite edge
    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(
            self.wrap(cell.x + dx, Axis::X),
            self.wrap(cell.y + dy, Axis::Y),
        )
    }

    /// Starting cell of the snake
    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    /// Check whether a cell lies on the board
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Uniformly random cell
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }

    /// Top-left pixel of a cell, for renderers
    pub fn to_pixels(&self, cell: Cell) -> (i32, i32) {
        let size = self.cell_size as i32;
        (cell.x * size, cell.y * size)
    }
}
