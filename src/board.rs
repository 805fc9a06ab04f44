use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::snake::Position;

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Snake,
    Food,
}

impl Cell {
    fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Snake => 'o',
            Self::Food => '*',
        }
    }
}

/// Fixed-size grid of cells stored row-major.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Board {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an all-empty board.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size.total_cells()],
        }
    }

    /// Returns true when `position` lies on the board.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position.is_within_bounds(self.size)
    }

    /// Returns the cell at `position`, or `None` off the board.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<Cell> {
        self.index(position).map(|index| self.cells[index])
    }

    /// Overwrites the cell at `position`. Off-board writes are ignored.
    pub fn set(&mut self, position: Position, cell: Cell) {
        if let Some(index) = self.index(position) {
            self.cells[index] = cell;
        }
    }

    /// Counts cells holding `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|candidate| **candidate == cell).count()
    }

    /// Iterates over every cell with its position, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let cols = usize::from(self.size.cols);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let position = Position {
                row: (index / cols) as i32,
                col: (index % cols) as i32,
            };
            (position, *cell)
        })
    }

    /// Iterates over empty positions, row-major.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells()
            .filter(|(_, cell)| *cell == Cell::Empty)
            .map(|(position, _)| position)
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        Some(position.row as usize * usize::from(self.size.cols) + position.col as usize)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cells.is_empty() {
            return Ok(());
        }
        for row in self.cells.chunks(usize::from(self.size.cols)) {
            let line: String = row.iter().map(|cell| cell.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
