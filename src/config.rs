use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GridError};

/// Logical grid dimensions passed through the game as a named type.
///
/// Rows run top to bottom, columns left to right.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: u16,
    pub cols: u16,
}

impl GridSize {
    #[must_use]
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }

    /// Checks that the grid is non-empty and wide enough for the seeded snake.
    ///
    /// The snake starts at columns `1..=INITIAL_SNAKE_LENGTH`, so one spare
    /// column is needed on the left.
    pub fn validate(self) -> Result<Self, GridError> {
        self.ensure_non_empty()?;

        let min_cols = INITIAL_SNAKE_LENGTH as u16 + 1;
        if self.cols < min_cols {
            return Err(GridError::TooNarrow {
                cols: self.cols,
                min_cols,
            });
        }

        Ok(self)
    }

    /// Checks that the grid has at least one cell.
    pub fn ensure_non_empty(self) -> Result<Self, GridError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::Empty {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_ROWS,
            cols: DEFAULT_GRID_COLS,
        }
    }
}

/// Default board height in cells.
pub const DEFAULT_GRID_ROWS: u16 = 20;

/// Default board width in cells.
pub const DEFAULT_GRID_COLS: u16 = 20;

/// Number of segments the snake starts with.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Suggested tick cadence for drivers. The engine itself has no timer.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Session settings loaded from a JSON file by the headless driver.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub rows: u16,
    pub cols: u16,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_ROWS,
            cols: DEFAULT_GRID_COLS,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&raw)
    }

    /// Parses and validates config JSON.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.grid_size()?;
        Ok(config)
    }

    /// Returns the validated grid size.
    pub fn grid_size(&self) -> Result<GridSize, GridError> {
        GridSize::new(self.rows, self.cols).validate()
    }
}
