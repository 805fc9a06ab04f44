use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::snake::Position;

/// Errors raised when a grid cannot host a round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GridError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    Empty { rows: u16, cols: u16 },
    #[error("grid is {cols} columns wide but the starting snake needs {min_cols}")]
    TooNarrow { cols: u16, min_cols: u16 },
    #[error("snake must have at least one segment")]
    EmptySnake,
    #[error("{what} at {position} lies outside the grid")]
    OutOfBounds {
        what: &'static str,
        position: Position,
    },
    #[error("cell {position} is occupied twice")]
    Overlap { position: Position },
}

/// Errors raised while loading a session config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Grid(#[from] GridError),
}

/// Errors raised while parsing a move script.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ReplayError {
    #[error("unexpected move {found:?} at position {index}")]
    UnknownMove { index: usize, found: char },
}
