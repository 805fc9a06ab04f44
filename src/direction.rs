use serde::{Deserialize, Serialize};

/// Canonical movement directions for the snake.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the `(row, col)` step for one cell of movement.
    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
///
/// A single-segment snake has no neck, so it may reverse freely.
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction, snake_len: usize) -> bool {
    snake_len <= 1 || next != current.opposite()
}
