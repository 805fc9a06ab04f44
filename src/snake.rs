use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::direction::{direction_change_is_valid, Direction};
use crate::error::GridError;

/// Grid position in `(row, col)` cell coordinates.
///
/// Signed so a one-step look-ahead past an edge is representable.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[must_use]
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.row >= 0
            && self.col >= 0
            && self.row < i32::from(bounds.rows)
            && self.col < i32::from(bounds.cols)
    }

    /// Returns the neighbouring position one cell away in `direction`.
    #[must_use]
    pub fn translate(self, direction: Direction) -> Self {
        let (dr, dc) = direction.offset();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Snake body plus its committed and pending headings.
///
/// The body always holds at least one segment. It never holds the board;
/// callers keep board cells in sync.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Option<Direction>,
}

impl Snake {
    /// Creates a horizontal snake on `row` covering columns `1..=length`,
    /// head at the right end, heading right. A zero `length` still yields
    /// one segment.
    #[must_use]
    pub fn seeded(row: i32, length: usize) -> Self {
        let length = length.max(1);
        let mut body = VecDeque::with_capacity(length);
        for col in 1..=length as i32 {
            body.push_front(Position { row, col });
        }

        Self {
            body,
            direction: Direction::Right,
            pending_direction: None,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    pub fn from_segments(
        segments: Vec<Position>,
        direction: Direction,
    ) -> Result<Self, GridError> {
        if segments.is_empty() {
            return Err(GridError::EmptySnake);
        }

        Ok(Self {
            body: VecDeque::from(segments),
            direction,
            pending_direction: None,
        })
    }

    /// Records a direction for the next tick.
    ///
    /// Every request is checked against the committed heading, not against
    /// an earlier pending one, so two quick presses cannot chain into a
    /// reversal. Returns whether the request was accepted.
    pub fn buffer_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction, self.body.len()) {
            return false;
        }

        self.pending_direction = Some(direction);
        true
    }

    /// Promotes the pending direction (if any) to the committed heading.
    pub fn commit_direction(&mut self) -> Direction {
        if let Some(next) = self.pending_direction.take() {
            self.direction = next;
        }
        self.direction
    }

    /// Pushes a new head segment.
    pub fn push_head(&mut self, position: Position) {
        self.body.push_front(position);
    }

    /// Removes and returns the tail segment.
    pub fn pop_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the committed movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction queued for the next tick, if any.
    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }
}
