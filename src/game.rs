use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{Board, Cell};
use crate::config::{GridSize, INITIAL_SNAKE_LENGTH};
use crate::direction::Direction;
use crate::error::GridError;
use crate::events::{DeathReason, EventListeners, GameEvent, MoveOutcome};
use crate::food::spawn_position;
use crate::snake::{Position, Snake};

/// Complete mutable game state for one round.
///
/// The board and the snake body are kept in lockstep: a cell is `Snake`
/// exactly when its position is in the body, and at most one cell is
/// `Food`. A round ends for good once `is_game_over` turns true; start a
/// new round with a fresh `GameState`.
///
/// The engine is single-writer. Drive it from one loop; listeners are
/// called synchronously from `tick` and cannot reach the engine.
#[derive(Debug)]
pub struct GameState {
    size: GridSize,
    board: Board,
    snake: Snake,
    score: u32,
    tick_count: u64,
    death_reason: Option<DeathReason>,
    rng: StdRng,
    listeners: EventListeners,
}

impl GameState {
    /// Creates a new round with an entropy-seeded food RNG.
    pub fn new(size: GridSize) -> Result<Self, GridError> {
        Self::seeded(size, StdRng::from_entropy())
    }

    /// Creates a deterministic round for tests and reproducible simulations.
    pub fn new_with_seed(size: GridSize, seed: u64) -> Result<Self, GridError> {
        Self::seeded(size, StdRng::seed_from_u64(seed))
    }

    fn seeded(size: GridSize, rng: StdRng) -> Result<Self, GridError> {
        let size = size.validate()?;
        let snake = Snake::seeded(i32::from(size.rows / 2), INITIAL_SNAKE_LENGTH);
        Self::assemble(size, snake, None, rng)
    }

    /// Creates a round from an explicit snake layout.
    ///
    /// `food` places the first food at a fixed cell; `None` picks a random
    /// empty one. Segments must be on the grid and distinct, and fixed food
    /// must not sit on the snake.
    pub fn from_parts(
        size: GridSize,
        snake: Snake,
        food: Option<Position>,
        seed: u64,
    ) -> Result<Self, GridError> {
        let size = size.ensure_non_empty()?;
        Self::assemble(size, snake, food, StdRng::seed_from_u64(seed))
    }

    fn assemble(
        size: GridSize,
        snake: Snake,
        food: Option<Position>,
        rng: StdRng,
    ) -> Result<Self, GridError> {
        let mut board = Board::new(size);
        for position in snake.segments() {
            match board.get(position) {
                None => {
                    return Err(GridError::OutOfBounds {
                        what: "snake segment",
                        position,
                    });
                }
                Some(Cell::Snake) => return Err(GridError::Overlap { position }),
                Some(_) => board.set(position, Cell::Snake),
            }
        }

        let mut state = Self {
            size,
            board,
            snake,
            score: 0,
            tick_count: 0,
            death_reason: None,
            rng,
            listeners: EventListeners::default(),
        };

        match food {
            Some(position) => match state.board.get(position) {
                None => {
                    return Err(GridError::OutOfBounds {
                        what: "food",
                        position,
                    });
                }
                Some(Cell::Snake) => return Err(GridError::Overlap { position }),
                Some(_) => state.board.set(position, Cell::Food),
            },
            None => state.place_food(),
        }

        Ok(state)
    }

    /// Registers a listener for `AppleEaten` and `GameOver` notifications.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.listeners.subscribe(listener);
    }

    /// Requests a heading for the next tick.
    ///
    /// Reversing into the neck is rejected while the snake has more than one
    /// segment. Checks always run against the committed heading; among
    /// accepted requests before a tick, the last one wins. Returns whether
    /// the request was accepted.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.snake.buffer_direction(direction)
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> MoveOutcome {
        if self.is_game_over() {
            return MoveOutcome::Idle;
        }

        self.tick_count += 1;
        let direction = self.snake.commit_direction();
        let next = self.snake.head().translate(direction);

        let Some(cell) = self.board.get(next) else {
            return self.end_round(DeathReason::WallCollision);
        };

        match cell {
            // The tail leaves its cell this tick, so following it is legal.
            Cell::Snake if next != self.snake.tail() => self.end_round(DeathReason::SelfCollision),
            Cell::Food => {
                self.snake.push_head(next);
                self.board.set(next, Cell::Snake);
                self.score += 1;
                self.listeners.emit(GameEvent::AppleEaten { score: self.score });
                self.place_food();
                MoveOutcome::AteFood
            }
            Cell::Snake | Cell::Empty => {
                if let Some(tail) = self.snake.pop_tail() {
                    self.board.set(tail, Cell::Empty);
                }
                self.snake.push_head(next);
                self.board.set(next, Cell::Snake);
                MoveOutcome::Moved
            }
        }
    }

    fn end_round(&mut self, reason: DeathReason) -> MoveOutcome {
        self.death_reason = Some(reason);
        self.listeners.emit(GameEvent::GameOver {
            reason,
            score: self.score,
        });
        MoveOutcome::GameOver(reason)
    }

    // A full board has no room for food; the round simply continues.
    fn place_food(&mut self) {
        if let Some(position) = spawn_position(&mut self.rng, &self.board) {
            self.board.set(position, Cell::Food);
        }
    }

    /// Read-only view of the board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head_position(&self) -> Position {
        self.snake.head()
    }

    /// Iterates over the snake from head to tail.
    ///
    /// Each call starts a fresh pass over the current body.
    pub fn snake_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.snake.segments()
    }

    #[must_use]
    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    /// Returns the committed heading.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.death_reason.is_some()
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// Returns true when the snake covers every cell.
    #[must_use]
    pub fn is_board_full(&self) -> bool {
        self.snake.len() == self.size.total_cells()
    }

    /// Returns the food cell, if one is on the board.
    #[must_use]
    pub fn food_position(&self) -> Option<Position> {
        self.board
            .cells()
            .find(|(_, cell)| *cell == Cell::Food)
            .map(|(position, _)| position)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    use crate::board::Cell;
    use crate::config::GridSize;
    use crate::direction::Direction;
    use crate::error::GridError;
    use crate::events::{DeathReason, GameEvent, MoveOutcome};
    use crate::snake::{Position, Snake};

    use super::GameState;

    fn horizontal_snake(row: i32, head_col: i32, len: i32) -> Snake {
        let segments = (0..len)
            .map(|offset| Position::new(row, head_col - offset))
            .collect();
        Snake::from_segments(segments, Direction::Right).expect("non-empty body")
    }

    fn recorded_events(state: &mut GameState) -> Rc<RefCell<Vec<GameEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        state.subscribe(move |event| sink.borrow_mut().push(*event));
        events
    }

    fn assert_board_matches_body(state: &GameState) {
        let body: HashSet<Position> = state.snake_positions().collect();
        let cells: HashSet<Position> = state
            .board()
            .cells()
            .filter(|(_, cell)| *cell == Cell::Snake)
            .map(|(position, _)| position)
            .collect();

        assert_eq!(body.len(), state.snake_len(), "body has duplicates");
        assert_eq!(body, cells);
    }

    #[test]
    fn construction_seeds_snake_and_one_food() {
        let state = GameState::new_with_seed(GridSize::new(20, 20), 1).expect("valid grid");

        let segments: Vec<_> = state.snake_positions().collect();
        assert_eq!(
            segments,
            vec![
                Position::new(10, 3),
                Position::new(10, 2),
                Position::new(10, 1)
            ]
        );
        assert_eq!(state.size(), GridSize::new(20, 20));
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.score(), 0);
        assert!(!state.is_game_over());
        assert_eq!(state.board().count(Cell::Food), 1);
        assert_board_matches_body(&state);
    }

    #[test]
    fn construction_rejects_unusable_grids() {
        assert!(matches!(
            GameState::new_with_seed(GridSize::new(0, 20), 1),
            Err(GridError::Empty { .. })
        ));
        assert!(matches!(
            GameState::new_with_seed(GridSize::new(20, 3), 1),
            Err(GridError::TooNarrow { .. })
        ));
    }

    #[test]
    fn from_parts_rejects_bad_layouts() {
        let size = GridSize::new(5, 5);

        let off_grid = horizontal_snake(2, 5, 2);
        assert!(matches!(
            GameState::from_parts(size, off_grid, None, 0),
            Err(GridError::OutOfBounds { .. })
        ));

        let doubled = Snake::from_segments(
            vec![Position::new(1, 1), Position::new(1, 1)],
            Direction::Right,
        )
        .expect("non-empty body");
        assert!(matches!(
            GameState::from_parts(size, doubled, None, 0),
            Err(GridError::Overlap { .. })
        ));

        assert!(matches!(
            GameState::from_parts(size, horizontal_snake(2, 3, 3), Some(Position::new(2, 2)), 0),
            Err(GridError::Overlap { .. })
        ));
    }

    #[test]
    fn snake_follows_its_tail_without_growing() {
        let mut state = GameState::from_parts(
            GridSize::new(6, 8),
            horizontal_snake(2, 3, 3),
            Some(Position::new(5, 7)),
            2,
        )
        .expect("valid layout");

        assert_eq!(state.tick(), MoveOutcome::Moved);

        assert_eq!(state.head_position(), Position::new(2, 4));
        assert_eq!(state.snake_len(), 3);
        assert_eq!(state.board().get(Position::new(2, 1)), Some(Cell::Empty));
        assert_board_matches_body(&state);
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let mut state = GameState::from_parts(
            GridSize::new(6, 8),
            horizontal_snake(2, 3, 3),
            Some(Position::new(2, 4)),
            3,
        )
        .expect("valid layout");
        let events = recorded_events(&mut state);

        assert_eq!(state.tick(), MoveOutcome::AteFood);

        assert_eq!(state.snake_len(), 4);
        assert_eq!(state.score(), 1);
        assert_eq!(state.board().get(Position::new(2, 1)), Some(Cell::Snake));
        assert_eq!(*events.borrow(), vec![GameEvent::AppleEaten { score: 1 }]);
        assert_eq!(state.board().count(Cell::Food), 1);
        assert_board_matches_body(&state);
    }

    #[test]
    fn reversal_request_keeps_heading() {
        let mut state = GameState::from_parts(
            GridSize::new(6, 8),
            horizontal_snake(2, 3, 3),
            Some(Position::new(5, 7)),
            4,
        )
        .expect("valid layout");

        assert!(!state.change_direction(Direction::Left));
        state.tick();

        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.head_position(), Position::new(2, 4));
    }

    #[test]
    fn two_quick_turns_cannot_reverse() {
        let mut state = GameState::from_parts(
            GridSize::new(6, 8),
            horizontal_snake(2, 3, 3),
            Some(Position::new(5, 7)),
            5,
        )
        .expect("valid layout");

        assert!(state.change_direction(Direction::Up));
        assert!(!state.change_direction(Direction::Left));
        state.tick();

        assert_eq!(state.head_position(), Position::new(1, 3));
        assert!(!state.is_game_over());
    }

    #[test]
    fn snake_collision_with_wall_sets_game_over() {
        let mut state = GameState::from_parts(
            GridSize::new(1, 4),
            horizontal_snake(0, 3, 3),
            None,
            6,
        )
        .expect("valid layout");
        let events = recorded_events(&mut state);

        assert_eq!(
            state.tick(),
            MoveOutcome::GameOver(DeathReason::WallCollision)
        );
        assert!(state.is_game_over());
        assert_eq!(state.death_reason(), Some(DeathReason::WallCollision));

        let head = state.head_position();
        assert_eq!(state.tick(), MoveOutcome::Idle);
        assert_eq!(state.head_position(), head);
        assert_eq!(
            *events.borrow(),
            vec![GameEvent::GameOver {
                reason: DeathReason::WallCollision,
                score: 0
            }]
        );
    }

    #[test]
    fn snake_collision_with_self_sets_game_over() {
        // Head at (2,2) heading left into (2,1), which is mid-body.
        let mut state = GameState::from_parts(
            GridSize::new(6, 6),
            Snake::from_segments(
                vec![
                    Position::new(2, 2),
                    Position::new(3, 2),
                    Position::new(3, 1),
                    Position::new(2, 1),
                    Position::new(1, 1),
                ],
                Direction::Left,
            )
            .expect("non-empty body"),
            Some(Position::new(5, 5)),
            7,
        )
        .expect("valid layout");

        assert_eq!(
            state.tick(),
            MoveOutcome::GameOver(DeathReason::SelfCollision)
        );
        assert_eq!(state.snake_len(), 5);
    }

    #[test]
    fn moving_into_vacating_tail_is_allowed() {
        // A 2x2 loop: the head chases the tail around the square.
        let mut state = GameState::from_parts(
            GridSize::new(4, 4),
            Snake::from_segments(
                vec![
                    Position::new(1, 1),
                    Position::new(1, 2),
                    Position::new(2, 2),
                    Position::new(2, 1),
                ],
                Direction::Down,
            )
            .expect("non-empty body"),
            Some(Position::new(3, 3)),
            8,
        )
        .expect("valid layout");

        assert_eq!(state.tick(), MoveOutcome::Moved);
        assert_eq!(state.head_position(), Position::new(2, 1));
        assert_eq!(state.snake_len(), 4);
        assert!(!state.is_game_over());
        assert_board_matches_body(&state);
    }

    #[test]
    fn score_is_frozen_after_game_over() {
        let mut state = GameState::from_parts(
            GridSize::new(1, 5),
            horizontal_snake(0, 2, 2),
            Some(Position::new(0, 3)),
            9,
        )
        .expect("valid layout");

        assert_eq!(state.tick(), MoveOutcome::AteFood);
        while !state.is_game_over() {
            state.tick();
        }

        let score = state.score();
        assert!(!state.change_direction(Direction::Up));
        state.tick();
        assert_eq!(state.score(), score);
    }

    #[test]
    fn filling_the_board_leaves_no_food() {
        let mut state = GameState::from_parts(
            GridSize::new(1, 3),
            horizontal_snake(0, 1, 2),
            Some(Position::new(0, 2)),
            10,
        )
        .expect("valid layout");

        assert_eq!(state.tick(), MoveOutcome::AteFood);
        assert!(state.is_board_full());
        assert_eq!(state.food_position(), None);
        assert_board_matches_body(&state);
    }

    #[test]
    fn single_segment_snake_may_reverse() {
        let mut state = GameState::from_parts(
            GridSize::new(3, 3),
            horizontal_snake(1, 1, 1),
            Some(Position::new(2, 2)),
            11,
        )
        .expect("valid layout");

        assert!(state.change_direction(Direction::Left));
        state.tick();
        assert_eq!(state.head_position(), Position::new(1, 0));
    }
}
