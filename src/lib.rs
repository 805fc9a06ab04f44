//! Deterministic grid simulation for a Snake game.
//!
//! [`game::GameState`] owns the board, the snake, the score and the
//! game-over flag. Callers request turns with
//! [`game::GameState::change_direction`], advance with
//! [`game::GameState::tick`] and read the board back; food and game-over
//! notifications arrive through listeners or the returned
//! [`events::MoveOutcome`].

pub mod board;
pub mod config;
pub mod direction;
pub mod error;
pub mod events;
pub mod food;
pub mod game;
pub mod replay;
pub mod snake;
