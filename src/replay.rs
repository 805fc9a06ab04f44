use serde::Serialize;

use crate::direction::Direction;
use crate::error::ReplayError;
use crate::events::DeathReason;
use crate::game::GameState;

/// One scripted tick: an optional direction request followed by a move.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ReplayStep {
    pub turn: Option<Direction>,
}

/// Final state of a played-back script.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub ticks_played: u64,
    pub score: u32,
    pub snake_len: usize,
    pub game_over: bool,
    pub death_reason: Option<DeathReason>,
}

impl ReplaySummary {
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        Self {
            ticks_played: state.tick_count(),
            score: state.score(),
            snake_len: state.snake_len(),
            game_over: state.is_game_over(),
            death_reason: state.death_reason(),
        }
    }
}

/// Parses a move script.
///
/// `U`, `D`, `L`, `R` request a direction before the tick and `.` ticks
/// without a request. Case-insensitive; whitespace is skipped.
pub fn parse_moves(script: &str) -> Result<Vec<ReplayStep>, ReplayError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(index, ch)| {
            let turn = match ch.to_ascii_uppercase() {
                'U' => Some(Direction::Up),
                'D' => Some(Direction::Down),
                'L' => Some(Direction::Left),
                'R' => Some(Direction::Right),
                '.' => None,
                _ => return Err(ReplayError::UnknownMove { index, found: ch }),
            };
            Ok(ReplayStep { turn })
        })
        .collect()
}

/// Plays `steps` against `state`, stopping early if the round ends.
pub fn play(state: &mut GameState, steps: &[ReplayStep]) -> ReplaySummary {
    for step in steps {
        if state.is_game_over() {
            break;
        }
        if let Some(direction) = step.turn {
            state.change_direction(direction);
        }
        state.tick();
    }

    ReplaySummary::from_state(state)
}
