use rand::Rng;

use crate::board::Board;
use crate::snake::Position;

/// Picks a uniformly random empty cell, or `None` when the board is full.
///
/// Every call scans the whole board, which is O(rows * cols). Boards are
/// small, so this is kept over maintaining a free-cell index.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, board: &Board) -> Option<Position> {
    let candidates: Vec<Position> = board.empty_positions().collect();
    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
