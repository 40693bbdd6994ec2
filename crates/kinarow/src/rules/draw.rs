//! Tie detection.

use crate::Board;
use tracing::instrument;

/// Checks whether the game ends in a tie after the last move.
///
/// A tie is a full board where the deciding move produced no winning line.
#[instrument(skip(board), fields(move_count = board.move_count()))]
pub fn is_tie(board: &Board, won: bool) -> bool {
    !won && board.is_full()
}
