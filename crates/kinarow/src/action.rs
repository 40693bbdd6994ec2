//! Move rejections and move outcomes.
//!
//! Moves are commands, not side effects: the controller answers every
//! request with a [`MoveOutcome`] value and the caller decides what to
//! render, persist or announce.

use crate::{Player, ScoreEvent, Symbol, WinLine};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Reason a move was rejected.
///
/// All variants are recoverable. A rejected move leaves the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum MoveError {
    /// The index does not name a cell on the board.
    #[display("Cell {index} is outside the board (0..{cells})")]
    OutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of cells on the board.
        cells: usize,
    },

    /// The cell already holds a symbol.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(usize),

    /// The game is already won or tied.
    #[display("Game is not in progress")]
    GameNotInProgress,
}

impl std::error::Error for MoveError {}

/// Result of asking the controller to play a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Move placed, game continues with `next` to play.
    Accepted {
        /// Player whose turn it is now.
        next: Player,
    },
    /// Move refused; nothing changed.
    Rejected(MoveError),
    /// Move completed a winning run.
    Win {
        /// Player who won.
        winner: Player,
        /// Winner's symbol.
        symbol: Symbol,
        /// Full winning run.
        line: WinLine,
    },
    /// Move filled the board with no winner.
    Tie,
}

impl MoveOutcome {
    /// Returns true unless the move was rejected.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected(_))
    }

    /// The score increment this outcome calls for, if any.
    pub fn score_event(&self) -> Option<ScoreEvent> {
        match self {
            MoveOutcome::Win { winner, .. } => Some(ScoreEvent::Win(*winner)),
            MoveOutcome::Tie => Some(ScoreEvent::Tie),
            MoveOutcome::Accepted { .. } | MoveOutcome::Rejected(_) => None,
        }
    }
}
