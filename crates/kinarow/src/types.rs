//! Core domain types shared by the board, rules and controller.

use crate::GameConfig;
use crate::Symbol;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Player 1 (always moves first).
    #[display("Player 1")]
    Player1,
    /// Player 2.
    #[display("Player 2")]
    Player2,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    /// Returns the symbol this player uses under the given config.
    pub fn symbol_in(self, config: &GameConfig) -> Symbol {
        match self {
            Player::Player1 => config.player1_symbol(),
            Player::Player2 => config.player2_symbol(),
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty cell.
    Empty,
    /// Cell holding a player's symbol.
    Occupied(Symbol),
}

impl Square {
    /// Returns the symbol in this cell, if any.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Square::Empty => None,
            Square::Occupied(symbol) => Some(symbol),
        }
    }
}

/// Every cell of a winning run, in board order along its axis.
///
/// The line holds the full contiguous run through the deciding move, which
/// may be longer than the required win length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine(Vec<usize>);

impl WinLine {
    pub(crate) fn new(cells: Vec<usize>) -> Self {
        Self(cells)
    }

    /// Cell indices of the run.
    pub fn cells(&self) -> &[usize] {
        &self.0
    }

    /// Number of cells in the run.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for lines produced by the win detector.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether the given cell is part of the run.
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

/// Current status of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won {
        /// The winning player.
        winner: Player,
        /// The winning run.
        line: WinLine,
    },
    /// Board filled with no winner.
    Tied,
}

impl GameStatus {
    /// Returns true once the game is won or tied.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}
