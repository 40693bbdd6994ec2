//! The n×n grid for one game.

use crate::{MoveError, Square, Symbol};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Square board of `size * size` cells in row-major order.
///
/// Cells are write-once: [`Board::place`] refuses occupied cells, and
/// `move_count` always equals the number of occupied cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    squares: Vec<Square>,
    move_count: usize,
}

impl Board {
    /// Creates an empty board with side length `size`.
    #[instrument]
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            squares: vec![Square::Empty; size * size],
            move_count: 0,
        }
    }

    /// Returns a copy of this board with `symbol` placed at `index`.
    ///
    /// The board itself is left untouched, so a rejection needs no rollback.
    /// This knows nothing about turns or wins.
    ///
    /// # Errors
    ///
    /// - [`MoveError::OutOfBounds`] if `index` is not below `size * size`.
    /// - [`MoveError::CellOccupied`] if the cell already holds a symbol.
    #[instrument(skip(self), fields(size = self.size, move_count = self.move_count))]
    pub fn place(&self, index: usize, symbol: Symbol) -> Result<Self, MoveError> {
        match self.squares.get(index) {
            None => Err(MoveError::OutOfBounds {
                index,
                cells: self.squares.len(),
            }),
            Some(Square::Occupied(_)) => Err(MoveError::CellOccupied(index)),
            Some(Square::Empty) => {
                let mut next = self.clone();
                next.squares[index] = Square::Occupied(symbol);
                next.move_count += 1;
                trace!(index, %symbol, "Placed symbol");
                Ok(next)
            }
        }
    }

    /// Board side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (`size * size`).
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// True for the degenerate zero-size board.
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Number of occupied cells.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Gets the cell at `index`, or `None` off the board.
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Gets the cell at `(row, col)`, or `None` off the board.
    pub fn get_at(&self, row: usize, col: usize) -> Option<Square> {
        self.index_of(row, col).and_then(|index| self.get(index))
    }

    /// Checks if the cell at `index` exists and is empty.
    pub fn is_empty_at(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.move_count == self.squares.len()
    }

    /// All cells in row-major order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Converts a cell index into `(row, col)`.
    pub fn coords(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.squares.len()).then(|| (index / self.size, index % self.size))
    }

    /// Converts `(row, col)` into a cell index.
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }

    /// Indices of all empty cells, in order.
    pub fn empty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, square)| **square == Square::Empty)
            .map(|(index, _)| index)
    }
}
