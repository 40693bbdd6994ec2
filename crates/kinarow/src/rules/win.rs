//! Win detection for k-in-a-row.
//!
//! Only lines through the last-played cell are examined: a move cannot
//! complete a run that does not contain it.

use crate::{Board, Square, Symbol, WinLine};
use strum::{EnumIter, IntoEnumIterator};
use tracing::{debug, instrument};

/// The four axes a run can lie along.
///
/// Iteration order is fixed and decides which line is reported when one
/// move completes runs on several axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    /// Along a row.
    Horizontal,
    /// Along a column.
    Vertical,
    /// Top-left to bottom-right.
    MainDiagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Direction {
    /// Forward step as `(row delta, column delta)`.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::MainDiagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// Finds the winning run created by playing `symbol` at `last_index`.
///
/// Axes are tried in [`Direction`] order and the first run of at least
/// `win_length` cells is returned in full, ordered from its backward end to
/// its forward end. Returns `None` if no axis qualifies or `last_index` is
/// off the board.
#[instrument(skip(board), fields(size = board.size()))]
pub fn find_winning_line(
    board: &Board,
    win_length: usize,
    last_index: usize,
    symbol: Symbol,
) -> Option<WinLine> {
    board.coords(last_index)?;

    for direction in Direction::iter() {
        let run = run_through(board, last_index, symbol, direction);
        if run.len() >= win_length {
            debug!(?direction, length = run.len(), "Winning run found");
            return Some(WinLine::new(run));
        }
    }

    None
}

/// Returns the maximal run of `symbol` along `direction` through `index`.
///
/// The cell at `index` is counted as part of the run whatever it holds, so
/// this can be asked before or after the symbol is placed.
pub fn run_through(board: &Board, index: usize, symbol: Symbol, direction: Direction) -> Vec<usize> {
    let Some((row, col)) = board.coords(index) else {
        return Vec::new();
    };
    let (dr, dc) = direction.delta();

    let mut run = collect(board, row, col, -dr, -dc, symbol);
    run.reverse();
    run.push(index);
    run.extend(collect(board, row, col, dr, dc, symbol));
    run
}

/// Walks from `(row, col)` (exclusive) while cells hold `symbol`.
fn collect(board: &Board, row: usize, col: usize, dr: isize, dc: isize, symbol: Symbol) -> Vec<usize> {
    let mut cells = Vec::new();
    let (mut r, mut c) = (row, col);

    loop {
        let (Some(next_r), Some(next_c)) = (r.checked_add_signed(dr), c.checked_add_signed(dc)) else {
            break;
        };
        match board.index_of(next_r, next_c) {
            Some(next) if board.get(next) == Some(Square::Occupied(symbol)) => {
                cells.push(next);
                r = next_r;
                c = next_c;
            }
            _ => break,
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Symbol = Symbol::X;
    const O: Symbol = Symbol::O;

    fn board_with(size: usize, cells: &[(usize, Symbol)]) -> Board {
        cells.iter().fold(Board::empty(size), |board, (index, symbol)| {
            board.place(*index, *symbol).expect("empty cell")
        })
    }

    fn line(cells: &[usize]) -> Option<WinLine> {
        Some(WinLine::new(cells.to_vec()))
    }

    #[test]
    fn test_no_winner_single_mark() {
        let board = board_with(3, &[(4, X)]);
        assert_eq!(find_winning_line(&board, 3, 4, X), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(3, &[(0, X), (1, X), (2, X)]);
        assert_eq!(find_winning_line(&board, 3, 2, X), line(&[0, 1, 2]));
        // Middle cell reports the same ordered run.
        assert_eq!(find_winning_line(&board, 3, 1, X), line(&[0, 1, 2]));
    }

    #[test]
    fn test_winner_column() {
        let board = board_with(3, &[(0, X), (3, X), (6, X)]);
        assert_eq!(find_winning_line(&board, 3, 6, X), line(&[0, 3, 6]));
    }

    #[test]
    fn test_winner_main_diagonal() {
        let board = board_with(5, &[(0, O), (6, O), (12, O), (18, O)]);
        assert_eq!(find_winning_line(&board, 4, 18, O), line(&[0, 6, 12, 18]));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_with(4, &[(3, X), (6, X), (9, X)]);
        assert_eq!(find_winning_line(&board, 3, 6, X), line(&[3, 6, 9]));
    }

    #[test]
    fn test_run_reports_full_length() {
        let board = board_with(6, &[(0, X), (1, X), (2, X), (4, X), (5, X), (3, X)]);
        assert_eq!(find_winning_line(&board, 3, 3, X), line(&[0, 1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_short_run_not_a_win() {
        let board = board_with(5, &[(0, X), (1, X), (2, X)]);
        assert_eq!(find_winning_line(&board, 4, 2, X), None);
    }

    #[test]
    fn test_opponent_cells_break_run() {
        let board = board_with(4, &[(0, X), (1, X), (2, O), (3, X)]);
        assert_eq!(find_winning_line(&board, 3, 1, X), None);
    }

    #[test]
    fn test_row_does_not_wrap() {
        // 2 and 3 are adjacent indices but on different rows of a 3x3 board.
        let board = board_with(3, &[(1, X), (2, X), (3, X)]);
        assert_eq!(find_winning_line(&board, 3, 3, X), None);
    }

    #[test]
    fn test_anti_diagonal_does_not_wrap() {
        let board = board_with(4, &[(2, X), (5, X), (8, X)]);
        assert_eq!(find_winning_line(&board, 3, 5, X), line(&[2, 5, 8]));
        // 8 -> 11 would wrap from column 0 back to column 3.
        let board = board_with(4, &[(5, X), (8, X), (11, X)]);
        assert_eq!(find_winning_line(&board, 3, 8, X), None);
    }

    #[test]
    fn test_direction_order_breaks_ties() {
        // Last move at 4 completes both the middle row and the middle column.
        let board = board_with(3, &[(3, X), (5, X), (1, X), (7, X), (4, X)]);
        assert_eq!(find_winning_line(&board, 3, 4, X), line(&[3, 4, 5]));

        // Column and main diagonal: vertical wins.
        let board = board_with(3, &[(2, O), (8, O), (0, O), (4, O), (5, O)]);
        assert_eq!(find_winning_line(&board, 3, 8, O), line(&[2, 5, 8]));
    }

    #[test]
    fn test_out_of_range_index() {
        let board = Board::empty(3);
        assert_eq!(find_winning_line(&board, 3, 9, X), None);
        assert!(run_through(&board, 9, X, Direction::Horizontal).is_empty());
    }

    #[test]
    fn test_run_through_counts_center() {
        let board = board_with(3, &[(0, X), (2, X)]);
        assert_eq!(run_through(&board, 1, X, Direction::Horizontal), vec![0, 1, 2]);
        assert_eq!(run_through(&board, 1, X, Direction::Vertical), vec![1]);
    }

    #[test]
    fn test_direction_iteration_order() {
        let order: Vec<_> = Direction::iter().collect();
        assert_eq!(
            order,
            vec![
                Direction::Horizontal,
                Direction::Vertical,
                Direction::MainDiagonal,
                Direction::AntiDiagonal
            ]
        );
    }
}
