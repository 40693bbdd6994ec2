//! Stateless text rendering of the board and game messages.

use kinarow::{
    Board, ConfigError, GameConfig, GameStatus, MoveError, MoveOutcome, Player, Score, Square,
};

/// Formats the board as a text grid.
///
/// Empty cells show their 1-based number, the last move is wrapped in
/// parentheses and cells of a winning line in square brackets.
pub fn board(board: &Board, status: &GameStatus, last_move: Option<usize>) -> String {
    let width = board.len().to_string().len() + 2;
    let line = match status {
        GameStatus::Won { line, .. } => Some(line),
        _ => None,
    };

    let mut result = String::new();
    for row in 0..board.size() {
        let cells: Vec<String> = (0..board.size())
            .map(|col| {
                let index = row * board.size() + col;
                let content = match board.get(index) {
                    Some(Square::Occupied(symbol)) => symbol.to_string(),
                    _ => (index + 1).to_string(),
                };
                let decorated = if line.is_some_and(|l| l.contains(index)) {
                    format!("[{}]", content)
                } else if last_move == Some(index) {
                    format!("({})", content)
                } else {
                    content
                };
                format!("{:^width$}", decorated, width = width)
            })
            .collect();
        result.push_str(&cells.join("|"));
        result.push('\n');
        if row + 1 < board.size() {
            let rule = vec!["-".repeat(width); board.size()].join("+");
            result.push_str(&rule);
            result.push('\n');
        }
    }
    result
}

/// Names a player together with their symbol, e.g. `Player 1 (X)`.
pub fn player(player: Player, config: &GameConfig) -> String {
    format!("{} ({})", player, player.symbol_in(config))
}

/// One-line description of a move outcome.
pub fn outcome(outcome: &MoveOutcome, config: &GameConfig) -> String {
    match outcome {
        MoveOutcome::Accepted { next } => format!("{} to move", player(*next, config)),
        MoveOutcome::Rejected(e) => rejection(e),
        MoveOutcome::Win { winner, .. } => format!("{} wins!", player(*winner, config)),
        MoveOutcome::Tie => "It's a tie.".to_string(),
    }
}

fn rejection(error: &MoveError) -> String {
    match error {
        MoveError::OutOfBounds { cells, .. } => {
            format!("No such cell; pick a number from 1 to {}", cells)
        }
        MoveError::CellOccupied(index) => format!("Cell {} is already taken", index + 1),
        MoveError::GameNotInProgress => "The game is over; type 'new' to play again".to_string(),
    }
}

/// Explains a rejected settings change.
pub fn config_error(error: &ConfigError) -> String {
    match error {
        ConfigError::SymbolCollision { .. } => {
            "Invalid symbols: the players' symbols must differ".to_string()
        }
        ConfigError::InvalidAlignment { size, win_length } => format!(
            "Invalid setting: win length {} must not exceed board size {}",
            win_length, size
        ),
    }
}

/// Summary of the settings in force.
pub fn settings(config: &GameConfig) -> String {
    format!(
        "{n}x{n} board, {k} in a row to win. {} vs {}",
        player(Player::Player1, config),
        player(Player::Player2, config),
        n = config.size(),
        k = config.win_length(),
    )
}

/// Score line.
pub fn score(score: &Score, config: &GameConfig) -> String {
    format!(
        "{}: {}  {}: {}  Ties: {}",
        player(Player::Player1, config),
        score.player1_wins(),
        player(Player::Player2, config),
        score.player2_wins(),
        score.ties()
    )
}
