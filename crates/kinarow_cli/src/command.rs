//! Parsing of interactive input lines into game commands.

use derive_more::Display;
use tracing::instrument;

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play a cell, as a zero-based index.
    Play(usize),
    /// Play a cell given as zero-based `(row, col)`.
    PlayAt {
        /// Row.
        row: usize,
        /// Column.
        col: usize,
    },
    /// Abandon the current game and start over.
    NewGame,
    /// Zero the score tallies.
    ResetScores,
    /// Replace the settings and start over.
    Settings {
        /// Board size.
        n: i64,
        /// Win length.
        k: i64,
        /// Player 1 symbol.
        p1: String,
        /// Player 2 symbol.
        p2: String,
    },
    /// Print the score tallies.
    Scores,
    /// Print the command summary.
    Help,
    /// Leave the program.
    Quit,
}

/// Input line that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CommandError {
    /// Nothing but whitespace.
    #[display("Empty input")]
    Empty,
    /// A word that is not a command.
    #[display("Unknown command '{}' (type 'help')", _0)]
    Unknown(String),
    /// A cell number or coordinate that is not a positive integer.
    #[display("Cells are numbered from 1; got '{}'", _0)]
    BadCell(String),
    /// `settings` without exactly four arguments.
    #[display("Usage: settings <n> <k> <player1 symbol> <player2 symbol>")]
    BadSettings,
}

impl std::error::Error for CommandError {}

/// Summary printed for `help`.
pub const HELP: &str = "\
Commands:
  <cell>            play a cell, numbered from 1 in reading order
  <row>,<col>       play a cell by 1-based row and column
  new               start a new game
  reset             reset the scores
  settings N K A B  board size N, win length K, symbols A and B
  scores            show the scores
  help              show this summary
  quit              leave";

/// Parses one input line.
///
/// Cell numbers and coordinates are 1-based on input and converted to the
/// zero-based indices the game uses.
#[instrument]
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Err(CommandError::Empty);
    };

    match first.to_ascii_lowercase().as_str() {
        "new" | "n" => Ok(Command::NewGame),
        "reset" => Ok(Command::ResetScores),
        "scores" | "s" => Ok(Command::Scores),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "settings" => {
            let args: Vec<&str> = words.collect();
            let [n, k, p1, p2] = args.as_slice() else {
                return Err(CommandError::BadSettings);
            };
            let n = n.parse().map_err(|_| CommandError::BadSettings)?;
            let k = k.parse().map_err(|_| CommandError::BadSettings)?;
            Ok(Command::Settings {
                n,
                k,
                p1: p1.to_string(),
                p2: p2.to_string(),
            })
        }
        _ if first.contains(',') => {
            let (row, col) = first.split_once(',').ok_or_else(|| CommandError::BadCell(first.to_string()))?;
            Ok(Command::PlayAt {
                row: one_based(row)?,
                col: one_based(col)?,
            })
        }
        _ if first.starts_with(|c: char| c.is_ascii_digit()) => Ok(Command::Play(one_based(first)?)),
        _ => Err(CommandError::Unknown(first.to_string())),
    }
}

fn one_based(raw: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::BadCell(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_numbers_are_one_based() {
        assert_eq!(parse("1"), Ok(Command::Play(0)));
        assert_eq!(parse(" 25 "), Ok(Command::Play(24)));
        assert_eq!(parse("0"), Err(CommandError::BadCell("0".to_string())));
    }

    #[test]
    fn test_coordinates() {
        assert_eq!(parse("2,3"), Ok(Command::PlayAt { row: 1, col: 2 }));
        assert!(matches!(parse("2,x"), Err(CommandError::BadCell(_))));
    }

    #[test]
    fn test_words() {
        assert_eq!(parse("NEW"), Ok(Command::NewGame));
        assert_eq!(parse("reset"), Ok(Command::ResetScores));
        assert_eq!(parse("q"), Ok(Command::Quit));
        assert_eq!(parse(""), Err(CommandError::Empty));
        assert_eq!(parse("dance"), Err(CommandError::Unknown("dance".to_string())));
    }

    #[test]
    fn test_settings() {
        assert_eq!(
            parse("settings 5 4 # @"),
            Ok(Command::Settings {
                n: 5,
                k: 4,
                p1: "#".to_string(),
                p2: "@".to_string()
            })
        );
        assert_eq!(parse("settings 5 4 #"), Err(CommandError::BadSettings));
        assert_eq!(parse("settings five 4 # @"), Err(CommandError::BadSettings));
    }
}
