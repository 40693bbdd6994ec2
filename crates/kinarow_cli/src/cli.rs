//! Command-line interface for kinarow.

use clap::{Parser, Subcommand};

/// kinarow - k-in-a-row for two players at one terminal
#[derive(Parser, Debug)]
#[command(name = "kinarow")]
#[command(about = "Play generalized tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// File holding saved settings and scores
    #[arg(long, global = true, default_value = "kinarow.json")]
    pub store: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively, reading moves from standard input
    Play {
        /// Board size (3-10); saved for next time
        #[arg(short = 'n', long)]
        size: Option<i64>,

        /// Run length needed to win (3 up to the board size)
        #[arg(short = 'k', long)]
        win: Option<i64>,

        /// Player 1 symbol
        #[arg(long)]
        p1: Option<String>,

        /// Player 2 symbol
        #[arg(long)]
        p2: Option<String>,
    },

    /// Print the saved scores
    Scores,

    /// Reset the saved scores to zero
    ResetScores,
}
