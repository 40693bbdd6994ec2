//! Pure k-in-a-row game logic.
//!
//! A generalized tic-tac-toe on an n×n board (3 ≤ n ≤ 10) where a player
//! wins by lining up k of their symbols (3 ≤ k ≤ n) along a row, column or
//! diagonal.
//!
//! # Architecture
//!
//! - **Config**: [`GameConfig`] built by lenient [`GameConfig::sanitize`] or strict [`GameConfig::validate`]
//! - **Board**: write-once cells, [`Board::place`] returns a new board
//! - **Rules**: win detection through the last move, tie detection
//! - **Controller**: [`GameController`] state machine returning [`MoveOutcome`] values
//! - **Score**: [`Scoreboard`] applies [`ScoreEvent`]s and persists through a [`PreferenceStore`]
//!
//! # Example
//!
//! ```
//! use kinarow::{GameConfig, GameController, MoveOutcome, Player};
//!
//! let config = GameConfig::validate(3, 3, "X", "O").unwrap();
//! let mut game = GameController::new(config);
//! for index in [0, 1, 3, 4] {
//!     game.apply_move(index);
//! }
//! match game.apply_move(6) {
//!     MoveOutcome::Win { winner, line, .. } => {
//!         assert_eq!(winner, Player::Player1);
//!         assert_eq!(line.cells(), &[0, 3, 6]);
//!     }
//!     other => panic!("expected a win, got {other:?}"),
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod config;
mod controller;
mod score;
mod store;
mod types;

pub mod rules;

// Crate-level exports - Configuration
pub use config::{
    ConfigError, GameConfig, MAX_BOARD_SIZE, MIN_BOARD_SIZE, MIN_WIN_LENGTH, RawConfig, Symbol,
};

// Crate-level exports - Board and domain types
pub use board::Board;
pub use types::{GameStatus, Player, Square, WinLine};

// Crate-level exports - Moves
pub use action::{MoveError, MoveOutcome};

// Crate-level exports - Controller
pub use controller::{GameController, GameSession, ScoreEventListener};

// Crate-level exports - Scores and persistence
pub use score::{RawScore, Score, ScoreEvent, ScoreListener, Scoreboard};
pub use store::{
    MemoryStore, PREFS_KEY, PreferenceStore, SCORES_KEY, StoreError, StoreFailure, load_config,
    save_config,
};
