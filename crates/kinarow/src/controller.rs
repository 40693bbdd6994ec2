//! Turn-based state machine driving one game at a time.
//!
//! ```text
//!            apply_move (accepted, not terminal)
//!              ┌──────────┐
//!              ▼          │
//! new_game ─▶ InProgress ─┴─▶ Won   ─┐
//!              │                     ├─▶ (only new_game leaves)
//!              └────────────▶ Tied  ─┘
//! ```
//!
//! All state lives in an explicit [`GameSession`] owned by the
//! [`GameController`]; callers get read-only views and drive it through
//! [`GameController::apply_move`], [`GameController::new_game`] and
//! [`GameController::apply_settings`].

use crate::rules::{find_winning_line, is_tie};
use crate::{
    Board, ConfigError, GameConfig, GameStatus, MoveError, MoveOutcome, Player, ScoreEvent, Symbol,
};
use tracing::{debug, info, instrument, warn};

/// Everything that describes the game currently being played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    turn: Player,
    status: GameStatus,
    last_move: Option<usize>,
}

impl GameSession {
    /// A fresh game: empty board, player 1 to move.
    fn start(config: GameConfig) -> Self {
        Self {
            board: Board::empty(config.size()),
            config,
            turn: Player::Player1,
            status: GameStatus::InProgress,
            last_move: None,
        }
    }

    /// Configuration this game is played under.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move; after a win this is the winner.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Current status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Index of the most recently placed cell.
    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }
}

/// Callback invoked with every score increment the controller emits.
pub type ScoreEventListener = Box<dyn FnMut(ScoreEvent) + Send>;

/// Game state machine.
///
/// Not internally synchronized: callers must serialize move requests.
pub struct GameController {
    session: GameSession,
    score_listener: Option<ScoreEventListener>,
}

impl GameController {
    /// Creates a controller with a new game under `config`.
    #[instrument]
    pub fn new(config: GameConfig) -> Self {
        info!("Creating game controller");
        Self {
            session: GameSession::start(config),
            score_listener: None,
        }
    }

    /// Registers the callback told about each win or tie, replacing any previous one.
    pub fn on_score_event(&mut self, listener: impl FnMut(ScoreEvent) + Send + 'static) {
        self.score_listener = Some(Box::new(listener));
    }

    /// Discards the current game and starts a fresh one under `config`.
    ///
    /// Player 1 always moves first, whoever moved last before.
    #[instrument(skip(self))]
    pub fn new_game(&mut self, config: GameConfig) {
        if self.session.board.move_count() > 0 && !self.session.status.is_terminal() {
            debug!(
                move_count = self.session.board.move_count(),
                "Abandoning unfinished game"
            );
        }
        self.session = GameSession::start(config);
        info!(
            size = config.size(),
            win_length = config.win_length(),
            "New game started"
        );
    }

    /// Validates submitted settings and, if they pass, restarts under them.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`GameConfig::validate`]; the current
    /// game and config are then left exactly as they were.
    #[instrument(skip(self))]
    pub fn apply_settings(&mut self, n: i64, k: i64, p1: &str, p2: &str) -> Result<GameConfig, ConfigError> {
        let config = GameConfig::validate(n, k, p1, p2)?;
        self.new_game(config);
        Ok(config)
    }

    /// Plays the current player's symbol at `index`.
    ///
    /// Rejections leave the session unchanged. Wins and ties are terminal
    /// and emit a [`ScoreEvent`]; otherwise the turn passes to the opponent.
    #[instrument(skip(self), fields(turn = ?self.session.turn))]
    pub fn apply_move(&mut self, index: usize) -> MoveOutcome {
        if self.session.status.is_terminal() {
            warn!(index, "Move rejected: game is over");
            return MoveOutcome::Rejected(MoveError::GameNotInProgress);
        }

        let player = self.session.turn;
        let symbol = player.symbol_in(&self.session.config);

        let board = match self.session.board.place(index, symbol) {
            Ok(board) => board,
            Err(e) => {
                warn!(index, error = %e, "Move rejected");
                return MoveOutcome::Rejected(e);
            }
        };
        self.session.board = board;
        self.session.last_move = Some(index);

        let line = find_winning_line(
            &self.session.board,
            self.session.config.win_length(),
            index,
            symbol,
        );

        let tied = is_tie(&self.session.board, line.is_some());
        if let Some(line) = line {
            info!(winner = %player, cells = ?line.cells(), "Game won");
            self.session.status = GameStatus::Won {
                winner: player,
                line: line.clone(),
            };
            self.emit(ScoreEvent::Win(player));
            return MoveOutcome::Win {
                winner: player,
                symbol,
                line,
            };
        }

        if tied {
            info!("Game tied");
            self.session.status = GameStatus::Tied;
            self.emit(ScoreEvent::Tie);
            return MoveOutcome::Tie;
        }

        self.session.turn = player.opponent();
        debug!(index, next = %self.session.turn, "Move accepted");
        MoveOutcome::Accepted {
            next: self.session.turn,
        }
    }

    fn emit(&mut self, event: ScoreEvent) {
        if let Some(listener) = self.score_listener.as_mut() {
            listener(event);
        }
    }

    /// Read-only view of the whole session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Configuration of the current game.
    pub fn config(&self) -> &GameConfig {
        &self.session.config
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.session.board
    }

    /// Player to move.
    pub fn turn(&self) -> Player {
        self.session.turn
    }

    /// Symbol of the player to move.
    pub fn current_symbol(&self) -> Symbol {
        self.session.turn.symbol_in(&self.session.config)
    }

    /// Current status.
    pub fn status(&self) -> &GameStatus {
        &self.session.status
    }

    /// Index of the most recently placed cell.
    pub fn last_move(&self) -> Option<usize> {
        self.session.last_move
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("session", &self.session)
            .field("score_listener", &self.score_listener.is_some())
            .finish()
    }
}
