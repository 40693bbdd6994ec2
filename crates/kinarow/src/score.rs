//! Score tallies and the scoreboard that owns and persists them.
//!
//! The controller never stores scores; it only reports [`ScoreEvent`]s.
//! A [`Scoreboard`] applies those events, writes the tallies to a
//! [`PreferenceStore`] and tells an optional listener about the change.

use crate::config::lenient_int;
use crate::store::{PreferenceStore, SCORES_KEY};
use crate::Player;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// A single increment request emitted when a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreEvent {
    /// The given player won a game.
    Win(Player),
    /// A game ended in a tie.
    Tie,
}

/// Win and tie tallies across games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct Score {
    /// Games won by player 1.
    #[serde(rename = "player1")]
    player1_wins: u32,
    /// Games won by player 2.
    #[serde(rename = "player2")]
    player2_wins: u32,
    /// Tied games.
    ties: u32,
}

/// Stored tallies as read back from a preference store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawScore {
    /// Player 1 wins.
    pub player1: Option<serde_json::Value>,
    /// Player 2 wins.
    pub player2: Option<serde_json::Value>,
    /// Ties.
    pub ties: Option<serde_json::Value>,
}

impl Score {
    /// Creates a tally from explicit counts.
    pub fn new(player1_wins: u32, player2_wins: u32, ties: u32) -> Self {
        Self {
            player1_wins,
            player2_wins,
            ties,
        }
    }

    /// Repairs stored tallies. Missing, negative or non-numeric counts become 0.
    pub fn sanitize(raw: &RawScore) -> Self {
        let count = |value: Option<&serde_json::Value>| {
            lenient_int(value)
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(0)
        };
        Self {
            player1_wins: count(raw.player1.as_ref()),
            player2_wins: count(raw.player2.as_ref()),
            ties: count(raw.ties.as_ref()),
        }
    }

    /// Returns the tally with `event` counted.
    pub fn apply(self, event: ScoreEvent) -> Self {
        let mut next = self;
        match event {
            ScoreEvent::Win(Player::Player1) => {
                next.player1_wins = next.player1_wins.saturating_add(1)
            }
            ScoreEvent::Win(Player::Player2) => {
                next.player2_wins = next.player2_wins.saturating_add(1)
            }
            ScoreEvent::Tie => next.ties = next.ties.saturating_add(1),
        }
        next
    }

    /// Wins recorded for `player`.
    pub fn wins_for(&self, player: Player) -> u32 {
        match player {
            Player::Player1 => self.player1_wins,
            Player::Player2 => self.player2_wins,
        }
    }

    /// Number of finished games counted.
    pub fn total_games(&self) -> u32 {
        self.player1_wins
            .saturating_add(self.player2_wins)
            .saturating_add(self.ties)
    }
}

/// Callback invoked with the updated tallies after every change.
pub type ScoreListener = Box<dyn FnMut(&Score) + Send>;

/// Owns the score tallies and keeps them in a preference store.
///
/// Persistence is best effort: a failing store is logged and otherwise
/// ignored, and the in-memory tallies stay authoritative.
pub struct Scoreboard<S: PreferenceStore> {
    store: S,
    score: Score,
    listener: Option<ScoreListener>,
}

impl<S: PreferenceStore> Scoreboard<S> {
    /// Loads tallies from `store`, falling back to zero on missing or corrupt data.
    #[instrument(skip(store))]
    pub fn load(store: S) -> Self {
        let score = match store.get(SCORES_KEY) {
            None => Score::default(),
            Some(json) => match serde_json::from_str::<RawScore>(&json) {
                Ok(raw) => Score::sanitize(&raw),
                Err(e) => {
                    warn!(error = %e, "Stored scores unreadable, starting from zero");
                    Score::default()
                }
            },
        };
        debug!(?score, "Scoreboard loaded");
        Self {
            store,
            score,
            listener: None,
        }
    }

    /// Registers the callback told about every change, replacing any previous one.
    pub fn on_change(&mut self, listener: impl FnMut(&Score) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Current tallies.
    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Read access to the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write access to the backing store, for other preferences sharing it.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Counts `event`, persists, notifies, and returns the updated tallies.
    #[instrument(skip(self))]
    pub fn record(&mut self, event: ScoreEvent) -> &Score {
        self.score = self.score.apply(event);
        info!(score = ?self.score, "Score updated");
        self.commit();
        &self.score
    }

    /// Zeroes every tally, persists, and notifies.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> &Score {
        self.score = Score::default();
        info!("Scores reset");
        self.commit();
        &self.score
    }

    fn commit(&mut self) {
        match serde_json::to_string(&self.score) {
            Ok(json) => {
                if let Err(e) = self.store.set(SCORES_KEY, json) {
                    warn!(error = %e, "Failed to persist scores");
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode scores"),
        }
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.score);
        }
    }
}

impl<S: PreferenceStore + std::fmt::Debug> std::fmt::Debug for Scoreboard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scoreboard")
            .field("store", &self.store)
            .field("score", &self.score)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
