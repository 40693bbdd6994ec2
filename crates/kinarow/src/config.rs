//! Game configuration: board size, win length and player symbols.
//!
//! A [`GameConfig`] can only be obtained in two ways:
//!
//! - [`GameConfig::sanitize`] repairs stored (possibly corrupt) preferences
//!   silently and never fails.
//! - [`GameConfig::validate`] checks explicit user input strictly and reports
//!   a [`ConfigError`] instead of repairing it.
//!
//! Either way the result satisfies `3 <= k <= n <= 10` and carries two
//! distinct symbols. There are no setters; a new config replaces the old one.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;
use tracing::{debug, instrument, warn};

/// Smallest supported board side length.
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest supported board side length.
pub const MAX_BOARD_SIZE: usize = 10;

/// Smallest supported run length needed to win.
pub const MIN_WIN_LENGTH: usize = 3;

/// A player's mark: exactly one character.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(char);

impl Symbol {
    /// The default symbol for player 1.
    pub const X: Symbol = Symbol('X');

    /// The default symbol for player 2.
    pub const O: Symbol = Symbol('O');

    /// Normalizes free-form input to its first non-whitespace character.
    ///
    /// Returns `None` when nothing is left after trimming.
    pub fn normalize(raw: &str) -> Option<Self> {
        raw.trim().chars().next().map(Symbol)
    }

    /// Returns the underlying character.
    pub fn as_char(self) -> char {
        self.0
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol(c)
    }
}

impl TryFrom<String> for Symbol {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::normalize(&value).ok_or_else(|| "symbol must not be empty".to_string())
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0.to_string()
    }
}

/// Rejection of explicitly submitted settings.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigError {
    /// Both players would use the same symbol.
    #[display("Players must use different symbols (both are '{symbol}')")]
    SymbolCollision {
        /// The symbol both players asked for.
        symbol: Symbol,
    },

    /// The win length does not fit on the board.
    #[display("Win length {win_length} exceeds board size {size}")]
    InvalidAlignment {
        /// Board side length after clamping.
        size: usize,
        /// Requested win length after clamping its lower bound.
        win_length: usize,
    },
}

impl std::error::Error for ConfigError {}

/// Stored preferences as read back from a preference store.
///
/// Every field is optional and loosely typed: numbers may arrive as JSON
/// numbers or numeric strings, symbols as arbitrary strings. Use
/// [`GameConfig::sanitize`] to turn this into a usable config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawConfig {
    /// Board side length.
    pub n: Option<serde_json::Value>,
    /// Win length.
    pub k: Option<serde_json::Value>,
    /// Player 1 symbol.
    pub player1_symbol: Option<serde_json::Value>,
    /// Player 2 symbol.
    pub player2_symbol: Option<serde_json::Value>,
}

/// Validated, immutable game configuration.
///
/// Only [`Serialize`] is derived: stored data comes back through
/// [`RawConfig`] and [`GameConfig::sanitize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    n: usize,
    k: usize,
    player1_symbol: Symbol,
    player2_symbol: Symbol,
}

impl GameConfig {
    /// Repairs stored preferences into a valid config. Never fails.
    ///
    /// `n` is clamped into `[3, 10]` and `k` into `[3, n]`; a missing or
    /// unparseable number clamps to the lower bound. Missing symbols default
    /// to `X` and `O`. If both end up equal, player 2 switches to `O` when it
    /// was `X` and to `X` otherwise.
    #[instrument(level = "debug")]
    pub fn sanitize(raw: &RawConfig) -> Self {
        let n = clamp(lenient_int(raw.n.as_ref()), MIN_BOARD_SIZE, MAX_BOARD_SIZE);
        let k = clamp(lenient_int(raw.k.as_ref()), MIN_WIN_LENGTH, n);

        let player1_symbol = lenient_symbol(raw.player1_symbol.as_ref()).unwrap_or(Symbol::X);
        let mut player2_symbol = lenient_symbol(raw.player2_symbol.as_ref()).unwrap_or(Symbol::O);
        if player1_symbol == player2_symbol {
            player2_symbol = if player2_symbol == Symbol::X {
                Symbol::O
            } else {
                Symbol::X
            };
            warn!(
                symbol = %player1_symbol,
                replacement = %player2_symbol,
                "Stored symbols collide, replacing player 2 symbol"
            );
        }

        let config = Self {
            n,
            k,
            player1_symbol,
            player2_symbol,
        };
        debug!(?config, "Sanitized stored config");
        config
    }

    /// Strictly validates explicitly submitted settings.
    ///
    /// `n` is clamped into `[3, 10]` and `k` is raised to at least 3, but
    /// `k` is not lowered to `n`: a win length larger than the
    /// board is reported as [`ConfigError::InvalidAlignment`]. Symbols are
    /// normalized to their first character (empty input falls back to
    /// `X`/`O`) and checked for collision first.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::SymbolCollision`] if both symbols normalize to the same character.
    /// - [`ConfigError::InvalidAlignment`] if `k > n` after clamping.
    #[instrument]
    pub fn validate(n: i64, k: i64, p1: &str, p2: &str) -> Result<Self, ConfigError> {
        let n = clamp(Some(n), MIN_BOARD_SIZE, MAX_BOARD_SIZE);
        let k = usize::try_from(k.max(MIN_WIN_LENGTH as i64)).unwrap_or(usize::MAX);

        let player1_symbol = Symbol::normalize(p1).unwrap_or(Symbol::X);
        let player2_symbol = Symbol::normalize(p2).unwrap_or(Symbol::O);

        if player1_symbol == player2_symbol {
            warn!(symbol = %player1_symbol, "Rejected settings: symbol collision");
            return Err(ConfigError::SymbolCollision {
                symbol: player1_symbol,
            });
        }

        if k > n {
            warn!(n, k, "Rejected settings: win length exceeds board size");
            return Err(ConfigError::InvalidAlignment {
                size: n,
                win_length: k,
            });
        }

        Ok(Self {
            n,
            k,
            player1_symbol,
            player2_symbol,
        })
    }

    /// Board side length.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Number of contiguous matching cells needed to win.
    pub fn win_length(&self) -> usize {
        self.k
    }

    /// Total number of cells on the board.
    pub fn cell_count(&self) -> usize {
        self.n * self.n
    }

    /// Symbol used by player 1.
    pub fn player1_symbol(&self) -> Symbol {
        self.player1_symbol
    }

    /// Symbol used by player 2.
    pub fn player2_symbol(&self) -> Symbol {
        self.player2_symbol
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            n: MIN_BOARD_SIZE,
            k: MIN_WIN_LENGTH,
            player1_symbol: Symbol::X,
            player2_symbol: Symbol::O,
        }
    }
}

impl From<GameConfig> for RawConfig {
    fn from(config: GameConfig) -> Self {
        Self {
            n: Some(config.n.into()),
            k: Some(config.k.into()),
            player1_symbol: Some(String::from(config.player1_symbol).into()),
            player2_symbol: Some(String::from(config.player2_symbol).into()),
        }
    }
}

/// Clamps an optional integer into `[min, max]`, treating `None` as `min`.
fn clamp(value: Option<i64>, min: usize, max: usize) -> usize {
    match value {
        None => min,
        Some(v) if v < min as i64 => min,
        Some(v) if v > max as i64 => max,
        Some(v) => v as usize,
    }
}

/// Reads an integer the forgiving way stored data needs.
///
/// Accepts integers, truncates floats, and parses the leading integer of a
/// string (`"7abc"` is 7), saturating when the digits overflow. Anything
/// else is `None`.
pub(crate) fn lenient_int(value: Option<&serde_json::Value>) -> Option<i64> {
    match value? {
        serde_json::Value::Number(num) => num
            .as_i64()
            .or_else(|| num.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        serde_json::Value::String(s) => leading_int(s),
        _ => None,
    }
}

fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    // Too many digits saturates rather than reading as garbage.
    match digits[..end].parse::<i64>() {
        Ok(v) => Some(sign * v),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(sign * i64::MAX),
        Err(_) => None,
    }
}

fn lenient_symbol(value: Option<&serde_json::Value>) -> Option<Symbol> {
    match value? {
        serde_json::Value::String(s) => Symbol::normalize(s),
        serde_json::Value::Number(num) => Symbol::normalize(&num.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawConfig {
        serde_json::from_value(value).expect("raw config")
    }

    #[test]
    fn test_sanitize_empty_gives_default() {
        assert_eq!(GameConfig::sanitize(&RawConfig::default()), GameConfig::default());
    }

    #[test]
    fn test_sanitize_clamps_size_and_win_length() {
        let config = GameConfig::sanitize(&raw(json!({"n": 42, "k": 99})));
        assert_eq!(config.size(), 10);
        assert_eq!(config.win_length(), 10);

        let config = GameConfig::sanitize(&raw(json!({"n": 1, "k": -4})));
        assert_eq!(config.size(), 3);
        assert_eq!(config.win_length(), 3);
    }

    #[test]
    fn test_sanitize_clamps_win_length_to_size() {
        let config = GameConfig::sanitize(&raw(json!({"n": 5, "k": 8})));
        assert_eq!(config.size(), 5);
        assert_eq!(config.win_length(), 5);
    }

    #[test]
    fn test_sanitize_accepts_numeric_strings() {
        let config = GameConfig::sanitize(&raw(json!({"n": "6px", "k": 4.9})));
        assert_eq!(config.size(), 6);
        assert_eq!(config.win_length(), 4);
    }

    #[test]
    fn test_sanitize_overflowing_strings_saturate() {
        let config = GameConfig::sanitize(&raw(json!({"n": "99999999999999999999", "k": "99999999999999999999"})));
        assert_eq!(config.size(), 10);
        assert_eq!(config.win_length(), 10);

        let config = GameConfig::sanitize(&raw(json!({"n": "-99999999999999999999"})));
        assert_eq!(config.size(), 3);
    }

    #[test]
    fn test_sanitize_garbage_numbers_fall_to_minimum() {
        let config = GameConfig::sanitize(&raw(json!({"n": "abc", "k": [1, 2]})));
        assert_eq!(config.size(), 3);
        assert_eq!(config.win_length(), 3);
    }

    #[test]
    fn test_sanitize_symbols_default_and_normalize() {
        let config = GameConfig::sanitize(&raw(json!({"player1Symbol": "  abc", "player2Symbol": ""})));
        assert_eq!(config.player1_symbol(), Symbol::from('a'));
        assert_eq!(config.player2_symbol(), Symbol::O);
    }

    #[test]
    fn test_sanitize_resolves_collision() {
        let config = GameConfig::sanitize(&raw(json!({"player1Symbol": "X", "player2Symbol": "X"})));
        assert_eq!(config.player1_symbol(), Symbol::X);
        assert_eq!(config.player2_symbol(), Symbol::O);

        let config = GameConfig::sanitize(&raw(json!({"player1Symbol": "O"})));
        assert_eq!(config.player1_symbol(), Symbol::O);
        assert_eq!(config.player2_symbol(), Symbol::X);

        let config = GameConfig::sanitize(&raw(json!({"player1Symbol": "Z", "player2Symbol": "Z"})));
        assert_eq!(config.player2_symbol(), Symbol::X);
    }

    #[test]
    fn test_validate_accepts_good_settings() {
        let config = GameConfig::validate(7, 5, "A", "B").expect("valid");
        assert_eq!(config.size(), 7);
        assert_eq!(config.win_length(), 5);
        assert_eq!(config.player1_symbol(), Symbol::from('A'));
        assert_eq!(config.player2_symbol(), Symbol::from('B'));
    }

    #[test]
    fn test_validate_rejects_win_length_over_size() {
        assert_eq!(
            GameConfig::validate(3, 5, "X", "O"),
            Err(ConfigError::InvalidAlignment {
                size: 3,
                win_length: 5
            })
        );
    }

    #[test]
    fn test_validate_rejects_symbol_collision() {
        assert_eq!(
            GameConfig::validate(4, 3, "X", "X"),
            Err(ConfigError::SymbolCollision { symbol: Symbol::X })
        );
    }

    #[test]
    fn test_validate_collision_after_normalization() {
        assert!(matches!(
            GameConfig::validate(4, 3, "Xavier", " Xena"),
            Err(ConfigError::SymbolCollision { .. })
        ));
        // Empty second symbol falls back to O, colliding with an explicit O.
        assert!(matches!(
            GameConfig::validate(4, 3, "O", ""),
            Err(ConfigError::SymbolCollision { .. })
        ));
    }

    #[test]
    fn test_validate_collision_reported_before_alignment() {
        assert!(matches!(
            GameConfig::validate(3, 9, "X", "X"),
            Err(ConfigError::SymbolCollision { .. })
        ));
    }

    #[test]
    fn test_validate_clamps_size_and_win_floor() {
        let config = GameConfig::validate(50, 1, "X", "O").expect("valid");
        assert_eq!(config.size(), 10);
        assert_eq!(config.win_length(), 3);

        assert!(matches!(
            GameConfig::validate(50, 11, "X", "O"),
            Err(ConfigError::InvalidAlignment { size: 10, win_length: 11 })
        ));
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let config = GameConfig::validate(5, 4, "#", "@").expect("valid");
        let value = serde_json::to_value(config).expect("serialize");
        assert_eq!(
            value,
            json!({"n": 5, "k": 4, "player1Symbol": "#", "player2Symbol": "@"})
        );
    }
}
