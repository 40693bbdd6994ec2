//! Game rules for k-in-a-row.
//!
//! This module contains pure functions for evaluating a board. Rules are
//! separated from board storage and turn handling so the controller can
//! compose them.

pub mod draw;
pub mod win;

pub use draw::is_tie;
pub use win::{Direction, find_winning_line, run_through};
