//! Terminal front end for the kinarow game core.
//!
//! Everything user-facing lives here: input parsing, text rendering and the
//! JSON file that keeps settings and scores between runs. The game rules
//! themselves live in the `kinarow` crate.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod command;
mod file_store;

pub mod render;

pub use app::{App, Flow};
pub use command::{Command, CommandError, HELP, parse};
pub use file_store::JsonFileStore;
