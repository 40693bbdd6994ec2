//! Line-driven game session: reads commands, drives the controller,
//! persists settings and scores, and prints what happened.

use crate::command::{self, Command, HELP};
use crate::render;
use kinarow::{GameController, MoveOutcome, PreferenceStore, Scoreboard, load_config, save_config};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};

/// Terminal front end over one controller and one scoreboard.
///
/// Settings and scores share the scoreboard's store.
pub struct App<S: PreferenceStore> {
    controller: GameController,
    scoreboard: Scoreboard<S>,
}

/// What the read loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading input.
    Continue,
    /// Stop.
    Quit,
}

impl<S: PreferenceStore> App<S> {
    /// Restores settings and scores from `store` and starts a game.
    #[instrument(skip(store))]
    pub fn load(store: S) -> Self {
        let config = load_config(&store);
        info!(?config, "Restored settings");
        Self {
            controller: GameController::new(config),
            scoreboard: Scoreboard::load(store),
        }
    }

    /// The game controller.
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// The scoreboard.
    pub fn scoreboard(&self) -> &Scoreboard<S> {
        &self.scoreboard
    }

    /// Applies settings given on the command line.
    ///
    /// # Errors
    ///
    /// Returns the validation error; nothing is changed or saved then.
    #[instrument(skip(self))]
    pub fn apply_settings(&mut self, n: i64, k: i64, p1: &str, p2: &str) -> Result<(), kinarow::ConfigError> {
        let config = self.controller.apply_settings(n, k, p1, p2)?;
        save_config(self.scoreboard.store_mut(), &config);
        Ok(())
    }

    /// Zeroes the scores.
    pub fn reset_scores(&mut self) {
        self.scoreboard.reset();
    }

    /// Prints the settings and the empty board.
    pub fn greet<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", render::settings(self.controller.config()))?;
        self.show_board(out)?;
        writeln!(
            out,
            "{} to move. Type 'help' for commands.",
            render::player(self.controller.turn(), self.controller.config())
        )
    }

    /// Reads commands from `input` until it ends or the user quits.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> std::io::Result<()> {
        self.greet(out)?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if self.handle(&line, out)? == Flow::Quit {
                break;
            }
        }
        info!("Input finished");
        Ok(())
    }

    /// Executes one input line.
    #[instrument(skip(self, out))]
    pub fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> std::io::Result<Flow> {
        let command = match command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                debug!(error = %e, "Unparseable input");
                writeln!(out, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Play(index) => self.play(index, out)?,
            Command::PlayAt { row, col } => {
                match self.controller.board().index_of(row, col) {
                    Some(index) => self.play(index, out)?,
                    None => writeln!(
                        out,
                        "No such cell; rows and columns run from 1 to {}",
                        self.controller.board().size()
                    )?,
                }
            }
            Command::NewGame => {
                self.controller.new_game(*self.controller.config());
                writeln!(out, "New game.")?;
                self.show_board(out)?;
            }
            Command::ResetScores => {
                self.reset_scores();
                writeln!(out, "Scores reset.")?;
                self.show_score(out)?;
            }
            Command::Settings { n, k, p1, p2 } => match self.apply_settings(n, k, &p1, &p2) {
                Ok(()) => {
                    writeln!(out, "{}", render::settings(self.controller.config()))?;
                    self.show_board(out)?;
                }
                Err(e) => {
                    warn!(error = %e, "Settings rejected");
                    writeln!(out, "{}", render::config_error(&e))?;
                }
            },
            Command::Scores => self.show_score(out)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn play<W: Write>(&mut self, index: usize, out: &mut W) -> std::io::Result<()> {
        let outcome = self.controller.apply_move(index);
        let config = *self.controller.config();

        if outcome.is_accepted() {
            self.show_board(out)?;
        }
        writeln!(out, "{}", render::outcome(&outcome, &config))?;

        if let Some(event) = outcome.score_event() {
            self.scoreboard.record(event);
            self.show_score(out)?;
        }
        if matches!(outcome, MoveOutcome::Win { .. } | MoveOutcome::Tie) {
            self.controller.new_game(config);
            writeln!(out, "New game.")?;
            self.show_board(out)?;
        }
        Ok(())
    }

    fn show_board<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        write!(
            out,
            "{}",
            render::board(
                self.controller.board(),
                self.controller.status(),
                self.controller.last_move()
            )
        )
    }

    fn show_score<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(
            out,
            "{}",
            render::score(self.scoreboard.score(), self.controller.config())
        )
    }
}
