//! kinarow - terminal k-in-a-row
//!
//! Two players share one terminal and type their moves.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use kinarow_cli::{App, JsonFileStore, render};
use std::io::{self, Write};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let store = JsonFileStore::open(&cli.store);

    match cli.command {
        Command::Play { size, win, p1, p2 } => run_play(store, size, win, p1, p2),
        Command::Scores => run_scores(store),
        Command::ResetScores => run_reset_scores(store),
    }
}

/// Plays interactively on stdin/stdout.
#[instrument(skip(store), fields(path = %store.path().display()))]
fn run_play(
    store: JsonFileStore,
    size: Option<i64>,
    win: Option<i64>,
    p1: Option<String>,
    p2: Option<String>,
) -> Result<()> {
    let mut app = App::load(store);

    if size.is_some() || win.is_some() || p1.is_some() || p2.is_some() {
        let current = *app.controller().config();
        let n = size.unwrap_or(current.size() as i64);
        let k = win.unwrap_or(current.win_length() as i64);
        let p1 = p1.unwrap_or_else(|| current.player1_symbol().to_string());
        let p2 = p2.unwrap_or_else(|| current.player2_symbol().to_string());
        app.apply_settings(n, k, &p1, &p2)
            .map_err(|e| anyhow::anyhow!(render::config_error(&e)))?;
        info!("Applied settings from command line");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    app.run(stdin.lock(), &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Prints the saved scores.
#[instrument(skip(store), fields(path = %store.path().display()))]
fn run_scores(store: JsonFileStore) -> Result<()> {
    let app = App::load(store);
    println!(
        "{}",
        render::score(app.scoreboard().score(), app.controller().config())
    );
    Ok(())
}

/// Zeroes the saved scores.
#[instrument(skip(store), fields(path = %store.path().display()))]
fn run_reset_scores(store: JsonFileStore) -> Result<()> {
    let mut app = App::load(store);
    app.reset_scores();
    info!("Scores reset from command line");
    println!("Scores reset.");
    Ok(())
}
