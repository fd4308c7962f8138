//! Metaboard - recursive tic-tac-toe in the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use metaboard::cli::{Cli, Command, ShapeArgs};
use metaboard::{GameConfig, TurnCoordinator, render_board, store, tui};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            shape,
            save,
            resume,
            log_file,
        } => {
            init_file_logging(&log_file)?;
            run_play(shape, save, resume)
        }
        Command::Show { snapshot } => {
            init_stderr_logging();
            run_show(snapshot)
        }
        Command::Config { shape } => {
            init_stderr_logging();
            println!("{}", effective_config(&shape)?.to_toml()?);
            Ok(())
        }
    }
}

/// Logs to a file so the board keeps the terminal to itself.
fn init_file_logging(path: &Path) -> Result<()> {
    let log_file =
        std::fs::File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

/// Config file (or defaults) with command-line overrides applied.
fn effective_config(shape: &ShapeArgs) -> Result<GameConfig> {
    let base = match &shape.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    let config = base.with_overrides(shape.grid, shape.depth, shape.players);
    config.validate()?;
    Ok(config)
}

#[instrument(skip(shape))]
fn run_play(shape: ShapeArgs, save: Option<PathBuf>, resume: Option<PathBuf>) -> Result<()> {
    let session = match &resume {
        Some(path) => store::load(path)?,
        None => TurnCoordinator::new(&effective_config(&shape)?)?,
    };

    let session = tui::run(session)?;
    info!(status = %session.status(), "Session ended");

    if let Some(path) = save {
        store::save(&session, &path)?;
        println!("Saved session to {}", path.display());
    }
    println!("{}", render_board(session.board(), None));
    println!("Result: {}", session.status());
    Ok(())
}

#[instrument]
fn run_show(snapshot: PathBuf) -> Result<()> {
    let session = store::load(&snapshot)?;
    println!("{}", render_board(session.board(), None));
    println!(
        "Status: {} | players: {} | next: {} | moves: {}",
        session.status(),
        session.players(),
        session.current_player(),
        session.history().len()
    );
    Ok(())
}
