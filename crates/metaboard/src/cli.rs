//! Command-line interface for metaboard.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Metaboard - recursive "board of boards" tic-tac-toe
#[derive(Parser, Debug)]
#[command(name = "metaboard")]
#[command(about = "Recursive board-of-boards tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Board shape overrides shared by every command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ShapeArgs {
    /// TOML file with `grid`, `depth` and `players`
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Grid side length (overrides the config file)
    #[arg(long)]
    pub grid: Option<usize>,

    /// Nesting depth (overrides the config file)
    #[arg(long)]
    pub depth: Option<usize>,

    /// Number of players (overrides the config file)
    #[arg(long)]
    pub players: Option<u8>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Board shape
        #[command(flatten)]
        shape: ShapeArgs,

        /// Write the session here as JSON on exit
        #[arg(long)]
        save: Option<PathBuf>,

        /// Continue a session saved with --save
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Log file (the terminal is busy drawing the board)
        #[arg(long, default_value = "metaboard.log")]
        log_file: PathBuf,
    },

    /// Print a saved session's board
    Show {
        /// Session file written by `play --save`
        snapshot: PathBuf,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Board shape
        #[command(flatten)]
        shape: ShapeArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_overrides() {
        let cli = Cli::parse_from(["metaboard", "play", "--grid", "4", "--depth", "1", "--save", "out.json"]);
        match cli.command {
            Command::Play { shape, save, log_file, .. } => {
                assert_eq!(shape.grid, Some(4));
                assert_eq!(shape.depth, Some(1));
                assert_eq!(shape.players, None);
                assert_eq!(save, Some(PathBuf::from("out.json")));
                assert_eq!(log_file, PathBuf::from("metaboard.log"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::parse_from(["metaboard", "show", "game.json"]);
        assert!(matches!(cli.command, Command::Show { snapshot } if snapshot == PathBuf::from("game.json")));
    }
}
