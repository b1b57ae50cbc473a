//! CLI argument definitions for updog.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use updog_core::GameKind;

#[derive(Parser)]
#[command(name = "updog")]
#[command(about = "Disc dog game scorekeeper", version)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "updog.toml", env = "UPDOG_CONFIG")]
    pub config: PathBuf,

    /// Directory for saved games and exports (overrides the config file)
    #[arg(long, value_name = "DIR", env = "UPDOG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List supported games and their buttons
    Games,
    /// Append teams from a CSV roster to a game's queue
    Import {
        #[arg(value_parser = parse_game)]
        game: GameKind,
        /// Roster file (CSV, any common encoding)
        file: PathBuf,
    },
    /// Score rounds interactively, one command per line on stdin
    Score {
        #[arg(value_parser = parse_game)]
        game: GameKind,
    },
    /// Export completed rounds
    Export {
        #[arg(value_parser = parse_game)]
        game: GameKind,
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output file path (default: timestamped file in the exports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Template file for the sheet format (default: templates/<Game>.csv)
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,
    },
    /// Show the saved state of a game
    Status {
        #[arg(value_parser = parse_game)]
        game: GameKind,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove every team and result from a game
    Clear {
        #[arg(value_parser = parse_game)]
        game: GameKind,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Results CSV in completion order
    Csv,
    /// JSON export of every completed round
    Json,
    /// Ranked rows as tab separated text
    Rows,
    /// Team list CSV for re-import
    Roster,
    /// Ranked rows filled into the game's template
    Sheet,
}

pub fn parse_game(value: &str) -> Result<GameKind, String> {
    GameKind::parse(value).map_err(|e| e.to_string())
}
