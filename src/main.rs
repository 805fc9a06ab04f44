use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use grid_snake::config::{GridSize, SessionConfig};
use grid_snake::error::{ConfigError, GridError, ReplayError};
use grid_snake::game::GameState;
use grid_snake::replay::{parse_moves, play, ReplaySummary};
use thiserror::Error;

/// Runs one headless round from a move script and reports the result.
#[derive(Debug, Parser)]
#[command(name = "grid-snake", version)]
struct Cli {
    /// JSON session config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board height in cells.
    #[arg(long)]
    rows: Option<u16>,

    /// Board width in cells.
    #[arg(long)]
    cols: Option<u16>,

    /// Seed for food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Per-tick moves: U, D, L, R to turn, `.` to keep going.
    #[arg(long, default_value = "")]
    moves: String,

    /// Print the final board.
    #[arg(long = "print-board")]
    print_board: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("failed to encode summary: {0}")]
    Encode(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli)?;
    let size = GridSize::new(config.rows, config.cols);
    let steps = parse_moves(&cli.moves)?;

    let mut state = match config.seed {
        Some(seed) => GameState::new_with_seed(size, seed)?,
        None => GameState::new(size)?,
    };

    let summary = play(&mut state, &steps);

    if cli.print_board {
        print!("{}", state.board());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<SessionConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };

    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.cols = cols;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config.grid_size()?;
    Ok(config)
}

fn print_summary(summary: &ReplaySummary) {
    println!("ticks: {}", summary.ticks_played);
    println!("score: {}", summary.score);
    println!("length: {}", summary.snake_len);
    match summary.death_reason {
        Some(reason) => println!("status: game over ({reason:?})"),
        None => println!("status: running"),
    }
}
