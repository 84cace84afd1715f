//! Interlock: voxel-puzzle decomposition
//!
//! Carves a solid voxel shape into pieces that can be slid out one at a
//! time, each along a single axis, and optionally opens an interactive 3D
//! viewer over the result.

mod visualization;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use interlock::persistence;
use interlock::solver::{self, SolveConfig};

const SOLUTION_BIN: &str = "solution.bin";
const SOLUTION_TXT: &str = "solution.txt";

/// Decomposes a voxel shape into slidable pieces and visualizes the result.
#[derive(Parser)]
#[command(name = "interlock")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to a shape file (overridden by a `solve` subcommand's own path).
    #[arg(long, global = true)]
    shape: Option<PathBuf>,

    /// Number of pieces to carve.
    #[arg(long, default_value_t = 4)]
    pieces: usize,

    /// Minimum voxel count per carved piece (defaults to a quarter of the shape).
    #[arg(long)]
    min_size: Option<usize>,

    /// Skip opening the interactive viewer after solving.
    #[arg(long)]
    no_view: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Decompose the shape and save the labeled solution to disk.
    Solve,
    /// Load a previously saved solution and open the viewer.
    Display,
    /// Print the piece count of the saved solution.
    Count,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Solve) | None => run_solve(&cli),
        Some(Command::Display) => run_display(),
        Some(Command::Count) => run_count(),
    };

    if let Err(e) = result {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn load_shape(cli: &Cli) -> interlock::error::Result<interlock::grid::Grid> {
    match &cli.shape {
        Some(path) => persistence::load_shape(path),
        None => persistence::parse_shape(persistence::BUILTIN_SAMPLE),
    }
}

fn run_solve(cli: &Cli) -> interlock::error::Result<()> {
    let mut grid = load_shape(cli)?;
    let min_size = cli
        .min_size
        .unwrap_or_else(|| grid.total_solid_count() / 4);
    let config = SolveConfig {
        num_pieces: cli.pieces,
        min_size,
    };

    log::info!(
        "solving: {} solid voxels, {} pieces, min_size {min_size}",
        grid.total_solid_count(),
        config.num_pieces
    );
    solver::run(&mut grid, &config)?;

    std::fs::write(SOLUTION_TXT, grid.to_string())?;
    persistence::save_solution(&grid, &PathBuf::from(SOLUTION_BIN))?;
    println!("Wrote {SOLUTION_TXT} and {SOLUTION_BIN}");

    if !cli.no_view {
        visualization::display(&grid);
    }
    Ok(())
}

fn run_display() -> interlock::error::Result<()> {
    let grid = persistence::load_solution(&PathBuf::from(SOLUTION_BIN))?;
    println!("Loaded {SOLUTION_BIN} ({} pieces)", grid.max_label());
    visualization::display(&grid);
    Ok(())
}

fn run_count() -> interlock::error::Result<()> {
    let grid = persistence::load_solution(&PathBuf::from(SOLUTION_BIN))?;
    println!("{} pieces", grid.max_label());
    Ok(())
}
