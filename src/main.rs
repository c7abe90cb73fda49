use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crossfill::errors::GridError;
use crossfill::grid::Grid;
use crossfill::render;
use crossfill::solver::{Solver, SolverConfig};
use crossfill::words::WordList;

/// Crossword grid filler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the grid structure file ('_' = open cell, anything else = blocked)
    structure: String,

    /// Path to the word list file (one word per line)
    words: String,

    /// Also write the rendered solution to this file
    #[arg(short, long)]
    output: Option<String>,

    /// Seed for random tie-breaking between equally ranked slots
    /// (omit for a fixed deterministic order)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Re-run arc consistency after each tentative assignment
    #[arg(short, long)]
    propagate: bool,
}

/// Entry point of the crossfill CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("CROSSFILL_DEBUG").is_ok();
    crossfill::log::init_logger(debug_enabled);

    log::info!("Starting crossfill");

    if let Err(e) = try_main() {
        // Print the error message to stderr, with detailed formatting if it's a GridError
        if let Some(grid_err) = e.downcast_ref::<GridError>() {
            eprintln!("Error: {}", grid_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        // Exit explicitly with a nonzero code so scripts can detect failure
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic for the crossfill CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Load the grid structure and the word list from disk.
/// 3. Solve: node consistency, AC-3, then backtracking search.
/// 4. Print the filled grid on stdout — or `No solution.` when the puzzle
///    is unsatisfiable, which is a normal outcome, not an error.
/// 5. Print performance metrics (timings, counts) on stderr.
///
/// Returns `Ok(())` on success or an error (malformed structure, unreadable
/// file) which bubbles up to [`main`].
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // 1. Load the structure and the word list from disk
    let t_load = Instant::now();
    let grid = Grid::load_from_path(&cli.structure)?;
    let words = WordList::load_from_path(&cli.words)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    // 2. Fill the grid
    let config = SolverConfig {
        seed: cli.seed,
        propagate: cli.propagate,
    };
    let mut solver = Solver::new(&grid, &words, config);
    let t_solve = Instant::now();
    let assignment = solver.solve();
    let solve_secs = t_solve.elapsed().as_secs_f64();

    // 3. Print the result on stdout
    match &assignment {
        None => println!("No solution."),
        Some(assignment) => {
            let rendered = render::render(&grid, assignment);
            print!("{rendered}");
            if let Some(path) = &cli.output {
                std::fs::write(path, &rendered).map_err(|e| {
                    std::io::Error::new(e.kind(), format!("output file '{path}': {e}"))
                })?;
            }
        }
    }

    // 4. Print diagnostics (slot/word counts, timings, search effort) to stderr
    let stats = solver.stats();
    eprintln!(
        "Loaded {} slots and {} words in {:.3}s; search took {:.3}s ({} nodes, {} backtracks, {} pruned).",
        solver.slots().len(),
        words.len(),
        load_secs,
        solve_secs,
        stats.nodes,
        stats.backtracks,
        stats.pruned
    );

    Ok(())
}
