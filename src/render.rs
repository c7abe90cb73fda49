//! Projecting a completed assignment back onto the grid.
//!
//! The solver hands the rendering layer exactly one artifact — a completed
//! [`Assignment`] — and knows nothing about output formats. Everything about
//! cells, blocks, and layout lives here.

use crate::grid::Grid;
use crate::solver::Assignment;

/// Per-cell letters of an assignment: `letters[row][col]` is the letter a
/// slot puts on the cell, or `None` for blocked and unfilled cells.
#[must_use]
pub fn letter_grid(grid: &Grid, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; grid.width()]; grid.height()];
    for (slot, word) in assignment {
        for ((row, col), letter) in slot.cells().zip(word.chars()) {
            letters[row][col] = Some(letter);
        }
    }
    letters
}

/// Render an assignment as text: one line per row, `█` for blocked cells,
/// the assigned letter for filled cells, a space for open unfilled cells.
#[must_use]
pub fn render(grid: &Grid, assignment: &Assignment) -> String {
    let letters = letter_grid(grid, assignment);
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            if grid.is_open(row, col) {
                out.push(letters[row][col].unwrap_or(' '));
            } else {
                out.push('█');
            }
        }
        out.push('\n');
    }
    out
}
