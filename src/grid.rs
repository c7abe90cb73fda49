//! Grid structure: the blocked/open cell matrix a puzzle is filled into.
//!
//! A structure file is rectangular text, one row per line. `_` marks an open
//! cell (part of some fill-in slot); any other character — canonically `#` —
//! marks a blocked cell. The grid is immutable once parsed; slot geometry is
//! derived from it in [`crate::slots`].

use std::fmt;

use crate::errors::GridError;

/// An immutable blocked/open cell matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    /// Row-major; `open[r * width + c]` is true iff the cell is open.
    open: Vec<bool>,
}

impl Grid {
    /// Parse structure text into a grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyStructure`] if the text has no rows or a
    /// zero-width first row, and [`GridError::RaggedStructure`] if any row's
    /// width differs from the first row's.
    pub fn parse(content: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = content.lines().collect();
        if lines.is_empty() {
            return Err(GridError::EmptyStructure);
        }

        let width = lines[0].chars().count();
        if width == 0 {
            return Err(GridError::EmptyStructure);
        }

        let mut open = Vec::with_capacity(lines.len() * width);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::RaggedStructure {
                    row,
                    expected: width,
                    found,
                });
            }
            open.extend(line.chars().map(|c| c == '_'));
        }

        Ok(Self {
            height: lines.len(),
            width,
            open,
        })
    }

    /// Read and parse a structure file.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Io`] (with the path in the message) if the file
    /// cannot be read, or any [`Grid::parse`] error.
    pub fn load_from_path(path: &str) -> Result<Self, GridError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("structure file '{path}': {e}"))
        })?;
        Self::parse(&content)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the cell at `(row, col)` is open. Panics if out of bounds.
    #[must_use]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) out of bounds for {}x{} grid",
            self.height,
            self.width
        );
        self.open[row * self.width + col]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let c = if self.is_open(row, col) { '_' } else { '█' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
