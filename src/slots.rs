//! Slot geometry: the fill-in slots of a grid and where they cross.
//!
//! A slot is a maximal run of at least two consecutive open cells, read
//! left-to-right (across) or top-to-bottom (down). Two slots cross iff their
//! cell sets share exactly one grid cell; the [`Crossings`] table stores each
//! crossing once per endpoint with the cell offsets embedded, so lookups
//! never deal in symmetric duplicate keys.

use std::collections::HashMap;
use std::fmt;

use crate::grid::Grid;

/// Index of a slot in scan order; stable for the lifetime of a solve.
pub type SlotId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// Per-step `(row, col)` increment along a slot.
    #[must_use]
    pub fn delta(self) -> (usize, usize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Across => "across",
            Direction::Down => "down",
        })
    }
}

/// A single fill-in slot.
///
/// Identity is value-based: two slots with identical fields are the same
/// slot, and `Slot` is usable as a map key. Immutable once scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Slot {
    /// The grid cells the slot occupies, in fill order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (dr, dc) = self.direction.delta();
        (0..self.length).map(move |k| (self.row + k * dr, self.col + k * dc))
    }

    /// Extract every slot from a grid.
    ///
    /// A cell starts an across slot iff it is open, has no open cell to its
    /// left, and the run it begins is at least two cells long; down slots
    /// are symmetric. Scan order is row-major with across before down at the
    /// same start cell — the canonical slot ordering for the whole crate.
    #[must_use]
    pub fn scan(grid: &Grid) -> Vec<Slot> {
        let mut slots = Vec::new();
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                if !grid.is_open(row, col) {
                    continue;
                }
                if col == 0 || !grid.is_open(row, col - 1) {
                    let length = run_length(grid, row, col, Direction::Across);
                    if length >= 2 {
                        slots.push(Slot {
                            row,
                            col,
                            direction: Direction::Across,
                            length,
                        });
                    }
                }
                if row == 0 || !grid.is_open(row - 1, col) {
                    let length = run_length(grid, row, col, Direction::Down);
                    if length >= 2 {
                        slots.push(Slot {
                            row,
                            col,
                            direction: Direction::Down,
                            length,
                        });
                    }
                }
            }
        }
        slots
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({},{})x{}",
            self.direction, self.row, self.col, self.length
        )
    }
}

/// Length of the maximal open run starting at `(row, col)` going `direction`.
fn run_length(grid: &Grid, row: usize, col: usize, direction: Direction) -> usize {
    let (dr, dc) = direction.delta();
    let (mut r, mut c) = (row, col);
    let mut length = 0;
    while r < grid.height() && c < grid.width() && grid.is_open(r, c) {
        length += 1;
        r += dr;
        c += dc;
    }
    length
}

/// One crossing from a slot's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub neighbor: SlotId,
    pub our_offset: usize,
    pub their_offset: usize,
}

/// Per-slot crossing lists for a scanned slot set.
#[derive(Debug, Clone)]
pub struct Crossings {
    by_slot: Vec<Vec<Crossing>>,
}

impl Crossings {
    /// Build the crossing table: for every pair of slots sharing a cell,
    /// record the offsets of that cell into each slot, on both endpoints.
    ///
    /// Maximal runs can never share more than one cell (parallel runs are
    /// disjoint; perpendicular runs meet in at most one), so each neighbor
    /// appears at most once per list.
    #[must_use]
    pub fn build(slots: &[Slot]) -> Self {
        let mut occupants: HashMap<(usize, usize), Vec<(SlotId, usize)>> = HashMap::new();
        for (id, slot) in slots.iter().enumerate() {
            for (offset, cell) in slot.cells().enumerate() {
                occupants.entry(cell).or_default().push((id, offset));
            }
        }

        let mut by_slot = vec![Vec::new(); slots.len()];
        for cell_slots in occupants.values() {
            for (i, &(a, a_offset)) in cell_slots.iter().enumerate() {
                for &(b, b_offset) in &cell_slots[i + 1..] {
                    debug_assert_ne!(a, b, "a slot cannot cross itself");
                    by_slot[a].push(Crossing {
                        neighbor: b,
                        our_offset: a_offset,
                        their_offset: b_offset,
                    });
                    by_slot[b].push(Crossing {
                        neighbor: a,
                        our_offset: b_offset,
                        their_offset: a_offset,
                    });
                }
            }
        }

        // Neighbor order must not depend on map iteration order.
        for crossings in &mut by_slot {
            crossings.sort_unstable_by_key(|c| c.neighbor);
            debug_assert!(
                crossings.windows(2).all(|w| w[0].neighbor != w[1].neighbor),
                "two slots share more than one cell"
            );
        }

        Self { by_slot }
    }

    /// Every crossing of `slot`, ordered by neighbor id.
    #[must_use]
    pub fn neighbors(&self, slot: SlotId) -> &[Crossing] {
        &self.by_slot[slot]
    }

    /// Number of distinct slots crossing `slot`.
    #[must_use]
    pub fn degree(&self, slot: SlotId) -> usize {
        self.by_slot[slot].len()
    }

    /// Shared-cell offsets between `a` and `b`: `Some((offset_in_a,
    /// offset_in_b))` if they cross, `None` otherwise.
    #[must_use]
    pub fn overlap(&self, a: SlotId, b: SlotId) -> Option<(usize, usize)> {
        self.by_slot[a]
            .iter()
            .find(|c| c.neighbor == b)
            .map(|c| (c.our_offset, c.their_offset))
    }
}
