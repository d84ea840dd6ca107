//! Grid state for a collapse run
//!
//! Keeps separate 2D layers for the chosen tile of every cell, its remaining
//! candidates and the marker used by propagation bursts. Tiles are referenced
//! by catalog index; the catalog itself lives with the engine.

use ndarray::Array2;

use crate::algorithm::bitset::TileBitset;
use crate::spatial::orientation::Orientation;

/// Board and outcome layers of a fixed-size grid
#[derive(Debug, Clone)]
pub struct GridState {
    /// Chosen catalog index per cell, set at most once
    pub chosen: Array2<Option<usize>>,

    /// Remaining candidates per cell
    pub outcomes: Array2<TileBitset>,

    /// Cells recomputed during the current propagation burst
    pub visited: Array2<bool>,

    /// Grid dimensions (rows, cols)
    pub dimensions: (usize, usize),
}

impl GridState {
    /// Create an empty grid where every cell may hold any catalog tile
    pub fn new(rows: usize, cols: usize, catalog_len: usize) -> Self {
        Self {
            chosen: Array2::from_elem((rows, cols), None),
            outcomes: Array2::from_elem((rows, cols), TileBitset::all(catalog_len)),
            visited: Array2::from_elem((rows, cols), false),
            dimensions: (rows, cols),
        }
    }

    /// Get the number of rows in the grid
    pub const fn rows(&self) -> usize {
        self.dimensions.0
    }

    /// Get the number of columns in the grid
    pub const fn cols(&self) -> usize {
        self.dimensions.1
    }

    /// Check whether a coordinate lies inside the grid
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.rows() && y < self.cols()
    }

    /// In-bounds neighbour of `(x, y)` on the given side
    pub const fn neighbour(
        &self,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Option<(usize, usize)> {
        match orientation.step(x, y) {
            Some((nx, ny)) if self.contains(nx, ny) => Some((nx, ny)),
            _ => None,
        }
    }

    /// Chosen catalog index of a cell
    pub fn chosen_at(&self, x: usize, y: usize) -> Option<usize> {
        self.chosen.get([x, y]).copied().flatten()
    }

    /// Out-of-range coordinates count as filled so callers treat them as a no-op
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        !self.contains(x, y) || self.chosen_at(x, y).is_some()
    }

    /// Remaining candidates of a cell
    pub fn outcomes_at(&self, x: usize, y: usize) -> Option<&TileBitset> {
        self.outcomes.get([x, y])
    }

    /// Replace the candidates of a cell
    pub fn set_outcomes(&mut self, x: usize, y: usize, outcomes: TileBitset) {
        if let Some(cell) = self.outcomes.get_mut([x, y]) {
            *cell = outcomes;
        }
    }

    /// Record the chosen tile of an empty cell
    ///
    /// Returns false, leaving the cell untouched, when the cell is out of range
    /// or already holds a tile.
    pub fn lock(&mut self, x: usize, y: usize, tile: usize) -> bool {
        match self.chosen.get_mut([x, y]) {
            Some(cell) if cell.is_none() => {
                *cell = Some(tile);
                true
            }
            _ => false,
        }
    }

    /// Whether the cell was recomputed in the current burst
    pub fn is_visited(&self, x: usize, y: usize) -> bool {
        self.visited.get([x, y]).copied().unwrap_or(false)
    }

    /// Mark a cell as recomputed in the current burst
    pub fn mark_visited(&mut self, x: usize, y: usize) {
        if let Some(cell) = self.visited.get_mut([x, y]) {
            *cell = true;
        }
    }

    /// Forget every burst marker
    pub fn clear_visits(&mut self) {
        self.visited.fill(false);
    }

    /// Count of cells holding a chosen tile
    pub fn filled_count(&self) -> usize {
        self.chosen.iter().filter(|cell| cell.is_some()).count()
    }
}
