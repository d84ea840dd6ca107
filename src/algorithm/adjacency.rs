//! Socket compatibility of catalog tiles against the chosen neighbours of a cell
//!
//! Only chosen neighbours constrain a cell. Candidate lists of unassigned
//! neighbours are never consulted.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::Result;
use crate::spatial::GridState;
use crate::spatial::orientation::Orientation;
use crate::spatial::tiles::Tile;

/// Check a candidate tile at `(x, y)` against every chosen neighbour
///
/// A side without an in-bounds chosen neighbour imposes no constraint.
///
/// # Errors
///
/// Returns `SocketLengthMismatch` when a facing pair of socket codes differs in length
pub fn verify_sides<T>(
    grid: &GridState,
    catalog: &[Tile<T>],
    candidate: &Tile<T>,
    x: usize,
    y: usize,
) -> Result<bool> {
    for side in Orientation::ALL {
        let Some((nx, ny)) = grid.neighbour(x, y, side) else {
            continue;
        };
        let Some(neighbour) = grid.chosen_at(nx, ny).and_then(|index| catalog.get(index)) else {
            continue;
        };

        if !candidate.fits(side, neighbour)? {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Filter the whole catalog down to the tiles that fit at `(x, y)`
///
/// # Errors
///
/// Returns `SocketLengthMismatch` when a facing pair of socket codes differs in length
pub fn filter_candidates<T>(
    grid: &GridState,
    catalog: &[Tile<T>],
    x: usize,
    y: usize,
) -> Result<TileBitset> {
    let mut viable = TileBitset::new(catalog.len());
    for (index, candidate) in catalog.iter().enumerate() {
        if verify_sides(grid, catalog, candidate, x, y)? {
            viable.insert(index);
        }
    }

    Ok(viable)
}
