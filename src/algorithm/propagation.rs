//! Candidate propagation after a collapse in propagating mode
//!
//! A burst starts at the four neighbours of a freshly chosen cell and walks
//! outwards depth-first on an explicit stack. Each unfilled cell is recomputed
//! at most once per burst. A cell that still admits the whole catalog has
//! nothing new to tell its own neighbours, so the walk stops there.

use crate::algorithm::adjacency::filter_candidates;
use crate::algorithm::executor::CollapseMode;
use crate::algorithm::selection::PROPAGATION_ORDER;
use crate::io::error::Result;
use crate::io::visitor::{CellVisit, Visitor};
use crate::spatial::GridState;
use crate::spatial::tiles::Tile;

/// Push the in-bounds neighbours of a cell so they pop in `PROPAGATION_ORDER`
fn push_neighbours(grid: &GridState, stack: &mut Vec<(usize, usize)>, x: usize, y: usize) {
    for &side in PROPAGATION_ORDER.iter().rev() {
        if let Some(position) = grid.neighbour(x, y, side) {
            stack.push(position);
        }
    }
}

/// Run one propagation burst around the chosen cell `(x, y)`
///
/// Clears the burst markers, then recomputes and reports every reachable
/// unfilled cell. Returns the number of cells recomputed.
///
/// # Errors
///
/// Returns `SocketLengthMismatch` when a facing pair of socket codes differs in length
pub fn recalculate_outcomes<T, V: Visitor<T>>(
    grid: &mut GridState,
    catalog: &[Tile<T>],
    x: usize,
    y: usize,
    mode: CollapseMode,
    visitor: &mut V,
) -> Result<usize> {
    grid.clear_visits();

    let mut stack = Vec::with_capacity(4);
    push_neighbours(grid, &mut stack, x, y);

    let mut recomputed = 0;
    while let Some((cx, cy)) = stack.pop() {
        if grid.is_filled(cx, cy) || grid.is_visited(cx, cy) {
            continue;
        }

        let mut outcomes = filter_candidates(grid, catalog, cx, cy)?;
        if let Some(previous) = grid.outcomes_at(cx, cy) {
            outcomes.intersect_with(previous);
        }
        let remaining = outcomes.count();

        grid.set_outcomes(cx, cy, outcomes);
        grid.mark_visited(cx, cy);
        recomputed += 1;

        tracing::trace!(x = cx, y = cy, remaining, "recalculated outcomes");
        visitor.visit(CellVisit {
            value: None,
            candidates: remaining,
            x: cx,
            y: cy,
            mode,
        });

        if remaining == catalog.len() {
            continue;
        }
        push_neighbours(grid, &mut stack, cx, cy);
    }

    Ok(recomputed)
}
