//! Seeded uniform choices: candidate tiles and the order a wave spreads in

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::bitset::TileBitset;
use crate::spatial::orientation::Orientation;

/// Neighbour visiting orders a wave may take from a freshly chosen cell
///
/// Every ordering is reachable; one is drawn uniformly per chosen cell so the
/// wave has no directional bias.
pub const WAVE_ORDERS: [[Orientation; 4]; 4] = [
    [
        Orientation::Top,
        Orientation::Left,
        Orientation::Bottom,
        Orientation::Right,
    ],
    [
        Orientation::Left,
        Orientation::Bottom,
        Orientation::Right,
        Orientation::Top,
    ],
    [
        Orientation::Bottom,
        Orientation::Right,
        Orientation::Left,
        Orientation::Top,
    ],
    [
        Orientation::Right,
        Orientation::Left,
        Orientation::Bottom,
        Orientation::Top,
    ],
];

/// Order in which a propagation burst reaches the neighbours of a cell
pub const PROPAGATION_ORDER: [Orientation; 4] = [
    Orientation::Top,
    Orientation::Left,
    Orientation::Bottom,
    Orientation::Right,
];

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniformly pick one present catalog index
    ///
    /// Returns `None` for an empty set without consuming randomness.
    pub fn choose_candidate(&mut self, candidates: &TileBitset) -> Option<usize> {
        let count = candidates.count();
        if count == 0 {
            return None;
        }

        candidates.nth(self.rng.random_range(0..count))
    }

    /// Uniformly pick one of [`WAVE_ORDERS`]
    pub fn wave_order(&mut self) -> [Orientation; 4] {
        let index = self.rng.random_range(0..WAVE_ORDERS.len());
        WAVE_ORDERS.get(index).copied().unwrap_or(PROPAGATION_ORDER)
    }
}
