use crate::{
    algorithm::adjacency::filter_candidates,
    algorithm::propagation::recalculate_outcomes,
    algorithm::selection::RandomSelector,
    io::configuration::{DEFAULT_SEED, MAX_GRID_DIMENSION},
    io::error::{CollapseError, Result, invalid_parameter},
    io::visitor::{CellVisit, Visitor},
    spatial::GridState,
    spatial::orientation::Orientation,
    spatial::tiles::Tile,
};

/// How a cell's candidates are obtained when the wave reaches it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollapseMode {
    /// Filter the whole catalog against the chosen neighbours at the moment of choice
    #[default]
    Eager,
    /// Use the stored candidates, kept current by a propagation burst after every choice
    Propagating,
}

impl CollapseMode {
    /// Mode for the classic `fastWay` flag
    pub const fn from_fast_way(fast_way: bool) -> Self {
        if fast_way {
            Self::Eager
        } else {
            Self::Propagating
        }
    }

    /// Whether this is the eager strategy
    pub const fn is_fast_way(self) -> bool {
        matches!(self, Self::Eager)
    }
}

/// Engine parameters controlling grid size, strategy and randomness
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of rows (`x` ranges over `0..rows`)
    pub rows: usize,
    /// Number of columns (`y` ranges over `0..cols`)
    pub cols: usize,
    /// Collapse strategy
    pub mode: CollapseMode,
    /// Seed for every random choice of the run
    pub seed: u64,
}

impl EngineConfig {
    /// Eager configuration with the default seed
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            mode: CollapseMode::Eager,
            seed: DEFAULT_SEED,
        }
    }

    /// Replace the collapse strategy
    #[must_use]
    pub const fn with_mode(mut self, mode: CollapseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Centre cell, the customary place to start a wave
    pub const fn centre(&self) -> (usize, usize) {
        (self.rows / 2, self.cols / 2)
    }

    /// Check the grid dimensions against `MAX_GRID_DIMENSION`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming `rows` or `cols` if either is zero or too large
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("rows", self.rows), ("cols", self.cols)] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(())
    }
}

/// Greedy wave function collapse over a fixed grid
///
/// Owns the board, the per-cell candidate lists and the catalog they are drawn
/// from. A chosen tile is never revisited: when a cell runs out of candidates the
/// whole run fails with `Exhausted` and a fresh engine is needed.
pub struct WaveFunctionCollapse<T, V> {
    grid: GridState,
    catalog: Vec<Tile<T>>,
    visitor: V,
    mode: CollapseMode,
    random_selector: RandomSelector,
}

impl<T, V: Visitor<T>> WaveFunctionCollapse<T, V> {
    /// Create an engine with an empty board and full candidate lists
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a dimension is zero or too large, or if
    /// the catalog is empty
    pub fn new(config: EngineConfig, catalog: Vec<Tile<T>>, visitor: V) -> Result<Self> {
        config.validate()?;
        if catalog.is_empty() {
            return Err(invalid_parameter(
                "catalog",
                &0,
                &"at least one tile is required",
            ));
        }

        tracing::info!(
            rows = config.rows,
            cols = config.cols,
            mode = ?config.mode,
            tiles = catalog.len(),
            seed = config.seed,
            "created wave function"
        );

        Ok(Self {
            grid: GridState::new(config.rows, config.cols, catalog.len()),
            catalog,
            visitor,
            mode: config.mode,
            random_selector: RandomSelector::new(config.seed),
        })
    }

    /// Report the whole board to the visitor in row-major order
    pub fn draw_board(&mut self) {
        self.visitor.before_visit();

        for x in 0..self.grid.rows() {
            for y in 0..self.grid.cols() {
                self.report(x, y);
            }
        }
    }

    /// Collapse every cell reachable from `(x, y)`
    ///
    /// Filled or out-of-range start cells make this a no-op. The wave spreads
    /// depth-first on an explicit stack, drawing a fresh neighbour order for
    /// every chosen cell.
    ///
    /// # Errors
    ///
    /// Returns `Exhausted` when a reached cell has no fitting candidate, and
    /// `SocketLengthMismatch` when the catalog mixes socket code lengths. The
    /// run cannot continue after either.
    pub fn start_wave(&mut self, x: usize, y: usize) -> Result<()> {
        let mut stack = vec![(x, y)];

        while let Some((cx, cy)) = stack.pop() {
            if self.grid.is_filled(cx, cy) {
                continue;
            }

            self.collapse_cell(cx, cy)?;

            let order = self.random_selector.wave_order();
            for &side in order.iter().rev() {
                if let Some(position) = self.grid.neighbour(cx, cy, side) {
                    stack.push(position);
                }
            }
        }

        Ok(())
    }

    fn collapse_cell(&mut self, x: usize, y: usize) -> Result<()> {
        tracing::trace!(
            x,
            y,
            top = ?self.neighbour_index(x, y, Orientation::Top),
            left = ?self.neighbour_index(x, y, Orientation::Left),
            bottom = ?self.neighbour_index(x, y, Orientation::Bottom),
            right = ?self.neighbour_index(x, y, Orientation::Right),
            "start waving"
        );

        if self.mode.is_fast_way() {
            let outcomes = filter_candidates(&self.grid, &self.catalog, x, y)?;
            tracing::trace!(x, y, %outcomes, "available possibilities");
            if outcomes.is_empty() {
                tracing::warn!(x, y, "no candidate fits the chosen neighbours");
                return Err(CollapseError::Exhausted { x, y });
            }
            self.grid.set_outcomes(x, y, outcomes);
        }

        let Some(outcomes) = self.grid.outcomes_at(x, y) else {
            return Ok(());
        };
        let remaining = outcomes.count();
        let Some(choice) = self.random_selector.choose_candidate(outcomes) else {
            tracing::warn!(x, y, "no candidate fits the chosen neighbours");
            return Err(CollapseError::Exhausted { x, y });
        };

        self.grid.lock(x, y, choice);
        tracing::debug!(x, y, tile = choice, remaining, "collapsed cell");

        self.visitor.visit(CellVisit {
            value: self.catalog.get(choice).map(Tile::value),
            candidates: remaining,
            x,
            y,
            mode: self.mode,
        });

        if !self.mode.is_fast_way() {
            let recomputed = recalculate_outcomes(
                &mut self.grid,
                &self.catalog,
                x,
                y,
                self.mode,
                &mut self.visitor,
            )?;
            tracing::trace!(x, y, recomputed, "propagated constraints");
        }

        Ok(())
    }

    fn neighbour_index(&self, x: usize, y: usize, side: Orientation) -> Option<usize> {
        self.grid
            .neighbour(x, y, side)
            .and_then(|(nx, ny)| self.grid.chosen_at(nx, ny))
    }

    fn report(&mut self, x: usize, y: usize) {
        let candidates = self.candidate_count(x, y);
        let value = self
            .grid
            .chosen_at(x, y)
            .and_then(|index| self.catalog.get(index))
            .map(Tile::value);

        self.visitor.visit(CellVisit {
            value,
            candidates,
            x,
            y,
            mode: self.mode,
        });
    }
}

impl<T, V> WaveFunctionCollapse<T, V> {
    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Collapse strategy of this engine
    pub const fn mode(&self) -> CollapseMode {
        self.mode
    }

    /// Catalog every cell draws from
    pub fn catalog(&self) -> &[Tile<T>] {
        &self.catalog
    }

    /// Underlying board and outcome layers
    pub const fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Chosen tile of a cell
    pub fn chosen(&self, x: usize, y: usize) -> Option<&Tile<T>> {
        self.grid
            .chosen_at(x, y)
            .and_then(|index| self.catalog.get(index))
    }

    /// Stored candidates of a cell in catalog order
    pub fn candidates(&self, x: usize, y: usize) -> Vec<&Tile<T>> {
        self.grid
            .outcomes_at(x, y)
            .map(|outcomes| {
                outcomes
                    .iter()
                    .filter_map(|index| self.catalog.get(index))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of stored candidates of a cell, zero when out of range
    pub fn candidate_count(&self, x: usize, y: usize) -> usize {
        self.grid.outcomes_at(x, y).map_or(0, |outcomes| outcomes.count())
    }

    /// Whether every cell holds a chosen tile
    pub fn is_complete(&self) -> bool {
        self.grid.filled_count() == self.rows() * self.cols()
    }

    /// The output port
    pub const fn visitor(&self) -> &V {
        &self.visitor
    }

    /// Mutable access to the output port
    pub fn visitor_mut(&mut self) -> &mut V {
        &mut self.visitor
    }

    /// Consume the engine and hand back the output port
    pub fn into_visitor(self) -> V {
        self.visitor
    }
}
