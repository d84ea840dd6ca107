//! Greedy wave function collapse over a rectangular grid of socket-matched tiles
//!
//! Tiles from a user-supplied catalog carry one socket code per side. Cells are
//! collapsed one by one from a starting cell outwards, each to a random tile whose
//! sockets match its already chosen neighbours. Choices are never undone: a cell
//! left without candidates ends the run with an error.

#![forbid(unsafe_code)]

/// Collapse engine, candidate filtering, propagation and random selection
pub mod algorithm;
/// Input/output: output port, catalog files, rendering, CLI and error handling
pub mod io;
/// Grid state, cell sides and tile definitions
pub mod spatial;

pub use algorithm::executor::{CollapseMode, EngineConfig, WaveFunctionCollapse};
pub use io::error::{CollapseError, Result};
pub use io::visitor::{CellVisit, NilVisitor, Visitor};
pub use spatial::orientation::Orientation;
pub use spatial::tiles::{Tile, TileBuilder};
