//! Spatial data structures and tile definitions
//!
//! This module contains spatial-related functionality including:
//! - Grid state management
//! - Cell sides and neighbour geometry
//! - Tile definitions and their builder

/// Grid state management and bounds-checked access
pub mod grid;
/// Cell sides and the neighbour each one faces
pub mod orientation;
/// Tile definitions and socket matching
pub mod tiles;

pub use grid::GridState;
