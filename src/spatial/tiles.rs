//! Catalog tiles and the builder that assembles them from rule data
//!
//! A tile pairs an opaque payload with one socket code per side. Two tiles may
//! touch when the socket codes on their shared side are equal element by element.

use crate::io::error::{CollapseError, Result};
use crate::spatial::orientation::Orientation;
use std::collections::HashMap;
use std::fmt;

/// Ordered integer sequence describing what may abut one side of a tile
pub type SocketCode = Vec<i32>;

/// Immutable catalog entry: a payload plus a socket code for each side
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tile<T> {
    value: T,
    sockets: [SocketCode; 4],
}

impl<T> Tile<T> {
    /// Create a tile from socket codes in [`Orientation::ALL`] order
    pub const fn new(value: T, sockets: [SocketCode; 4]) -> Self {
        Self { value, sockets }
    }

    /// Create a tile from a side-to-socket map
    ///
    /// # Errors
    ///
    /// Returns `MissingSocket` for the first side without an entry
    pub fn from_sockets(value: T, mut sockets: HashMap<Orientation, SocketCode>) -> Result<Self> {
        let mut take = |orientation: Orientation| {
            sockets
                .remove(&orientation)
                .ok_or(CollapseError::MissingSocket { orientation })
        };
        let top = take(Orientation::Top)?;
        let right = take(Orientation::Right)?;
        let bottom = take(Orientation::Bottom)?;
        let left = take(Orientation::Left)?;

        Ok(Self::new(value, [top, right, bottom, left]))
    }

    /// The payload carried by this tile
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Socket code on the given side
    pub fn socket(&self, orientation: Orientation) -> &[i32] {
        self.sockets
            .get(orientation.index())
            .map_or(&[] as &[i32], Vec::as_slice)
    }

    /// Check whether this tile's socket on `orientation` equals `required`
    ///
    /// # Errors
    ///
    /// Returns `SocketLengthMismatch` when the two codes differ in length
    pub fn valid_side(&self, orientation: Orientation, required: &[i32]) -> Result<bool> {
        let own = self.socket(orientation);
        if own.len() != required.len() {
            return Err(CollapseError::SocketLengthMismatch {
                orientation,
                expected: own.len(),
                found: required.len(),
            });
        }

        Ok(own == required)
    }

    /// Check whether `neighbour`, lying on `side` of this tile, may touch it
    ///
    /// # Errors
    ///
    /// Returns `SocketLengthMismatch` when the facing codes differ in length
    pub fn fits(&self, side: Orientation, neighbour: &Self) -> Result<bool> {
        neighbour.valid_side(side.opposite(), self.socket(side))
    }
}

impl<T: fmt::Display> fmt::Display for Tile<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        for orientation in Orientation::ALL {
            let codes = self
                .socket(orientation)
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            write!(f, " | {orientation}: [{codes}]")?;
        }
        Ok(())
    }
}

/// Accumulates one payload and four socket codes, then hands them out as a [`Tile`]
///
/// `build` always leaves the builder empty, so one instance can be reused for a
/// whole catalog without earlier sockets leaking into later tiles.
#[derive(Debug)]
pub struct TileBuilder<T> {
    value: Option<T>,
    sockets: [Option<SocketCode>; 4],
}

impl<T> Default for TileBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TileBuilder<T> {
    /// Create an empty builder
    pub const fn new() -> Self {
        Self {
            value: None,
            sockets: [None, None, None, None],
        }
    }

    /// Set the payload
    pub fn value(&mut self, value: T) -> &mut Self {
        self.value = Some(value);
        self
    }

    /// Set the socket code for one side
    pub fn socket(&mut self, orientation: Orientation, code: impl Into<SocketCode>) -> &mut Self {
        if let Some(slot) = self.sockets.get_mut(orientation.index()) {
            *slot = Some(code.into());
        }
        self
    }

    /// Set the socket code facing the previous row
    pub fn top(&mut self, code: impl Into<SocketCode>) -> &mut Self {
        self.socket(Orientation::Top, code)
    }

    /// Set the socket code facing the next column
    pub fn right(&mut self, code: impl Into<SocketCode>) -> &mut Self {
        self.socket(Orientation::Right, code)
    }

    /// Set the socket code facing the next row
    pub fn bottom(&mut self, code: impl Into<SocketCode>) -> &mut Self {
        self.socket(Orientation::Bottom, code)
    }

    /// Set the socket code facing the previous column
    pub fn left(&mut self, code: impl Into<SocketCode>) -> &mut Self {
        self.socket(Orientation::Left, code)
    }

    /// Produce a tile from the accumulated state and reset the builder
    ///
    /// # Errors
    ///
    /// Returns `MissingValue` or `MissingSocket` when the accumulated state is
    /// incomplete. The builder is reset in either case.
    pub fn build(&mut self) -> Result<Tile<T>> {
        let Self { value, sockets } = std::mem::take(self);
        let value = value.ok_or(CollapseError::MissingValue)?;

        let [top, right, bottom, left] = sockets;
        let complete = [
            top.ok_or(CollapseError::MissingSocket {
                orientation: Orientation::Top,
            })?,
            right.ok_or(CollapseError::MissingSocket {
                orientation: Orientation::Right,
            })?,
            bottom.ok_or(CollapseError::MissingSocket {
                orientation: Orientation::Bottom,
            })?,
            left.ok_or(CollapseError::MissingSocket {
                orientation: Orientation::Left,
            })?,
        ];

        Ok(Tile::new(value, complete))
    }
}
