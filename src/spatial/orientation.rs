//! Cell sides and the neighbour geometry they imply
//!
//! Rows grow downwards and columns grow to the right, so the `Top` neighbour
//! of `(x, y)` is `(x - 1, y)` and the `Right` neighbour is `(x, y + 1)`.

use std::fmt;

/// One side of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    /// Side facing the previous row
    Top,
    /// Side facing the next column
    Right,
    /// Side facing the next row
    Bottom,
    /// Side facing the previous column
    Left,
}

impl Orientation {
    /// All sides in rule-file order
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The side a neighbour presents back towards this one
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Position in [`Orientation::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// Row and column step towards the neighbour on this side
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Top => (-1, 0),
            Self::Right => (0, 1),
            Self::Bottom => (1, 0),
            Self::Left => (0, -1),
        }
    }

    /// Coordinates of the neighbour on this side, if they are not negative
    pub const fn step(self, x: usize, y: usize) -> Option<(usize, usize)> {
        let (dx, dy) = self.offset();
        match (x.checked_add_signed(dx), y.checked_add_signed(dy)) {
            (Some(nx), Some(ny)) => Some((nx, ny)),
            _ => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "TOP",
            Self::Right => "RIGHT",
            Self::Bottom => "BOTTOM",
            Self::Left => "LEFT",
        };
        f.write_str(name)
    }
}
