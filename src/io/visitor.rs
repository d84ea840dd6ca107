//! Output port through which the engine reports every observable cell change
//!
//! The engine calls the port synchronously and only continues once a call
//! returns, so implementations must finish rendering or recording inside `visit`.

use crate::algorithm::executor::CollapseMode;

/// One observable state of a cell
#[derive(Debug, PartialEq, Eq)]
pub struct CellVisit<'a, T> {
    /// Chosen payload, if the cell has collapsed
    pub value: Option<&'a T>,
    /// Number of candidates remaining for the cell
    pub candidates: usize,
    /// Row of the cell
    pub x: usize,
    /// Column of the cell
    pub y: usize,
    /// Strategy of the reporting engine
    pub mode: CollapseMode,
}

// Manual impls: the payload is borrowed, so copying never needs `T: Copy`
impl<T> Clone for CellVisit<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CellVisit<'_, T> {}

impl<T> CellVisit<'_, T> {
    /// Whether the reporting engine runs in eager mode
    pub const fn fast_way(&self) -> bool {
        matches!(self.mode, CollapseMode::Eager)
    }
}

/// Consumer of cell reports
pub trait Visitor<T> {
    /// Called once before any cell report so the consumer can reset itself
    fn before_visit(&mut self);

    /// Called once per observable change of a cell
    fn visit(&mut self, cell: CellVisit<'_, T>);
}

/// Visitor that discards every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NilVisitor;

impl<T> Visitor<T> for NilVisitor {
    fn before_visit(&mut self) {}

    fn visit(&mut self, _cell: CellVisit<'_, T>) {}
}

impl<T, V: Visitor<T> + ?Sized> Visitor<T> for &mut V {
    fn before_visit(&mut self) {
        (**self).before_visit();
    }

    fn visit(&mut self, cell: CellVisit<'_, T>) {
        (**self).visit(cell);
    }
}

impl<T, V: Visitor<T> + ?Sized> Visitor<T> for Box<V> {
    fn before_visit(&mut self) {
        (**self).before_visit();
    }

    fn visit(&mut self, cell: CellVisit<'_, T>) {
        (**self).visit(cell);
    }
}

// Fan-out: both ports see every call, first one first
impl<T, A: Visitor<T>, B: Visitor<T>> Visitor<T> for (A, B) {
    fn before_visit(&mut self) {
        self.0.before_visit();
        self.1.before_visit();
    }

    fn visit(&mut self, cell: CellVisit<'_, T>) {
        self.0.visit(cell);
        self.1.visit(cell);
    }
}

impl<T, V: Visitor<T>> Visitor<T> for Option<V> {
    fn before_visit(&mut self) {
        if let Some(visitor) = self {
            visitor.before_visit();
        }
    }

    fn visit(&mut self, cell: CellVisit<'_, T>) {
        if let Some(visitor) = self {
            visitor.visit(cell);
        }
    }
}
