//! Drag state machines for column resize, column move and the details divider.
//!
//! Each drag is `Idle` until a press on a handle, `Dragging` while the pointer
//! moves, and back to `Idle` on release. The grab captures everything measured
//! at press time so that every move computes from the origin instead of
//! accumulating per-event deltas.

use crate::model::ColumnName;
use crate::state::columns::resize_pair;

/// Generic drag lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drag<T> {
    /// No drag in progress.
    Idle,
    /// Pointer held since a press on a handle.
    Dragging {
        /// Pointer column at press time.
        origin_x: f64,
        /// Measurements captured at press time.
        grab: T,
    },
}

impl<T> Default for Drag<T> {
    fn default() -> Self {
        Drag::Idle
    }
}

impl<T> Drag<T> {
    /// Start dragging at `origin_x`. A drag already in progress is replaced.
    pub fn start(&mut self, origin_x: f64, grab: T) {
        *self = Drag::Dragging { origin_x, grab };
    }

    /// Pointer offset from the origin and the grab, while dragging.
    pub fn delta(&self, x: f64) -> Option<(f64, &T)> {
        match self {
            Drag::Idle => None,
            Drag::Dragging { origin_x, grab } => Some((x - origin_x, grab)),
        }
    }

    /// Release. Returns the grab if a drag was in progress.
    pub fn finish(&mut self) -> Option<T> {
        match std::mem::replace(self, Drag::Idle) {
            Drag::Idle => None,
            Drag::Dragging { grab, .. } => Some(grab),
        }
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self, Drag::Dragging { .. })
    }
}

/// Grab for resizing a column against its next visible neighbour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnResize {
    /// Dragged column.
    pub name: ColumnName,
    /// Next visible column, which gives or takes the width.
    pub next: ColumnName,
    /// On-screen width of the dragged column, in cells.
    pub initial_screen_width: f64,
    /// Stored width of the dragged column.
    pub initial_width: f64,
    /// Stored width of the neighbour.
    pub initial_next_width: f64,
}

impl ColumnResize {
    /// `(dragged_width, next_width)` after moving `dx` cells from the origin.
    pub fn widths(&self, dx: f64, min_width: f64) -> (f64, f64) {
        resize_pair(
            self.initial_screen_width,
            self.initial_width,
            self.initial_next_width,
            dx,
            min_width,
        )
    }
}

/// Grab for moving a column to another display index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMove {
    /// Column being moved.
    pub name: ColumnName,
}

/// Grab for the divider between table and details pane.
///
/// The pane sits on the right, so dragging left widens it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailsResize {
    /// Panel width at press time.
    pub initial_width: f64,
}

impl DetailsResize {
    /// Pane width after moving `dx` cells, floored at `min_width`.
    pub fn width(&self, dx: f64, min_width: f64) -> f64 {
        (self.initial_width - dx).max(min_width)
    }
}
