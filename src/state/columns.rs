//! Column layout manager.
//!
//! Pure edits over the ordered column list. Array order is display order; names
//! are never added or removed.

use crate::model::{default_columns, Column, ColumnName};
use tracing::debug;

/// Smallest width any column may be resized to.
pub const MIN_COLUMN_WIDTH: f64 = 1.0;

/// Show or hide a column. Order is untouched.
pub fn set_column_visible(columns: &mut [Column], name: ColumnName, visible: bool) {
    for column in columns.iter_mut().filter(|c| c.name == name) {
        column.visible = visible;
    }
}

/// Move a column to `index`, shifting the others (a splice, not a swap).
///
/// No-op when `index` is out of range, the column is unknown, or it is already
/// at `index`.
pub fn move_column(columns: &mut Vec<Column>, name: ColumnName, index: usize) {
    if index >= columns.len() {
        return;
    }

    let Some(old_index) = index_of(columns, name) else {
        return;
    };

    if old_index == index {
        return;
    }

    let column = columns.remove(old_index);
    columns.insert(index, column);
    debug!(column = %name, from = old_index, to = index, "column moved");
}

/// Replace a column's width, floored at `min_width` (and never below 1).
pub fn set_column_width(columns: &mut [Column], name: ColumnName, width: f64, min_width: f64) {
    let width = width.max(min_width.max(MIN_COLUMN_WIDTH));
    for column in columns.iter_mut().filter(|c| c.name == name) {
        column.width = width;
    }
}

/// Default layout.
pub fn reset_layout() -> Vec<Column> {
    default_columns()
}

/// Display index of a column.
pub fn index_of(columns: &[Column], name: ColumnName) -> Option<usize> {
    columns.iter().position(|c| c.name == name)
}

/// First visible column after `name` in display order.
pub fn next_visible_column(columns: &[Column], name: ColumnName) -> Option<&Column> {
    let index = index_of(columns, name)?;
    columns[index + 1..].iter().find(|c| c.visible)
}

/// Sum of visible widths.
pub fn visible_width(columns: &[Column]) -> f64 {
    columns.iter().filter(|c| c.visible).map(|c| c.width).sum()
}

/// Widths for a column pair after a drag of `dx` screen cells.
///
/// The dragged column scales with its on-screen width; the next visible column
/// absorbs the difference so the pair's total is constant. If the neighbour would
/// drop below `min_width` it is clamped and the rest goes back to the dragged
/// column.
///
/// When the pair is narrower than two minimum widths the floor shrinks to half
/// the total, so both widths stay at or above it and still sum to the total.
///
/// Returns `(dragged_width, next_width)`.
pub fn resize_pair(
    initial_screen_width: f64,
    initial_width: f64,
    initial_next_width: f64,
    dx: f64,
    min_width: f64,
) -> (f64, f64) {
    let total = initial_width + initial_next_width;
    let floor = min_width.max(MIN_COLUMN_WIDTH).min(total / 2.0);

    let scaled = if initial_screen_width > 0.0 {
        initial_width * (initial_screen_width + dx) / initial_screen_width
    } else {
        initial_width
    };

    let mut width = scaled.max(floor);
    let mut next_width = total - width;
    if next_width < floor {
        next_width = floor;
        width = total - next_width;
    }

    (width, next_width)
}

/// Write the widths of a resized pair as given, without flooring them again.
pub fn set_pair_widths(
    columns: &mut [Column],
    (name, width): (ColumnName, f64),
    (next, next_width): (ColumnName, f64),
) {
    for column in columns.iter_mut() {
        if column.name == name {
            column.width = width;
        } else if column.name == next {
            column.width = next_width;
        }
    }
}

#[cfg(test)]
#[path = "columns_tests.rs"]
mod tests;
