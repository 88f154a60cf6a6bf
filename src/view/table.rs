//! Entry table.
//!
//! Column widths are relative; the visible ones share the table width in
//! proportion. Spans are computed here rather than left to ratatui so that mouse
//! hit testing sees exactly what was drawn.

use super::{HitRegion, Styles, Target, ViewLayout};
use crate::model::{Column, ColumnName, Entry};
use crate::state::selection::is_selected;
use crate::state::State;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

/// Blank cells between adjacent columns. Resize handles live there.
pub const COLUMN_SPACING: u16 = 1;

/// A visible column as drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    /// Column drawn.
    pub name: ColumnName,
    /// Left edge, in cells.
    pub x: u16,
    /// Width, in cells.
    pub width: u16,
}

impl ColumnSpan {
    /// Column of the resize handle on the right edge.
    pub fn border_x(&self) -> u16 {
        self.x + self.width
    }
}

/// Lay out visible columns across `area`, in display order.
///
/// Each column gets at least one cell; rounding leftovers go to the last one.
/// Columns that would start past the right edge are dropped.
pub fn column_spans(columns: &[Column], area: Rect) -> Vec<ColumnSpan> {
    let visible: Vec<&Column> = columns.iter().filter(|c| c.visible).collect();
    if visible.is_empty() || area.width == 0 {
        return Vec::new();
    }

    let gaps = COLUMN_SPACING * (visible.len() as u16 - 1);
    let available = area.width.saturating_sub(gaps);
    let total: f64 = visible.iter().map(|c| c.width.max(0.0)).sum();

    let mut widths: Vec<u16> = visible
        .iter()
        .map(|c| {
            let share = if total > 0.0 { c.width.max(0.0) / total } else { 0.0 };
            ((share * available as f64).floor() as u16).max(1)
        })
        .collect();

    let used: u16 = widths.iter().sum();
    if let Some(last) = widths.last_mut() {
        *last += available.saturating_sub(used);
    }

    let right = area.x + area.width;
    let mut x = area.x;
    let mut spans = Vec::with_capacity(visible.len());
    for (column, width) in visible.into_iter().zip(widths) {
        if x >= right {
            break;
        }
        spans.push(ColumnSpan {
            name: column.name,
            x,
            width: width.min(right - x),
        });
        x = x.saturating_add(width + COLUMN_SPACING);
    }
    spans
}

/// First row index to draw so that the last selected entry stays in view.
pub(super) fn scroll_offset(entries: &[Entry], state: &State, rows: usize) -> usize {
    let anchor = state
        .local
        .selected_entries
        .last()
        .and_then(|s| entries.iter().position(|e| e.id == s.id));

    match anchor {
        Some(index) if rows > 0 && index >= rows => index + 1 - rows,
        _ => 0,
    }
}

pub(super) fn render(
    frame: &mut Frame,
    area: Rect,
    state: &State,
    styles: &Styles,
    layout: &mut ViewLayout,
) {
    let columns = &state.local.table.columns;
    let spans = column_spans(columns, area);
    if area.height == 0 {
        return;
    }

    for (i, span) in spans.iter().enumerate() {
        let header = Rect::new(span.x, area.y, span.width, 1);
        layout.regions.push(HitRegion {
            area: header,
            target: Target::ColumnHeader(span.name),
        });
        if i + 1 < spans.len() {
            layout.regions.push(HitRegion {
                area: Rect::new(span.border_x(), area.y, COLUMN_SPACING, 1),
                target: Target::ColumnBorder(span.name),
            });
        }
    }

    let visible: Vec<&Column> = spans
        .iter()
        .filter_map(|span| columns.iter().find(|c| c.name == span.name))
        .collect();

    let header = Row::new(visible.iter().map(|c| Cell::from(c.label))).style(styles.column_header);
    let widths: Vec<Constraint> = spans.iter().map(|s| Constraint::Length(s.width)).collect();

    let Some(remote) = state.remote.as_ref() else {
        frame.render_widget(Table::new(Vec::<Row>::new(), widths).header(header), area);
        render_notice(frame, area, "Waiting for server…");
        layout.columns = spans;
        return;
    };

    let body_rows = area.height.saturating_sub(1) as usize;
    let offset = scroll_offset(&remote.entries, state, body_rows);
    let shown = remote.entries.iter().skip(offset).take(body_rows);

    let mut rows = Vec::new();
    for (i, entry) in shown.enumerate() {
        let y = area.y + 1 + i as u16;
        layout.regions.push(HitRegion {
            area: Rect::new(area.x, y, area.width, 1),
            target: Target::Row(entry.id),
        });
        rows.push(
            Row::new(visible.iter().map(|c| Cell::from(first_line(c.display(entry)))))
                .style(row_style(entry, state, styles)),
        );
    }

    frame.render_widget(
        Table::new(rows, widths)
            .header(header)
            .column_spacing(COLUMN_SPACING),
        area,
    );

    if remote.entries.is_empty() {
        render_notice(frame, area, "No entries");
    }
    layout.columns = spans;
}

fn row_style(entry: &Entry, state: &State, styles: &Styles) -> Style {
    if is_selected(state, entry) {
        styles.selected_row
    } else if entry.is_error() {
        styles.error_row
    } else if entry.is_warning() {
        styles.warning_row
    } else {
        Style::default()
    }
}

fn first_line(text: String) -> String {
    match text.split_once('\n') {
        Some((first, _)) => format!("{first}…"),
        None => text,
    }
}

fn render_notice(frame: &mut Frame, area: Rect, text: &'static str) {
    if area.height < 2 {
        return;
    }
    let notice = Rect::new(area.x, area.y + 1, area.width, 1);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), notice);
}
