//! TUI rendering (impure shell).
//!
//! [`render`] draws a `&State` into a frame and returns a [`ViewLayout`]: the
//! clickable regions of what was drawn. The shell keeps the last layout to map
//! mouse events back to domain actions; the view itself never mutates state.

mod details;
mod header;
mod menu;
pub mod styles;
mod table;
pub mod terminal;

pub use styles::{ColorConfig, Styles};
pub use table::{column_spans, ColumnSpan, COLUMN_SPACING};
pub use terminal::{TuiApp, TuiError};

use crate::model::{ColumnName, EntryId, FilterField};
use crate::state::{Direction, State};
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

/// Width of the column menu.
pub const MENU_WIDTH: u16 = 30;
/// Narrowest the details pane is drawn.
pub const MIN_DETAILS_WIDTH: u16 = 20;
/// Most snackbars drawn at once.
const MAX_SNACKBARS: usize = 3;

/// Something the user can click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// Open or close the column menu.
    ToggleMenu,
    /// Switch between live and frozen.
    ToggleLive,
    /// Page button.
    Navigate(Direction),
    /// Switch to the next offered page size.
    CyclePageSize,
    /// Remove one active filter.
    ClearFilter(FilterField),
    /// Open or close the details panel.
    ToggleDetails,
    /// Column menu entry.
    ToggleColumn(ColumnName),
    /// Move a column to a display index.
    MoveColumn(ColumnName, usize),
    /// Restore the default columns.
    ResetLayout,
    /// Table header cell: press starts a column move.
    ColumnHeader(ColumnName),
    /// Border to the right of a header cell: press starts a resize.
    ColumnBorder(ColumnName),
    /// Table row: click selects.
    Row(EntryId),
    /// Border between table and details: press starts a resize.
    DetailsDivider,
    /// Copy the selection.
    Copy,
    /// Save the selection.
    Download,
    /// Use the entry's timestamp as the lower bound.
    TimestampFrom(EntryId),
    /// Use the entry's timestamp as the upper bound.
    TimestampTo(EntryId),
    /// Close the details panel.
    CloseDetails,
}

/// A clickable area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRegion {
    /// Screen cells covered.
    pub area: Rect,
    /// What a click does.
    pub target: Target,
}

/// Geometry of the last render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewLayout {
    /// Clickable regions, topmost last.
    pub regions: Vec<HitRegion>,
    /// Visible table columns as drawn.
    pub columns: Vec<ColumnSpan>,
    /// Drawn width of the details pane, if shown.
    pub details_width: Option<u16>,
}

impl ViewLayout {
    /// Topmost target under `(x, y)`. Regions added later win.
    pub fn hit(&self, x: u16, y: u16) -> Option<Target> {
        let position = Position::new(x, y);
        self.regions
            .iter()
            .rev()
            .find(|region| region.area.contains(position))
            .map(|region| region.target)
    }

    /// Drawn column under `x`, if any.
    pub fn column_at(&self, x: u16) -> Option<&ColumnSpan> {
        self.columns
            .iter()
            .find(|span| x >= span.x && x < span.x + span.width)
    }

    /// Span of a visible column.
    pub fn column(&self, name: ColumnName) -> Option<&ColumnSpan> {
        self.columns.iter().find(|span| span.name == name)
    }
}

/// Accumulates styled segments of one line, recording where clickable ones land.
pub(crate) struct LineBuilder {
    origin: Rect,
    x: u16,
    spans: Vec<Span<'static>>,
    regions: Vec<HitRegion>,
}

impl LineBuilder {
    pub(crate) fn new(origin: Rect) -> Self {
        Self {
            origin,
            x: origin.x,
            spans: Vec::new(),
            regions: Vec::new(),
        }
    }

    pub(crate) fn text(&mut self, text: impl Into<String>, style: Style) -> &mut Self {
        let text = text.into();
        self.x = self.x.saturating_add(text.width() as u16);
        self.spans.push(Span::styled(text, style));
        self
    }

    pub(crate) fn button(&mut self, text: impl Into<String>, style: Style, target: Target) -> &mut Self {
        let text = text.into();
        let width = text.width() as u16;
        let right = self.origin.x.saturating_add(self.origin.width);
        if self.x < right {
            self.regions.push(HitRegion {
                area: Rect::new(self.x, self.origin.y, width.min(right - self.x), 1),
                target,
            });
        }
        self.text(text, style)
    }

    pub(crate) fn finish(self) -> (Line<'static>, Vec<HitRegion>) {
        (Line::from(self.spans), self.regions)
    }
}

/// Draw the whole viewer.
pub fn render(frame: &mut Frame, state: &State, page_size_options: &[u32], styles: &Styles) -> ViewLayout {
    let mut layout = ViewLayout::default();
    let [header_area, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(frame.area());

    header::render(frame, header_area, state, page_size_options, styles, &mut layout);

    let mut table_area = body;
    if state.local.menu.visible {
        let width = MENU_WIDTH.min(body.width / 2);
        let [menu_area, rest] =
            Layout::horizontal([Constraint::Length(width), Constraint::Fill(1)]).areas(body);
        menu::render(frame, menu_area, state, styles, &mut layout);
        table_area = rest;
    }

    if state.local.details.visible && !state.local.selected_entries.is_empty() {
        let width = details_width(state.local.details.width, table_area.width);
        let [rest, details_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(width)]).areas(table_area);
        details::render(frame, details_area, state, styles, &mut layout);
        layout.details_width = Some(width);
        table_area = rest;
    }

    table::render(frame, table_area, state, styles, &mut layout);
    render_snackbars(frame, body, &state.local.snackbars, styles);

    layout
}

/// Drawn details width: the stored width, kept within half of `available`.
pub fn details_width(width: f64, available: u16) -> u16 {
    let max = (available / 2).max(MIN_DETAILS_WIDTH.min(available));
    let width = if width.is_finite() { width.round().max(0.0) } else { 0.0 };
    (width.min(u16::MAX as f64) as u16).clamp(MIN_DETAILS_WIDTH.min(max), max)
}

fn render_snackbars(frame: &mut Frame, area: Rect, snackbars: &[String], styles: &Styles) {
    // Newest at the bottom.
    let start = snackbars.len().saturating_sub(MAX_SNACKBARS);
    for (row, text) in snackbars[start..].iter().rev().enumerate() {
        let Some(y) = area.bottom().checked_sub(row as u16 + 1) else {
            break;
        };
        if y < area.y {
            break;
        }
        let width = (text.width() as u16 + 2).min(area.width);
        let rect = Rect::new(area.right().saturating_sub(width), y, width, 1);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(format!(" {text} ")).style(styles.snackbar),
            rect,
        );
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
