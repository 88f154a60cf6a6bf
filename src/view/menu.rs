//! Column menu: visibility checkboxes and move buttons.

use super::{LineBuilder, Styles, Target, ViewLayout};
use crate::state::State;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub(super) fn render(
    frame: &mut Frame,
    area: Rect,
    state: &State,
    styles: &Styles,
    layout: &mut ViewLayout,
) {
    let block = Block::default().borders(Borders::RIGHT).title(" Columns ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = &state.local.table.columns;
    let filter = &state.local.filter;
    let mut lines: Vec<Line> = Vec::new();
    let last = columns.len().saturating_sub(1);

    for (index, column) in columns.iter().enumerate() {
        let y = inner.y + index as u16;
        if y >= inner.bottom() {
            break;
        }
        let row = Rect::new(inner.x, y, inner.width, 1);
        let mut line = LineBuilder::new(row);

        let check = if column.visible { "[x] " } else { "[ ] " };
        line.button(
            format!("{check}{:<14}", column.label),
            styles.button,
            Target::ToggleColumn(column.name),
        );

        let hidden_filter = !column.visible && column.filter.is_some_and(|f| filter.is_set(f));
        line.text(if hidden_filter { "! " } else { "  " }, styles.warning);

        if index < last {
            line.button("↓", styles.button, Target::MoveColumn(column.name, index + 1));
        } else {
            line.text("↓", styles.button_disabled);
        }
        line.text(" ", styles.button);
        if index > 0 {
            line.button("↑", styles.button, Target::MoveColumn(column.name, index - 1));
        } else {
            line.text("↑", styles.button_disabled);
        }

        let (rendered, regions) = line.finish();
        lines.push(rendered);
        layout.regions.extend(regions);
    }

    let reset_y = inner.y + columns.len() as u16 + 1;
    if reset_y < inner.bottom() {
        let mut line = LineBuilder::new(Rect::new(inner.x, reset_y, inner.width, 1));
        line.button("Reset layout", styles.button, Target::ResetLayout);
        let (rendered, regions) = line.finish();
        lines.push(Line::default());
        lines.push(rendered);
        layout.regions.extend(regions);
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
