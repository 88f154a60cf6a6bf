//! Details pane for the selected entries.

use super::{HitRegion, LineBuilder, Styles, Target, ViewLayout};
use crate::details::details_for;
use crate::state::State;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub(super) fn render(
    frame: &mut Frame,
    area: Rect,
    state: &State,
    styles: &Styles,
    layout: &mut ViewLayout,
) {
    let entries = &state.local.selected_entries;
    if area.width < 2 || area.height < 2 {
        return;
    }

    layout.regions.push(HitRegion {
        area: Rect::new(area.x, area.y, 1, area.height),
        target: Target::DetailsDivider,
    });

    let block = Block::default().borders(Borders::LEFT).title(" Details ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let actions = Rect::new(inner.x, inner.y, inner.width, 1);
    let mut line = LineBuilder::new(actions);
    line.button("[Copy]", styles.button, Target::Copy)
        .text(" ", Style::default())
        .button("[Save]", styles.button, Target::Download);
    if let Some(entry) = entries.last() {
        line.text(" ", Style::default())
            .button("[From]", styles.button, Target::TimestampFrom(entry.id))
            .text(" ", Style::default())
            .button("[To]", styles.button, Target::TimestampTo(entry.id));
    }
    line.text(" ", Style::default())
        .button("[×]", styles.button, Target::CloseDetails);
    let (action_line, regions) = line.finish();
    layout.regions.extend(regions);
    frame.render_widget(Paragraph::new(action_line), actions);

    let mut lines: Vec<Line> = Vec::new();
    for details in details_for(entries) {
        lines.push(Line::from(Span::styled(
            details.title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled("Message:", styles.label)));
        lines.extend(details.message.lines().map(|l| Line::from(l.to_string())));

        if let Some(exception) = details.exception {
            lines.push(Line::from(Span::styled("Exception:", styles.label)));
            lines.extend(exception.lines().map(|l| Line::from(l.to_string())));
        }

        for (label, value) in details.fields {
            lines.push(Line::from(vec![
                Span::styled(format!("{label}: "), styles.label),
                Span::raw(value),
            ]));
        }
        lines.push(Line::default());
    }

    let content = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), content);
}
