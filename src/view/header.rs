//! Header bar: panel toggles, live indicator, paging, page size and filter chips.

use super::{LineBuilder, Styles, Target, ViewLayout};
use crate::state::filter::{active_filters, is_frozen_remote, is_live};
use crate::state::pagination::{can_navigate, current_page};
use crate::state::{Direction, State};
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub(super) fn render(
    frame: &mut Frame,
    area: Rect,
    state: &State,
    page_size_options: &[u32],
    styles: &Styles,
    layout: &mut ViewLayout,
) {
    let frozen = is_frozen_remote(state);
    let base = if frozen { styles.header_frozen } else { styles.header };
    let mut line = LineBuilder::new(area);

    line.button(" ≡ Columns ", styles.button, Target::ToggleMenu)
        .text("│", base);

    if is_live(state) {
        line.button(" ● LIVE ", styles.live, Target::ToggleLive);
    } else {
        line.button(" ❚❚ FROZEN ", styles.frozen, Target::ToggleLive);
    }
    line.text("│", base);

    nav_button(&mut line, state, " « ", Direction::First, styles);
    nav_button(&mut line, state, " ‹ ", Direction::Previous, styles);
    line.text(format!("Page {}", current_page(state)), base);
    nav_button(&mut line, state, " › ", Direction::Next, styles);
    line.text("│", base);

    let page_size = match state.local.filter.max_results {
        Some(n) => format!(" {n}/page "),
        None => " all ".to_string(),
    };
    if page_size_options.len() > 1 {
        line.button(page_size, styles.button, Target::CyclePageSize);
    } else {
        line.text(page_size, base);
    }

    if let Some(filter) = state.remote_filter() {
        for chip in active_filters(filter) {
            line.text(" ", base).button(
                format!(" {}: {} ✕ ", chip.label, chip.value),
                styles.chip,
                Target::ClearFilter(chip.field),
            );
        }
    }

    line.text(" │", base)
        .button(" ◧ Details ", styles.button, Target::ToggleDetails);

    let (line, regions) = line.finish();
    frame.render_widget(Paragraph::new(line).style(base), area);
    layout.regions.extend(regions);
}

fn nav_button(line: &mut LineBuilder, state: &State, label: &str, direction: Direction, styles: &Styles) {
    if can_navigate(state, direction) {
        line.button(label, styles.button, Target::Navigate(direction));
    } else {
        line.text(label, styles.button_disabled);
    }
}
