//! Render tests against ratatui's TestBackend.

use super::*;
use crate::model::{default_columns, Entry, Msg, Severity};
use crate::state::RemoteState;
use ratatui::backend::TestBackend;
use ratatui::style::Color;
use ratatui::Terminal;

const OPTIONS: [u32; 2] = [20, 50];

fn entry(id: u64, severity: Option<Severity>) -> Entry {
    Entry {
        id,
        timestamp: 0.0,
        msg: Msg {
            facility: None,
            severity,
            version: 1,
            timestamp: None,
            hostname: None,
            app_name: None,
            procid: None,
            msgid: None,
            data: None,
            msg: Some(format!("message {id}")),
        },
    }
}

fn with_page(mut state: State, entries: Vec<Entry>) -> State {
    state.remote = Some(RemoteState {
        filter: state.local.filter.clone(),
        first_id: entries.last().map(|e| e.id),
        last_id: entries.first().map(|e| e.id),
        entries,
    });
    state
}

fn draw(state: &State, width: u16, height: u16) -> (Terminal<TestBackend>, ViewLayout) {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    let mut layout = ViewLayout::default();
    terminal
        .draw(|frame| layout = render(frame, state, &OPTIONS, &Styles::default()))
        .unwrap();
    (terminal, layout)
}

fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let height = terminal.backend().buffer().area.height;
    (0..height)
        .map(|y| row_text(terminal, y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn header_shows_live_indicator_and_first_page() {
    let (terminal, _) = draw(&State::default(), 120, 10);
    let header = row_text(&terminal, 0);

    assert!(header.contains("LIVE"), "{header}");
    assert!(header.contains("Page 1"), "{header}");
    assert!(header.contains("50/page"), "{header}");
}

#[test]
fn header_shows_frozen_and_page_number() {
    let mut state = with_page(State::default(), vec![entry(9, None)]);
    state.local.filter.last_id = Some(7);
    state.local.page_last_ids = vec![9, 7];

    let (terminal, layout) = draw(&state, 120, 10);
    let header = row_text(&terminal, 0);

    assert!(header.contains("FROZEN"), "{header}");
    assert!(header.contains("Page 2"), "{header}");
    let targets: Vec<Target> = layout.regions.iter().map(|r| r.target).collect();
    assert!(targets.contains(&Target::Navigate(Direction::Previous)));
    assert!(targets.contains(&Target::Navigate(Direction::First)));
    assert!(!targets.contains(&Target::Navigate(Direction::Next)));
}

#[test]
fn header_renders_clearable_remote_filter_chips() {
    let mut state = with_page(State::default(), vec![entry(1, None)]);
    if let Some(remote) = state.remote.as_mut() {
        remote.filter.severity = Some(Severity::Error);
    }

    let (terminal, layout) = draw(&state, 120, 10);

    assert!(row_text(&terminal, 0).contains("Severity: ERROR"));
    assert!(layout
        .regions
        .iter()
        .any(|r| r.target == Target::ClearFilter(FilterField::Severity)));
}

#[test]
fn waiting_notice_before_first_snapshot() {
    let (terminal, _) = draw(&State::default(), 100, 10);
    assert!(screen_text(&terminal).contains("Waiting for server…"));
}

#[test]
fn empty_page_shows_no_entries() {
    let state = with_page(State::default(), Vec::new());
    let (terminal, _) = draw(&state, 100, 10);
    assert!(screen_text(&terminal).contains("No entries"));
}

#[test]
fn column_spans_are_proportional_to_widths() {
    // Visible by default: ID 4, Timestamp 12, Severity 5, Message ID 10, Message 50.
    let spans = column_spans(&default_columns(), Rect::new(0, 0, 85, 10));

    let widths: Vec<u16> = spans.iter().map(|s| s.width).collect();
    let xs: Vec<u16> = spans.iter().map(|s| s.x).collect();
    assert_eq!(widths, vec![4, 12, 5, 10, 50]);
    assert_eq!(xs, vec![0, 5, 18, 24, 35]);
    assert_eq!(spans[0].name, ColumnName::Id);
    assert_eq!(spans[4].name, ColumnName::Msg);
}

#[test]
fn column_spans_skip_hidden_columns() {
    let mut columns = default_columns();
    for column in &mut columns {
        column.visible = false;
    }
    assert!(column_spans(&columns, Rect::new(0, 0, 80, 10)).is_empty());

    columns[0].visible = true;
    let spans = column_spans(&columns, Rect::new(3, 0, 80, 10));
    assert_eq!(spans, vec![ColumnSpan { name: ColumnName::Id, x: 3, width: 80 }]);
}

#[test]
fn table_regions_map_back_to_columns_and_rows() {
    let state = with_page(State::default(), vec![entry(3, None), entry(2, None)]);
    let (_, layout) = draw(&state, 85, 10);

    assert_eq!(layout.hit(0, 1), Some(Target::ColumnHeader(ColumnName::Id)));
    assert_eq!(layout.hit(4, 1), Some(Target::ColumnBorder(ColumnName::Id)));
    assert_eq!(layout.hit(10, 2), Some(Target::Row(3)));
    assert_eq!(layout.hit(10, 3), Some(Target::Row(2)));
    assert_eq!(layout.hit(10, 4), None);
    assert_eq!(layout.column_at(40).map(|s| s.name), Some(ColumnName::Msg));
    assert_eq!(layout.column(ColumnName::Severity).map(|s| s.x), Some(18));
}

#[test]
fn error_rows_are_styled() {
    let state = with_page(
        State::default(),
        vec![entry(2, Some(Severity::Error)), entry(1, Some(Severity::Warning))],
    );
    let (terminal, _) = draw(&state, 85, 10);
    let buffer = terminal.backend().buffer();

    assert_eq!(buffer[(0, 2)].fg, Color::Red);
    assert_eq!(buffer[(0, 3)].fg, Color::Yellow);
}

#[test]
fn details_pane_shows_selected_entry() {
    let page = vec![entry(3, None), entry(2, None)];
    let mut state = with_page(State::default(), page.clone());
    state.local.selected_entries = vec![page[0].clone()];

    let (terminal, layout) = draw(&state, 100, 20);

    assert_eq!(layout.details_width, Some(50));
    assert_eq!(layout.hit(50, 10), Some(Target::DetailsDivider));
    let targets: Vec<Target> = layout.regions.iter().map(|r| r.target).collect();
    for target in [
        Target::Copy,
        Target::Download,
        Target::TimestampFrom(3),
        Target::TimestampTo(3),
        Target::CloseDetails,
    ] {
        assert!(targets.contains(&target), "missing {target:?}");
    }
    let screen = screen_text(&terminal);
    assert!(screen.contains("Entry 3"), "{screen}");
    assert!(screen.contains("message 3"), "{screen}");
}

#[test]
fn details_pane_hidden_without_selection_or_when_closed() {
    let page = vec![entry(3, None)];
    let state = with_page(State::default(), page.clone());
    assert_eq!(draw(&state, 100, 20).1.details_width, None);

    let mut state = state;
    state.local.selected_entries = page;
    state.local.details.visible = false;
    assert_eq!(draw(&state, 100, 20).1.details_width, None);
}

#[test]
fn details_width_is_clamped_to_the_screen() {
    assert_eq!(details_width(400.0, 100), 50);
    assert_eq!(details_width(30.0, 100), 30);
    assert_eq!(details_width(5.0, 100), MIN_DETAILS_WIDTH);
    assert_eq!(details_width(400.0, 30), 20);
    assert_eq!(details_width(400.0, 10), 10);
    assert_eq!(details_width(f64::NAN, 100), MIN_DETAILS_WIDTH);
}

#[test]
fn menu_lists_columns_and_warns_on_hidden_filtered_column() {
    let mut state = State::default();
    state.local.menu.visible = true;
    state.local.filter.hostname = Some("web".to_owned());

    let (terminal, layout) = draw(&state, 120, 20);
    let screen = screen_text(&terminal);

    assert!(screen.contains("[x] ID"), "{screen}");
    let hostname_row = screen
        .lines()
        .find(|line| line.contains("[ ] Hostname"))
        .unwrap_or_default();
    assert!(hostname_row.contains('!'), "{hostname_row}");
    let severity_row = screen
        .lines()
        .find(|line| line.contains("[x] Severity"))
        .unwrap_or_default();
    assert!(!severity_row.contains('!'), "{severity_row}");

    let targets: Vec<Target> = layout.regions.iter().map(|r| r.target).collect();
    assert!(targets.contains(&Target::ToggleColumn(ColumnName::Hostname)));
    assert!(targets.contains(&Target::MoveColumn(ColumnName::Id, 1)));
    assert!(!targets.contains(&Target::MoveColumn(ColumnName::Id, usize::MAX)));
    assert!(targets.contains(&Target::ResetLayout));
}

#[test]
fn snackbars_stack_newest_at_bottom() {
    let mut state = State::default();
    state.local.snackbars = vec!["first".to_owned(), "second".to_owned()];

    let (terminal, _) = draw(&state, 80, 10);

    assert!(row_text(&terminal, 9).contains("second"));
    assert!(row_text(&terminal, 8).contains("first"));
}

#[test]
fn later_regions_win_hit_tests() {
    let layout = ViewLayout {
        regions: vec![
            HitRegion {
                area: Rect::new(0, 0, 10, 1),
                target: Target::ToggleMenu,
            },
            HitRegion {
                area: Rect::new(2, 0, 2, 1),
                target: Target::Copy,
            },
        ],
        ..ViewLayout::default()
    };

    assert_eq!(layout.hit(1, 0), Some(Target::ToggleMenu));
    assert_eq!(layout.hit(3, 0), Some(Target::Copy));
    assert_eq!(layout.hit(3, 1), None);
}
