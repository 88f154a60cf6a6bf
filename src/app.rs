//! Application shell.
//!
//! [`App`] wires the pure transitions of [`crate::state`] to the outside world. It
//! applies them through the [`Store`], delivers the filter pushes they request to
//! the remote channel, turns host failures into snackbars and maps keyboard and
//! mouse input to domain actions.
//!
//! Nothing here lets an error escape: a failed push, copy or save is logged and
//! surfaced as a snackbar, and the viewer keeps running.

use crate::channel::{decode_remote_state, RemoteChannel};
use crate::config::ResolvedConfig;
use crate::details::{download_file_name, encode_entries, EXPORT_MIME};
use crate::host::{write_clipboard, Clipboard, FileSaver};
use crate::model::{ChannelError, ColumnName, Entry, EntryId, FilterField, FilterValue, KeyAction};
use crate::state::filter::{self, FilterSetter};
use crate::state::pagination::{self, Direction};
use crate::state::snackbar::{dismiss_snackbar, show_snackbar};
use crate::state::{
    columns, selection, ColumnMove, ColumnResize, DetailsResize, Drag, Effect, RemoteState,
    SnackbarQueue, State,
};
use crate::store::{lens, Store};
use crate::view::{self, Styles, Target, ViewLayout, MIN_DETAILS_WIDTH};
use crossterm::event::{
    KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

/// Snackbar shown after a successful copy.
pub const COPY_SUCCESS: &str = "Copied selected entries";
/// Snackbar shown when the copy was refused or failed.
pub const COPY_FAILURE: &str = "Couldn't copy selected entries";
/// Snackbar shown when the save failed.
pub const DOWNLOAD_FAILURE: &str = "Couldn't save selected entries";
/// Snackbar shown when a filter push could not be delivered.
pub const SEND_FAILURE: &str = "Couldn't reach the server";
/// Snackbar shown when the server connection is gone.
pub const DISCONNECTED: &str = "Connection lost";

/// The running viewer: store, channel, host services and input state.
pub struct App<C, K, F> {
    store: Store,
    channel: C,
    clipboard: K,
    saver: F,
    config: ResolvedConfig,
    styles: Styles,
    snackbars: SnackbarQueue,
    column_resize: Drag<ColumnResize>,
    column_move: Drag<ColumnMove>,
    details_resize: Drag<DetailsResize>,
    layout: ViewLayout,
    connected: bool,
    should_quit: bool,
}

impl<C, K, F> App<C, K, F>
where
    C: RemoteChannel,
    K: Clipboard,
    F: FileSaver,
{
    /// Create the shell with a fresh store seeded from `config`.
    pub fn new(config: ResolvedConfig, channel: C, clipboard: K, saver: F) -> Self {
        let store = Store::new(State::from_config(&config));
        let snackbars = SnackbarQueue::new(Duration::from_millis(config.snackbar_timeout_ms));
        Self {
            store,
            channel,
            clipboard,
            saver,
            config,
            styles: Styles::default(),
            snackbars,
            column_resize: Drag::default(),
            column_move: Drag::default(),
            details_resize: Drag::default(),
            layout: ViewLayout::default(),
            connected: true,
            should_quit: false,
        }
    }

    /// Replace the render styles (e.g. with colors disabled).
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Store holding the state tree.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Current state tree.
    pub fn state(&self) -> std::sync::Arc<State> {
        self.store.snapshot().state
    }

    /// Resolved configuration.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Channel to the server.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Mutable channel, for draining pushes.
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Clipboard used by copy.
    pub fn clipboard(&self) -> &K {
        &self.clipboard
    }

    /// File saver used by download.
    pub fn saver(&self) -> &F {
        &self.saver
    }

    /// Geometry of the last render.
    pub fn layout(&self) -> &ViewLayout {
        &self.layout
    }

    /// Whether a quit was requested.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // ===== Filter engine =====

    /// Push the current local filter as is, e.g. right after connecting.
    pub fn push_filter(&mut self) {
        let effect = Effect::push_local(&self.store.snapshot().state);
        self.deliver(effect);
    }

    /// Set one filter predicate and push if the query changed.
    pub fn set_filter_value(&mut self, field: FilterField, value: FilterValue) {
        self.apply(|state| filter::set_filter_value(state, field, value));
    }

    /// Run a setter built by [`filter::filter_setter`].
    pub fn apply_setter(&mut self, setter: &FilterSetter, value: FilterValue) {
        self.apply(|state| setter(state, value));
    }

    /// Clear every predicate, keeping page size and cursor.
    pub fn clear_filter(&mut self) {
        self.apply(filter::clear_filter);
    }

    /// Switch between live and frozen.
    pub fn set_frozen(&mut self, frozen: bool) {
        self.apply(|state| filter::set_frozen(state, frozen));
    }

    /// Flip live/frozen.
    pub fn toggle_live(&mut self) {
        self.apply(filter::toggle_live);
    }

    /// Change the page size; sizes not offered by the config are ignored.
    pub fn set_page_size(&mut self, page_size: u32) {
        let options = self.config.page_size_options.clone();
        self.apply(|state| filter::set_page_size(state, page_size, &options));
    }

    /// Switch to the offered page size after the current one, wrapping around.
    pub fn cycle_page_size(&mut self) {
        let options = &self.config.page_size_options;
        let current = self.store.get(lens::FILTER).max_results;
        let next = match current.and_then(|n| options.iter().position(|&o| o == n)) {
            Some(index) => options.get((index + 1) % options.len()),
            None => options.first(),
        };
        if let Some(&page_size) = next {
            self.set_page_size(page_size);
        }
    }

    /// Use `entry`'s timestamp as the lower bound.
    pub fn set_timestamp_from_entry(&mut self, entry: &Entry) {
        self.apply(|state| filter::set_timestamp_from_entry(state, entry));
    }

    /// Use `entry`'s timestamp as the upper bound.
    pub fn set_timestamp_to_entry(&mut self, entry: &Entry) {
        self.apply(|state| filter::set_timestamp_to_entry(state, entry));
    }

    // ===== Pagination engine =====

    /// Whether a page exists in `direction`.
    pub fn can_navigate(&self, direction: Direction) -> bool {
        pagination::can_navigate(&self.store.snapshot().state, direction)
    }

    /// Move one page; refused directions are ignored.
    pub fn navigate(&mut self, direction: Direction) {
        self.apply(|state| pagination::navigate(state, direction));
    }

    // ===== Column layout =====

    /// Show or hide a column.
    pub fn set_column_visible(&mut self, name: ColumnName, visible: bool) {
        self.store.change(lens::COLUMNS, |current| {
            let mut next = current.clone();
            columns::set_column_visible(&mut next, name, visible);
            next
        });
    }

    /// Move a column to a display index.
    pub fn move_column(&mut self, name: ColumnName, index: usize) {
        self.store.update(|state| columns::move_column(&mut state.local.table.columns, name, index));
    }

    /// Set a column width, floored at the configured minimum.
    pub fn set_column_width(&mut self, name: ColumnName, width: f64) {
        let min_width = self.config.min_column_width;
        self.store.update(|state| {
            columns::set_column_width(&mut state.local.table.columns, name, width, min_width);
        });
    }

    /// Restore the default columns.
    pub fn reset_layout(&mut self) {
        self.store.set(lens::COLUMNS, columns::reset_layout());
    }

    // ===== Selection & details =====

    /// Select `entry`; with `toggle` it is added or removed instead.
    pub fn select_entry(&mut self, entry: &Entry, toggle: bool) {
        self.store.update(|state| selection::select_entry(state, entry, toggle));
    }

    /// Move the selection by `offset` rows, extending it when asked.
    pub fn select_relative(&mut self, offset: isize, extend: bool) {
        self.store.update(|state| selection::select_relative(state, offset, extend));
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        self.store.update(selection::clear_selection);
    }

    /// Show the details panel.
    pub fn open_details(&mut self) {
        self.store.update(|state| state.local.details.visible = true);
    }

    /// Hide the details panel.
    pub fn close_details(&mut self) {
        self.store.update(|state| state.local.details.visible = false);
    }

    /// Show or hide the details panel.
    pub fn toggle_details(&mut self) {
        self.store.update(|state| state.local.details.visible = !state.local.details.visible);
    }

    /// Set the details panel width, floored at the minimum.
    pub fn set_details_width(&mut self, width: f64) {
        self.store.update(|state| state.local.details.width = width.max(MIN_DETAILS_WIDTH as f64));
    }

    /// Show or hide the column menu.
    pub fn toggle_menu(&mut self) {
        self.store.update(|state| state.local.menu.visible = !state.local.menu.visible);
    }

    /// Copy the selected entries to the clipboard as JSON.
    ///
    /// Does nothing with an empty selection. Success and failure are both
    /// reported through a snackbar.
    pub fn copy_selection(&mut self) {
        let selected = self.store.get(lens::SELECTED_ENTRIES);
        if selected.is_empty() {
            return;
        }

        let result = encode_entries(&selected)
            .map_err(|err| err.to_string())
            .and_then(|text| {
                write_clipboard(&mut self.clipboard, &text).map_err(|err| err.to_string())
            });

        match result {
            Ok(()) => {
                info!(count = selected.len(), "copied entries");
                self.notify(COPY_SUCCESS);
            }
            Err(err) => {
                warn!(%err, "copy failed");
                self.notify(COPY_FAILURE);
            }
        }
    }

    /// Save the selected entries as a JSON file.
    pub fn download_selection(&mut self) {
        let selected = self.store.get(lens::SELECTED_ENTRIES);
        if selected.is_empty() {
            return;
        }

        let file_name = download_file_name(&selected);
        let result = encode_entries(&selected)
            .map_err(|err| err.to_string())
            .and_then(|text| {
                self.saver
                    .save(&file_name, EXPORT_MIME, &text)
                    .map_err(|err| err.to_string())
            });

        match result {
            Ok(()) => {
                info!(%file_name, count = selected.len(), "saved entries");
                self.notify(format!("Saved {file_name}"));
            }
            Err(err) => {
                warn!(%err, %file_name, "save failed");
                self.notify(DOWNLOAD_FAILURE);
            }
        }
    }

    // ===== Snackbars =====

    /// Show a transient notification, dismissed by [`App::tick`] after the timeout.
    pub fn notify(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.snackbars.schedule(text.clone(), Instant::now());
        self.store.update(|state| show_snackbar(state, text));
    }

    /// Dismiss notifications whose deadline passed.
    pub fn tick(&mut self, now: Instant) {
        for text in self.snackbars.expired(now) {
            self.store.update(|state| dismiss_snackbar(state, &text));
        }
    }

    /// Time until the next snackbar expires.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.snackbars.next_deadline(now)
    }

    // ===== Remote =====

    /// Replace the remote subtree with a server snapshot.
    pub fn on_remote_push(&mut self, remote: RemoteState) {
        debug!(
            entries = remote.entries.len(),
            first_id = ?remote.first_id,
            last_id = ?remote.last_id,
            "remote snapshot"
        );
        self.connected = true;
        self.store.set(lens::REMOTE, Some(remote));
    }

    /// Decode and apply a raw server push.
    ///
    /// # Errors
    ///
    /// `ChannelError::Decode` when the text is not a snapshot; the state is left as
    /// it was.
    pub fn on_remote_message(&mut self, text: &str) -> Result<(), ChannelError> {
        let remote = decode_remote_state(text).inspect_err(|err| {
            warn!(%err, "undecodable server push");
        })?;
        self.on_remote_push(remote);
        Ok(())
    }

    /// Apply every push the channel received since the last poll.
    pub fn poll_remote(&mut self) {
        match self.channel.poll_pushes() {
            Ok(pushes) => {
                for remote in pushes {
                    self.on_remote_push(remote);
                }
            }
            Err(err) => {
                if self.connected {
                    warn!(%err, "remote channel lost");
                    self.connected = false;
                    self.notify(DISCONNECTED);
                }
            }
        }
    }

    // ===== Input =====

    /// Handle a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        let Some((action, extend)) = self.config.keybindings.resolve(key) else {
            return false;
        };
        debug!(action = action.name(), extend, "key action");

        if let Some(offset) = action.selection_offset(self.config.page_step) {
            self.select_relative(offset, extend);
            return false;
        }

        match action {
            KeyAction::ClearSelection => self.clear_selection(),
            KeyAction::PreviousPage => self.navigate(Direction::Previous),
            KeyAction::NextPage => self.navigate(Direction::Next),
            KeyAction::FirstPage => self.navigate(Direction::First),
            KeyAction::ToggleLive => self.toggle_live(),
            KeyAction::OpenDetails => self.open_details(),
            KeyAction::ToggleDetails => self.toggle_details(),
            KeyAction::ToggleMenu => self.toggle_menu(),
            KeyAction::ClearFilter => self.clear_filter(),
            KeyAction::ResetLayout => self.reset_layout(),
            KeyAction::CopySelection => self.copy_selection(),
            KeyAction::DownloadSelection => self.download_selection(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::SelectNext
            | KeyAction::SelectPrevious
            | KeyAction::SelectPageDown
            | KeyAction::SelectPageUp => {}
        }
        self.should_quit
    }

    /// Handle a mouse event against the last rendered layout.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.press(mouse.column, mouse.row, mouse.modifiers)
            }
            MouseEventKind::Drag(MouseButton::Left) => self.drag_to(mouse.column),
            MouseEventKind::Up(MouseButton::Left) => self.release(mouse.column),
            MouseEventKind::ScrollDown => self.select_relative(1, false),
            MouseEventKind::ScrollUp => self.select_relative(-1, false),
            _ => {}
        }
    }

    /// Run the action behind a clickable target.
    pub fn activate(&mut self, target: Target) {
        debug!(?target, "activate");
        match target {
            Target::ToggleMenu => self.toggle_menu(),
            Target::ToggleLive => self.toggle_live(),
            Target::Navigate(direction) => self.navigate(direction),
            Target::CyclePageSize => self.cycle_page_size(),
            Target::ClearFilter(field) => self.set_filter_value(field, FilterValue::Null),
            Target::ToggleDetails => self.toggle_details(),
            Target::ToggleColumn(name) => {
                let visible = self
                    .store
                    .get(lens::COLUMNS)
                    .iter()
                    .find(|c| c.name == name)
                    .is_some_and(|c| c.visible);
                self.set_column_visible(name, !visible);
            }
            Target::MoveColumn(name, index) => self.move_column(name, index),
            Target::ResetLayout => self.reset_layout(),
            Target::Row(id) => {
                if let Some(entry) = self.find_entry(id) {
                    self.select_entry(&entry, false);
                }
            }
            Target::Copy => self.copy_selection(),
            Target::Download => self.download_selection(),
            Target::TimestampFrom(id) => {
                if let Some(entry) = self.find_entry(id) {
                    self.set_timestamp_from_entry(&entry);
                }
            }
            Target::TimestampTo(id) => {
                if let Some(entry) = self.find_entry(id) {
                    self.set_timestamp_to_entry(&entry);
                }
            }
            Target::CloseDetails => self.close_details(),
            // Drag handles do nothing on a plain click.
            Target::ColumnHeader(_) | Target::ColumnBorder(_) | Target::DetailsDivider => {}
        }
    }

    /// Draw the viewer and remember the clickable regions.
    pub fn render(&mut self, frame: &mut Frame) {
        let state = self.store.snapshot().state;
        self.layout = view::render(frame, &state, &self.config.page_size_options, &self.styles);
    }

    fn press(&mut self, x: u16, y: u16, modifiers: KeyModifiers) {
        let Some(target) = self.layout.hit(x, y) else {
            return;
        };
        let origin = f64::from(x);

        match target {
            Target::ColumnBorder(name) => {
                if let Some(grab) = self.column_resize_grab(name) {
                    self.column_resize.start(origin, grab);
                }
            }
            Target::ColumnHeader(name) => self.column_move.start(origin, ColumnMove { name }),
            Target::DetailsDivider => {
                let initial_width = self
                    .layout
                    .details_width
                    .map_or(self.store.get(lens::DETAILS).width, f64::from);
                self.details_resize.start(origin, DetailsResize { initial_width });
            }
            Target::Row(id) => {
                let toggle = modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::CONTROL);
                if let Some(entry) = self.find_entry(id) {
                    self.select_entry(&entry, toggle);
                }
            }
            other => self.activate(other),
        }
    }

    fn drag_to(&mut self, x: u16) {
        let x = f64::from(x);
        let min_width = self.config.min_column_width;
        if let Some((dx, grab)) = self.column_resize.delta(x) {
            let (width, next_width) = grab.widths(dx, min_width);
            let (name, next) = (grab.name, grab.next);
            self.store.update(|state| {
                columns::set_pair_widths(
                    &mut state.local.table.columns,
                    (name, width),
                    (next, next_width),
                );
            });
        }
        if let Some((dx, grab)) = self.details_resize.delta(x) {
            let width = grab.width(dx, MIN_DETAILS_WIDTH as f64);
            self.store.update(|state| state.local.details.width = width);
        }
    }

    fn release(&mut self, x: u16) {
        if let Some(grab) = self.column_resize.finish() {
            debug!(column = %grab.name, "column resized");
        }
        if self.details_resize.finish().is_some() {
            debug!("details resized");
        }
        let Some(grab) = self.column_move.finish() else {
            return;
        };
        let target = self.layout.column_at(x).map(|span| span.name);
        let columns = self.store.get(lens::COLUMNS);
        if let Some(index) = target.and_then(|name| columns::index_of(&columns, name)) {
            if columns::index_of(&columns, grab.name) != Some(index) {
                self.move_column(grab.name, index);
            }
        }
    }

    fn column_resize_grab(&self, name: ColumnName) -> Option<ColumnResize> {
        let columns = self.store.get(lens::COLUMNS);
        let column = columns.iter().find(|c| c.name == name)?;
        let next = columns::next_visible_column(&columns, name)?;
        let span = self.layout.column(name)?;
        Some(ColumnResize {
            name,
            next: next.name,
            initial_screen_width: f64::from(span.width),
            initial_width: column.width,
            initial_next_width: next.width,
        })
    }

    /// Entry by id: the selection first, then the current page.
    fn find_entry(&self, id: EntryId) -> Option<Entry> {
        let state = self.store.snapshot().state;
        state
            .local
            .selected_entries
            .iter()
            .chain(state.entries())
            .find(|entry| entry.id == id)
            .cloned()
    }

    /// Run a transition through the store and deliver its effect.
    fn apply(&mut self, transition: impl FnOnce(&mut State) -> Effect) {
        let effect = self.store.update(transition);
        self.deliver(effect);
    }

    fn deliver(&mut self, effect: Effect) {
        let Some(filter) = effect.filter() else {
            return;
        };
        if let Err(err) = self.channel.send_filter(filter) {
            warn!(%err, "filter push failed");
            self.notify(SEND_FAILURE);
        }
    }
}
