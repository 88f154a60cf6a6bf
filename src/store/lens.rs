//! Typed paths into the state tree.
//!
//! Each lens is a pair of accessor functions for one nested location that some
//! component actually reads or writes. There is no stringly-typed addressing.

use crate::model::{Column, Entry, EntryId, Filter};
use crate::state::{DetailsState, LocalState, MenuState, RemoteState, State};
use std::fmt;

/// Typed accessor for one location in [`State`].
pub struct Lens<T> {
    name: &'static str,
    get: fn(&State) -> &T,
    get_mut: fn(&mut State) -> &mut T,
}

impl<T> Lens<T> {
    /// Build a lens from a name and accessor pair.
    pub const fn new(
        name: &'static str,
        get: fn(&State) -> &T,
        get_mut: fn(&mut State) -> &mut T,
    ) -> Self {
        Self { name, get, get_mut }
    }

    /// Dotted path name, used in trace output.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Borrow the focused value.
    pub fn get<'a>(&self, state: &'a State) -> &'a T {
        (self.get)(state)
    }

    /// Borrow the focused value mutably.
    pub fn get_mut<'a>(&self, state: &'a mut State) -> &'a mut T {
        (self.get_mut)(state)
    }
}

impl<T> Clone for Lens<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Lens<T> {}

impl<T> fmt::Debug for Lens<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lens").field(&self.name).finish()
    }
}

fn root(s: &State) -> &State {
    s
}
fn root_mut(s: &mut State) -> &mut State {
    s
}
fn local(s: &State) -> &LocalState {
    &s.local
}
fn local_mut(s: &mut State) -> &mut LocalState {
    &mut s.local
}
fn remote(s: &State) -> &Option<RemoteState> {
    &s.remote
}
fn remote_mut(s: &mut State) -> &mut Option<RemoteState> {
    &mut s.remote
}
fn filter(s: &State) -> &Filter {
    &s.local.filter
}
fn filter_mut(s: &mut State) -> &mut Filter {
    &mut s.local.filter
}
fn columns(s: &State) -> &Vec<Column> {
    &s.local.table.columns
}
fn columns_mut(s: &mut State) -> &mut Vec<Column> {
    &mut s.local.table.columns
}
fn page_last_ids(s: &State) -> &Vec<EntryId> {
    &s.local.page_last_ids
}
fn page_last_ids_mut(s: &mut State) -> &mut Vec<EntryId> {
    &mut s.local.page_last_ids
}
fn selected_entries(s: &State) -> &Vec<Entry> {
    &s.local.selected_entries
}
fn selected_entries_mut(s: &mut State) -> &mut Vec<Entry> {
    &mut s.local.selected_entries
}
fn snackbars(s: &State) -> &Vec<String> {
    &s.local.snackbars
}
fn snackbars_mut(s: &mut State) -> &mut Vec<String> {
    &mut s.local.snackbars
}
fn menu(s: &State) -> &MenuState {
    &s.local.menu
}
fn menu_mut(s: &mut State) -> &mut MenuState {
    &mut s.local.menu
}
fn details(s: &State) -> &DetailsState {
    &s.local.details
}
fn details_mut(s: &mut State) -> &mut DetailsState {
    &mut s.local.details
}

/// The whole tree.
pub const ROOT: Lens<State> = Lens::new("", root, root_mut);
/// Local preferences.
pub const LOCAL: Lens<LocalState> = Lens::new("local", local, local_mut);
/// Last server snapshot.
pub const REMOTE: Lens<Option<RemoteState>> = Lens::new("remote", remote, remote_mut);
/// Local filter.
pub const FILTER: Lens<Filter> = Lens::new("local.filter", filter, filter_mut);
/// Column layout.
pub const COLUMNS: Lens<Vec<Column>> = Lens::new("local.table.columns", columns, columns_mut);
/// Cursor stack for paging.
pub const PAGE_LAST_IDS: Lens<Vec<EntryId>> =
    Lens::new("local.page_last_ids", page_last_ids, page_last_ids_mut);
/// Selected entries.
pub const SELECTED_ENTRIES: Lens<Vec<Entry>> =
    Lens::new("local.selected_entries", selected_entries, selected_entries_mut);
/// Visible snackbar texts.
pub const SNACKBARS: Lens<Vec<String>> = Lens::new("local.snackbars", snackbars, snackbars_mut);
/// Column menu.
pub const MENU: Lens<MenuState> = Lens::new("local.menu", menu, menu_mut);
/// Details panel.
pub const DETAILS: Lens<DetailsState> = Lens::new("local.details", details, details_mut);
