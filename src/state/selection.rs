//! Entry selection.
//!
//! Selection holds copies of entries, so it survives page replacement; relative
//! keyboard moves resolve selected entries against the current page by id.

use crate::model::Entry;
use crate::state::State;
use tracing::debug;

/// Click on an entry.
///
/// Without a modifier the selection becomes exactly `[entry]`. With `toggle`
/// (Ctrl/Shift held) the entry is removed if selected and appended otherwise.
pub fn select_entry(state: &mut State, entry: &Entry, toggle: bool) {
    let selected = &mut state.local.selected_entries;

    if !toggle {
        *selected = vec![entry.clone()];
        return;
    }

    if let Some(index) = selected.iter().position(|e| e.id == entry.id) {
        selected.remove(index);
    } else {
        selected.push(entry.clone());
    }
}

/// Move the selection by `offset` rows within the current page.
///
/// The move starts from the extreme selected row in the direction of travel. With
/// nothing selected it starts at the top (moving down) or bottom (moving up) and
/// selects that row. The target is clamped to the page.
///
/// With `extend`, every row after the old extreme up to and including the target is
/// appended, keeping the existing selection.
pub fn select_relative(state: &mut State, offset: isize, extend: bool) {
    // Borrow `remote` directly so `local` stays writable.
    let entries = state
        .remote
        .as_ref()
        .map_or(&[][..], |remote| remote.entries.as_slice());
    if entries.is_empty() || offset == 0 {
        return;
    }

    let last = entries.len() - 1;
    let selected_indices: Vec<usize> = state
        .local
        .selected_entries
        .iter()
        .filter_map(|s| entries.iter().position(|e| e.id == s.id))
        .collect();

    let extreme = if offset > 0 {
        selected_indices.iter().copied().max()
    } else {
        selected_indices.iter().copied().min()
    };

    let Some(from) = extreme else {
        let start = if offset > 0 { 0 } else { last };
        let entry = entries[start].clone();
        state.local.selected_entries = vec![entry];
        debug!(index = start, "selection started");
        return;
    };

    let target = from.saturating_add_signed(offset).min(last);

    if !extend {
        let entry = entries[target].clone();
        state.local.selected_entries = vec![entry];
        return;
    }

    let range: Vec<usize> = if target > from {
        (from + 1..=target).collect()
    } else {
        (target..from).rev().collect()
    };

    let additions: Vec<Entry> = range
        .into_iter()
        .map(|i| entries[i].clone())
        .filter(|e| !state.local.selected_entries.iter().any(|s| s.id == e.id))
        .collect();

    debug!(from, target, added = additions.len(), "selection extended");
    state.local.selected_entries.extend(additions);
}

/// Drop every selected entry.
pub fn clear_selection(state: &mut State) {
    state.local.selected_entries.clear();
}

/// Whether `entry` is selected.
pub fn is_selected(state: &State, entry: &Entry) -> bool {
    state.local.selected_entries.iter().any(|e| e.id == entry.id)
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
