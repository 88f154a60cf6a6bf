//! Pagination engine.
//!
//! `page_last_ids` is a stack of cursors: element `i` is the `last_id` that
//! produced page `i + 1`. An empty stack is page 1 of a live view. Entries are
//! newest first, so cursors move toward smaller ids as the user pages back in
//! history.
//!
//! The first `next` from a live view seeds the stack with `remote.last_id`, the
//! newest id the server knows, so that "first page" stays pinned to what the user
//! was looking at when they started paging.

use crate::model::EntryId;
use crate::state::{Effect, State};
use tracing::debug;

/// Navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Newest page.
    First,
    /// Newer page.
    Previous,
    /// Older page.
    Next,
}

/// Current 1-based page number.
pub fn current_page(state: &State) -> usize {
    state.local.page_last_ids.len().max(1)
}

/// Whether `navigate(direction)` would do anything.
///
/// `Next` requires evidence of a further page: a full page of results, known
/// global id bounds, and a cursor not already at the oldest entry. `First` and
/// `Previous` require at least two visited pages.
pub fn can_navigate(state: &State, direction: Direction) -> bool {
    match direction {
        Direction::First | Direction::Previous => state.local.page_last_ids.len() >= 2,
        Direction::Next => {
            let Some(remote) = state.remote.as_ref() else {
                return false;
            };

            if let Some(max_results) = remote.filter.max_results {
                if remote.entries.len() < max_results as usize {
                    return false;
                }
            }

            let (Some(first_id), Some(_)) = (remote.first_id, remote.last_id) else {
                return false;
            };

            match state.local.filter.last_id {
                Some(last_id) => last_id > first_id,
                None => true,
            }
        }
    }
}

/// Move through pages, pushing the new cursor when it changed.
///
/// Guarded by [`can_navigate`]: a refused direction leaves `state` untouched.
pub fn navigate(state: &mut State, direction: Direction) -> Effect {
    if !can_navigate(state, direction) {
        debug!(?direction, "navigation refused");
        return Effect::None;
    }

    let stack = &mut state.local.page_last_ids;
    match direction {
        Direction::First => stack.truncate(1),
        Direction::Previous => {
            stack.pop();
        }
        Direction::Next => {
            let remote = state.remote.as_ref();
            if stack.is_empty() {
                stack.push(remote.and_then(|r| r.last_id).unwrap_or(0));
            }
            let oldest_on_page = remote.and_then(|r| r.entries.last()).map(|e| e.id);
            if let Some(id) = oldest_on_page {
                push_cursor(stack, id);
            }
        }
    }

    let Some(&cursor) = state.local.page_last_ids.last() else {
        return Effect::None;
    };

    if state.local.filter.last_id == Some(cursor) {
        return Effect::None;
    }

    state.local.filter.last_id = Some(cursor);
    debug!(?direction, cursor, page = current_page(state), "navigated");
    Effect::push_local(state)
}

/// Push `id` unless it repeats the top of the stack.
fn push_cursor(stack: &mut Vec<EntryId>, id: EntryId) {
    if stack.last() != Some(&id) {
        stack.push(id);
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
