//! Filter engine.
//!
//! Derives the filter sent to the server from local edits. `last_id` is owned by
//! pagination and the live/frozen toggle; plain field edits can never touch it.
//!
//! Live/frozen has two readings on purpose:
//! - toggling reads the local draft ([`is_live`]);
//! - frozen styling reads the acknowledged remote filter ([`is_frozen_remote`]),
//!   so it appears one round trip after the toggle.

use crate::model::{timestamp, Entry, Filter, FilterField, FilterValue};
use crate::state::{Effect, State};
use tracing::{debug, warn};

/// Set one filter field on the local draft and push the whole filter.
///
/// `FilterField::LastId` is refused (no-op), as is any value whose kind does not
/// fit the field.
pub fn set_filter_value(state: &mut State, field: FilterField, value: FilterValue) -> Effect {
    if field == FilterField::LastId {
        debug!("ignoring direct last_id edit; owned by pagination");
        return Effect::None;
    }

    if let Err(err) = state.local.filter.set(field, value) {
        warn!(%err, "rejected filter edit");
        return Effect::None;
    }

    debug!(%field, "filter value set");
    Effect::push_local(state)
}

/// Setter bound to one field, for inputs that edit a single filter value.
pub type FilterSetter = Box<dyn Fn(&mut State, FilterValue) -> Effect + Send + Sync>;

/// Build a [`FilterSetter`] for `field`.
pub fn filter_setter(field: FilterField) -> FilterSetter {
    Box::new(move |state, value| set_filter_value(state, field, value))
}

/// Use an entry's receipt time as the lower timestamp bound.
pub fn set_timestamp_from_entry(state: &mut State, entry: &Entry) -> Effect {
    set_filter_value(
        state,
        FilterField::EntryTimestampFrom,
        FilterValue::Timestamp(entry.timestamp),
    )
}

/// Use an entry's receipt time as the upper timestamp bound.
pub fn set_timestamp_to_entry(state: &mut State, entry: &Entry) -> Effect {
    set_filter_value(
        state,
        FilterField::EntryTimestampTo,
        FilterValue::Timestamp(entry.timestamp),
    )
}

/// Change the page size, restricted to `options`.
pub fn set_page_size(state: &mut State, page_size: u32, options: &[u32]) -> Effect {
    if !options.contains(&page_size) {
        debug!(page_size, "page size not offered");
        return Effect::None;
    }
    set_filter_value(state, FilterField::MaxResults, FilterValue::Count(page_size))
}

/// Reset every predicate, keeping page size and cursor, and push.
pub fn clear_filter(state: &mut State) -> Effect {
    state.local.filter = state.local.filter.cleared();
    debug!("filter cleared");
    Effect::push_local(state)
}

/// Freeze on the newest known entry, or return to live.
///
/// Freezing pins `last_id` to `remote.last_id` (0 before any snapshot) and seeds
/// the cursor stack with it. Unfreezing clears both. Asking for the current mode
/// is a no-op.
pub fn set_frozen(state: &mut State, frozen: bool) -> Effect {
    if frozen == !is_live(state) {
        return Effect::None;
    }

    if frozen {
        let pin = state
            .remote
            .as_ref()
            .and_then(|remote| remote.last_id)
            .unwrap_or(0);
        state.local.filter.last_id = Some(pin);
        state.local.page_last_ids = vec![pin];
        debug!(pin, "frozen");
    } else {
        state.local.filter.last_id = None;
        state.local.page_last_ids.clear();
        debug!("live");
    }

    Effect::push_local(state)
}

/// Flip between live and frozen based on the local draft.
pub fn toggle_live(state: &mut State) -> Effect {
    let frozen = is_live(state);
    set_frozen(state, frozen)
}

/// Whether the local draft tracks the newest entries.
pub fn is_live(state: &State) -> bool {
    state.local.filter.is_live()
}

/// Whether the server has acknowledged a pinned cursor.
pub fn is_frozen_remote(state: &State) -> bool {
    state.remote_filter().is_some_and(Filter::is_frozen)
}

/// A predicate currently applied by the server, for display as a removable chip.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveFilter {
    /// Field to clear when the chip is clicked.
    pub field: FilterField,
    /// Chip label.
    pub label: &'static str,
    /// Formatted value.
    pub value: String,
}

/// Predicates of `filter` that are set, in display order.
///
/// Timestamps render as local time. Page size and cursor are not predicates and
/// are never listed.
pub fn active_filters(filter: &Filter) -> Vec<ActiveFilter> {
    const LABELS: [(FilterField, &str); 9] = [
        (FilterField::EntryTimestampFrom, "From"),
        (FilterField::EntryTimestampTo, "To"),
        (FilterField::Facility, "Facility"),
        (FilterField::Severity, "Severity"),
        (FilterField::Hostname, "Hostname"),
        (FilterField::AppName, "App name"),
        (FilterField::Procid, "Proc ID"),
        (FilterField::Msgid, "Msg ID"),
        (FilterField::Msg, "Msg"),
    ];

    LABELS
        .into_iter()
        .filter_map(|(field, label)| {
            let value = match filter.get(field) {
                FilterValue::Null => return None,
                FilterValue::Timestamp(t) => timestamp::to_local_string(t),
                FilterValue::Facility(f) => f.to_string(),
                FilterValue::Severity(s) => s.to_string(),
                FilterValue::Text(text) => text,
                FilterValue::Count(n) => n.to_string(),
                FilterValue::Id(id) => id.to_string(),
            };
            Some(ActiveFilter { field, label, value })
        })
        .collect()
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
