//! UI state machine (pure).
//!
//! All state transitions are pure functions over [`State`] testable without a
//! terminal or a server. Transitions that change query semantics return an
//! [`Effect`] describing the filter the shell must push; they never talk to the
//! remote channel themselves.

pub mod app_state;
pub mod columns;
pub mod drag;
pub mod filter;
pub mod pagination;
pub mod selection;
pub mod snackbar;

// Re-export for convenience
pub use app_state::{DetailsState, LocalState, MenuState, RemoteState, State, TableState};
pub use drag::{ColumnMove, ColumnResize, DetailsResize, Drag};
pub use filter::ActiveFilter;
pub use pagination::Direction;
pub use snackbar::SnackbarQueue;

use crate::model::Filter;

/// Side effect requested by a pure transition.
#[must_use = "a filter push requested by a transition must be delivered to the channel"]
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing to send.
    None,
    /// Send this filter to the remote channel.
    PushFilter(Filter),
}

impl Effect {
    /// Push the current local filter of `state`.
    pub fn push_local(state: &State) -> Self {
        Effect::PushFilter(state.local.filter.clone())
    }

    /// Filter to send, if any.
    pub fn filter(&self) -> Option<&Filter> {
        match self {
            Effect::None => None,
            Effect::PushFilter(filter) => Some(filter),
        }
    }
}
