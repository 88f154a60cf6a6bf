//! Root state tree.
//!
//! `State` is split into `local` (UI preferences and the filter draft, owned by the
//! client) and `remote` (the latest snapshot pushed by the server, never predicted
//! locally).

use crate::config::ResolvedConfig;
use crate::model::{default_columns, Column, Entry, EntryId, Filter};
use serde::Deserialize;

/// Default details panel width in display units.
pub const DEFAULT_DETAILS_WIDTH: f64 = 400.0;

/// Root state. Pure data, no side effects.
///
/// `remote` is `None` until the first server snapshot arrives; the view renders
/// nothing but an empty frame until then.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// User preferences.
    pub local: LocalState,
    /// Last server snapshot.
    pub remote: Option<RemoteState>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            local: LocalState::default(),
            remote: None,
        }
    }
}

impl State {
    /// Initial state seeded from resolved configuration.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut state = Self::default();
        state.local.filter.max_results = Some(config.page_size);
        state.local.details.width = config.details_width;
        state
    }

    /// Entries of the current remote page (empty before the first snapshot).
    pub fn entries(&self) -> &[Entry] {
        self.remote.as_ref().map_or(&[], |remote| remote.entries.as_slice())
    }

    /// Filter the server last acknowledged, if any.
    pub fn remote_filter(&self) -> Option<&Filter> {
        self.remote.as_ref().map(|remote| &remote.filter)
    }

    /// Whether the server has echoed back the current local draft.
    pub fn is_filter_acknowledged(&self) -> bool {
        self.remote_filter() == Some(&self.local.filter)
    }
}

/// Client-owned UI state.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalState {
    /// Column menu.
    pub menu: MenuState,
    /// Details panel.
    pub details: DetailsState,
    /// Column layout.
    pub table: TableState,
    /// Editable draft, pushed to the server on every query-relevant change.
    pub filter: Filter,
    /// Cursor stack, one `last_id` per visited page; index 0 is the first page.
    pub page_last_ids: Vec<EntryId>,
    /// Selected entries in selection order.
    pub selected_entries: Vec<Entry>,
    /// Transient notification queue, oldest first.
    pub snackbars: Vec<String>,
}

impl Default for LocalState {
    fn default() -> Self {
        Self {
            menu: MenuState::default(),
            details: DetailsState::default(),
            table: TableState::default(),
            filter: Filter::default(),
            page_last_ids: Vec::new(),
            selected_entries: Vec::new(),
            snackbars: Vec::new(),
        }
    }
}

/// Column menu panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    /// Whether the menu is shown.
    pub visible: bool,
}

/// Details side panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailsState {
    /// Whether the panel is shown.
    pub visible: bool,
    /// Panel width, in cells.
    pub width: f64,
}

impl Default for DetailsState {
    fn default() -> Self {
        Self {
            visible: true,
            width: DEFAULT_DETAILS_WIDTH,
        }
    }
}

/// Table layout.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    /// Columns in display order.
    pub columns: Vec<Column>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            columns: default_columns(),
        }
    }
}

/// Snapshot pushed by the server. Replaced wholesale, never merged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteState {
    /// Filter the server applied to produce `entries`.
    pub filter: Filter,
    /// Current page, newest first.
    pub entries: Vec<Entry>,
    /// Smallest id the server knows across all entries.
    pub first_id: Option<EntryId>,
    /// Largest id the server knows across all entries.
    pub last_id: Option<EntryId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_state_has_no_remote_and_live_filter() {
        let state = State::default();
        assert!(state.remote.is_none());
        assert!(state.local.filter.is_live());
        assert!(state.local.page_last_ids.is_empty());
        assert!(state.entries().is_empty());
        assert!(!state.is_filter_acknowledged());
    }

    #[test]
    fn from_config_seeds_page_size_and_details_width() {
        let config = ResolvedConfig {
            page_size: 100,
            details_width: 300.0,
            log_file_path: PathBuf::from("x.log"),
            ..ResolvedConfig::default()
        };

        let state = State::from_config(&config);

        assert_eq!(state.local.filter.max_results, Some(100));
        assert_eq!(state.local.details.width, 300.0);
    }

    #[test]
    fn acknowledged_when_remote_echoes_local_filter() {
        let mut state = State::default();
        state.remote = Some(RemoteState {
            filter: state.local.filter.clone(),
            entries: Vec::new(),
            first_id: None,
            last_id: None,
        });
        assert!(state.is_filter_acknowledged());

        state.local.filter.msg = Some("x".into());
        assert!(!state.is_filter_acknowledged());
    }

    #[test]
    fn remote_state_deserializes_server_push() {
        let json = r#"{
            "filter": {
                "max_results": 50, "last_id": null,
                "entry_timestamp_from": null, "entry_timestamp_to": null,
                "facility": null, "severity": "ERROR",
                "hostname": null, "app_name": null, "procid": null,
                "msgid": null, "msg": null
            },
            "entries": [],
            "first_id": 1,
            "last_id": 10
        }"#;

        let remote: RemoteState = serde_json::from_str(json).unwrap();

        assert_eq!(remote.first_id, Some(1));
        assert_eq!(remote.last_id, Some(10));
        assert_eq!(remote.filter.severity, Some(crate::model::Severity::Error));
    }
}
