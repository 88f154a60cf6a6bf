//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Selection
    /// Select the entry below the current selection. Default: ↓
    SelectNext,
    /// Select the entry above the current selection. Default: ↑
    SelectPrevious,
    /// Move the selection one page step down. Default: Page Down
    SelectPageDown,
    /// Move the selection one page step up. Default: Page Up
    SelectPageUp,
    /// Clear the selection. Default: Esc
    ClearSelection,

    // Pagination
    /// Go to the previous (newer) page. Default: ←
    PreviousPage,
    /// Go to the next (older) page. Default: →
    NextPage,
    /// Go back to the first page. Default: Home
    FirstPage,
    /// Toggle between live and frozen. Default: Space
    ToggleLive,

    // Panels
    /// Open the details panel. Default: Enter
    OpenDetails,
    /// Toggle the details panel. Default: d
    ToggleDetails,
    /// Toggle the column menu. Default: m
    ToggleMenu,

    // Filters and layout
    /// Clear every predicate of the filter. Default: x
    ClearFilter,
    /// Restore the default column layout. Default: r
    ResetLayout,

    // Export
    /// Copy the selected entries as JSON. Default: y / Ctrl+c
    CopySelection,
    /// Save the selected entries as a JSON file. Default: s
    DownloadSelection,

    /// Leave the viewer. Default: q
    Quit,
}

impl KeyAction {
    /// Every action, in help order.
    pub const ALL: [KeyAction; 17] = [
        KeyAction::SelectNext,
        KeyAction::SelectPrevious,
        KeyAction::SelectPageDown,
        KeyAction::SelectPageUp,
        KeyAction::ClearSelection,
        KeyAction::PreviousPage,
        KeyAction::NextPage,
        KeyAction::FirstPage,
        KeyAction::ToggleLive,
        KeyAction::OpenDetails,
        KeyAction::ToggleDetails,
        KeyAction::ToggleMenu,
        KeyAction::ClearFilter,
        KeyAction::ResetLayout,
        KeyAction::CopySelection,
        KeyAction::DownloadSelection,
        KeyAction::Quit,
    ];

    /// Name used in the `[keybindings]` config table.
    pub fn name(self) -> &'static str {
        match self {
            KeyAction::SelectNext => "select_next",
            KeyAction::SelectPrevious => "select_previous",
            KeyAction::SelectPageDown => "select_page_down",
            KeyAction::SelectPageUp => "select_page_up",
            KeyAction::ClearSelection => "clear_selection",
            KeyAction::PreviousPage => "previous_page",
            KeyAction::NextPage => "next_page",
            KeyAction::FirstPage => "first_page",
            KeyAction::ToggleLive => "toggle_live",
            KeyAction::OpenDetails => "open_details",
            KeyAction::ToggleDetails => "toggle_details",
            KeyAction::ToggleMenu => "toggle_menu",
            KeyAction::ClearFilter => "clear_filter",
            KeyAction::ResetLayout => "reset_layout",
            KeyAction::CopySelection => "copy_selection",
            KeyAction::DownloadSelection => "download_selection",
            KeyAction::Quit => "quit",
        }
    }

    /// Parse a config action name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Signed row offset for relative selection moves, given the page step.
    pub fn selection_offset(self, page_step: usize) -> Option<isize> {
        let step = page_step as isize;
        match self {
            KeyAction::SelectNext => Some(1),
            KeyAction::SelectPrevious => Some(-1),
            KeyAction::SelectPageDown => Some(step),
            KeyAction::SelectPageUp => Some(-step),
            _ => None,
        }
    }

    /// Whether Shift/Ctrl variants of this action extend the selection.
    pub fn extends_with_modifier(self) -> bool {
        self.selection_offset(1).is_some()
    }
}
