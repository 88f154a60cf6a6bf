//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Bindings match on code and modifiers only; key kind and state are ignored so
/// that terminals reporting release/repeat events behave the same.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    bindings: HashMap<(KeyCode, KeyModifiers), KeyAction>,
}

impl KeyBindings {
    /// Bindings with nothing bound.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Look up the action bound to exactly this key.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.code, key.modifiers)).copied()
    }

    /// Resolve a key to an action and whether it extends the selection.
    ///
    /// An exact binding wins. Otherwise Shift or Ctrl on a selection-move key
    /// resolves to the unmodified action in extend mode.
    pub fn resolve(&self, key: KeyEvent) -> Option<(KeyAction, bool)> {
        if let Some(action) = self.get(key) {
            return Some((action, false));
        }

        let extend = KeyModifiers::SHIFT | KeyModifiers::CONTROL;
        if !key.modifiers.intersects(extend) {
            return None;
        }

        let plain = (key.code, key.modifiers.difference(extend));
        self.bindings
            .get(&plain)
            .copied()
            .filter(|action| action.extends_with_modifier())
            .map(|action| (action, true))
    }

    /// Bind `key` to `action`, replacing any previous binding of `key`.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert((key.code, key.modifiers), action);
    }

    /// Remove every key bound to `action`.
    pub fn unbind_action(&mut self, action: KeyAction) {
        self.bindings.retain(|_, bound| *bound != action);
    }

    /// Keys bound to `action`, for help text.
    pub fn keys_for(&self, action: KeyAction) -> Vec<KeyEvent> {
        let mut keys: Vec<KeyEvent> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|((code, modifiers), _)| KeyEvent::new(*code, *modifiers))
            .collect();
        keys.sort_by_key(|k| format!("{:?}{:?}", k.code, k.modifiers));
        keys
    }
}

/// Parse a key spec such as `"j"`, `"pagedown"`, `"ctrl+c"` or `"shift+down"`.
pub fn parse_key(spec: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::NONE;
    let mut parts: Vec<&str> = spec.split('+').map(str::trim).collect();
    let key = parts.pop()?;

    for part in parts {
        modifiers |= match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            _ => return None,
        };
    }

    let code = match key.to_ascii_lowercase().as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };

    Some(KeyEvent::new(code, modifiers))
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        let plain = |code| KeyEvent::new(code, KeyModifiers::NONE);

        // Selection
        bindings.bind(plain(KeyCode::Down), KeyAction::SelectNext);
        bindings.bind(plain(KeyCode::Char('j')), KeyAction::SelectNext);
        bindings.bind(plain(KeyCode::Up), KeyAction::SelectPrevious);
        bindings.bind(plain(KeyCode::Char('k')), KeyAction::SelectPrevious);
        bindings.bind(plain(KeyCode::PageDown), KeyAction::SelectPageDown);
        bindings.bind(plain(KeyCode::PageUp), KeyAction::SelectPageUp);
        bindings.bind(plain(KeyCode::Esc), KeyAction::ClearSelection);

        // Pagination
        bindings.bind(plain(KeyCode::Left), KeyAction::PreviousPage);
        bindings.bind(plain(KeyCode::Right), KeyAction::NextPage);
        bindings.bind(plain(KeyCode::Home), KeyAction::FirstPage);
        bindings.bind(plain(KeyCode::Char(' ')), KeyAction::ToggleLive);

        // Panels
        bindings.bind(plain(KeyCode::Enter), KeyAction::OpenDetails);
        bindings.bind(plain(KeyCode::Char('d')), KeyAction::ToggleDetails);
        bindings.bind(plain(KeyCode::Char('m')), KeyAction::ToggleMenu);

        // Filters and layout
        bindings.bind(plain(KeyCode::Char('x')), KeyAction::ClearFilter);
        bindings.bind(plain(KeyCode::Char('r')), KeyAction::ResetLayout);

        // Export
        bindings.bind(plain(KeyCode::Char('y')), KeyAction::CopySelection);
        bindings.bind(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::CopySelection,
        );
        bindings.bind(plain(KeyCode::Char('s')), KeyAction::DownloadSelection);

        bindings.bind(plain(KeyCode::Char('q')), KeyAction::Quit);

        bindings
    }
}
