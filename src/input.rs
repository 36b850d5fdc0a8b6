//! Input handling: translate key presses into game actions
//!
//! Every key press maps to at most one discrete command; holding a key relies
//! on the terminal's own key repeat.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(Action, Vec<KeyCode>)>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        match s.to_lowercase().as_str() {
            "left" => Some(KeyCode::Left),
            "right" => Some(KeyCode::Right),
            "up" => Some(KeyCode::Up),
            "down" => Some(KeyCode::Down),
            "space" => Some(KeyCode::Char(' ')),
            "enter" | "return" => Some(KeyCode::Enter),
            "tab" => Some(KeyCode::Tab),
            "esc" | "escape" => Some(KeyCode::Esc),
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(KeyCode::Char(c)),
                    _ => None,
                }
            }
        }
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let code = Self::parse_key(s);
                if code.is_none() {
                    tracing::warn!("Unknown key name in settings: {:?}", s);
                }
                code
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let keys = &settings.keys;
        Self {
            bindings: vec![
                (Action::MoveLeft, Self::parse_keys(&keys.move_left)),
                (Action::MoveRight, Self::parse_keys(&keys.move_right)),
                (Action::SoftDrop, Self::parse_keys(&keys.soft_drop)),
                (Action::Rotate, Self::parse_keys(&keys.rotate)),
                (Action::HardDrop, Self::parse_keys(&keys.hard_drop)),
                (Action::TogglePause, Self::parse_keys(&keys.pause)),
                (Action::ToggleInfo, Self::parse_keys(&keys.toggle_info)),
                (Action::StartOrRestart, Self::parse_keys(&keys.start)),
                (Action::Quit, Self::parse_keys(&keys.quit)),
            ],
        }
    }

    /// First action bound to `code`
    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(_, codes)| codes.contains(&code))
            .map(|&(action, _)| action)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Maps terminal key events to actions
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
        }
    }

    /// Handle a key event - returns the action it triggers, if any
    pub fn key_down(&self, key: KeyEvent) -> Option<Action> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        self.bindings.action_for(normalize_key(key.code))
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let input = InputHandler::default();
        assert_eq!(input.key_down(press(KeyCode::Left)), Some(Action::MoveLeft));
        assert_eq!(input.key_down(press(KeyCode::Char('d'))), Some(Action::MoveRight));
        assert_eq!(input.key_down(press(KeyCode::Char('s'))), Some(Action::SoftDrop));
        assert_eq!(input.key_down(press(KeyCode::Up)), Some(Action::Rotate));
        assert_eq!(input.key_down(press(KeyCode::Char(' '))), Some(Action::HardDrop));
        assert_eq!(input.key_down(press(KeyCode::Char('p'))), Some(Action::TogglePause));
        assert_eq!(input.key_down(press(KeyCode::Char('h'))), Some(Action::ToggleInfo));
        assert_eq!(input.key_down(press(KeyCode::Enter)), Some(Action::StartOrRestart));
        assert_eq!(input.key_down(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(input.key_down(press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_uppercase_and_ctrl_c() {
        let input = InputHandler::default();
        assert_eq!(input.key_down(press(KeyCode::Char('A'))), Some(Action::MoveLeft));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input.key_down(ctrl_c), Some(Action::Quit));
    }

    #[test]
    fn test_release_is_ignored() {
        let input = InputHandler::default();
        let mut key = press(KeyCode::Left);
        key.kind = KeyEventKind::Release;
        assert_eq!(input.key_down(key), None);
    }

    #[test]
    fn test_custom_bindings_from_settings() {
        let mut settings = Settings::default();
        settings.keys.rotate = vec!["x".to_string(), "bogus".to_string()];
        let input = InputHandler::from_settings(&settings);
        assert_eq!(input.key_down(press(KeyCode::Char('x'))), Some(Action::Rotate));
        assert_eq!(input.key_down(press(KeyCode::Up)), None);
    }
}
