use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Next,             // Advance the focused panel
    Prev,             // Step the focused panel back
    CycleFocus,
    CycleFocusBack,
    TogglePause,      // Pause or resume every panel
    SwapCard,         // Swap the front project card
    Jump(usize),      // 1-9: jump the focused panel to an item
    ShowHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.mode == Mode::Help {
        // Any key exits help
        return Action::ExitMode;
    }

    if let Some(action) = lookup(keymap, key) {
        return action;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::Jump(c as usize - '1' as usize)
        }
        _ => Action::None,
    }
}

/// Look up a key, tolerating terminals that report Shift on symbols like '?'
fn lookup(keymap: &Keymap, key: KeyEvent) -> Option<Action> {
    let binding = KeyBinding::new(key.code, key.modifiers);
    if let Some(action) = keymap.get(&binding) {
        return Some(*action);
    }

    match key.code {
        KeyCode::Char(c) if key.modifiers == KeyModifiers::SHIFT && !c.is_ascii_alphabetic() => {
            keymap.get(&KeyBinding::simple(key.code)).copied()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::AppConfig;
    use std::sync::Arc;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_bindings() {
        let app = App::new(Arc::new(AppConfig::default())).unwrap();
        let keymap = Keymap::default();

        assert_eq!(
            handle_key_event(press(KeyCode::Char('l'), KeyModifiers::NONE), &app, &keymap),
            Action::Next
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char(' '), KeyModifiers::NONE), &app, &keymap),
            Action::TogglePause
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL), &app, &keymap),
            Action::Quit
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_digits_jump() {
        let app = App::new(Arc::new(AppConfig::default())).unwrap();
        let keymap = Keymap::default();

        assert_eq!(
            handle_key_event(press(KeyCode::Char('3'), KeyModifiers::NONE), &app, &keymap),
            Action::Jump(2)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_shifted_symbol_falls_back() {
        let app = App::new(Arc::new(AppConfig::default())).unwrap();
        let keymap = Keymap::default();

        assert_eq!(
            handle_key_event(press(KeyCode::Char('?'), KeyModifiers::SHIFT), &app, &keymap),
            Action::ShowHelp
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_any_key_leaves_help() {
        let mut app = App::new(Arc::new(AppConfig::default())).unwrap();
        app.mode = Mode::Help;
        let keymap = Keymap::default();

        assert_eq!(
            handle_key_event(press(KeyCode::Char('l'), KeyModifiers::NONE), &app, &keymap),
            Action::ExitMode
        );
    }
}
