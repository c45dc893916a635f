//! Event handling for the riddle TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Focus};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
    /// Submit the current selector combination for generation.
    Generate,
    /// Persist the API key field.
    SaveKey,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Ignore key release events on platforms that report them
    if key.kind != KeyEventKind::Press {
        return EventResult::Continue;
    }

    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }
    if key.code == KeyCode::Esc {
        return EventResult::Quit;
    }

    match app.focus {
        Focus::ApiKey => handle_key_field(app, key),
        _ => handle_selectors(app, key),
    }
}

/// Handle keys while a selector row is focused
fn handle_selectors(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') => EventResult::Quit,

        // Focus movement
        KeyCode::Tab | KeyCode::Down => {
            app.focus_next();
            EventResult::NeedsRedraw
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focus_prev();
            EventResult::NeedsRedraw
        }

        // Selection
        KeyCode::Left | KeyCode::Char('h') => {
            app.select_prev();
            EventResult::NeedsRedraw
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.select_next();
            EventResult::NeedsRedraw
        }

        // Output scrolling
        KeyCode::Char('j') => {
            app.scroll_down(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') => {
            app.scroll_up(1);
            EventResult::NeedsRedraw
        }
        KeyCode::PageDown => {
            app.scroll_down(10);
            EventResult::NeedsRedraw
        }
        KeyCode::PageUp => {
            app.scroll_up(10);
            EventResult::NeedsRedraw
        }

        // Submit
        KeyCode::Enter | KeyCode::Char('g') => {
            if app.generating {
                app.set_status("正在生成中，请稍候...");
                EventResult::NeedsRedraw
            } else {
                EventResult::Generate
            }
        }

        _ => EventResult::Continue,
    }
}

/// Handle keys while the API key field is focused
fn handle_key_field(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            app.focus_next();
            EventResult::NeedsRedraw
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focus_prev();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => EventResult::SaveKey,
        KeyCode::Backspace => {
            app.key_backspace();
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            app.type_key_char(c);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SharedDisplay;
    use std::sync::Arc;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_enter_on_selector_generates() {
        let mut app = App::new(Arc::new(SharedDisplay::new()));
        assert_eq!(handle_event(&mut app, key(KeyCode::Enter)), EventResult::Generate);
    }

    #[test]
    fn test_enter_while_generating_is_rejected() {
        let mut app = App::new(Arc::new(SharedDisplay::new()));
        app.generating = true;
        assert_eq!(
            handle_event(&mut app, key(KeyCode::Enter)),
            EventResult::NeedsRedraw
        );
        assert!(app.status_message().is_some());
    }

    #[test]
    fn test_typing_into_key_field() {
        let mut app = App::new(Arc::new(SharedDisplay::new()));
        app.focus = Focus::ApiKey;

        handle_event(&mut app, key(KeyCode::Char('s')));
        handle_event(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.key_input(), "sk");

        handle_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.key_input(), "s");

        assert_eq!(handle_event(&mut app, key(KeyCode::Enter)), EventResult::SaveKey);
    }

    #[test]
    fn test_q_types_into_key_field_instead_of_quitting() {
        let mut app = App::new(Arc::new(SharedDisplay::new()));
        app.focus = Focus::ApiKey;
        assert_eq!(
            handle_event(&mut app, key(KeyCode::Char('q'))),
            EventResult::NeedsRedraw
        );
        assert_eq!(app.key_input(), "q");
    }
}
