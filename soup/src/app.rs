//! Main application state and logic

use std::sync::{Arc, Mutex};

use soup_core::{Difficulty, DisplaySink, Era, PuzzleCategory};

/// Which form row has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Category,
    Era,
    Difficulty,
    ApiKey,
}

/// What the output panel is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputView {
    /// Nothing generated yet; panel hidden behind a hint.
    #[default]
    Hidden,
    /// A generation is in flight.
    Loading,
    /// A riddle document (or error text awaiting its fallback).
    Content(String),
}

/// Display sink shared between the session (and its spawned fallback
/// task) and the render loop.
#[derive(Default)]
pub struct SharedDisplay {
    view: Mutex<OutputView>,
    notice: Mutex<Option<String>>,
}

impl SharedDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current output view.
    pub fn view(&self) -> OutputView {
        self.view.lock().expect("display lock poisoned").clone()
    }

    /// Take a pending notice, if any.
    pub fn take_notice(&self) -> Option<String> {
        self.notice.lock().expect("display lock poisoned").take()
    }
}

impl DisplaySink for SharedDisplay {
    fn loading(&self) {
        *self.view.lock().expect("display lock poisoned") = OutputView::Loading;
    }

    fn content(&self, text: &str) {
        *self.view.lock().expect("display lock poisoned") = OutputView::Content(text.to_string());
    }

    fn notice(&self, text: &str) {
        *self.notice.lock().expect("display lock poisoned") = Some(text.to_string());
    }
}

/// How many ticks (at the 100ms poll interval) the "saved" feedback
/// stays visible. Matches the original's 2 second button flip.
const SAVED_FEEDBACK_TICKS: u8 = 20;

/// Main application state
pub struct App {
    /// Shared view written by the session's display sink.
    pub display: Arc<SharedDisplay>,

    // Form state
    pub focus: Focus,
    pub category_index: usize,
    pub era_index: usize,
    pub difficulty_index: usize,

    // API key input
    key_input: String,
    saved_feedback_ticks: u8,

    // Output
    pub output_scroll: u16,

    // Status
    status_message: Option<String>,
    pub generating: bool,
    pub should_quit: bool,
}

impl App {
    /// Create the application over a shared display.
    pub fn new(display: Arc<SharedDisplay>) -> Self {
        Self {
            display,
            focus: Focus::default(),
            category_index: 0,
            era_index: 0,
            difficulty_index: 0,
            key_input: String::new(),
            saved_feedback_ticks: 0,
            output_scroll: 0,
            status_message: None,
            generating: false,
            should_quit: false,
        }
    }

    /// Currently selected category.
    pub fn selected_category(&self) -> PuzzleCategory {
        PuzzleCategory::ALL[self.category_index]
    }

    /// Currently selected era.
    pub fn selected_era(&self) -> Era {
        Era::ALL[self.era_index]
    }

    /// Currently selected difficulty.
    pub fn selected_difficulty(&self) -> Difficulty {
        Difficulty::ALL[self.difficulty_index]
    }

    /// Move focus to the next form row.
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Category => Focus::Era,
            Focus::Era => Focus::Difficulty,
            Focus::Difficulty => Focus::ApiKey,
            Focus::ApiKey => Focus::Category,
        };
    }

    /// Move focus to the previous form row.
    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Category => Focus::ApiKey,
            Focus::Era => Focus::Category,
            Focus::Difficulty => Focus::Era,
            Focus::ApiKey => Focus::Difficulty,
        };
    }

    /// Step the focused selector forward, wrapping around.
    pub fn select_next(&mut self) {
        match self.focus {
            Focus::Category => {
                self.category_index = (self.category_index + 1) % PuzzleCategory::ALL.len();
            }
            Focus::Era => {
                self.era_index = (self.era_index + 1) % Era::ALL.len();
            }
            Focus::Difficulty => {
                self.difficulty_index = (self.difficulty_index + 1) % Difficulty::ALL.len();
            }
            Focus::ApiKey => {}
        }
    }

    /// Step the focused selector backward, wrapping around.
    pub fn select_prev(&mut self) {
        match self.focus {
            Focus::Category => {
                let len = PuzzleCategory::ALL.len();
                self.category_index = (self.category_index + len - 1) % len;
            }
            Focus::Era => {
                let len = Era::ALL.len();
                self.era_index = (self.era_index + len - 1) % len;
            }
            Focus::Difficulty => {
                let len = Difficulty::ALL.len();
                self.difficulty_index = (self.difficulty_index + len - 1) % len;
            }
            Focus::ApiKey => {}
        }
    }

    /// The API key field's current text.
    pub fn key_input(&self) -> &str {
        &self.key_input
    }

    /// Replace the API key field, e.g. when restoring a saved key.
    pub fn set_key_input(&mut self, key: impl Into<String>) {
        self.key_input = key.into();
    }

    /// Append a typed character to the key field.
    pub fn type_key_char(&mut self, c: char) {
        self.key_input.push(c);
    }

    /// Remove the last character from the key field (unicode-safe).
    pub fn key_backspace(&mut self) {
        self.key_input.pop();
    }

    /// Start the transient "saved" feedback.
    pub fn mark_key_saved(&mut self) {
        self.saved_feedback_ticks = SAVED_FEEDBACK_TICKS;
    }

    /// Whether the "saved" feedback is still showing.
    pub fn key_saved_feedback(&self) -> bool {
        self.saved_feedback_ticks > 0
    }

    /// Scroll the output panel up.
    pub fn scroll_up(&mut self, lines: u16) {
        self.output_scroll = self.output_scroll.saturating_sub(lines);
    }

    /// Scroll the output panel down.
    pub fn scroll_down(&mut self, lines: u16) {
        self.output_scroll = self.output_scroll.saturating_add(lines);
    }

    /// Reset output scroll, e.g. when new content arrives.
    pub fn reset_scroll(&mut self) {
        self.output_scroll = 0;
    }

    /// Tick for transient feedback.
    pub fn tick(&mut self) {
        self.saved_feedback_ticks = self.saved_feedback_ticks.saturating_sub(1);
    }

    /// Move any pending notice from the display into the status line.
    pub fn drain_notice(&mut self) {
        if let Some(notice) = self.display.take_notice() {
            self.set_status(notice);
        }
    }

    /// Set the status line message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Current status line message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_wraps() {
        let mut app = App::new(Arc::new(SharedDisplay::new()));
        app.focus = Focus::Era;
        assert_eq!(app.selected_era(), Era::Ancient);
        app.select_next();
        assert_eq!(app.selected_era(), Era::Modern);
        app.select_next();
        assert_eq!(app.selected_era(), Era::Ancient);
        app.select_prev();
        assert_eq!(app.selected_era(), Era::Modern);
    }

    #[test]
    fn test_focus_cycles_through_all_rows() {
        let mut app = App::new(Arc::new(SharedDisplay::new()));
        let start = app.focus;
        for _ in 0..4 {
            app.focus_next();
        }
        assert_eq!(app.focus, start);
    }

    #[test]
    fn test_saved_feedback_expires() {
        let mut app = App::new(Arc::new(SharedDisplay::new()));
        app.mark_key_saved();
        assert!(app.key_saved_feedback());
        for _ in 0..SAVED_FEEDBACK_TICKS {
            app.tick();
        }
        assert!(!app.key_saved_feedback());
    }

    #[test]
    fn test_notice_moves_to_status() {
        let display = Arc::new(SharedDisplay::new());
        let mut app = App::new(display.clone());

        use soup_core::DisplaySink;
        display.notice("请先配置MiniMax API Key");
        app.drain_notice();
        assert_eq!(app.status_message(), Some("请先配置MiniMax API Key"));
    }
}
